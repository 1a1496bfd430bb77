//! Built-in brand logo table, used as the thumbnail fallback for URL-only sites.

const BILIBILI_LOGO: &str =
    "https://i0.hdslb.com/bfs/archive/1b3cc078268b6c0bcac3391b75d3a3ede90fdf76.png";

/// Brand name → logo URL. Order is significant: the first matching brand wins.
pub const LOGO_TABLE: &[(&str, &str)] = &[
    ("b站", BILIBILI_LOGO),
    ("bilibili", BILIBILI_LOGO),
    ("哔哩哔哩", BILIBILI_LOGO),
    (
        "知乎",
        "https://static.zhihu.com/heifetz/assets/apple-touch-icon-152.a53ae37b.png",
    ),
    (
        "微博",
        "https://h5.sinaimg.cn/upload/1059/320/2020/06/16/weibo_logo_2020_white.png",
    ),
    (
        "百度",
        "https://www.baidu.com/img/PCtm_d9c8750bed0b3c7d089fa7d55720d6cf.png",
    ),
    (
        "github",
        "https://github.githubassets.com/images/modules/site/social-cards/github-social.png",
    ),
    (
        "抖音",
        "https://lf1-cdn-tos.bytescm.com/obj/static/ies/douyin_web/media/logo-pure.7c95fb62.png",
    ),
    (
        "小红书",
        "https://ci.xiaohongshu.com/5b584f2b-af3e-4c16-a2a4-c64b0d6e2f93",
    ),
    (
        "淘宝",
        "https://img.alicdn.com/imgextra/i1/O1CN01rHzIlP1JlcVnGMDgN_!!6000000001069-2-tps-200-200.png",
    ),
    (
        "京东",
        "https://img10.360buyimg.com/img/jfs/t1/175540/6/19582/4976/60ec3859E0b3aef70/c5d50fa34eb2f8c5.png",
    ),
    (
        "网易",
        "https://static.ws.126.net/f2e/products/post1603/static/images/logo.png",
    ),
    ("腾讯", "https://mat1.gtimg.com/www/icon/favicon2.ico"),
    (
        "qq",
        "https://qzonestyle.gtimg.cn/qzone/qzact/act/external/tiqq/logo.png",
    ),
    ("微信", "https://res.wx.qq.com/a/wx_fed/assets/res/NTI4MWU5.ico"),
    ("豆瓣", "https://img3.doubanio.com/favicon.ico"),
    (
        "优酷",
        "https://img.alicdn.com/tfs/TB1WeJ9Xrj1gK0jSZFuXXcrHpXa-195-195.png",
    ),
    (
        "爱奇艺",
        "https://www.iqiyipic.com/common/fix/site-v4/favicon.ico",
    ),
    (
        "今日头条",
        "https://sf1-cdn-tos.toutiaostatic.com/obj/toutiao-web-fe/tt-fe-next/static/favicon.ico",
    ),
];

/// Picks a logo for a site: first by brand name against `name`, then against the host of `url`.
/// Returns an empty string when nothing matches.
pub fn infer_logo(name: &str, url: &str) -> String {
    lookup(name)
        .or_else(|| lookup(extract_host(url)))
        .unwrap_or_default()
        .to_string()
}

/// Host part of `url`: scheme and `//` stripped, path dropped, leading `www.` removed.
pub fn extract_host(url: &str) -> &str {
    let rest = url.split_once("//").map_or(url, |(_, rest)| rest);
    let host = rest.split('/').next().unwrap_or(rest);
    host.strip_prefix("www.").unwrap_or(host)
}

/// Two-way, case-insensitive substring match against the table; an empty needle never matches.
fn lookup(needle: &str) -> Option<&'static str> {
    if needle.is_empty() {
        return None;
    }
    let needle = needle.to_lowercase();
    LOGO_TABLE.iter().find_map(|(brand, logo)| {
        let brand = brand.to_lowercase();
        (needle.contains(&brand) || brand.contains(&needle)).then_some(*logo)
    })
}

//! Unit tests for SiteResolver.
//!
//! Covers exact-match precedence, first-match fuzzy policy, descriptor synthesis and not-found.

use std::sync::Arc;

use crate::logo::LOGO_TABLE;
use crate::resolver::SiteResolver;
use crate::site::{SiteDescriptor, SiteRegistry};

fn resolver(registry: SiteRegistry) -> SiteResolver {
    SiteResolver::new(Arc::new(registry))
}

fn default_resolver() -> SiteResolver {
    resolver(SiteRegistry::default_sites())
}

#[test]
fn test_exact_match_bilibili() {
    let d = default_resolver().resolve("b站").unwrap();
    assert_eq!(d.url, "https://www.bilibili.com");
    assert_eq!(d.title, "访问b站");
    assert_eq!(d.desc, "点击访问b站官网");
    assert_eq!(d.source_username, "gh_b站");
    assert_eq!(d.source_display_name, "b站");
    assert_eq!(d.thumb, LOGO_TABLE[0].1);
}

#[test]
fn test_exact_match_takes_precedence_over_earlier_fuzzy_candidate() {
    // "知乎" would fuzzy-match "知乎日报" which comes first, but the exact key wins.
    let r = resolver(
        SiteRegistry::new()
            .with_site("知乎日报", "https://daily.zhihu.com")
            .with_site("知乎", "https://www.zhihu.com"),
    );
    assert_eq!(r.resolve("知乎").unwrap().url, "https://www.zhihu.com");
}

#[test]
fn test_exact_match_is_case_sensitive_then_falls_back_to_fuzzy() {
    let r = resolver(SiteRegistry::new().with_site("GitHub", "https://github.com"));
    // Not an exact key, but matches case-insensitively via the fuzzy pass.
    let d = r.resolve("github").unwrap();
    assert_eq!(d.title, "访问GitHub");
    assert_eq!(d.source_username, "gh_github");
}

#[test]
fn test_fuzzy_first_match_wins() {
    let r = resolver(
        SiteRegistry::new()
            .with_site("bilibili", "https://www.bilibili.com")
            .with_site("bilibili live", "https://live.bilibili.com"),
    );
    let d = r.resolve("bili").unwrap();
    assert_eq!(d.url, "https://www.bilibili.com");
    assert_eq!(d.title, "访问bilibili");
}

#[test]
fn test_fuzzy_order_follows_registry_not_length() {
    let r = resolver(
        SiteRegistry::new()
            .with_site("bilibili live", "https://live.bilibili.com")
            .with_site("bilibili", "https://www.bilibili.com"),
    );
    assert_eq!(r.resolve("bili").unwrap().url, "https://live.bilibili.com");
}

#[test]
fn test_fuzzy_keyword_contains_site_name() {
    let d = default_resolver().resolve("打开微博热搜").unwrap();
    assert_eq!(d.url, "https://weibo.com");
    assert_eq!(d.title, "访问微博");
}

#[test]
fn test_bili_without_alias_is_not_found() {
    // None of the default names is a substring of "bili" or vice versa.
    assert!(default_resolver().resolve("bili").is_none());
}

#[test]
fn test_not_found() {
    assert!(default_resolver().resolve("淘宝").is_none());
    assert!(resolver(SiteRegistry::new()).resolve("b站").is_none());
}

#[test]
fn test_full_descriptor_returned_unchanged() {
    let full = SiteDescriptor {
        url: "https://docs.rs".into(),
        title: "Docs".into(),
        desc: String::new(),
        thumb: String::new(),
        source_username: "gh_docs".into(),
        source_display_name: String::new(),
    };
    let r = resolver(SiteRegistry::new().with_site("docs", full.clone()));
    // No normalization and no logo inference for structured entries.
    assert_eq!(r.resolve("docs").unwrap(), full);
    assert_eq!(r.resolve("DOCS").unwrap(), full);
}

#[test]
fn test_entries_with_empty_url_are_skipped() {
    let r = resolver(
        SiteRegistry::new()
            .with_site("bilibili", "")
            .with_site("bilibili tv", "https://www.bilibili.tv"),
    );
    assert_eq!(r.resolve("bilibili").unwrap().url, "https://www.bilibili.tv");
    assert!(resolver(SiteRegistry::new().with_site("x", "")).resolve("x").is_none());
}

#[test]
fn test_url_only_descriptors_are_complete() {
    let r = default_resolver();
    for name in r.registry().names() {
        let d = r.resolve(name).unwrap();
        assert!(!d.url.is_empty());
        assert!(!d.title.is_empty());
        assert!(!d.desc.is_empty());
        assert!(!d.source_username.is_empty());
        assert!(!d.source_display_name.is_empty());
        assert_eq!(d.url, r.registry().get(name).unwrap().url());
    }
}

#[test]
fn test_resolve_does_not_mutate_registry() {
    let r = default_resolver();
    let before = r.registry().clone();
    r.resolve("b站");
    r.resolve("知");
    assert_eq!(r.registry(), &before);
}

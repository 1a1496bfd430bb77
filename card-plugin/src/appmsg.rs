//! appmsg compiler: renders a [`SiteDescriptor`] into the XML card document the gateway expects.
//!
//! The element layout is fixed by the gateway and kept byte-for-byte; only the interpolated
//! values vary, and every one of them is XML-escaped.

use std::borrow::Cow;
use std::fmt::{self, Write};

use thiserror::Error;

use crate::site::SiteDescriptor;

/// appmsg `<type>` for a link card.
pub const LINK_CARD_TYPE: u32 = 5;
/// Thumbnail edge length in pixels.
pub const THUMB_SIZE: u32 = 120;

pub const DEFAULT_TITLE: &str = "访问网站";
pub const DEFAULT_DESC: &str = "点击访问网站";
pub const DEFAULT_DISPLAY_NAME: &str = "网站";

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("failed to render appmsg: {0}")]
    Render(#[from] fmt::Error),
}

/// A compiled, well-formed appmsg XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPayload(String);

impl CardPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CardPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compiles `descriptor` into an appmsg payload. Empty title, desc and display name fall back to defaults.
pub fn compile(descriptor: &SiteDescriptor) -> Result<CardPayload, CompileError> {
    let title = escape_xml(or_default(&descriptor.title, DEFAULT_TITLE));
    let desc = escape_xml(or_default(&descriptor.desc, DEFAULT_DESC));
    let url = escape_xml(&descriptor.url);
    let thumb = escape_xml(&descriptor.thumb);
    let source_username = escape_xml(&descriptor.source_username);
    let source_display_name = escape_xml(or_default(
        &descriptor.source_display_name,
        DEFAULT_DISPLAY_NAME,
    ));

    let mut out = String::with_capacity(1536);
    write!(
        out,
        r#"<appmsg appid="" sdkver="0">
    <title>{title}</title>
    <des>{desc}</des>
    <action />
    <type>{card_type}</type>
    <showtype>0</showtype>
    <soundtype>0</soundtype>
    <mediatagname />
    <messageext />
    <messageaction />
    <content />
    <contentattr>0</contentattr>
    <url>{url}</url>
    <lowurl />
    <dataurl />
    <lowdataurl />
    <appattach>
        <totallen>0</totallen>
        <attachid />
        <emoticonmd5 />
        <fileext />
        <cdnthumburl>{thumb}</cdnthumburl>
        <cdnthumbmd5></cdnthumbmd5>
        <cdnthumblength>0</cdnthumblength>
        <cdnthumbwidth>{size}</cdnthumbwidth>
        <cdnthumbheight>{size}</cdnthumbheight>
        <cdnthumbaeskey></cdnthumbaeskey>
        <aeskey></aeskey>
        <encryver>0</encryver>
    </appattach>
    <extinfo />
    <sourceusername>{source_username}</sourceusername>
    <sourcedisplayname>{source_display_name}</sourcedisplayname>
    <thumburl>{thumb}</thumburl>
    <md5 />
    <statextstr />
    <mmreadershare>
        <itemshowtype>0</itemshowtype>
    </mmreadershare>
</appmsg>"#,
        card_type = LINK_CARD_TYPE,
        size = THUMB_SIZE,
    )?;

    Ok(CardPayload(out))
}

/// Escapes the five XML special characters. Borrows when nothing needs escaping.
pub fn escape_xml(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

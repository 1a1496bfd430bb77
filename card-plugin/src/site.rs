//! Site model: the descriptor a card is built from and the registry of configured sites.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::logo::infer_logo;

/// Normalized description of one site: target URL plus display metadata for the card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDescriptor {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    /// Logo URL; empty means no thumbnail.
    #[serde(default)]
    pub thumb: String,
    #[serde(default, rename = "sourceusername")]
    pub source_username: String,
    #[serde(default, rename = "sourcedisplayname")]
    pub source_display_name: String,
}

impl SiteDescriptor {
    /// Promotes a bare URL configured under `name` to a full descriptor.
    pub fn from_url(name: &str, url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: format!("访问{}", name),
            desc: format!("点击访问{}官网", name),
            thumb: infer_logo(name, url),
            source_username: format!("gh_{}", name.to_lowercase()),
            source_display_name: name.to_string(),
        }
    }
}

/// A registry value: either a bare URL or a fully specified descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SiteEntry {
    UrlOnly(String),
    Full(SiteDescriptor),
}

impl SiteEntry {
    /// Resolves the entry registered under `name` into a descriptor.
    /// `Full` entries are returned as configured; `UrlOnly` entries get synthesized metadata.
    pub fn to_descriptor(&self, name: &str) -> SiteDescriptor {
        match self {
            SiteEntry::UrlOnly(url) => SiteDescriptor::from_url(name, url),
            SiteEntry::Full(descriptor) => descriptor.clone(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            SiteEntry::UrlOnly(url) => url,
            SiteEntry::Full(descriptor) => &descriptor.url,
        }
    }
}

impl From<&str> for SiteEntry {
    fn from(url: &str) -> Self {
        SiteEntry::UrlOnly(url.to_string())
    }
}

impl From<SiteDescriptor> for SiteEntry {
    fn from(descriptor: SiteDescriptor) -> Self {
        SiteEntry::Full(descriptor)
    }
}

/// Configured sites keyed by name, in configuration order. Order decides fuzzy-match ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteRegistry {
    sites: IndexMap<String, SiteEntry>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; re-inserting a name keeps its original position.
    pub fn with_site(mut self, name: impl Into<String>, entry: impl Into<SiteEntry>) -> Self {
        self.sites.insert(name.into(), entry.into());
        self
    }

    /// The five sites written to a fresh config file.
    pub fn default_sites() -> Self {
        Self::new()
            .with_site("b站", "https://www.bilibili.com")
            .with_site("知乎", "https://www.zhihu.com")
            .with_site("抖音", "https://www.douyin.com")
            .with_site("微博", "https://weibo.com")
            .with_site("小红书", "https://www.xiaohongshu.com")
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&SiteEntry> {
        self.sites.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SiteEntry)> {
        self.sites.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl<N: Into<String>, E: Into<SiteEntry>> FromIterator<(N, E)> for SiteRegistry {
    fn from_iter<I: IntoIterator<Item = (N, E)>>(iter: I) -> Self {
        Self {
            sites: iter
                .into_iter()
                .map(|(name, entry)| (name.into(), entry.into()))
                .collect(),
        }
    }
}

//! Site resolution: keyword → [`SiteDescriptor`].
//!
//! An exact, case-sensitive key lookup is tried first. Otherwise registry entries are scanned in
//! configuration order and the first one whose name contains the keyword, or is contained in it
//! (both lowercased), is taken. There is no scoring: the first hit wins.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::site::{SiteDescriptor, SiteEntry, SiteRegistry};

/// Resolves keywords against a read-only [`SiteRegistry`].
#[derive(Debug, Clone)]
pub struct SiteResolver {
    registry: Arc<SiteRegistry>,
}

impl SiteResolver {
    pub fn new(registry: Arc<SiteRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    /// Returns the descriptor for `keyword`, or `None` when no site matches.
    /// Callers reject an empty keyword before calling this.
    #[instrument(skip(self))]
    pub fn resolve(&self, keyword: &str) -> Option<SiteDescriptor> {
        if let Some(descriptor) = self
            .registry
            .get(keyword)
            .and_then(|entry| usable(keyword, entry))
        {
            return Some(descriptor);
        }

        let needle = keyword.to_lowercase();
        for (name, entry) in self.registry.iter() {
            let candidate = name.to_lowercase();
            if !(candidate.contains(&needle) || needle.contains(&candidate)) {
                continue;
            }
            if let Some(descriptor) = usable(name, entry) {
                info!(keyword = %keyword, name = %name, "Fuzzy match");
                return Some(descriptor);
            }
        }

        None
    }
}

/// Descriptor for `entry`, unless it has no URL to point the card at.
fn usable(name: &str, entry: &SiteEntry) -> Option<SiteDescriptor> {
    if entry.url().is_empty() {
        warn!(name = %name, "Site has an empty url, skipped");
        return None;
    }
    Some(entry.to_descriptor(name))
}

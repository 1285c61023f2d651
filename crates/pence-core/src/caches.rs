//! The process-wide cache pair, owned explicitly rather than as global
//! state so the single-writer rule is enforceable and testable.

use std::collections::HashMap;

use pence_domain::{Category, LineItem};
use tracing::info;

use crate::overview::{OverviewCache, OverviewSnapshot};
use crate::page_cache::PageCache;
use crate::Result;

/// Everything a bulk sync produces: the overview series plus every page's
/// items, already translated into domain types.
#[derive(Debug, Clone, Default)]
pub struct SyncSnapshot {
    pub overview: OverviewSnapshot,
    pub pages: HashMap<Category, Vec<LineItem>>,
}

/// The page caches and the overview cache, mutated only by the sync and
/// reconciliation layers.
///
/// All access is assumed to happen on one logical thread (at most one edit
/// form is open at a time), so there is no internal locking. Embedders on a
/// multi-threaded runtime must serialise access externally, e.g. behind a
/// mutex or a single-writer task.
#[derive(Debug, Clone, Default)]
pub struct Caches {
    pages: HashMap<Category, PageCache>,
    pub overview: OverviewCache,
}

impl Caches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all cache state from a sync snapshot in one step, so a
    /// failed translation can never leave the caches half-updated.
    pub fn load(&mut self, snapshot: SyncSnapshot) -> Result<()> {
        let mut overview = OverviewCache::new();
        overview.load(snapshot.overview)?;

        let mut pages: HashMap<Category, PageCache> = HashMap::new();
        for (category, items) in snapshot.pages {
            let cache = pages.entry(category).or_default();
            for item in items {
                cache.insert(item);
            }
        }

        info!(
            pages = pages.len(),
            months = overview.data().map(|d| d.len()).unwrap_or(0),
            "caches loaded from sync"
        );
        self.pages = pages;
        self.overview = overview;
        Ok(())
    }

    /// Forgets everything, forcing the next read through a fresh sync.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.overview.clear();
    }

    pub fn page(&self, category: Category) -> Option<&PageCache> {
        self.pages.get(&category)
    }

    pub fn page_mut(&mut self, category: Category) -> &mut PageCache {
        self.pages.entry(category).or_default()
    }
}

use crate::state::AssetStore;
use crate::url::page_key;
use std::collections::HashSet;
use url::Url;

/// Mutable state of one crawl invocation
///
/// Owned by the crawl controller and passed by `&mut` to every stage. It is
/// created when the crawl starts and dropped when it returns.
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: HashSet<String>,
    assets: AssetStore,
}

impl CrawlState {
    /// Creates empty state for a new crawl
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the page at `url` was already fetched and written
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(&page_key(url))
    }

    /// Marks the page at `url` as visited
    ///
    /// Returns false if it was already visited.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(page_key(url))
    }

    /// Number of visited pages
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// The asset dedup store
    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Mutable access to the asset dedup store
    pub fn assets_mut(&mut self) -> &mut AssetStore {
        &mut self.assets
    }
}

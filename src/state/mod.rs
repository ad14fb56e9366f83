//! State module for tracking crawl progress
//!
//! This module provides the per-crawl state shared by every stage of the mirror.
//!
//! # Components
//!
//! - `CrawlState`: visited pages plus the asset store, owned by the crawl controller
//! - `AssetStore`: maps downloaded asset URLs to their local paths
//! - `PageOutcome`: how a single page task finished

mod asset_store;
mod crawl_state;
mod page_outcome;

// Re-export main types
pub use asset_store::AssetStore;
pub use crawl_state::CrawlState;
pub use page_outcome::PageOutcome;

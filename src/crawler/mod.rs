//! Crawler module for fetching and mirroring pages
//!
//! This module contains the core mirroring logic, including:
//! - HTTP fetching with a fixed timeout and browser-like headers
//! - Internal link rewriting and discovery
//! - The depth-first frontier
//! - Overall crawl coordination
//! - Single-page analysis

mod analyzer;
mod coordinator;
mod fetcher;
mod frontier;
mod links;

pub use analyzer::{analyze, analyze_html};
pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_url, Fetched};
pub use frontier::{Frontier, PageTask};
pub use links::rewrite_links;

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::MirrorError;

/// Runs a complete mirror operation
///
/// This is the main entry point for mirroring a site. It will:
/// 1. Validate the configuration
/// 2. Build the HTTP client
/// 3. Fetch pages depth-first from the root, up to `max-depth`
/// 4. Download assets and rewrite references to local paths
/// 5. Write every page under the output root
///
/// # Arguments
///
/// * `config` - The mirror configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl finished; individual page or asset failures
///   are counted in the summary
/// * `Err(MirrorError)` - Setup failed before any page was fetched
pub async fn crawl(config: Config) -> Result<CrawlSummary, MirrorError> {
    run_crawl(config).await
}

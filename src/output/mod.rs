//! Output module
//!
//! This module handles everything the mirror produces:
//! - Writing pages and assets under the output root
//! - Crawl and analyze summaries and their console rendering

mod stats;
mod writer;

pub use stats::{format_bytes, print_report, print_summary, CrawlSummary, PageReport};
pub use writer::SiteWriter;

//! Crawl and page summaries
//!
//! This module provides the statistics handed back to the caller once a
//! mirror or analyze run finishes, and their console rendering.

use crate::assets::AssetStats;
use crate::state::PageOutcome;
use chrono::{DateTime, Utc};

/// Statistics for one completed mirror run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Root URL the crawl started from
    pub root_url: String,

    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the crawl returned
    pub finished_at: DateTime<Utc>,

    /// Pages fetched, rewritten and written to disk
    pub pages_written: u64,

    /// Pages that could not be fetched or written
    pub pages_failed: u64,

    /// Distinct assets downloaded
    pub assets_downloaded: u64,

    /// Asset references served from an earlier download
    pub assets_reused: u64,

    /// Asset references left pointing at the remote URL
    pub assets_failed: u64,

    /// Total bytes written for pages and assets
    pub bytes_written: u64,
}

impl CrawlSummary {
    /// Creates an empty summary for a crawl starting now
    pub fn start(root_url: &str) -> Self {
        let now = Utc::now();
        Self {
            root_url: root_url.to_string(),
            started_at: now,
            finished_at: now,
            pages_written: 0,
            pages_failed: 0,
            assets_downloaded: 0,
            assets_reused: 0,
            assets_failed: 0,
            bytes_written: 0,
        }
    }

    /// Counts the outcome of one page task
    pub fn record_page(&mut self, outcome: PageOutcome, bytes: u64) {
        if outcome.is_success() {
            self.pages_written += 1;
            self.bytes_written += bytes;
        } else if outcome.is_error() {
            self.pages_failed += 1;
        }
    }

    /// Adds the asset counters of one page
    pub fn record_assets(&mut self, stats: &AssetStats) {
        self.assets_downloaded += stats.downloaded as u64;
        self.assets_reused += stats.reused as u64;
        self.assets_failed += stats.failed as u64;
        self.bytes_written += stats.bytes_written;
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    /// Wall-clock duration of the crawl
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Single-page report produced by the analyze command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// Text of the `<title>` element, if any
    pub title: Option<String>,

    /// Number of `<a href>` elements
    pub anchor_count: usize,

    /// Number of `<img>` elements
    pub image_count: usize,

    /// Number of `<link rel="stylesheet">` elements
    pub stylesheet_count: usize,

    /// Number of `<script>` elements
    pub script_count: usize,

    /// Size of the response body in bytes
    pub byte_size: usize,
}

/// Prints a crawl summary to stdout in a formatted manner
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Mirror Summary ===\n");

    println!("Root: {}", summary.root_url);
    println!(
        "Duration: {:.1}s",
        summary.duration().num_milliseconds() as f64 / 1000.0
    );
    println!();

    println!("Pages:");
    println!("  Written: {}", summary.pages_written);
    println!("  Failed: {}", summary.pages_failed);
    println!();

    println!("Assets:");
    println!("  Downloaded: {}", summary.assets_downloaded);
    println!("  Reused: {}", summary.assets_reused);
    println!("  Failed: {}", summary.assets_failed);
    println!();

    println!("Bytes written: {}", format_bytes(summary.bytes_written));
}

/// Prints an analyze report to stdout
pub fn print_report(url: &str, report: &PageReport) {
    println!("=== Page Analysis ===\n");
    println!("URL: {}", url);
    println!("Title: {}", report.title.as_deref().unwrap_or("(none)"));
    println!("Links: {}", report.anchor_count);
    println!("Images: {}", report.image_count);
    println!("Stylesheets: {}", report.stylesheet_count);
    println!("Scripts: {}", report.script_count);
    println!("Size: {}", format_bytes(report.byte_size as u64));
}

/// Formats a byte count with a binary unit
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

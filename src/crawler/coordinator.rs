//! Crawler coordinator - main mirror orchestration logic
//!
//! This module contains the crawl loop that ties everything together:
//! - Validating the configuration and building the HTTP client
//! - Driving the depth-first frontier
//! - Fetching, asset processing, link rewriting and writing for each page
//! - Collecting the crawl summary
//!
//! Documents are `Rc`-based trees, so the future returned by
//! [`Coordinator::run`] is not `Send`. Await it on the current task
//! (`#[tokio::main]` or `block_on`) instead of spawning it.

use crate::assets::process_assets;
use crate::config::{validate, Config};
use crate::crawler::frontier::{Frontier, PageTask};
use crate::crawler::links::rewrite_links;
use crate::crawler::{build_http_client, fetch_url};
use crate::document::Document;
use crate::output::{CrawlSummary, SiteWriter};
use crate::state::{CrawlState, PageOutcome};
use crate::url::{extract_domain, local_filename, root_host};
use crate::{ConfigError, MirrorError};
use reqwest::Client;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    writer: SiteWriter,
    root: Url,
    root_host: String,
    state: CrawlState,
    summary: CrawlSummary,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Errors
    ///
    /// * `MirrorError::Config` - the configuration failed validation
    /// * `MirrorError::Url` - the root URL has no usable host
    /// * `MirrorError::Client` - the HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, MirrorError> {
        validate(&config)?;

        let root = Url::parse(&config.crawler.root_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("{}: {}", config.crawler.root_url, e))
        })?;
        let root_host = root_host(&root)?;
        let client = build_http_client(&config)?;
        let writer = SiteWriter::new(&config.crawler.output_root);
        let summary = CrawlSummary::start(root.as_str());

        Ok(Self {
            config,
            client,
            writer,
            root,
            root_host,
            state: CrawlState::new(),
            summary,
        })
    }

    /// Visited pages and downloaded assets so far
    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// Runs the crawl to completion and returns its summary
    ///
    /// Page and asset failures are logged and counted; they never stop the
    /// crawl.
    pub async fn run(mut self) -> CrawlSummary {
        tracing::info!(
            "Mirroring {} into {} (max depth {})",
            self.root,
            self.writer.root().display(),
            self.config.crawler.max_depth
        );

        let mut frontier = Frontier::new(PageTask::root(self.root.clone()));
        let mut pages_processed = 0u64;

        while let Some(task) = frontier.pop() {
            let outcome = self.process_page(&task, &mut frontier).await;
            if outcome == PageOutcome::Skipped {
                continue;
            }

            pages_processed += 1;
            if pages_processed % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages processed, {} waiting, {} assets stored",
                    pages_processed,
                    frontier.pending(),
                    self.state.assets().downloaded_count()
                );
            }
        }

        self.summary.finish();
        tracing::info!(
            "Mirror completed: {} pages written, {} failed, {} assets in {:.1}s",
            self.summary.pages_written,
            self.summary.pages_failed,
            self.summary.assets_downloaded,
            self.summary.duration().num_milliseconds() as f64 / 1000.0
        );

        self.summary
    }

    /// Processes a single page task
    ///
    /// This method:
    /// 1. Skips tasks beyond the depth bound or already visited
    /// 2. Fetches the page; a failed page is not marked visited
    /// 3. Drops pages that redirected to another host
    /// 4. Saves non-HTML bodies byte for byte, without parsing or recursion
    /// 5. Parses HTML and marks it visited
    /// 6. Downloads and rewrites assets, if enabled
    /// 7. Rewrites internal links
    /// 8. Writes the serialized page
    /// 9. Schedules unvisited internal links one level deeper
    async fn process_page(&mut self, task: &PageTask, frontier: &mut Frontier) -> PageOutcome {
        if task.depth > self.config.crawler.max_depth || self.state.is_visited(&task.url) {
            return PageOutcome::Skipped;
        }

        tracing::debug!("Processing {} at depth {}", task.url, task.depth);

        let fetched = match fetch_url(&self.client, &task.url).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", task.url, e);
                self.summary.record_page(PageOutcome::FetchFailed, 0);
                return PageOutcome::FetchFailed;
            }
        };

        self.state.mark_visited(&task.url);

        if extract_domain(&fetched.final_url).as_deref() != Some(self.root_host.as_str()) {
            tracing::warn!(
                "Not saving {}: redirected off-site to {}",
                task.url,
                fetched.final_url
            );
            return PageOutcome::LeftSite;
        }

        let page_file = local_filename(&task.url);

        if !fetched.is_html() {
            tracing::debug!("Saving {} as-is ({})", task.url, fetched.mime_type());
            let result = self.writer.write_file(&page_file, &fetched.bytes).await;
            return self.record_write(&task.url, &page_file, result);
        }

        let document = Document::parse(&fetched.text());

        if self.config.crawler.download_assets {
            let stats = process_assets(
                &self.client,
                &document,
                &task.url,
                &page_file,
                &self.writer,
                &mut self.state,
            )
            .await;
            self.summary.record_assets(&stats);
        }

        let links = rewrite_links(&document, &task.url, &page_file, &self.root_host);

        let result = self.write_page(&document, &page_file).await;
        let outcome = self.record_write(&task.url, &page_file, result);

        let unvisited: Vec<Url> = links
            .into_iter()
            .filter(|link| !self.state.is_visited(link))
            .collect();

        if task.depth < self.config.crawler.max_depth {
            tracing::debug!("Found {} new links on {}", unvisited.len(), task.url);
            frontier.push_links(unvisited, task.depth + 1);
        }

        outcome
    }

    async fn write_page(&self, document: &Document, page_file: &str) -> Result<u64, MirrorError> {
        let html = document.to_html()?;
        self.writer.write_file(page_file, html.as_bytes()).await
    }

    fn record_write(
        &mut self,
        url: &Url,
        page_file: &str,
        result: Result<u64, MirrorError>,
    ) -> PageOutcome {
        match result {
            Ok(bytes) => {
                tracing::info!("Saved {} as {}", url, page_file);
                self.summary.record_page(PageOutcome::Written, bytes);
                PageOutcome::Written
            }
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", url, e);
                self.summary.record_page(PageOutcome::WriteFailed, 0);
                PageOutcome::WriteFailed
            }
        }
    }
}

/// Builds a coordinator for `config` and runs it to completion
///
/// # Errors
///
/// Only setup can fail; see [`Coordinator::new`].
pub async fn run_crawl(config: Config) -> Result<CrawlSummary, MirrorError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}

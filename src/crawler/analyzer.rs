//! Single-page analysis
//!
//! Fetches the configured root page and reports what the mirror would find
//! on it, without writing anything.

use crate::config::{validate, Config};
use crate::crawler::{build_http_client, fetch_url};
use crate::output::PageReport;
use crate::{ConfigError, MirrorError};
use scraper::{Html, Selector};
use url::Url;

/// Fetches the root page of `config` and analyzes it
///
/// # Errors
///
/// * `MirrorError::Config` - the configuration is invalid
/// * `MirrorError::Fetch` - the page could not be retrieved
pub async fn analyze(config: &Config) -> Result<PageReport, MirrorError> {
    validate(config)?;

    let root = Url::parse(&config.crawler.root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.crawler.root_url, e)))?;
    let client = build_http_client(config)?;

    tracing::info!("Analyzing {}", root);
    let fetched = fetch_url(&client, &root).await?;

    Ok(analyze_html(&fetched.text(), fetched.bytes.len()))
}

/// Builds a report from raw HTML
///
/// # Example
///
/// ```
/// use sumi_mirror::crawler::analyze_html;
///
/// let html = r#"<html><head><title>Home</title></head><body><a href="/a">A</a></body></html>"#;
/// let report = analyze_html(html, html.len());
/// assert_eq!(report.title.as_deref(), Some("Home"));
/// assert_eq!(report.anchor_count, 1);
/// ```
pub fn analyze_html(html: &str, byte_size: usize) -> PageReport {
    let document = Html::parse_document(html);

    PageReport {
        title: extract_title(&document),
        anchor_count: count(&document, "a[href]"),
        image_count: count(&document, "img"),
        stylesheet_count: count_stylesheets(&document),
        script_count: count(&document, "script"),
        byte_size,
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn count(document: &Html, selector: &str) -> usize {
    Selector::parse(selector)
        .map(|selector| document.select(&selector).count())
        .unwrap_or(0)
}

/// `rel` is a token list, so `rel="alternate stylesheet"` counts too
fn count_stylesheets(document: &Html) -> usize {
    let Ok(selector) = Selector::parse("link[rel]") else {
        return 0;
    };

    document
        .select(&selector)
        .filter(|element| {
            element.value().attr("rel").map_or(false, |rel| {
                rel.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("stylesheet"))
            })
        })
        .count()
}

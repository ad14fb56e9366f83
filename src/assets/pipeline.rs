//! Asset pipeline
//!
//! Scans a parsed page for images, stylesheets, scripts, fonts and inline
//! background images, downloads each distinct asset once, and points the
//! owning attribute at the local copy.

use crate::assets::category::AssetCategory;
use crate::assets::mime::asset_filename;
use crate::assets::style::{find_background_url, StyleUrl};
use crate::crawler::fetch_url;
use crate::document::{Document, Element};
use crate::output::SiteWriter;
use crate::state::{AssetStore, CrawlState};
use crate::url::{is_fetchable, page_key, relative_to, resolve};
use crate::MirrorError;
use reqwest::Client;
use url::Url;

/// One asset reference found in a document
///
/// Created fresh for every scan and dropped once the reference is rewritten.
#[derive(Debug, Clone)]
pub struct AssetReference {
    /// Element that owns the reference
    pub element: Element,
    /// Attribute holding the reference (`src`, `href` or `style`)
    pub attribute: &'static str,
    /// The reference as written in the page
    pub raw_url: String,
    /// Where the downloaded file is stored
    pub category: AssetCategory,
    /// Set when the reference lives inside a `style` attribute
    pub style: Option<StyleUrl>,
}

impl AssetReference {
    /// Points the owning attribute at `path`
    ///
    /// Style references only have their `url(...)` function replaced.
    pub fn rewrite(&self, path: &str) -> bool {
        match &self.style {
            Some(style) => self.element.set_attr(self.attribute, &style.rewrite(path)),
            None => self.element.set_attr(self.attribute, path),
        }
    }
}

/// Counters for one run of the pipeline over one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetStats {
    /// Assets fetched and written during this run
    pub downloaded: usize,
    /// References served from assets downloaded earlier
    pub reused: usize,
    /// References left pointing at the remote URL after a failure
    pub failed: usize,
    /// Bytes written to disk
    pub bytes_written: u64,
}

/// Collects every asset reference in `document`, in document order
///
/// # Scanned references
///
/// | Element | Attribute | Category |
/// |---------|-----------|----------|
/// | `<img>` | `src` | image |
/// | `<link rel="stylesheet">` | `href` | css |
/// | `<link rel="icon">` | `href` | image |
/// | `<link rel="preload" as="font">` | `href` | font |
/// | `<link rel="manifest">` | `href` | other |
/// | `<script>` | `src` | js |
/// | any element with `background`/`background-image: url(...)` | `style` | image |
pub fn scan_assets(document: &Document) -> Vec<AssetReference> {
    let mut references = Vec::new();

    for element in document.select_by(|_| true) {
        if let Some((attribute, category)) = classify_element(&element) {
            if let Some(raw_url) = element.attr(attribute) {
                if !raw_url.trim().is_empty() {
                    references.push(AssetReference {
                        element: element.clone(),
                        attribute,
                        raw_url,
                        category,
                        style: None,
                    });
                }
            }
        }

        if let Some(style) = element.attr("style").as_deref().and_then(find_background_url) {
            references.push(AssetReference {
                element: element.clone(),
                attribute: "style",
                raw_url: style.url.clone(),
                category: AssetCategory::Image,
                style: Some(style),
            });
        }
    }

    references
}

/// Decides which attribute of an element references an asset, and its category
fn classify_element(element: &Element) -> Option<(&'static str, AssetCategory)> {
    match element.tag() {
        "img" => Some(("src", AssetCategory::Image)),
        "script" => Some(("src", AssetCategory::Js)),
        "link" => {
            let category = if element.attr_has_token("rel", "stylesheet") {
                AssetCategory::Css
            } else if element.attr_has_token("rel", "icon") {
                AssetCategory::Image
            } else if element.attr_has_token("rel", "preload")
                && element
                    .attr("as")
                    .map_or(false, |kind| kind.eq_ignore_ascii_case("font"))
            {
                AssetCategory::Font
            } else if element.attr_has_token("rel", "manifest") {
                AssetCategory::Other
            } else {
                return None;
            };
            Some(("href", category))
        }
        _ => None,
    }
}

/// Downloads the assets referenced by a page and rewrites the references
///
/// # Flow per reference
///
/// 1. Resolve against `page_url`; unresolvable or non-http(s) references
///    (`data:`, `blob:`) are left as they are
/// 2. Already downloaded → reuse the recorded path, no request
/// 3. Otherwise fetch, name, write under `assets/<category>/` and record
/// 4. Rewrite the attribute, relative to `page_file`
///
/// A failed fetch or write is logged and leaves the attribute pointing at the
/// remote URL; it never aborts the page.
pub async fn process_assets(
    client: &Client,
    document: &Document,
    page_url: &Url,
    page_file: &str,
    writer: &SiteWriter,
    state: &mut CrawlState,
) -> AssetStats {
    let mut stats = AssetStats::default();

    for reference in scan_assets(document) {
        let absolute = match resolve(&reference.raw_url, page_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping asset reference on {}: {}", page_url, e);
                continue;
            }
        };

        if !is_fetchable(&absolute) {
            continue;
        }

        let key = page_key(&absolute);

        let existing = state.assets().path_for(&key).map(str::to_string);

        let local_path = match existing {
            Some(path) => {
                tracing::debug!("Reusing {} for {}", path, key);
                stats.reused += 1;
                path
            }
            None => {
                let category = reference.category;
                match download_asset(client, &absolute, category, writer, state.assets_mut()).await {
                    Ok((path, bytes)) => {
                        stats.downloaded += 1;
                        stats.bytes_written += bytes;
                        path
                    }
                    Err(e) => {
                        tracing::warn!("Skipping asset {}: {}", key, e);
                        stats.failed += 1;
                        continue;
                    }
                }
            }
        };

        reference.rewrite(&relative_to(page_file, &local_path));
    }

    stats
}

/// Fetches one asset, writes it under its category directory and records it
///
/// Returns the recorded root-relative path and the number of bytes written.
async fn download_asset(
    client: &Client,
    url: &Url,
    category: AssetCategory,
    writer: &SiteWriter,
    store: &mut AssetStore,
) -> Result<(String, u64), MirrorError> {
    let fetched = fetch_url(client, url).await?;

    let filename = asset_filename(url, &fetched.content_type);
    let path = store.unclaimed_path(&category.directory(), &filename);

    let bytes = writer.write_file(&path, &fetched.bytes).await?;
    store.record(&page_key(url), &path);

    tracing::debug!("Saved {} as {}", url, path);
    Ok((path, bytes))
}

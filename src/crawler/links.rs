//! Internal link rewriting
//!
//! Anchors pointing inside the mirrored host are rewritten to the local file
//! of their target, relative to the page that contains them. The targets are
//! reported back so the coordinator can schedule them.

use crate::document::Document;
use crate::url::{is_internal, local_filename, page_key, relative_to, resolve};
use std::collections::HashSet;
use url::Url;

/// Rewrites every internal `<a href>` in `document` and returns the targets
///
/// # Link Handling Rules
///
/// **Rewritten:**
/// - hrefs whose resolved host equals `root_host`; the new value is the
///   target's local file relative to `page_file`, with any `#fragment` kept
///
/// **Left unchanged:**
/// - External hosts
/// - Empty and `#`-only hrefs
/// - `mailto:`, `tel:`, `javascript:` and `data:` hrefs
///
/// The returned targets are resolved from the original hrefs, have their
/// fragment removed, and are deduplicated in document order.
pub fn rewrite_links(
    document: &Document,
    page_url: &Url,
    page_file: &str,
    root_host: &str,
) -> Vec<Url> {
    let mut targets = Vec::new();
    let mut seen = HashSet::new();

    for anchor in document.select("a", "href") {
        let Some(href) = anchor.attr("href") else {
            continue;
        };

        if !is_internal(&href, page_url, root_host) {
            continue;
        }

        let Ok(mut target) = resolve(&href, page_url) else {
            continue;
        };

        let mut local = relative_to(page_file, &local_filename(&target));
        if let Some(fragment) = target.fragment().filter(|f| !f.is_empty()) {
            local.push('#');
            local.push_str(fragment);
        }
        anchor.set_attr("href", &local);

        target.set_fragment(None);
        if seen.insert(page_key(&target)) {
            targets.push(target);
        }
    }

    targets
}

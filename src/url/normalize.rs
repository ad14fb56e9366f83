use crate::url::extract_domain;
use crate::{UrlError, UrlResult};
use url::Url;

/// Href prefixes that never point at another page of the site
const NON_PAGE_PREFIXES: &[&str] = &["mailto:", "tel:", "javascript:", "data:"];

/// Resolves a reference against a base URL
///
/// Absolute references are returned as-is; relative ones are joined onto
/// `base` following standard URL resolution.
///
/// # Errors
///
/// Returns `UrlError::Parse` if neither the reference nor its combination
/// with `base` is a parseable URL.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_mirror::url::resolve;
///
/// let base = Url::parse("http://site.test/blog/post").unwrap();
/// assert_eq!(resolve("../about", &base).unwrap().as_str(), "http://site.test/about");
/// assert_eq!(resolve("/img/a.png", &base).unwrap().as_str(), "http://site.test/img/a.png");
/// ```
pub fn resolve(reference: &str, base: &Url) -> UrlResult<Url> {
    base.join(reference.trim())
        .map_err(|e| UrlError::Parse(format!("'{}' against {}: {}", reference, base, e)))
}

/// Returns true if `href` points at a page on the root host
///
/// Empty hrefs, same-page anchors (`#...`) and `mailto:`, `tel:`,
/// `javascript:` or `data:` links are never internal. Anything that fails to
/// resolve is treated as external rather than as an error.
pub fn is_internal(href: &str, base: &Url, root_host: &str) -> bool {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    let lowered = href.to_ascii_lowercase();
    if NON_PAGE_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        return false;
    }

    match resolve(href, base) {
        Ok(url) => is_fetchable(&url) && extract_domain(&url).as_deref() == Some(root_host),
        Err(_) => false,
    }
}

/// Returns true if the URL uses a scheme the fetcher can retrieve
pub fn is_fetchable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Returns the key a page is tracked under: the URL without its fragment
pub fn page_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_fragment(None);
    key.to_string()
}

use crate::url::is_fetchable;
use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the lowercase host from a URL
///
/// The port is not part of the result, so `http://site.test:8080/` and
/// `http://site.test/` share a host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_mirror::url::extract_domain;
///
/// let url = Url::parse("https://Blog.Example.COM:8080/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Extracts the host every internal link is compared against
///
/// # Errors
///
/// * `UrlError::InvalidScheme` - the URL is not http or https
/// * `UrlError::MissingDomain` - the URL has no host
pub fn root_host(root: &Url) -> UrlResult<String> {
    if !is_fetchable(root) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            root.scheme()
        )));
    }

    extract_domain(root).ok_or(UrlError::MissingDomain)
}

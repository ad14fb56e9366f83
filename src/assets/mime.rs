use crate::url::has_extension;
use url::Url;

/// Filename used when a URL path has no basename (`/` or `/dir/`)
const FALLBACK_BASENAME: &str = "asset";

/// Extensions appended to extension-less asset names, keyed by media type
const MIME_EXTENSIONS: &[(&str, &str)] = &[
    ("text/css", ".css"),
    ("text/javascript", ".js"),
    ("application/javascript", ".js"),
    ("image/jpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/svg+xml", ".svg"),
    ("image/webp", ".webp"),
];

/// Returns the extension (with leading dot) for a media type
///
/// Parameters such as `; charset=utf-8` are ignored. Unknown types give `None`.
pub fn extension_for_mime(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next().unwrap_or("").trim();

    MIME_EXTENSIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(mime))
        .map(|(_, ext)| *ext)
}

/// Derives the local filename for an asset
///
/// The URL path basename is used, with characters outside `[A-Za-z0-9._-]`
/// replaced by `_` so the name reads back identically from an href. If the
/// basename has no extension, one is guessed from `content_type`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_mirror::assets::asset_filename;
///
/// let url = Url::parse("http://site.test/img/logo").unwrap();
/// assert_eq!(asset_filename(&url, "image/png"), "logo.png");
/// ```
pub fn asset_filename(url: &Url, content_type: &str) -> String {
    let basename = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or(FALLBACK_BASENAME);

    let mut filename = sanitize_filename(basename);

    if !has_extension(&filename) {
        if let Some(ext) = extension_for_mime(content_type) {
            filename.push_str(ext);
        }
    }

    filename
}

/// Replaces characters that would not survive an href round trip
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

use url::Url;

/// Filename used for directory-style paths
const INDEX_FILE: &str = "index.html";

/// Derives the local file a page URL is stored under, relative to the output root
///
/// # Rules
///
/// | URL path | Local file |
/// |----------|------------|
/// | `/` or empty | `index.html` |
/// | ends in `/` (`/blog/`) | `blog/index.html` |
/// | no extension (`/about`) | `about.html` |
/// | has an extension (`/docs/a.php`) | `docs/a.php` |
///
/// Query strings and fragments do not take part in the mapping.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_mirror::url::local_filename;
///
/// let url = Url::parse("http://site.test/blog/").unwrap();
/// assert_eq!(local_filename(&url), "blog/index.html");
/// ```
pub fn local_filename(url: &Url) -> String {
    local_filename_for_path(url.path())
}

/// Path-only form of [`local_filename`]
///
/// Idempotent: feeding its output back in returns the same value.
pub fn local_filename_for_path(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');

    if trimmed.is_empty() {
        INDEX_FILE.to_string()
    } else if trimmed.ends_with('/') {
        format!("{}{}", trimmed, INDEX_FILE)
    } else if has_extension(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}.html", trimmed)
    }
}

/// Returns true if the last segment of a `/`-separated path has an extension
///
/// A leading dot (`.well-known`) or a trailing dot (`file.`) does not count.
pub fn has_extension(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or(path);
    match last.rfind('.') {
        Some(idx) => idx > 0 && idx + 1 < last.len(),
        None => false,
    }
}

/// Computes the path from the directory of `from_file` to `to_file`
///
/// Both arguments are `/`-separated paths relative to the same root. The
/// result is what an element inside `from_file` must reference to reach
/// `to_file` once both are on disk.
///
/// # Examples
///
/// ```
/// use sumi_mirror::url::relative_to;
///
/// assert_eq!(relative_to("index.html", "assets/css/site.css"), "assets/css/site.css");
/// assert_eq!(relative_to("blog/index.html", "about.html"), "../about.html");
/// assert_eq!(relative_to("blog/index.html", "blog/post.html"), "post.html");
/// ```
pub fn relative_to(from_file: &str, to_file: &str) -> String {
    let mut from_dir: Vec<&str> = from_file.split('/').collect();
    from_dir.pop();

    let to_parts: Vec<&str> = to_file.split('/').collect();
    let to_dir = &to_parts[..to_parts.len() - 1];

    let common = from_dir
        .iter()
        .zip(to_dir.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::with_capacity(from_dir.len() - common + to_parts.len());
    parts.extend(std::iter::repeat("..").take(from_dir.len() - common));
    parts.extend_from_slice(&to_parts[common..]);
    parts.join("/")
}

//! Inline `style` attribute URL handling
//!
//! Only `background-image` and `background` declarations are considered, and
//! only their first `url(...)` value.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static BACKGROUND_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)background(?:-image)?\s*:[^;]*?(?P<func>url\(\s*['"]?(?P<url>[^'")]+?)['"]?\s*\))"#,
    )
    .expect("background url pattern is valid")
});

/// A `url(...)` found inside a style attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleUrl {
    /// The style attribute text as it was scanned
    pub original: String,
    /// Byte range of the whole `url(...)` function in `original`
    pub range: Range<usize>,
    /// The URL inside the parentheses, quotes and whitespace removed
    pub url: String,
}

impl StyleUrl {
    /// Returns `original` with only the `url(...)` function replaced by
    /// `url('<path>')`
    pub fn rewrite(&self, path: &str) -> String {
        format!(
            "{}url('{}'){}",
            &self.original[..self.range.start],
            path,
            &self.original[self.range.end..]
        )
    }
}

/// Finds the first background URL in a style attribute value
pub fn find_background_url(style: &str) -> Option<StyleUrl> {
    let captures = BACKGROUND_URL.captures(style)?;
    let func = captures.name("func")?;
    let url = captures.name("url")?.as_str().trim();

    if url.is_empty() {
        return None;
    }

    Some(StyleUrl {
        original: style.to_string(),
        range: func.range(),
        url: url.to_string(),
    })
}

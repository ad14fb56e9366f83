//! Asset deduplication store
//!
//! Maps every successfully downloaded asset URL to the path it was written
//! to, so each distinct absolute URL is fetched at most once per crawl.

use std::collections::{HashMap, HashSet};

/// Per-crawl map from absolute asset URL to its local path
///
/// Paths are relative to the output root and always `/`-separated. The set
/// of downloaded URLs is the key set of that map, so a URL counts as
/// downloaded exactly when it has a recorded path.
#[derive(Debug, Default)]
pub struct AssetStore {
    paths: HashMap<String, String>,
    claimed: HashSet<String>,
}

impl AssetStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the local path recorded for `url`
    pub fn path_for(&self, url: &str) -> Option<&str> {
        self.paths.get(url).map(String::as_str)
    }

    /// Number of downloaded assets
    pub fn downloaded_count(&self) -> usize {
        self.paths.len()
    }

    /// Picks a path under `dir` for `filename` that no other asset owns
    ///
    /// Two different URLs can share a basename (`/a/logo.png` and
    /// `/b/logo.png`); the second one gets `logo-1.png`, the third
    /// `logo-2.png`, and so on.
    pub fn unclaimed_path(&self, dir: &str, filename: &str) -> String {
        let candidate = format!("{}/{}", dir, filename);
        if !self.claimed.contains(&candidate) {
            return candidate;
        }

        let (stem, ext) = match filename.rfind('.') {
            Some(idx) if idx > 0 => filename.split_at(idx),
            _ => (filename, ""),
        };

        (1..)
            .map(|n| format!("{}/{}-{}{}", dir, stem, n, ext))
            .find(|candidate| !self.claimed.contains(candidate))
            .unwrap_or(candidate)
    }

    /// Records a successful download of `url` to `path`
    pub fn record(&mut self, url: &str, path: &str) {
        self.claimed.insert(path.to_string());
        self.paths.insert(url.to_string(), path.to_string());
    }
}

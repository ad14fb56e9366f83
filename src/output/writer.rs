//! Filesystem writer for the mirrored tree
//!
//! All paths handed to the writer are `/`-separated and relative to the
//! output root; the writer turns them into platform paths and creates any
//! missing parent directories.

use crate::MirrorError;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

/// Writes pages and assets under the output root
#[derive(Debug, Clone)]
pub struct SiteWriter {
    root: PathBuf,
}

impl SiteWriter {
    /// Creates a writer rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a `/`-separated relative path to a path under the output root
    ///
    /// Each segment is percent-decoded, since a browser resolving the
    /// rewritten href looks for `about us.html`, not `about%20us.html`.
    /// Separators produced by decoding become `_`. Empty, `.` and `..`
    /// segments are dropped so nothing can be written outside the root.
    pub fn local_path(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .map(|segment| {
                percent_decode_str(segment)
                    .decode_utf8_lossy()
                    .replace(['/', '\\'], "_")
            })
            .filter(|segment| !matches!(segment.as_str(), "" | "." | ".."))
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    /// Writes `contents` to `relative`, creating parent directories as needed
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::Write` with the offending path if a directory
    /// cannot be created or the file cannot be written.
    pub async fn write_file(&self, relative: &str, contents: &[u8]) -> Result<u64, MirrorError> {
        let path = self.local_path(relative);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| MirrorError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&path, contents)
            .await
            .map_err(|source| MirrorError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(contents.len() as u64)
    }
}

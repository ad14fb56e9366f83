//! Asset handling module
//!
//! This module contains everything needed to mirror page assets:
//! - Asset categories and their output directories
//! - Filename derivation with MIME-based extension guessing
//! - Inline style `url(...)` extraction
//! - The pipeline that scans, downloads, deduplicates and rewrites

mod category;
mod mime;
mod pipeline;
mod style;

pub use category::{AssetCategory, ASSETS_DIR};
pub use mime::{asset_filename, extension_for_mime};
pub use pipeline::{process_assets, scan_assets, AssetReference, AssetStats};
pub use style::{find_background_url, StyleUrl};

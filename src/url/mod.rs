//! URL handling module for Sumi-Mirror
//!
//! This module resolves references against page URLs, decides which links
//! stay on the mirrored site, and maps URLs to the local files they are
//! written to.

mod domain;
mod local_path;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, root_host};
pub use local_path::{has_extension, local_filename, local_filename_for_path, relative_to};
pub use normalize::{is_fetchable, is_internal, page_key, resolve};

//! Filesystem-style path utilities.
//!
//! This module contains:
//! - Path normalization resolving `.`, `..` and empty segments
//! - A fixed "pathinfo" split into directory, file name and extension
//!
//! Neither touches the filesystem, and neither is meant for URLs
//! (`//host/path`); take the path out of a [`crate::Uri`] first.

pub mod info;
pub mod normalizer;

// Re-export main functionality
pub use info::{path_info, PathInfo};
pub use normalizer::{normalize_path, PathNormalizer};

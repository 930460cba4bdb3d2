//! Package model and matching.
//!
//! This module holds the data model shared across the crate (path specs,
//! installed package records, managed packages) together with the pieces that
//! produce it: the installed-package index, local manifest resolution, and the
//! matcher that intersects the two.

mod index;
mod manifest;
mod matcher;

pub use index::InstalledIndex;
pub use manifest::local_package_name;
pub use matcher::match_packages;

use std::path::PathBuf;

/// A configured local working copy that should replace an installed
/// dependency. Loaded once per run from `studio.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSpec {
    pub path: PathBuf,
}

/// A record from the host dependency manager's installed-package index.
/// Read-only; this tool never writes these back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
    /// Where the dependency manager placed the package, rooted at the project.
    pub install_path: PathBuf,
    /// Canonical distribution source, when the index records one.
    pub source_url: Option<String>,
}

/// An installed package paired with the local working copy that should be
/// linked in its place. Created fresh each run; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedPackage {
    pub name: String,
    pub install_path: PathBuf,
    pub source_path: PathBuf,
}

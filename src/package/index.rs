//! Read-only view of the host's installed-package records.
//!
//! Composer writes the authoritative record of what is installed to
//! `vendor/composer/installed.json`. Composer 2 wraps the package list in a
//! `{"packages": [...]}` object with install paths relative to
//! `vendor/composer/`; Composer 1 wrote a bare array without install paths.
//! Both shapes are accepted here.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;
use crate::runtime::path::normalize_path;

use super::InstalledPackage;

#[derive(Deserialize)]
#[serde(untagged)]
enum InstalledJson {
    Wrapped { packages: Vec<RawPackage> },
    Bare(Vec<RawPackage>),
}

#[derive(Deserialize)]
struct RawPackage {
    name: String,
    version: String,
    #[serde(rename = "install-path")]
    install_path: Option<PathBuf>,
    dist: Option<Dist>,
}

#[derive(Deserialize)]
struct Dist {
    url: Option<String>,
}

/// The set of currently installed packages, in index order.
pub struct InstalledIndex {
    packages: Vec<InstalledPackage>,
}

impl InstalledIndex {
    /// Load `vendor/composer/installed.json` under the given project root.
    ///
    /// Fails if the file is missing or malformed; without the index there is
    /// nothing to reconcile.
    pub fn load<R: Runtime>(runtime: &R, project_root: &Path) -> Result<Self> {
        let index_path = project_root
            .join("vendor")
            .join("composer")
            .join("installed.json");
        let content = runtime
            .read_to_string(&index_path)
            .with_context(|| format!("Failed to read installed package index {:?}", index_path))?;
        let raw: InstalledJson = serde_json::from_str(&content)
            .with_context(|| format!("Malformed installed package index {:?}", index_path))?;

        let raw_packages = match raw {
            InstalledJson::Wrapped { packages } => packages,
            InstalledJson::Bare(packages) => packages,
        };

        // install-path entries are relative to vendor/composer/
        let base = project_root.join("vendor").join("composer");
        let packages = raw_packages
            .into_iter()
            .map(|package| {
                let install_path = match package.install_path {
                    Some(path) if path.is_absolute() => path,
                    Some(path) => normalize_path(&base.join(path)),
                    None => project_root.join("vendor").join(&package.name),
                };
                InstalledPackage {
                    name: package.name,
                    version: package.version,
                    install_path,
                    source_url: package.dist.and_then(|d| d.url),
                }
            })
            .collect();

        Ok(Self { packages })
    }

    /// Installed packages in the order the index lists them.
    pub fn packages(&self) -> &[InstalledPackage] {
        &self.packages
    }
}

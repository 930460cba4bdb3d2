//! Studio configuration (`studio.json`).
//!
//! The configuration is a project-relative JSON file listing the local paths
//! whose packages should be linked in place of their installed copies:
//!
//! ```json
//! { "paths": ["../packages/widget", "../libs/*"] }
//! ```

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::package::PathSpec;
use crate::runtime::Runtime;
use crate::runtime::path::normalize_path;

/// Default configuration file name, resolved against the project root.
pub const CONFIG_FILE: &str = "studio.json";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StudioConfig {
    pub paths: Vec<String>,
}

impl StudioConfig {
    /// Load the configuration from `path`.
    ///
    /// A missing or malformed file is a hard error: nothing may be mutated on
    /// a run whose configuration cannot be read.
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime
            .read_to_string(path)
            .with_context(|| format!("Failed to read studio config {:?}", path))?;
        let config: StudioConfig = serde_json::from_str(&content)
            .with_context(|| format!("Malformed studio config {:?}", path))?;
        Ok(config)
    }

    /// Expand the configured entries into concrete path specs.
    ///
    /// Relative entries and glob patterns are resolved against the project
    /// root and normalized lexically (relative links are computed from these
    /// paths later, so `..` components must not survive). Glob entries expand
    /// to every matching directory (in the glob crate's sorted traversal
    /// order); an entry that matches nothing simply contributes no specs.
    /// Entry order is preserved.
    pub fn path_specs(&self, project_root: &Path) -> Vec<PathSpec> {
        let mut specs = Vec::new();
        for entry in &self.paths {
            let full = if Path::new(entry).is_absolute() {
                PathBuf::from(entry)
            } else {
                project_root.join(entry)
            };

            if entry.contains(['*', '?', '[']) {
                let pattern = full.to_string_lossy();
                match glob::glob(&pattern) {
                    Ok(matches) => {
                        for path in matches.flatten() {
                            if path.is_dir() {
                                specs.push(PathSpec {
                                    path: normalize_path(&path),
                                });
                            }
                        }
                    }
                    Err(e) => warn!("Ignoring invalid glob pattern {:?}: {}", entry, e),
                }
            } else {
                specs.push(PathSpec {
                    path: normalize_path(&full),
                });
            }
        }
        specs
    }
}

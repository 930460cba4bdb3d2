//! Local package manifest resolution.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::runtime::Runtime;

#[derive(Deserialize)]
struct Manifest {
    name: String,
}

/// Resolve the declared package name for a local working copy by reading the
/// `name` field of its `composer.json`.
pub fn local_package_name<R: Runtime>(runtime: &R, dir: &Path) -> Result<String> {
    let manifest_path = dir.join("composer.json");
    let content = runtime
        .read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read manifest {:?}", manifest_path))?;
    let manifest: Manifest = serde_json::from_str(&content)
        .with_context(|| format!("Malformed manifest {:?}", manifest_path))?;
    Ok(manifest.name)
}

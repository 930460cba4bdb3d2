//! Command implementations, one module per subcommand.

pub mod link;
pub mod unlink;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{CONFIG_FILE, StudioConfig};
use crate::package::{InstalledIndex, ManagedPackage, match_packages};
use crate::runtime::Runtime;

/// Resolve the project root and produce the managed-package set for this run.
///
/// Everything here is read-only; any error aborts before a single filesystem
/// mutation happens.
pub(crate) fn managed_packages<R: Runtime>(
    runtime: &R,
    project_root: &Path,
    config_path: Option<PathBuf>,
) -> Result<(PathBuf, Vec<ManagedPackage>)> {
    let root = runtime
        .canonicalize(project_root)
        .with_context(|| format!("Project root {:?} does not exist", project_root))?;

    let config_path = config_path.unwrap_or_else(|| root.join(CONFIG_FILE));
    let config = StudioConfig::load(runtime, &config_path)?;
    let specs = config.path_specs(&root);

    let index = InstalledIndex::load(runtime, &root)?;
    let managed = match_packages(runtime, index.packages(), &specs);

    Ok((root, managed))
}

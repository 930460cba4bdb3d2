//! `studio unlink` - remove managed symlinks and restore original contents.

use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

use crate::engine::LinkEngine;
use crate::runtime::Runtime;

pub fn run<R: Runtime>(
    runtime: &R,
    project_root: &Path,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (root, managed) = super::managed_packages(runtime, project_root, config_path)?;
    if managed.is_empty() {
        info!("No installed packages match the configured paths");
        return Ok(());
    }

    let engine = LinkEngine::new(runtime, &root);
    let summary = engine.unlink(&managed);

    eprintln!(
        "[studio] Unlinked {} package(s), {} not linked, {} failed",
        summary.changed, summary.skipped, summary.failed
    );
    Ok(())
}

//! `studio link` - symlink managed packages to their local working copies.

use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

use crate::engine::LinkEngine;
use crate::runtime::Runtime;

pub fn run<R: Runtime>(
    runtime: &R,
    project_root: &Path,
    config_path: Option<PathBuf>,
    preserve: bool,
) -> Result<()> {
    let (root, managed) = super::managed_packages(runtime, project_root, config_path)?;
    if managed.is_empty() {
        info!("No installed packages match the configured paths");
        return Ok(());
    }

    let engine = LinkEngine::new(runtime, &root);
    let summary = engine.link(&managed, preserve);

    eprintln!(
        "[studio] Linked {} package(s), {} already linked, {} failed",
        summary.changed, summary.skipped, summary.failed
    );
    Ok(())
}

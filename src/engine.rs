//! The link/unlink state machine for managed packages.
//!
//! A managed package's install path is in one of three states, inferred from
//! the filesystem: a real vendored directory, a symlink, or a symlink with a
//! backup slot. `link` drives the first into one of the latter two; `unlink`
//! reverses it. Both are idempotent, and both isolate failures to the package
//! they occur on so one broken package never blocks the rest of the batch.

use anyhow::{Context, Result, bail};
use log::{debug, warn};
use std::path::Path;

use crate::backup::BackupStore;
use crate::package::ManagedPackage;
use crate::runtime::{Runtime, is_path_under, relative_symlink_path};

/// Outcome counts for one batch transition.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LinkSummary {
    /// Packages whose state actually changed.
    pub changed: usize,
    /// Packages already in the requested state.
    pub skipped: usize,
    /// Packages whose transition failed.
    pub failed: usize,
}

pub struct LinkEngine<'a, R: Runtime> {
    runtime: &'a R,
    backups: BackupStore<'a, R>,
}

impl<'a, R: Runtime> LinkEngine<'a, R> {
    pub fn new(runtime: &'a R, project_root: &Path) -> Self {
        Self {
            runtime,
            backups: BackupStore::new(runtime, project_root),
        }
    }

    /// Replace each managed package's vendored contents with a symlink to its
    /// local working copy. With `preserve` the vendored contents move into a
    /// backup slot first; without it they are deleted, along with any stale
    /// slot from an earlier preserving run.
    pub fn link(&self, managed: &[ManagedPackage], preserve: bool) -> LinkSummary {
        let mut summary = LinkSummary::default();
        for package in managed {
            match self.link_one(package, preserve) {
                Ok(true) => summary.changed += 1,
                Ok(false) => summary.skipped += 1,
                Err(e) => {
                    summary.failed += 1;
                    eprintln!("[studio] Failed to link {}: {:#}", package.name, e);
                }
            }
        }
        summary
    }

    /// Remove each managed package's symlink and restore the original
    /// contents from its backup slot when one exists. Without a slot the
    /// install path is left absent for the next dependency install to
    /// repopulate.
    pub fn unlink(&self, managed: &[ManagedPackage]) -> LinkSummary {
        let mut summary = LinkSummary::default();
        for package in managed {
            match self.unlink_one(package) {
                Ok(true) => summary.changed += 1,
                Ok(false) => summary.skipped += 1,
                Err(e) => {
                    summary.failed += 1;
                    eprintln!("[studio] Failed to unlink {}: {:#}", package.name, e);
                }
            }
        }
        summary
    }

    fn link_one(&self, package: &ManagedPackage, preserve: bool) -> Result<bool> {
        let dest = &package.install_path;

        if self.runtime.is_symlink(dest) {
            // Already transitioned; linking is idempotent.
            match self.runtime.resolve_link(dest) {
                Ok(target) if is_path_under(&target, &package.source_path) => {
                    debug!("{} is already linked to {:?}", package.name, target);
                }
                Ok(target) => warn!(
                    "{} is a symlink to {:?}, expected {:?}; leaving it alone",
                    package.name, target, package.source_path
                ),
                Err(e) => warn!(
                    "{}: cannot read existing symlink at {:?}: {:#}",
                    package.name, dest, e
                ),
            }
            return Ok(false);
        }

        // Fail before touching the vendored copy when the source is gone.
        if !self.runtime.is_dir(&package.source_path) {
            bail!("Local path {:?} does not exist", package.source_path);
        }

        if self.runtime.is_dir(dest) {
            if preserve {
                self.backups.save(&package.name, dest)?;
            } else {
                // A slot left behind by an earlier preserving run would go
                // stale once the vendored copy it mirrors is deleted.
                self.backups.discard(&package.name)?;
                self.runtime
                    .remove_dir_all(dest)
                    .with_context(|| format!("Failed to remove vendored contents at {:?}", dest))?;
            }
        }

        if let Some(parent) = dest.parent() {
            self.runtime
                .create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directory {:?}", parent))?;
        }
        let target = relative_symlink_path(dest, &package.source_path)
            .unwrap_or_else(|| package.source_path.clone());
        self.runtime
            .symlink(&target, dest)
            .with_context(|| format!("Failed to create symlink at {:?}", dest))?;

        eprintln!(
            "[studio] Creating symlink to {} for package {}",
            package.source_path.display(),
            package.name
        );
        Ok(true)
    }

    fn unlink_one(&self, package: &ManagedPackage) -> Result<bool> {
        let dest = &package.install_path;

        if !self.runtime.is_symlink(dest) {
            debug!("{} is not symlinked; nothing to do", package.name);
            return Ok(false);
        }

        // Remove the link file itself, never its target.
        self.runtime
            .remove_symlink(dest)
            .with_context(|| format!("Failed to remove symlink at {:?}", dest))?;

        if self.backups.has(&package.name) {
            self.backups.restore(&package.name, dest)?;
            eprintln!(
                "[studio] Restored original contents of package {}",
                package.name
            );
        } else {
            // No slot means the package was linked without preservation; the
            // next dependency install recreates the vendored copy.
            eprintln!("[studio] Removed symlink for package {}", package.name);
        }
        Ok(true)
    }
}

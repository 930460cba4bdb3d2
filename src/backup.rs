//! Backup slots for original vendored package contents.
//!
//! Replacing a vendored directory with a symlink destroys the vendored copy,
//! so before the first link transition the contents are preserved in a hidden
//! sidecar directory at the project root. The presence of a slot is itself the
//! durable record that a restore is available. Package names carry a vendor
//! namespace ("acme/widget"), so slots nest one level under the sidecar root.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Name of the sidecar directory holding backup slots.
pub const STUDIO_DIR: &str = ".studio";

pub struct BackupStore<'a, R: Runtime> {
    runtime: &'a R,
    root: PathBuf,
}

impl<'a, R: Runtime> BackupStore<'a, R> {
    /// Create a store rooted at `<project_root>/.studio`. The directory is
    /// created lazily on the first save.
    pub fn new(runtime: &'a R, project_root: &Path) -> Self {
        Self {
            runtime,
            root: project_root.join(STUDIO_DIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Whether a backup slot exists for `name`.
    pub fn has(&self, name: &str) -> bool {
        self.runtime.is_dir(&self.slot(name))
    }

    /// Preserve `source_dir` in the slot for `name`, then remove the
    /// original. The copy completes before anything is deleted, so an
    /// interrupted save never loses the vendored contents.
    pub fn save(&self, name: &str, source_dir: &Path) -> Result<()> {
        if !self.runtime.is_dir(source_dir) {
            bail!("Cannot back up {}: {:?} is not a directory", name, source_dir);
        }
        let slot = self.slot(name);
        if let Some(parent) = slot.parent() {
            self.runtime
                .create_dir_all(parent)
                .with_context(|| format!("Failed to create backup directory {:?}", parent))?;
        }
        self.runtime
            .copy_dir_all(source_dir, &slot)
            .with_context(|| format!("Failed to back up {} to {:?}", name, slot))?;
        self.runtime
            .remove_dir_all(source_dir)
            .with_context(|| format!("Failed to remove original contents at {:?}", source_dir))?;
        Ok(())
    }

    /// Move the slot's contents back to `dest_dir` and release the slot.
    /// Fails if no slot exists for `name`.
    pub fn restore(&self, name: &str, dest_dir: &Path) -> Result<()> {
        let slot = self.slot(name);
        if !self.runtime.is_dir(&slot) {
            bail!("No backup slot for {}", name);
        }
        self.runtime
            .copy_dir_all(&slot, dest_dir)
            .with_context(|| format!("Failed to restore {} to {:?}", name, dest_dir))?;
        self.runtime
            .remove_dir_all(&slot)
            .with_context(|| format!("Failed to release backup slot {:?}", slot))?;
        self.prune_namespace(&slot);
        Ok(())
    }

    /// Drop a stale slot, if any. Used when a non-preserving link would
    /// otherwise leave an orphaned backup behind.
    pub fn discard(&self, name: &str) -> Result<()> {
        let slot = self.slot(name);
        if self.runtime.is_dir(&slot) {
            self.runtime
                .remove_dir_all(&slot)
                .with_context(|| format!("Failed to discard backup slot {:?}", slot))?;
            self.prune_namespace(&slot);
        }
        Ok(())
    }

    // Remove the vendor-namespace directory once its last slot is gone.
    fn prune_namespace(&self, slot: &Path) {
        if let Some(namespace) = slot.parent()
            && namespace != self.root
            && let Ok(entries) = self.runtime.read_dir(namespace)
            && entries.is_empty()
        {
            let _ = self.runtime.remove_dir_all(namespace);
        }
    }
}

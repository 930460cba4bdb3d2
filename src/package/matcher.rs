//! Intersects the installed-package index with the configured path specs.

use log::{debug, warn};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::runtime::Runtime;

use super::{InstalledPackage, ManagedPackage, PathSpec, local_package_name};

/// Pair installed packages with the local working copies that should replace
/// them. A spec matches any installed version of a same-named package.
///
/// Specs are folded into a name lookup in configuration order, so when two
/// specs resolve to the same package name the later one wins. A spec whose
/// package name cannot be resolved is skipped with a warning; installed
/// packages without a matching spec are dropped silently. The result follows
/// the order of the installed index.
pub fn match_packages<R: Runtime>(
    runtime: &R,
    installed: &[InstalledPackage],
    specs: &[PathSpec],
) -> Vec<ManagedPackage> {
    let mut by_name: HashMap<String, PathBuf> = HashMap::new();
    for spec in specs {
        match local_package_name(runtime, &spec.path) {
            Ok(name) => {
                if let Some(previous) = by_name.insert(name.clone(), spec.path.clone()) {
                    debug!(
                        "Path {:?} overrides {:?} for package {}",
                        spec.path, previous, name
                    );
                }
            }
            Err(e) => warn!("Skipping managed path {:?}: {:#}", spec.path, e),
        }
    }

    installed
        .iter()
        .filter_map(|package| {
            by_name.get(&package.name).map(|source| ManagedPackage {
                name: package.name.clone(),
                install_path: package.install_path.clone(),
                source_path: source.clone(),
            })
        })
        .collect()
}

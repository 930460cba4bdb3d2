use assert_cmd::Command;
use assert_cmd::cargo;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Scaffold a Composer-style project under `base/project`: an installed
/// package index, a vendored directory per package, and a studio.json listing
/// the given managed paths.
fn scaffold_project(base: &Path, packages: &[(&str, &str)], managed_paths: &[&str]) -> PathBuf {
    let project = base.join("project");

    let records: Vec<String> = packages
        .iter()
        .map(|(name, version)| {
            format!(
                r#"{{"name": "{}", "version": "{}", "install-path": "../{}"}}"#,
                name, version, name
            )
        })
        .collect();
    write_file(
        &project.join("vendor/composer/installed.json"),
        &format!(r#"{{"packages": [{}]}}"#, records.join(", ")),
    );

    for (name, _) in packages {
        write_file(
            &project.join("vendor").join(name).join("file.txt"),
            "original content",
        );
    }

    let entries: Vec<String> = managed_paths.iter().map(|p| format!(r#""{}""#, p)).collect();
    write_file(
        &project.join("studio.json"),
        &format!(r#"{{"paths": [{}]}}"#, entries.join(", ")),
    );

    project
}

/// Create a local working copy at `base/<rel>` declaring `name`.
fn local_package(base: &Path, rel: &str, name: &str) {
    write_file(
        &base.join(rel).join("composer.json"),
        &format!(r#"{{"name": "{}"}}"#, name),
    );
}

fn studio() -> Command {
    Command::new(cargo::cargo_bin!("studio"))
}

#[test]
fn test_link_then_unlink_round_trip() {
    let dir = tempdir().unwrap();
    let project = scaffold_project(
        dir.path(),
        &[("acme/widget", "1.0.0")],
        &["../packages/widget"],
    );
    local_package(dir.path(), "packages/widget", "acme/widget");

    let install = project.join("vendor/acme/widget");

    studio()
        .arg("link")
        .arg("--project-root")
        .arg(&project)
        .assert()
        .success()
        .stderr(predicates::str::contains("acme/widget"));

    // The vendored directory became a relative symlink into the working copy
    assert!(install.is_symlink());
    let target = fs::read_link(&install).unwrap();
    assert_eq!(target, PathBuf::from("../../../packages/widget"));
    assert!(install.join("composer.json").exists());

    // The original contents moved into the backup slot
    assert_eq!(
        fs::read_to_string(project.join(".studio/acme/widget/file.txt")).unwrap(),
        "original content"
    );

    studio()
        .arg("unlink")
        .arg("--project-root")
        .arg(&project)
        .assert()
        .success()
        .stderr(predicates::str::contains("acme/widget"));

    // Vendored again, byte-identical, with the slot released
    assert!(!install.is_symlink());
    assert!(install.is_dir());
    assert_eq!(
        fs::read_to_string(install.join("file.txt")).unwrap(),
        "original content"
    );
    assert!(!project.join(".studio/acme/widget").exists());
}

#[test]
fn test_link_is_idempotent_across_invocations() {
    let dir = tempdir().unwrap();
    let project = scaffold_project(
        dir.path(),
        &[("acme/widget", "1.0.0")],
        &["../packages/widget"],
    );
    local_package(dir.path(), "packages/widget", "acme/widget");

    let install = project.join("vendor/acme/widget");

    for _ in 0..2 {
        studio()
            .arg("link")
            .arg("--project-root")
            .arg(&project)
            .assert()
            .success();
    }

    assert!(install.is_symlink());
    // The slot still holds the one original copy
    assert_eq!(
        fs::read_to_string(project.join(".studio/acme/widget/file.txt")).unwrap(),
        "original content"
    );
}

#[test]
fn test_unlink_on_vendored_project_is_noop() {
    let dir = tempdir().unwrap();
    let project = scaffold_project(
        dir.path(),
        &[("acme/widget", "1.0.0")],
        &["../packages/widget"],
    );
    local_package(dir.path(), "packages/widget", "acme/widget");

    let install = project.join("vendor/acme/widget");

    studio()
        .arg("unlink")
        .arg("--project-root")
        .arg(&project)
        .assert()
        .success();

    assert!(install.is_dir());
    assert_eq!(
        fs::read_to_string(install.join("file.txt")).unwrap(),
        "original content"
    );
}

#[test]
fn test_link_no_backup_then_unlink_leaves_path_absent() {
    let dir = tempdir().unwrap();
    let project = scaffold_project(
        dir.path(),
        &[("acme/widget", "1.0.0")],
        &["../packages/widget"],
    );
    local_package(dir.path(), "packages/widget", "acme/widget");

    let install = project.join("vendor/acme/widget");

    studio()
        .arg("link")
        .arg("--no-backup")
        .arg("--project-root")
        .arg(&project)
        .assert()
        .success();

    assert!(install.is_symlink());
    assert!(!project.join(".studio").join("acme/widget").exists());

    studio()
        .arg("unlink")
        .arg("--project-root")
        .arg(&project)
        .assert()
        .success();

    // No backup to restore: the install path stays absent
    assert!(!install.exists());
    assert!(!install.is_symlink());
    // The working copy itself is untouched
    assert!(dir.path().join("packages/widget/composer.json").exists());
}

#[test]
fn test_missing_config_fails_before_any_mutation() {
    let dir = tempdir().unwrap();
    let project = scaffold_project(
        dir.path(),
        &[("acme/widget", "1.0.0")],
        &["../packages/widget"],
    );
    local_package(dir.path(), "packages/widget", "acme/widget");
    fs::remove_file(project.join("studio.json")).unwrap();

    studio()
        .arg("link")
        .arg("--project-root")
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicates::str::contains("studio.json"));

    // Vendored contents untouched
    let install = project.join("vendor/acme/widget");
    assert!(install.is_dir());
    assert!(!install.is_symlink());
    assert!(!project.join(".studio").exists());
}

#[test]
fn test_malformed_installed_index_fails() {
    let dir = tempdir().unwrap();
    let project = scaffold_project(
        dir.path(),
        &[("acme/widget", "1.0.0")],
        &["../packages/widget"],
    );
    local_package(dir.path(), "packages/widget", "acme/widget");
    write_file(
        &project.join("vendor/composer/installed.json"),
        "{ not json",
    );

    studio()
        .arg("link")
        .arg("--project-root")
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicates::str::contains("installed.json"));
}

#[test]
fn test_per_package_failure_does_not_fail_the_run() {
    let dir = tempdir().unwrap();
    let project = scaffold_project(
        dir.path(),
        &[("acme/widget", "1.0.0"), ("acme/gadget", "2.0.0")],
        &["../packages/widget", "../packages/gadget"],
    );
    local_package(dir.path(), "packages/widget", "acme/widget");
    local_package(dir.path(), "packages/gadget", "acme/gadget");

    // Break gadget's install path: a plain file cannot be backed up or
    // replaced, so its link step fails
    let gadget = project.join("vendor/acme/gadget");
    fs::remove_dir_all(&gadget).unwrap();
    write_file(&gadget, "not a directory");

    // Per-package failures are reported but do not affect the exit status
    studio()
        .arg("link")
        .arg("--project-root")
        .arg(&project)
        .assert()
        .success()
        .stderr(predicates::str::contains("Failed to link acme/gadget"));

    // The healthy package still completed its transition
    assert!(project.join("vendor/acme/widget").is_symlink());
}

#[test]
fn test_unmatched_entries_are_dropped() {
    let dir = tempdir().unwrap();
    // Two installed packages, one managed path, plus a path whose name
    // matches nothing installed
    let project = scaffold_project(
        dir.path(),
        &[("acme/widget", "1.0.0"), ("acme/gadget", "2.0.0")],
        &["../packages/widget", "../packages/unrelated"],
    );
    local_package(dir.path(), "packages/widget", "acme/widget");
    local_package(dir.path(), "packages/unrelated", "other/unrelated");

    studio()
        .arg("link")
        .arg("--project-root")
        .arg(&project)
        .assert()
        .success();

    assert!(project.join("vendor/acme/widget").is_symlink());
    // Unmatched installed package is untouched
    let gadget = project.join("vendor/acme/gadget");
    assert!(gadget.is_dir());
    assert!(!gadget.is_symlink());
}

#[test]
fn test_glob_paths_match_multiple_packages() {
    let dir = tempdir().unwrap();
    let project = scaffold_project(
        dir.path(),
        &[("acme/widget", "1.0.0"), ("acme/gadget", "2.0.0")],
        &["../packages/*"],
    );
    local_package(dir.path(), "packages/widget", "acme/widget");
    local_package(dir.path(), "packages/gadget", "acme/gadget");

    studio()
        .arg("link")
        .arg("--project-root")
        .arg(&project)
        .assert()
        .success();

    assert!(project.join("vendor/acme/widget").is_symlink());
    assert!(project.join("vendor/acme/gadget").is_symlink());
}

#[test]
fn test_custom_config_path() {
    let dir = tempdir().unwrap();
    let project = scaffold_project(
        dir.path(),
        &[("acme/widget", "1.0.0")],
        // Default studio.json manages nothing
        &[],
    );
    local_package(dir.path(), "packages/widget", "acme/widget");
    write_file(
        &dir.path().join("alt.json"),
        r#"{"paths": ["../packages/widget"]}"#,
    );

    studio()
        .arg("link")
        .arg("--project-root")
        .arg(&project)
        .arg("--config")
        .arg(dir.path().join("alt.json"))
        .assert()
        .success();

    assert!(project.join("vendor/acme/widget").is_symlink());
}

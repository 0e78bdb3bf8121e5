// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use super::hook::{post_install_hook_path, run_post_install_hook};
use super::marker::InstallMarker;
use super::workdir::WorkingDirectory;
use crate::error::ScriptError;

fn write_hook(install_root: &Path, job: &str, body: &str) {
    let path = post_install_hook_path(install_root, job);
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(&path, body).expect("write hook");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
}

#[tokio::test]
async fn test_marker_roundtrip_and_clear() {
    let root = tempfile::tempdir().expect("tempdir");
    let marker = InstallMarker::for_package(root.path(), "miku");

    assert_eq!(marker.read().await.expect("read"), None);

    marker.write("39").await.expect("write");
    assert_eq!(
        std::fs::read_to_string(root.path().join("packages/miku/.version")).expect("raw"),
        "39\n"
    );
    assert_eq!(marker.read().await.expect("read").as_deref(), Some("39"));

    marker.clear().await.expect("clear");
    assert!(!marker.path().exists());
    marker.clear().await.expect("clearing twice is fine");
}

#[tokio::test]
async fn test_marker_write_leaves_no_temp_files() {
    let root = tempfile::tempdir().expect("tempdir");
    let marker = InstallMarker::for_package(root.path(), "luca");
    marker.write("1.1-dev").await.expect("first");
    marker.write("1.2-dev").await.expect("second");

    let entries: Vec<_> = std::fs::read_dir(root.path().join("packages/luca"))
        .expect("readdir")
        .filter_map(std::result::Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec![".version".to_string()]);
    assert_eq!(marker.read().await.expect("read").as_deref(), Some("1.2-dev"));
}

#[tokio::test]
async fn test_working_directory_reset_wipes_contents() {
    let root = tempfile::tempdir().expect("tempdir");
    let workdir = WorkingDirectory::new(root.path().join("work"));

    workdir.reset().await.expect("create");
    std::fs::create_dir_all(workdir.path().join("stale/dir")).expect("mkdir");
    std::fs::write(workdir.path().join("stale/dir/file"), "old").expect("write");

    workdir.reset().await.expect("reset");
    assert!(workdir.path().is_dir());
    assert_eq!(std::fs::read_dir(workdir.path()).expect("readdir").count(), 0);
}

#[tokio::test]
async fn test_post_install_hook_output() {
    let root = tempfile::tempdir().expect("tempdir");
    write_hook(root.path(), "miku", "#!/bin/sh\necho ha ore no yome\n");

    let output = run_post_install_hook(root.path(), "miku")
        .await
        .expect("hook succeeds");
    assert_eq!(output.as_deref(), Some("ha ore no yome\n"));
}

#[tokio::test]
async fn test_post_install_hook_runs_in_install_root() {
    let root = tempfile::tempdir().expect("tempdir");
    write_hook(root.path(), "miku", "#!/bin/sh\npwd -P\n");

    let output = run_post_install_hook(root.path(), "miku")
        .await
        .expect("hook succeeds")
        .expect("hook present");
    let expected = root.path().canonicalize().expect("canonicalize");
    assert_eq!(output.trim(), expected.to_string_lossy());
}

#[tokio::test]
async fn test_post_install_hook_absent() {
    let root = tempfile::tempdir().expect("tempdir");
    let output = run_post_install_hook(root.path(), "miku")
        .await
        .expect("nothing to run");
    assert!(output.is_none());
}

#[tokio::test]
async fn test_post_install_hook_failure() {
    let root = tempfile::tempdir().expect("tempdir");
    write_hook(root.path(), "miku", "#!/bin/sh\nexit 1\n");

    let err = run_post_install_hook(root.path(), "miku")
        .await
        .expect_err("hook fails");
    assert!(matches!(
        err.downcast_ref::<ScriptError>(),
        Some(ScriptError::PostInstallFailed { job, code: 1 }) if job == "miku"
    ));
}

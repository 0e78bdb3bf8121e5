// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for job archives.

mod support;

use std::fs;
use std::path::Path;
use std::process::Command;

use nise_rs::engine::Engine;
use nise_rs::error::ArchiveError;
use support::{Target, options, release_repo, write};
use tempfile::TempDir;

fn extract(archive: &Path) -> TempDir {
    let dir = TempDir::new().unwrap();
    let status = Command::new("tar")
        .arg("-xzf")
        .arg(archive)
        .arg("-C")
        .arg(dir.path())
        .status()
        .unwrap();
    assert!(status.success());
    dir
}

fn same_bytes(left: &Path, right: &Path) {
    assert_eq!(
        fs::read(left).unwrap(),
        fs::read(right).unwrap(),
        "{} differs from {}",
        left.display(),
        right.display()
    );
}

#[tokio::test]
async fn archive_into_directory_round_trip() {
    let repo = release_repo();
    let target = Target::new();
    let out = TempDir::new().unwrap();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    let archive = engine.archive("angel", Some(out.path())).await.unwrap();
    assert_eq!(archive, out.path().join("test-angel-39.3-dev.tar.gz"));

    let extracted = extract(&archive);
    let root = extracted.path();
    same_bytes(
        &root.join("release.yml"),
        &repo.path().join("dev_releases/test-39.3-dev.yml"),
    );
    for rel in [
        ".final_builds/packages/miku/39.tgz",
        ".dev_builds/packages/luca/1.1-dev.tgz",
        "jobs/angel/spec",
        "jobs/angel/monit",
        "jobs/angel/templates/miku.conf.erb",
    ] {
        same_bytes(&root.join("release").join(rel), &repo.path().join(rel));
    }
    assert!(!root.join("release/.final_builds/packages/tako").exists());
}

#[tokio::test]
async fn archive_to_literal_path() {
    let repo = release_repo();
    let target = Target::new();
    let out = TempDir::new().unwrap();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    let path = out.path().join("nested/angel.tgz");
    let archive = engine.archive("angel", Some(&path)).await.unwrap();
    assert_eq!(archive, path);
    assert!(path.is_file());
}

#[tokio::test]
async fn archive_includes_transitive_packages() {
    let repo = release_repo();
    write(
        repo.path(),
        "jobs/angel/spec",
        "name: angel\npackages:\n- kaito\ntemplates: {}\n",
    );
    let target = Target::new();
    let out = TempDir::new().unwrap();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    let archive = engine.archive("angel", Some(out.path())).await.unwrap();
    let extracted = extract(&archive);
    let builds = extracted.path().join("release");
    for rel in [
        ".final_builds/packages/miku/39.tgz",
        ".dev_builds/packages/luca/1.1-dev.tgz",
        ".final_builds/packages/tako/2.tgz",
        ".final_builds/packages/kaito/3.tgz",
    ] {
        assert!(builds.join(rel).is_file(), "{rel} missing");
    }
}

#[tokio::test]
async fn archive_missing_package_archive() {
    let repo = release_repo();
    write(
        repo.path(),
        "jobs/angel/spec",
        "name: angel\npackages:\n- meiko\n",
    );
    let target = Target::new();
    let out = TempDir::new().unwrap();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    let err = engine.archive("angel", Some(out.path())).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ArchiveError>(),
        Some(ArchiveError::PackageArchiveMissing { .. })
    ));
    assert!(!out.path().join("test-angel-39.3-dev.tar.gz").exists());
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for package and job installation.
//!
//! Runs real packaging scripts from `.tgz` archives against a temporary
//! install root.

mod support;

use std::fs;

use nise_rs::engine::Engine;
use nise_rs::engine::options::EngineOptions;
use nise_rs::error::{ArchiveError, ResolutionError, ScriptError};
use nise_rs::install::InstallOutcome;
use support::{Target, options, release_repo};

// =============================================================================
// Packages
// =============================================================================

#[tokio::test]
async fn install_resolves_diamond_dependencies() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    let plan = engine.install_packages(&["kaito"], false).await.unwrap();
    assert_eq!(plan, vec!["miku", "luca", "tako", "kaito"]);

    assert_eq!(
        fs::read_to_string(target.package_file("miku", "dayo")).unwrap(),
        "miku 39\n"
    );
    assert_eq!(
        fs::read_to_string(target.package_file("luca", "dayo")).unwrap(),
        "luca 1.1-dev\n"
    );
    assert_eq!(target.marker("miku").as_deref(), Some("39\n"));
    assert_eq!(target.marker("luca").as_deref(), Some("1.1-dev\n"));
    assert_eq!(target.marker("kaito").as_deref(), Some("3\n"));
}

#[tokio::test]
async fn install_without_dependencies() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    let plan = engine.install_packages(&["tako"], true).await.unwrap();
    assert_eq!(plan, vec!["tako"]);
    assert!(target.package_file("tako", "dayo").is_file());
    assert!(!target.install_dir().join("packages/miku").exists());
}

#[tokio::test]
async fn install_skips_same_version() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    assert_eq!(
        engine.install_package("miku").await.unwrap(),
        InstallOutcome::Installed
    );
    fs::write(target.package_file("miku", "dayo"), "changed\n").unwrap();

    assert_eq!(
        engine.install_package("miku").await.unwrap(),
        InstallOutcome::Skipped
    );
    assert_eq!(
        fs::read_to_string(target.package_file("miku", "dayo")).unwrap(),
        "changed\n"
    );
}

#[tokio::test]
async fn install_rebuilds_on_version_mismatch() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    engine.install_package("miku").await.unwrap();
    fs::write(target.package_file("miku", ".version"), "38\n").unwrap();
    fs::write(target.package_file("miku", "stale"), "old\n").unwrap();

    assert_eq!(
        engine.install_package("miku").await.unwrap(),
        InstallOutcome::Installed
    );
    assert_eq!(target.marker("miku").as_deref(), Some("39\n"));
    assert!(!target.package_file("miku", "stale").exists());
}

#[tokio::test]
async fn install_force_rebuilds() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();
    engine.install_package("miku").await.unwrap();
    fs::write(target.package_file("miku", "dayo"), "changed\n").unwrap();

    let forced = EngineOptions::builder()
        .with_repo(repo.path())
        .with_install_dir(target.install_dir())
        .with_working_dir(target.working_dir())
        .with_ip("")
        .with_force(true)
        .build();
    let engine = Engine::open(forced).await.unwrap();

    assert_eq!(
        engine.install_package("miku").await.unwrap(),
        InstallOutcome::Installed
    );
    assert_eq!(
        fs::read_to_string(target.package_file("miku", "dayo")).unwrap(),
        "miku 39\n"
    );
}

#[tokio::test]
async fn install_packaging_environment() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    engine.install_package("env_dump").await.unwrap();

    let env = fs::read_to_string(target.package_file("env_dump", "env")).unwrap();
    let lines: Vec<&str> = env.lines().collect();
    let install_target = target.install_dir().join("packages/env_dump");
    let work = target.working_dir();
    assert_eq!(lines[0], "env_dump");
    assert_eq!(lines[1], "5");
    assert_eq!(lines[2], install_target.to_str().unwrap());
    assert_eq!(lines[3], work.to_str().unwrap());
    assert_eq!(lines[4], work.to_str().unwrap());
}

#[tokio::test]
async fn install_cycle_fails_before_building() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    let err = engine.install_packages(&["ren"], false).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ResolutionError>(),
        Some(ResolutionError::CyclicDependency { .. })
    ));
    assert_eq!(target.marker("ren"), None);
    assert_eq!(target.marker("rin"), None);
}

#[tokio::test]
async fn install_failed_packaging_leaves_no_marker() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    let err = engine.install_package("fail_packaging").await.unwrap_err();
    match err.downcast_ref::<ScriptError>() {
        Some(ScriptError::PackagingFailed { package, code, .. }) => {
            assert_eq!(package, "fail_packaging");
            assert_eq!(*code, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(target.marker("fail_packaging"), None);
}

#[tokio::test]
async fn install_failure_clears_previous_marker() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    let dir = target.install_dir().join("packages/fail_packaging");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(".version"), "0\n").unwrap();

    assert!(engine.install_package("fail_packaging").await.is_err());
    assert_eq!(target.marker("fail_packaging"), None);
}

#[tokio::test]
async fn install_missing_archive() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    let err = engine.install_package("meiko").await.unwrap_err();
    match err.downcast_ref::<ArchiveError>() {
        Some(ArchiveError::PackageArchiveMissing { package, path }) => {
            assert_eq!(package, "meiko");
            assert!(path.ends_with(".final_builds/packages/meiko/4.tgz"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Jobs
// =============================================================================

#[tokio::test]
async fn install_job_full() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    let hook = engine.install_job("angel", false).await.unwrap();
    assert_eq!(hook.as_deref(), Some("ha ore no yome\n"));

    let root = target.install_dir();
    assert_eq!(target.marker("miku").as_deref(), Some("39\n"));
    assert_eq!(target.marker("luca").as_deref(), Some("1.1-dev\n"));
    assert_eq!(
        fs::read_to_string(root.join("jobs/angel/config/miku.conf")).unwrap(),
        "tenshi\n0\n39.39.39.39\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("bosh/etc/monitrc")).unwrap(),
        "monit\n"
    );
    assert!(root.join("data/packages").is_dir());
}

#[tokio::test]
async fn install_job_template_only_skips_packages() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    engine.install_job("angel", true).await.unwrap();

    assert!(target.install_dir().join("jobs/angel/config/miku.conf").is_file());
    assert_eq!(target.marker("miku"), None);
}

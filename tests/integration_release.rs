// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for release selection through the engine.

mod support;

use std::fs;

use nise_rs::engine::Engine;
use nise_rs::engine::options::EngineOptions;
use nise_rs::error::{ConfigurationError, IndexError};
use support::{Target, options, release_repo, write};

#[tokio::test]
async fn newest_dev_release_is_selected() {
    let repo = release_repo();
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    assert_eq!(engine.release().name(), "test");
    assert_eq!(engine.release().version(), "39.3-dev");
    assert!(
        engine
            .release()
            .manifest_path()
            .ends_with("dev_releases/test-39.3-dev.yml")
    );
    assert_eq!(engine.release().packages().len(), 9);
}

#[tokio::test]
async fn newer_final_release_wins() {
    let repo = release_repo();
    write(
        repo.path(),
        "releases/index.yml",
        "builds:\n  b1:\n    version: '39.2'\n  b2:\n    version: 40\n",
    );
    write(
        repo.path(),
        "releases/test-40.yml",
        "name: test\nversion: 40\npackages: []\n",
    );
    let target = Target::new();
    let engine = Engine::open(options(repo.path(), &target)).await.unwrap();

    assert_eq!(engine.release().version(), "40");
}

#[tokio::test]
async fn release_file_override() {
    let repo = release_repo();
    let target = Target::new();
    let options = EngineOptions::builder()
        .with_repo(repo.path())
        .with_install_dir(target.install_dir())
        .with_working_dir(target.working_dir())
        .with_release_file(repo.path().join("releases/test-39.2.yml"))
        .with_ip("")
        .build();
    let engine = Engine::open(options).await.unwrap();

    assert_eq!(engine.release().version(), "39.2");
    assert!(engine.release().package("luca").is_none());
}

#[tokio::test]
async fn missing_release_file_override() {
    let repo = release_repo();
    let target = Target::new();
    let options = EngineOptions::builder()
        .with_repo(repo.path())
        .with_install_dir(target.install_dir())
        .with_release_file(repo.path().join("releases/none.yml"))
        .with_ip("")
        .build();

    let err = Engine::open(options).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigurationError>(),
        Some(ConfigurationError::ReleaseFileNotFound { .. })
    ));
}

#[tokio::test]
async fn repository_without_index() {
    let repo = release_repo();
    fs::remove_file(repo.path().join("releases/index.yml")).unwrap();
    fs::remove_file(repo.path().join("dev_releases/index.yml")).unwrap();
    let target = Target::new();

    let err = Engine::open(options(repo.path(), &target)).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<IndexError>(),
        Some(IndexError::NoReleaseIndex { .. })
    ));
}

#[tokio::test]
async fn missing_repository() {
    let target = Target::new();
    let missing = target.dir.path().join("no-such-repo");

    let err = Engine::open(options(&missing, &target)).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigurationError>(),
        Some(ConfigurationError::RepositoryNotFound { .. })
    ));
}

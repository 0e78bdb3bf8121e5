// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sample release repository shared by the integration tests.
//!
//! ```text
//! miku  39        .final_builds   writes "miku 39"
//! luca  1.1-dev   .dev_builds     -> miku
//! tako  2         .final_builds   -> luca
//! kaito 3         .final_builds   -> tako, luca
//! meiko 4         (no archive)
//! ren / rin 1                     cycle
//! fail_packaging  .final_builds   exit 1
//! env_dump 5      .final_builds   records BOSH_* variables
//! job angel: miku, luca; config/miku.conf, bin/post_install, monit
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use nise_rs::engine::options::EngineOptions;
use tempfile::TempDir;

pub const MANIFEST: &str = "\
name: test
version: 39.3-dev
packages:
- name: miku
  version: 39
  dependencies: []
- name: luca
  version: 1.1-dev
  dependencies:
  - miku
- name: tako
  version: 2
  dependencies:
  - luca
- name: kaito
  version: 3
  dependencies:
  - tako
  - luca
- name: meiko
  version: 4
  dependencies: []
- name: ren
  version: 1
  dependencies:
  - rin
- name: rin
  version: 1
  dependencies:
  - ren
- name: fail_packaging
  version: 1
  dependencies: []
- name: env_dump
  version: 5
  dependencies: []
";

pub const DEPLOY_CONFIG: &str = "\
properties:
  miku:
    name: tenshi
";

const DAYO: &str = "echo \"$BOSH_PACKAGE_NAME $BOSH_PACKAGE_VERSION\" > \"$BOSH_INSTALL_TARGET/dayo\"\n";

const ENV_DUMP: &str = "\
{
  echo \"$BOSH_PACKAGE_NAME\"
  echo \"$BOSH_PACKAGE_VERSION\"
  echo \"$BOSH_INSTALL_TARGET\"
  echo \"$BOSH_COMPILE_TARGET\"
  pwd
} > \"$BOSH_INSTALL_TARGET/env\"
";

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Packs a directory holding only `packaging` into `<repo>/<store>/packages/<name>/<version>.tgz`.
fn package_archive(repo: &Path, store: &str, name: &str, version: &str, packaging: &str) {
    let staging = TempDir::new().unwrap();
    write(staging.path(), "packaging", packaging);

    let dir = repo.join(store).join("packages").join(name);
    fs::create_dir_all(&dir).unwrap();
    let status = Command::new("tar")
        .arg("-czf")
        .arg(dir.join(format!("{version}.tgz")))
        .arg("-C")
        .arg(staging.path())
        .arg(".")
        .status()
        .unwrap();
    assert!(status.success());
}

/// Builds the sample release repository.
pub fn release_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "config/final.yml", "final_name: test\n");
    write(root, "config/dev.yml", "dev_name: test\n");
    write(root, "releases/index.yml", "builds:\n  b1:\n    version: '39.2'\n");
    write(
        root,
        "releases/test-39.2.yml",
        "name: test\nversion: '39.2'\npackages:\n- name: miku\n  version: 39\n  dependencies: []\n",
    );
    write(root, "dev_releases/index.yml", "builds:\n  d1:\n    version: 39.3-dev\n");
    write(root, "dev_releases/test-39.3-dev.yml", MANIFEST);

    for name in [
        "miku",
        "luca",
        "tako",
        "kaito",
        "meiko",
        "ren",
        "rin",
        "fail_packaging",
        "env_dump",
    ] {
        fs::create_dir_all(root.join("packages").join(name)).unwrap();
    }

    package_archive(root, ".final_builds", "miku", "39", DAYO);
    package_archive(root, ".dev_builds", "luca", "1.1-dev", DAYO);
    package_archive(root, ".final_builds", "tako", "2", DAYO);
    package_archive(root, ".final_builds", "kaito", "3", DAYO);
    package_archive(root, ".final_builds", "ren", "1", DAYO);
    package_archive(root, ".final_builds", "rin", "1", DAYO);
    package_archive(root, ".final_builds", "fail_packaging", "1", "exit 1\n");
    package_archive(root, ".final_builds", "env_dump", "5", ENV_DUMP);

    write(
        root,
        "jobs/angel/spec",
        "\
name: angel
packages:
- miku
- luca
templates:
  miku.conf.erb: config/miku.conf
  post_install.erb: bin/post_install
",
    );
    write(
        root,
        "jobs/angel/templates/miku.conf.erb",
        "<%= properties.miku.name %>\n<%= spec.index %>\n<%= spec.networks.default.ip %>\n",
    );
    write(
        root,
        "jobs/angel/templates/post_install.erb",
        "#!/bin/sh\necho ha ore no yome\n",
    );
    write(root, "jobs/angel/monit", "monit\n");

    write(root, "deploy.yml", DEPLOY_CONFIG);
    dir
}

/// Install root and working directory for one test.
pub struct Target {
    pub dir: TempDir,
}

impl Target {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn install_dir(&self) -> PathBuf {
        self.dir.path().join("vcap")
    }

    pub fn working_dir(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    pub fn package_file(&self, package: &str, file: &str) -> PathBuf {
        self.install_dir().join("packages").join(package).join(file)
    }

    pub fn marker(&self, package: &str) -> Option<String> {
        fs::read_to_string(self.package_file(package, ".version")).ok()
    }
}

/// Engine options with a fixed IP so no host detection runs.
pub fn options(repo: &Path, target: &Target) -> EngineOptions {
    EngineOptions::builder()
        .with_repo(repo)
        .with_install_dir(target.install_dir())
        .with_working_dir(target.working_dir())
        .with_deploy_config(repo.join("deploy.yml"))
        .with_ip("39.39.39.39")
        .build()
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args + Settings --> engine_options() --> Engine::open()
//!   job, package, archive     install / bundle
//!   config                    options, configs
//!   prompt                    "Do you want to continue?" (dialoguer)
//! ```

pub mod archive;
pub mod config;
pub mod job;
pub mod package;
pub mod prompt;


use std::path::Path;

use crate::cli::global::GlobalOptions;
use crate::config::Settings;
use crate::engine::options::EngineOptions;

/// Engine options for one command: settings, then the per-invocation flags
/// that are not settings.
#[must_use]
pub fn engine_options(
    settings: &Settings,
    global: &GlobalOptions,
    repo: &Path,
    deploy_config: Option<&Path>,
) -> EngineOptions {
    EngineOptions::builder()
        .with_repo(repo)
        .with_install_dir(settings.paths.install_dir.as_path())
        .with_working_dir(settings.paths.working_dir.as_path())
        .maybe_with_deploy_config(deploy_config)
        .maybe_with_release_file(global.release_file.as_deref())
        .maybe_with_ip(settings.host.ip.clone())
        .maybe_with_index(settings.host.index)
        .with_force(global.force)
        .with_shell(settings.packaging.shell.as_path())
        .with_strip_env(settings.packaging.strip_env.clone())
        .build()
}

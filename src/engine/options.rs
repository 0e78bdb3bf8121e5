// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Engine options.

use bon::Builder;
use std::path::{Path, PathBuf};

use crate::config::types::DEFAULT_STRIP_ENV;

fn default_strip_env() -> Vec<String> {
    DEFAULT_STRIP_ENV.iter().map(ToString::to_string).collect()
}

/// Everything an [`Engine`](super::Engine) needs to know about one invocation.
#[derive(Debug, Clone, Builder)]
pub struct EngineOptions {
    /// Release repository root.
    #[builder(setters(name = with_repo), into)]
    repo: PathBuf,
    #[builder(setters(name = with_install_dir), into, default = PathBuf::from("/var/vcap"))]
    install_dir: PathBuf,
    #[builder(setters(name = with_working_dir), into, default = PathBuf::from("/tmp/nise_bosh"))]
    working_dir: PathBuf,
    /// YAML deployment configuration used for templates.
    #[builder(setters(name = with_deploy_config), into)]
    deploy_config: Option<PathBuf>,
    /// Load this manifest instead of the newest indexed release.
    #[builder(setters(name = with_release_file), into)]
    release_file: Option<PathBuf>,
    #[builder(setters(name = with_ip), into)]
    ip: Option<String>,
    #[builder(setters(name = with_index))]
    index: Option<u64>,
    /// Rebuild packages even when their marker matches.
    #[builder(setters(name = with_force), default = false)]
    force: bool,
    #[builder(setters(name = with_shell), into, default = PathBuf::from("/bin/bash"))]
    shell: PathBuf,
    #[builder(setters(name = with_strip_env), default = default_strip_env())]
    strip_env: Vec<String>,
}

impl EngineOptions {
    #[must_use]
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    #[must_use]
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    #[must_use]
    pub fn deploy_config(&self) -> Option<&Path> {
        self.deploy_config.as_deref()
    }

    #[must_use]
    pub fn release_file(&self) -> Option<&Path> {
        self.release_file.as_deref()
    }

    #[must_use]
    pub fn ip(&self) -> Option<&str> {
        self.ip.as_deref()
    }

    #[must_use]
    pub const fn index(&self) -> Option<u64> {
        self.index
    }

    #[must_use]
    pub const fn force(&self) -> bool {
        self.force
    }

    #[must_use]
    pub fn shell(&self) -> &Path {
        &self.shell
    }

    #[must_use]
    pub fn strip_env(&self) -> &[String] {
        &self.strip_env
    }

    /// Makes every path option absolute against the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn absolutize(&mut self) -> std::io::Result<()> {
        self.repo = std::path::absolute(&self.repo)?;
        self.install_dir = std::path::absolute(&self.install_dir)?;
        self.working_dir = std::path::absolute(&self.working_dir)?;
        if let Some(path) = self.deploy_config.take() {
            self.deploy_config = Some(std::path::absolute(path)?);
        }
        if let Some(path) = self.release_file.take() {
            self.release_file = Some(std::path::absolute(path)?);
        }
        Ok(())
    }
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The installation engine.
//!
//! ```text
//! Engine::open(options)
//!   ReleaseLoader ──> Release (manifest, package table)
//!   deploy config ──> ConfigNamespace
//!   --ip or `ip` ───> host IP
//!
//! install_job(job)                       archive(job)
//!   install_packages(job packages)         Archiver
//!   install_job_templates(job)               resolve + copy + tar
//!   run_post_install_hook(job)
//! ```

pub mod options;


use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::archive::Archiver;
use crate::error::{ConfigurationError, Result};
use crate::install::hook;
use crate::install::{InstallOutcome, PackageInstaller};
use crate::job::JobSpec;
use crate::net::detect_host_ip;
use crate::release::{Release, ReleaseLoader, load_yaml};
use crate::resolve::DependencyResolver;
use crate::template::TemplateRenderer;
use crate::template::namespace::ConfigNamespace;
use options::EngineOptions;

/// One release repository opened for installing or archiving.
#[derive(Debug)]
pub struct Engine {
    options: EngineOptions,
    release: Release,
    deploy_config: ConfigNamespace,
    host_ip: String,
}

impl Engine {
    /// Loads the release and deploy config and settles the host IP.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::RepositoryNotFound` / `ReleaseFileNotFound`.
    /// - `IndexError` or `ManifestError` from loading the release.
    /// - `ConfigurationError::DeployConfig` if the deploy config is unreadable.
    pub async fn open(mut options: EngineOptions) -> Result<Self> {
        options
            .absolutize()
            .context("failed to resolve engine paths")?;

        let release = ReleaseLoader::new(options.repo())
            .with_manifest_override(options.release_file().map(Path::to_path_buf))
            .load()
            .await?;
        info!(release = %release.name(), version = %release.version(), "release loaded");

        let deploy_config = match options.deploy_config() {
            Some(path) => load_deploy_config(path).await?,
            None => ConfigNamespace::new(),
        };

        let host_ip = match options.ip() {
            Some(ip) => ip.to_string(),
            None => detect_host_ip().await,
        };
        debug!(ip = %host_ip, "host IP address");

        Ok(Self {
            options,
            release,
            deploy_config,
            host_ip,
        })
    }

    #[must_use]
    pub const fn release(&self) -> &Release {
        &self.release
    }

    #[must_use]
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    #[must_use]
    pub fn host_ip(&self) -> &str {
        &self.host_ip
    }

    #[must_use]
    pub const fn deploy_config(&self) -> &ConfigNamespace {
        &self.deploy_config
    }

    /// Whether `jobs/<job>` exists in the repository.
    #[must_use]
    pub fn job_exists(&self, job: &str) -> bool {
        JobSpec::dir(self.release.repo(), job).is_dir()
    }

    /// Whether `packages/<package>` exists in the repository.
    #[must_use]
    pub fn package_exists(&self, package: &str) -> bool {
        self.release.repo().join("packages").join(package).is_dir()
    }

    /// # Errors
    ///
    /// See [`JobSpec::load`].
    pub async fn job_spec(&self, job: &str) -> Result<JobSpec> {
        JobSpec::load(self.release.repo(), job).await
    }

    /// The packages `job` declares, without dependencies.
    ///
    /// # Errors
    ///
    /// See [`JobSpec::load`].
    pub async fn job_packages(&self, job: &str) -> Result<Vec<String>> {
        Ok(self.job_spec(job).await?.packages)
    }

    /// Dependency closure of `packages`, dependencies first.
    ///
    /// # Errors
    ///
    /// Returns a `ResolutionError` for cycles or unknown names.
    pub fn resolve_dependencies<S: AsRef<str>>(&self, packages: &[S]) -> Result<Vec<String>> {
        DependencyResolver::new(&self.release).resolve(packages)
    }

    /// Installs `packages`, with their dependencies unless `no_dependency`.
    ///
    /// # Errors
    ///
    /// Fails on the first package that cannot be resolved or installed.
    pub async fn install_packages<S: AsRef<str>>(
        &self,
        packages: &[S],
        no_dependency: bool,
    ) -> Result<Vec<String>> {
        PackageInstaller::new(&self.release, &self.options)
            .install_packages(packages, no_dependency)
            .await
    }

    /// Installs a single package.
    ///
    /// # Errors
    ///
    /// See [`PackageInstaller::install_package`].
    pub async fn install_package(&self, package: &str) -> Result<InstallOutcome> {
        PackageInstaller::new(&self.release, &self.options)
            .install_package(package)
            .await
    }

    /// Renders the templates of `job` into the install root.
    ///
    /// # Errors
    ///
    /// Returns a `TemplateError` or I/O error; nothing is written if a
    /// template source is missing.
    pub async fn install_job_templates(&self, job: &str) -> Result<Vec<PathBuf>> {
        let spec = self.job_spec(job).await?;
        let renderer = TemplateRenderer::new(
            self.release.repo(),
            self.options.install_dir(),
            &self.deploy_config,
            self.options.index().unwrap_or(0),
            &self.host_ip,
        )?;
        renderer.render_job(&spec).await
    }

    /// Runs `jobs/<job>/bin/post_install` from the install root, if present.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::PostInstallFailed` if the hook exits non-zero.
    pub async fn run_post_install_hook(&self, job: &str) -> Result<Option<String>> {
        hook::run_post_install_hook(self.options.install_dir(), job).await
    }

    /// Installs `job`: its packages (unless `template_only`), its templates,
    /// then the post-install hook. Returns the hook's output.
    ///
    /// # Errors
    ///
    /// Fails at the first step that fails.
    pub async fn install_job(&self, job: &str, template_only: bool) -> Result<Option<String>> {
        if !template_only {
            let packages = self.job_packages(job).await?;
            self.install_packages(&packages, false).await?;
        }

        self.install_job_templates(job).await?;

        let output = self.run_post_install_hook(job).await?;
        if let Some(text) = &output {
            for line in text.lines() {
                info!(job, "post_install: {line}");
            }
        }
        Ok(output)
    }

    /// Bundles `job` with its package closure and the release manifest.
    ///
    /// # Errors
    ///
    /// See [`Archiver::archive`].
    pub async fn archive(&self, job: &str, output: Option<&Path>) -> Result<PathBuf> {
        let spec = self.job_spec(job).await?;
        Archiver::new(&self.release, self.options.working_dir())
            .archive(&spec, output)
            .await
    }
}

async fn load_deploy_config(path: &Path) -> Result<ConfigNamespace> {
    let invalid = |message: String| ConfigurationError::DeployConfig {
        path: path.display().to_string(),
        message,
    };

    let value: serde_yaml::Value = load_yaml(path).await.map_err(invalid)?;
    Ok(ConfigNamespace::from_yaml(value).map_err(invalid)?)
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package installation.
//!
//! ```text
//! install_package(name)
//!   marker == version && !force --> Skipped
//!   marker.clear()
//!   workdir.reset()
//!   tar -xzf <.final_builds|.dev_builds>/packages/<name>/<version>.tgz
//!   rm -rf + mkdir <install>/packages/<name>
//!   <shell> packaging   (cwd = workdir, BOSH_* env)
//!   marker.write(version) --> Installed
//! ```

pub mod hook;
pub mod marker;
pub mod workdir;

#[cfg(test)]
mod tests;

use anyhow::Context;
use tokio::fs;
use tracing::{info, warn};

use crate::core::env::container::Env;
use crate::core::env::current_env;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::engine::options::EngineOptions;
use crate::error::{ResolutionError, Result, ScriptError};
use crate::release::{PackageSpec, Release};
use crate::resolve::DependencyResolver;
use crate::tools::tar::TarTool;
use marker::InstallMarker;
use workdir::{WorkingDirectory, remove_dir_if_exists};

/// What [`PackageInstaller::install_package`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The marker already matched the release version.
    Skipped,
    /// The packaging script ran and the marker was written.
    Installed,
}

/// Stages package archives and runs their `packaging` scripts.
#[derive(Debug)]
pub struct PackageInstaller<'a> {
    release: &'a Release,
    options: &'a EngineOptions,
    workdir: WorkingDirectory,
}

impl<'a> PackageInstaller<'a> {
    #[must_use]
    pub fn new(release: &'a Release, options: &'a EngineOptions) -> Self {
        Self {
            release,
            options,
            workdir: WorkingDirectory::new(options.working_dir()),
        }
    }

    /// Installs `packages`, plus their dependencies unless `no_dependency`.
    ///
    /// Returns the install plan in the order it was executed.
    ///
    /// # Errors
    ///
    /// Fails on the first package that cannot be resolved or installed.
    pub async fn install_packages<S: AsRef<str>>(
        &self,
        packages: &[S],
        no_dependency: bool,
    ) -> Result<Vec<String>> {
        let plan = if no_dependency {
            packages.iter().map(|p| p.as_ref().to_string()).collect()
        } else {
            info!("Resolving package dependencies...");
            DependencyResolver::new(self.release).resolve(packages)?
        };

        info!("Installing the following packages:");
        for package in &plan {
            info!(" * {package}");
        }

        for package in &plan {
            info!(package = %package, "Installing package");
            self.install_package(package).await?;
        }

        Ok(plan)
    }

    /// Installs one package unless its marker already records the version.
    ///
    /// # Errors
    ///
    /// - `ResolutionError::UnknownPackage` if the release has no such package.
    /// - `ArchiveError::PackageArchiveMissing` if the compiled archive is absent.
    /// - `ScriptError::PackagingFailed` if the packaging script exits non-zero.
    pub async fn install_package(&self, package: &str) -> Result<InstallOutcome> {
        let spec = self
            .release
            .package(package)
            .ok_or_else(|| ResolutionError::UnknownPackage {
                package: package.to_string(),
            })?;

        let marker = InstallMarker::for_package(self.options.install_dir(), package);
        let current = marker.read().await?;

        if !self.options.force() && current.as_deref() == Some(spec.version.as_str()) {
            info!(
                package,
                version = %spec.version,
                "The same version of the package is already installed. Skipping"
            );
            return Ok(InstallOutcome::Skipped);
        }

        marker.clear().await?;
        self.setup_working_directory(spec).await?;
        self.run_packaging(spec).await?;
        marker.write(&spec.version).await?;

        info!(package, version = %spec.version, "package installed");
        Ok(InstallOutcome::Installed)
    }

    /// Wipes the working directory and unpacks the package archive into it.
    async fn setup_working_directory(&self, spec: &PackageSpec) -> Result<()> {
        info!(package = %spec.name, "Setting up the working directory");
        self.workdir.reset().await?;

        let archive = self.release.find_archive(spec)?;
        TarTool::new()
            .extract_op()
            .archive(&archive)
            .directory(self.workdir.path())
            .run()
            .await
    }

    /// Recreates the install target and runs `packaging` from the working directory.
    async fn run_packaging(&self, spec: &PackageSpec) -> Result<()> {
        let target = self.options.install_dir().join("packages").join(&spec.name);
        remove_dir_if_exists(&target).await?;
        fs::create_dir_all(&target)
            .await
            .with_context(|| format!("failed to create {}", target.display()))?;

        if !self.workdir.path().join("packaging").is_file() {
            warn!(package = %spec.name, "archive has no packaging script");
        }

        info!(package = %spec.name, "Running the packaging script");
        let output = ProcessBuilder::new(self.options.shell())
            .arg("packaging")
            .cwd(self.workdir.path())
            .env(self.packaging_env(spec, &target.to_string_lossy()))
            .name(format!("{}/packaging", spec.name))
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()
            .await?;

        if !output.success() {
            return Err(ScriptError::PackagingFailed {
                package: spec.name.clone(),
                version: spec.version.clone(),
                code: output.exit_code(),
            }
            .into());
        }
        Ok(())
    }

    /// Ambient environment minus foreign toolchain variables, plus `BOSH_*`.
    fn packaging_env(&self, spec: &PackageSpec, install_target: &str) -> Env {
        let mut env = current_env();
        env.strip(self.options.strip_env());
        env.set("BOSH_INSTALL_TARGET", install_target)
            .set(
                "BOSH_COMPILE_TARGET",
                self.workdir.path().to_string_lossy(),
            )
            .set("BOSH_PACKAGE_NAME", spec.name.as_str())
            .set("BOSH_PACKAGE_VERSION", spec.version.as_str());
        env
    }
}

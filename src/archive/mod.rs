// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bundling a job with its packages into one archive.
//!
//! ```text
//! <work>/
//!   release.yml                                   selected manifest
//!   release/.final_builds/packages/<p>/<v>.tgz    resolved closure
//!   release/.dev_builds/packages/<p>/<v>.tgz
//!   release/jobs/<job>/...
//!        |
//!        v  tar -czf
//! <name>-<job>-<version>.tar.gz
//! ```


use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;
use tracing::{debug, info};

use crate::error::Result;
use crate::install::workdir::WorkingDirectory;
use crate::job::JobSpec;
use crate::release::Release;
use crate::resolve::DependencyResolver;
use crate::tools::tar::TarTool;
use crate::utility::fs::copy::copy_into_tree_async;

/// `<release-name>-<job>-<release-version>.tar.gz`
#[must_use]
pub fn default_archive_name(release: &Release, job: &str) -> String {
    format!("{}-{job}-{}.tar.gz", release.name(), release.version())
}

/// Where the archive is written.
///
/// No `output` puts `default_name` in `cwd`; an existing directory gets
/// `default_name` inside it; anything else is taken as the file path.
#[must_use]
pub fn resolve_output_path(default_name: &str, output: Option<&Path>, cwd: &Path) -> PathBuf {
    match output {
        None => cwd.join(default_name),
        Some(path) => {
            let path = cwd.join(path);
            if path.is_dir() {
                path.join(default_name)
            } else {
                path
            }
        }
    }
}

/// Stages a job and its resolved packages, then packs them.
#[derive(Debug)]
pub struct Archiver<'a> {
    release: &'a Release,
    workdir: WorkingDirectory,
}

impl<'a> Archiver<'a> {
    #[must_use]
    pub fn new(release: &'a Release, working_dir: &Path) -> Self {
        Self {
            release,
            workdir: WorkingDirectory::new(working_dir),
        }
    }

    /// Builds the archive for `job` and returns its path.
    ///
    /// # Errors
    ///
    /// Fails if a dependency cannot be resolved, a package archive is missing,
    /// or copying and packing fail.
    pub async fn archive(&self, job: &JobSpec, output: Option<&Path>) -> Result<PathBuf> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let output = resolve_output_path(
            &default_archive_name(self.release, &job.name),
            output,
            &cwd,
        );

        self.workdir.reset().await?;
        let staging = self.workdir.path().join("release");
        let repo = self.release.repo();

        let packages = DependencyResolver::new(self.release).resolve(&job.packages)?;
        info!(job = %job.name, count = packages.len(), "Copying package archives");
        for name in &packages {
            let Some(spec) = self.release.package(name) else {
                continue;
            };
            let archive = self.release.find_archive(spec)?;
            let copied = copy_into_tree_async(repo, &archive, &staging).await?;
            debug!(package = %name, path = %copied.display(), "package archive staged");
        }

        info!(job = %job.name, "Copying the job");
        copy_into_tree_async(repo, &JobSpec::dir(repo, &job.name), &staging).await?;

        let manifest = self.workdir.path().join("release.yml");
        fs::copy(self.release.manifest_path(), &manifest)
            .await
            .with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    self.release.manifest_path().display(),
                    manifest.display()
                )
            })?;

        info!(output = %output.display(), "Creating the archive");
        TarTool::new()
            .pack_op()
            .archive(&output)
            .directory(self.workdir.path())
            .run()
            .await?;

        Ok(output)
    }
}

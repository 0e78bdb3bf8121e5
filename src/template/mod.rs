// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Job template rendering.
//!
//! ```text
//! deploy config ──clone──> namespace
//!                            + spec.index               (if absent)
//!                            + spec.networks.default.ip (if absent)
//!
//! jobs/<job>/templates/<src> ──render──> <install>/jobs/<job>/<dest>
//! jobs/<job>/monit           ──render──> <install>/bosh/etc/monitrc
//! ```

pub mod erb;
pub mod namespace;


use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{Result, TemplateError};
use crate::job::JobSpec;
use erb::TemplateContext;
use namespace::{ConfigNamespace, NamespaceValue};

pub const INDEX_PATH: &str = "spec.index";
pub const IP_PATH: &str = "spec.networks.default.ip";

/// Renders a job's templates into the install root.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    repo: PathBuf,
    install_dir: PathBuf,
    context: TemplateContext,
}

impl TemplateRenderer {
    /// Prepares the namespace: `deploy_config` with `index` and `ip` filled in
    /// only where the deploy config leaves them unset.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::NotASubtree` if the deploy config has a scalar
    /// where `spec` or `spec.networks.default` should be a mapping.
    pub fn new(
        repo: impl Into<PathBuf>,
        install_dir: impl Into<PathBuf>,
        deploy_config: &ConfigNamespace,
        index: u64,
        ip: &str,
    ) -> Result<Self> {
        let mut namespace = deploy_config.clone();
        namespace.set_default(INDEX_PATH, NamespaceValue::scalar(index.to_string()))?;
        namespace.set_default(IP_PATH, NamespaceValue::scalar(ip))?;

        Ok(Self {
            repo: repo.into(),
            install_dir: install_dir.into(),
            context: TemplateContext::new(namespace, deploy_config.clone()),
        })
    }

    /// The namespace templates are rendered against.
    #[must_use]
    pub const fn namespace(&self) -> &ConfigNamespace {
        self.context.namespace()
    }

    /// `(source, destination)` pairs for every template of `job`, monit last.
    #[must_use]
    pub fn template_pairs(&self, job: &JobSpec) -> Vec<(PathBuf, PathBuf)> {
        let job_dir = JobSpec::dir(&self.repo, &job.name);
        let install_base = self.install_dir.join("jobs").join(&job.name);

        job.templates
            .iter()
            .map(|(source, dest)| (job_dir.join("templates").join(source), install_base.join(dest)))
            .chain(std::iter::once((
                job_dir.join("monit"),
                self.install_dir.join("bosh").join("etc").join("monitrc"),
            )))
            .collect()
    }

    /// Renders every template of `job`, returning the written paths.
    ///
    /// All sources are checked before anything is written.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::SourceMissing` naming the first missing source,
    /// or the first rendering or I/O failure.
    pub async fn render_job(&self, job: &JobSpec) -> Result<Vec<PathBuf>> {
        let pairs = self.template_pairs(job);

        if let Some((missing, _)) = pairs.iter().find(|(source, _)| !source.is_file()) {
            return Err(TemplateError::SourceMissing {
                path: missing.display().to_string(),
            }
            .into());
        }

        info!(job = %job.name, count = pairs.len(), "Installing job templates");
        for (source, dest) in &pairs {
            self.write_template(source, dest).await?;
        }

        Ok(pairs.into_iter().map(|(_, dest)| dest).collect())
    }

    /// Renders one template file to `dest`.
    ///
    /// Files written directly into a `bin` directory are made executable.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::SourceMissing` if `source` does not exist, a
    /// rendering error, or an I/O error.
    pub async fn write_template(&self, source: &Path, dest: &Path) -> Result<()> {
        let text = match fs::read_to_string(source).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TemplateError::SourceMissing {
                    path: source.display().to_string(),
                }
                .into());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", source.display()));
            }
        };

        let rendered = self
            .context
            .render(&source.display().to_string(), &text)?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(dest, rendered)
            .await
            .with_context(|| format!("failed to write {}", dest.display()))?;
        debug!(source = %source.display(), dest = %dest.display(), "template written");

        let data_packages = self.install_dir.join("data").join("packages");
        fs::create_dir_all(&data_packages)
            .await
            .with_context(|| format!("failed to create {}", data_packages.display()))?;

        if in_bin_dir(dest) {
            fs::set_permissions(dest, std::fs::Permissions::from_mode(0o755))
                .await
                .with_context(|| format!("failed to chmod {}", dest.display()))?;
        }
        Ok(())
    }
}

fn in_bin_dir(path: &Path) -> bool {
    path.parent()
        .and_then(Path::file_name)
        .is_some_and(|name| name == "bin")
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Gzipped tarball extraction and packing via the system `tar`.
//!
//! ```text
//! extract: tar -xzf <archive> -C <directory>
//! pack:    tar -C <directory> -czf <archive> .
//! ```

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;
use tracing::debug;

use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TarOperation {
    #[default]
    Extract,
    Pack,
}

/// Builder around a single `tar` invocation.
#[derive(Debug, Clone, Default)]
pub struct TarTool {
    archive: Option<PathBuf>,
    directory: Option<PathBuf>,
    operation: TarOperation,
}

impl TarTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            archive: None,
            directory: None,
            operation: TarOperation::Extract,
        }
    }

    /// The `.tgz` / `.tar.gz` file read or written.
    #[must_use]
    pub fn archive(mut self, path: impl AsRef<Path>) -> Self {
        self.archive = Some(path.as_ref().to_path_buf());
        self
    }

    /// Extraction target, or the directory whose contents are packed.
    #[must_use]
    pub fn directory(mut self, path: impl AsRef<Path>) -> Self {
        self.directory = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub const fn extract_op(mut self) -> Self {
        self.operation = TarOperation::Extract;
        self
    }

    #[must_use]
    pub const fn pack_op(mut self) -> Self {
        self.operation = TarOperation::Pack;
        self
    }

    fn archive_required(&self) -> Result<&Path> {
        self.archive
            .as_deref()
            .context("TarTool: archive path is required")
    }

    fn directory_required(&self) -> Result<&Path> {
        self.directory
            .as_deref()
            .context("TarTool: directory is required")
    }

    /// Runs the configured operation.
    ///
    /// # Errors
    ///
    /// Returns an error if `tar` is not in PATH, a required path is missing,
    /// or `tar` exits unsuccessfully.
    pub async fn run(&self) -> Result<()> {
        match self.operation {
            TarOperation::Extract => self.do_extract().await,
            TarOperation::Pack => self.do_pack().await,
        }
    }

    async fn do_extract(&self) -> Result<()> {
        let archive = self.archive_required()?;
        let directory = self.directory_required()?;

        fs::create_dir_all(directory)
            .await
            .with_context(|| format!("failed to create directory {}", directory.display()))?;

        debug!(
            archive = %archive.display(),
            directory = %directory.display(),
            "extracting archive"
        );

        ProcessBuilder::which("tar")?
            .arg("-xzf")
            .arg(archive)
            .arg("-C")
            .arg(directory)
            .run()
            .await
            .with_context(|| format!("failed to extract {}", archive.display()))?;

        Ok(())
    }

    async fn do_pack(&self) -> Result<()> {
        let directory = self.directory_required()?;
        let archive = absolute(self.archive_required()?)?;

        if let Some(parent) = archive.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }

        debug!(
            archive = %archive.display(),
            directory = %directory.display(),
            "packing archive"
        );

        ProcessBuilder::which("tar")?
            .arg("-C")
            .arg(directory)
            .arg("-czf")
            .arg(&archive)
            .arg(".")
            .run()
            .await
            .with_context(|| format!("failed to create {}", archive.display()))?;

        Ok(())
    }
}

/// `tar -C` changes directory before writing, so the output must be absolute.
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    Ok(cwd.join(path))
}

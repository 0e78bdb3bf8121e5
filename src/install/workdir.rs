// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The staging directory shared by package builds and archiving.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;
use tracing::debug;

use crate::error::Result;

/// A scratch directory that is wiped before every use.
///
/// Only one operation uses it at a time; nothing in it survives the next
/// [`WorkingDirectory::reset`].
#[derive(Debug, Clone)]
pub struct WorkingDirectory {
    path: PathBuf,
}

impl WorkingDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the directory with all contents and recreates it empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be removed or created.
    pub async fn reset(&self) -> Result<()> {
        debug!(path = %self.path.display(), "cleaning up the working directory");
        remove_dir_if_exists(&self.path).await?;
        fs::create_dir_all(&self.path)
            .await
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        Ok(())
    }
}

/// Removes a directory tree, treating a missing directory as success.
pub(crate) async fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
    }
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-package install marker (`packages/<name>/.version`).

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;

use crate::error::Result;

const MARKER_FILE: &str = ".version";

/// Records the version string of the last successful package build.
///
/// The marker is removed before a rebuild starts and written only after the
/// packaging script succeeds, so its presence never overstates success.
#[derive(Debug, Clone)]
pub struct InstallMarker {
    path: PathBuf,
}

impl InstallMarker {
    /// Marker for `package` under `install_root`.
    #[must_use]
    pub fn for_package(install_root: &Path, package: &str) -> Self {
        Self {
            path: install_root.join("packages").join(package).join(MARKER_FILE),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the recorded version, or `None` if no marker exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker exists but cannot be read.
    pub async fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", self.path.display())),
        }
    }

    /// Deletes the marker if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker exists but cannot be removed.
    pub async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", self.path.display())),
        }
    }

    /// Writes `<version>\n` through a temp file in the same directory and a rename.
    ///
    /// The file work runs on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp file cannot be created, written or renamed.
    pub async fn write(&self, version: &str) -> Result<()> {
        let path = self.path.clone();
        let version = version.to_string();
        tokio::task::spawn_blocking(move || write_atomic(&path, &version))
            .await
            .context("install marker writer panicked")?
    }
}

fn write_atomic(path: &Path, version: &str) -> Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("marker {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    writeln!(tmp, "{version}").context("failed to write install marker")?;
    tmp.as_file()
        .sync_all()
        .context("failed to sync install marker")?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to persist {}", path.display()))?;
    Ok(())
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Recursively copies all contents from `src` into `dst`.
///
/// Creates `dst` if it doesn't exist.
///
/// # Example
/// ```no_run
/// use nise_rs::utility::fs::copy::copy_dir_contents_async;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// copy_dir_contents_async(Path::new("/source/dir"), Path::new("/dest/dir")).await?;
/// # Ok(())
/// # }
/// ```
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, reading, copying).
pub async fn copy_dir_contents_async(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .await
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let mut entries = fs::read_dir(src)
        .await
        .with_context(|| format!("failed to read directory {}", src.display()))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", src.display()))?
    {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            Box::pin(copy_dir_contents_async(&src_path, &dst_path)).await?;
        } else {
            fs::copy(&src_path, &dst_path).await.with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }

    Ok(())
}

/// Copies `path` (a file or directory under `root`) to the same relative
/// location under `dest_root`, creating parent directories.
///
/// Returns the destination path.
///
/// # Errors
///
/// Returns an error if `path` is not inside `root` or any copy fails.
pub async fn copy_into_tree_async(root: &Path, path: &Path, dest_root: &Path) -> Result<PathBuf> {
    let relative = path.strip_prefix(root).with_context(|| {
        format!("{} is not inside {}", path.display(), root.display())
    })?;
    let dest = dest_root.join(relative);

    if path.is_dir() {
        copy_dir_contents_async(path, &dest).await?;
        return Ok(dest);
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::copy(path, &dest).await.with_context(|| {
        format!("failed to copy {} to {}", path.display(), dest.display())
    })?;
    Ok(dest)
}

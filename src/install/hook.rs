// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Job post-install hook (`jobs/<job>/bin/post_install`).

use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{Result, ScriptError};

/// Location of the hook for `job` under `install_root`.
#[must_use]
pub fn post_install_hook_path(install_root: &Path, job: &str) -> PathBuf {
    install_root
        .join("jobs")
        .join(job)
        .join("bin")
        .join("post_install")
}

/// Runs the job's post-install hook if one was installed.
///
/// Returns the hook's standard output, or `None` when the job has no hook.
///
/// # Errors
///
/// Returns `ScriptError::PostInstallFailed` if the hook exits non-zero, or a
/// process error if it cannot be started.
pub async fn run_post_install_hook(install_root: &Path, job: &str) -> Result<Option<String>> {
    let hook = post_install_hook_path(install_root, job);
    if !hook.is_file() {
        return Ok(None);
    }

    info!(job, hook = %hook.display(), "running post install hook");
    let output = ProcessBuilder::new(&hook)
        .cwd(install_root)
        .name(format!("{job}/post_install"))
        .capture_stdout()
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await?;

    if !output.success() {
        return Err(ScriptError::PostInstallFailed {
            job: job.to_string(),
            code: output.exit_code(),
        }
        .into());
    }

    Ok(Some(output.stdout().to_string()))
}

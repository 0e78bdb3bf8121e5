// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `nise archive`: bundle a job.

use super::engine_options;
use crate::cli::ArchiveArgs;
use crate::cli::global::GlobalOptions;
use crate::config::Settings;
use crate::engine::Engine;
use crate::error::{ExistenceError, Result};

/// Main handler for the archive command.
///
/// # Errors
///
/// Returns `ExistenceError::JobNotFound` if the job is not in the repository,
/// or the first failure while bundling.
pub async fn run_archive_command(
    args: &ArchiveArgs,
    settings: &Settings,
    global: &GlobalOptions,
) -> Result<()> {
    let options = engine_options(settings, global, &args.repo, None);
    let engine = Engine::open(options).await?;

    if !engine.job_exists(&args.job) {
        return Err(ExistenceError::JobNotFound {
            job: args.job.clone(),
        }
        .into());
    }

    let output = engine.archive(&args.job, args.output.as_deref()).await?;
    println!("Archive created: {}", output.display());
    println!("Done!");
    Ok(())
}

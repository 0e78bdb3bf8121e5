// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `nise job`: install a job's packages, templates and hook.

use tracing::info;

use super::engine_options;
use super::prompt::confirm_or_abort;
use crate::cli::global::GlobalOptions;
use crate::cli::JobArgs;
use crate::config::Settings;
use crate::engine::Engine;
use crate::error::{ExistenceError, Result};

/// Main handler for the job command.
///
/// # Errors
///
/// Returns `ExistenceError::JobNotFound` if the job is not in the repository,
/// or the first installation failure.
pub async fn run_job_command(
    args: &JobArgs,
    settings: &Settings,
    global: &GlobalOptions,
) -> Result<()> {
    let options = engine_options(
        settings,
        global,
        &args.repo,
        Some(args.deploy_config.as_path()),
    );
    let engine = Engine::open(options).await?;

    if !engine.job_exists(&args.job) {
        return Err(ExistenceError::JobNotFound {
            job: args.job.clone(),
        }
        .into());
    }

    if args.template_only {
        println!("Template files for the job {} will be installed.", args.job);
    } else {
        println!(
            "The following packages for job {} will be installed.",
            args.job
        );
        for package in engine.job_packages(&args.job).await? {
            println!("    * {package}");
        }
    }

    if !confirm_or_abort(settings.global.assume_yes)? {
        return Ok(());
    }

    engine.install_job(&args.job, args.template_only).await?;
    info!(job = %args.job, "job installed");
    println!("Done!");
    Ok(())
}

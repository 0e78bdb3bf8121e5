// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `nise package`: install packages.

use super::engine_options;
use super::prompt::confirm_or_abort;
use crate::cli::PackageArgs;
use crate::cli::global::GlobalOptions;
use crate::config::Settings;
use crate::engine::Engine;
use crate::error::{ExistenceError, Result};

/// Main handler for the package command.
///
/// # Errors
///
/// Returns `ExistenceError::PackageNotFound` for the first package missing
/// from the repository, or the first resolution or installation failure.
pub async fn run_package_command(
    args: &PackageArgs,
    settings: &Settings,
    global: &GlobalOptions,
) -> Result<()> {
    let options = engine_options(settings, global, &args.repo, None);
    let engine = Engine::open(options).await?;

    if let Some(missing) = args.packages.iter().find(|p| !engine.package_exists(p)) {
        return Err(ExistenceError::PackageNotFound {
            package: missing.clone(),
        }
        .into());
    }

    let plan = if args.no_dependency {
        args.packages.clone()
    } else {
        engine.resolve_dependencies(&args.packages)?
    };
    println!("The following packages will be installed:");
    for package in &plan {
        println!("    * {package}");
    }

    if !confirm_or_abort(settings.global.assume_yes)? {
        return Ok(());
    }

    engine
        .install_packages(&args.packages, args.no_dependency)
        .await?;
    println!("Done!");
    Ok(())
}

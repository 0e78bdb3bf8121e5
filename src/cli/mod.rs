// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for nise-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! nise [global options] <command>
//! job      REPO DEPLOY_CONFIG JOB [-t]
//! package  REPO PACKAGE... [--no-dependency]
//! archive  REPO JOB [OUTPUT]
//! options
//! configs
//! version
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Director-less BOSH release installer
///
/// Installs a job or packages from a BOSH release repository onto this host,
/// or bundles a job into a portable archive.
#[derive(Debug, Parser)]
#[command(
    name = "nise",
    author,
    version,
    about = "Director-less BOSH release installer",
    long_about = "nise-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Installs jobs and packages from a BOSH release repository\n\
                  without a director. `nise job REPO DEPLOY_CONFIG JOB` installs\n\
                  a job with its packages and templates; `nise package REPO PKG...`\n\
                  installs packages only; `nise archive REPO JOB` bundles a job.",
    after_help = "SETTINGS FILES:\n\n\
                  nise reads `/etc/nise/nise.toml` and `./nise.toml` when present,\n\
                  then every file given with --config, in order. NISE_* environment\n\
                  variables (e.g. NISE_PATHS__INSTALL_DIR) and command-line flags\n\
                  override them."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all settings and their values.
    Options,

    /// Lists the settings files used by nise.
    Configs,

    /// Installs a job: its packages, templates and post-install hook.
    Job(JobArgs),

    /// Installs packages and their dependencies.
    Package(PackageArgs),

    /// Bundles a job, its packages and the release manifest.
    Archive(ArchiveArgs),
}

/// Arguments for `nise job`.
#[derive(Debug, Clone, Args)]
pub struct JobArgs {
    /// Release repository.
    #[arg(value_name = "REPO")]
    pub repo: PathBuf,

    /// YAML deployment configuration rendered into the templates.
    #[arg(value_name = "DEPLOY_CONFIG")]
    pub deploy_config: PathBuf,

    /// Job to install.
    #[arg(value_name = "JOB")]
    pub job: String,

    /// Installs only the job's templates, skipping packages.
    #[arg(short = 't', long = "template-only")]
    pub template_only: bool,
}

/// Arguments for `nise package`.
#[derive(Debug, Clone, Args)]
pub struct PackageArgs {
    /// Release repository.
    #[arg(value_name = "REPO")]
    pub repo: PathBuf,

    /// Packages to install.
    #[arg(value_name = "PACKAGE", required = true)]
    pub packages: Vec<String>,

    /// Installs only the named packages, not their dependencies.
    #[arg(long = "no-dependency")]
    pub no_dependency: bool,
}

/// Arguments for `nise archive`.
#[derive(Debug, Clone, Args)]
pub struct ArchiveArgs {
    /// Release repository.
    #[arg(value_name = "REPO")]
    pub repo: PathBuf,

    /// Job to bundle.
    #[arg(value_name = "JOB")]
    pub job: String,

    /// Output file or directory (default: `<release>-<job>-<version>.tar.gz`).
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

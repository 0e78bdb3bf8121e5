// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE       ← Additional settings files (can repeat)
//! --log-level N       ← Console and file verbosity (0-5)
//! --install-dir DIR   ← paths.install_dir override
//! --ip / --index      ← host.ip / host.index override
//!
//! Precedence: CLI flags > NISE_* env > --config > ./nise.toml > /etc/nise/nise.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML settings file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append, global = true)]
    pub configs: Vec<PathBuf>,

    /// Assumes yes for the confirmation prompt.
    #[arg(short = 'y', long = "assume-yes", global = true)]
    pub assume_yes: bool,

    /// Install root (default: /var/vcap).
    #[arg(short = 'd', long = "install-dir", value_name = "DIR", global = true)]
    pub install_dir: Option<PathBuf>,

    /// Staging directory wiped before every package build (default: /tmp/nise_bosh).
    #[arg(long = "working-dir", value_name = "DIR", global = true)]
    pub working_dir: Option<PathBuf>,

    /// IP address rendered as spec.networks.default.ip (default: detected).
    #[arg(short = 'n', long = "ip", value_name = "ADDRESS", global = true)]
    pub ip: Option<String>,

    /// Instance index rendered as spec.index (default: 0).
    #[arg(short = 'i', long = "index", value_name = "INDEX", global = true)]
    pub index: Option<u64>,

    /// Release manifest to use instead of the newest indexed one.
    #[arg(short = 'r', long = "release-file", value_name = "FILE", global = true)]
    pub release_file: Option<PathBuf>,

    /// Rebuilds packages even when the same version is installed.
    #[arg(short = 'f', long = "force", global = true)]
    pub force: bool,

    /// Log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5), global = true)]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Builds the settings loader: default files, `--config` files, `NISE_*`
    /// variables, then these flags.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be stored.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new()
            .add_toml_file_optional("/etc/nise/nise.toml")
            .add_toml_file_optional("nise.toml");
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }

        let path_string = |p: &PathBuf| p.display().to_string();
        let mut loader = loader
            .with_env_prefix("NISE")
            .set_opt("paths.install_dir", self.install_dir.as_ref().map(path_string))?
            .set_opt("paths.working_dir", self.working_dir.as_ref().map(path_string))?
            .set_opt("host.ip", self.ip.clone())?
            .set_opt("host.index", self.index)?
            .set_opt("global.log_level", self.log_level.map(u64::from))?
            .set_opt("global.log_file", self.log_file.as_ref().map(path_string))?;

        if self.assume_yes {
            loader = loader.set("global.assume_yes", true)?;
        }
        Ok(loader)
    }
}

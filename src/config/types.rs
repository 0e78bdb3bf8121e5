// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings sections.
//!
//! ```text
//! Settings: GlobalSettings, PathsSettings, PackagingSettings, HostSettings
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Variables removed from the packaging script environment by default.
///
/// A trailing `*` removes every variable with that prefix.
pub const DEFAULT_STRIP_ENV: &[&str] = &[
    "GEM_HOME",
    "GEM_PATH",
    "BUNDLE_GEMFILE",
    "RUBYOPT",
    "RUBYLIB",
    "RUSTFLAGS",
    "RUSTDOCFLAGS",
    "RUSTC_WRAPPER",
    "RUSTUP_TOOLCHAIN",
    "CARGO_*",
];

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalSettings {
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
    /// Console log level (0-5).
    pub log_level: LogLevel,
    /// Optional log file, written at debug level.
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            assume_yes: false,
            log_level: LogLevel::INFO,
            log_file: None,
        }
    }
}

/// Where things are installed and staged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsSettings {
    /// Install root (`packages/`, `jobs/`, `bosh/`, `data/` live here).
    pub install_dir: PathBuf,
    /// Scratch directory wiped before every package build and archive.
    pub working_dir: PathBuf,
}

impl Default for PathsSettings {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::from("/var/vcap"),
            working_dir: PathBuf::from("/tmp/nise_bosh"),
        }
    }
}

impl PathsSettings {
    /// Makes relative paths absolute against the current directory.
    ///
    /// Packaging scripts run with a different cwd, so every path handed to
    /// them must be absolute.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn resolve(&mut self) -> std::io::Result<()> {
        let cwd = std::env::current_dir()?;
        for path in [&mut self.install_dir, &mut self.working_dir] {
            if path.is_relative() {
                *path = cwd.join(&*path);
            }
        }
        Ok(())
    }
}

/// How packaging scripts are run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagingSettings {
    /// Interpreter for `packaging` scripts.
    pub shell: PathBuf,
    /// Variables removed from the script environment.
    pub strip_env: Vec<String>,
}

impl Default for PackagingSettings {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("/bin/bash"),
            strip_env: DEFAULT_STRIP_ENV.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Values injected into the template namespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostSettings {
    /// `spec.networks.default.ip`; detected when unset.
    pub ip: Option<String>,
    /// `spec.index`; 0 when unset.
    pub index: Option<u64>,
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings for nise-rs.
//!
//! # Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. /etc/nise/nise.toml
//! 3. ./nise.toml
//! 4. --config
//! 5. NISE_* env vars
//! 6. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! NISE_PATHS__INSTALL_DIR=/opt/vcap  → paths.install_dir = "/opt/vcap"
//! NISE_HOST__INDEX=3                 → host.index = 3
//! NISE_GLOBAL__ASSUME_YES=true       → global.assume_yes = true
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use types::{GlobalSettings, HostSettings, PackagingSettings, PathsSettings};

/// Complete application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub global: GlobalSettings,
    pub paths: PathsSettings,
    pub packaging: PackagingSettings,
    pub host: HostSettings,
}

impl Settings {
    /// Create a new settings loader.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nise_rs::config::Settings;
    ///
    /// let settings = Settings::builder()
    ///     .add_toml_file_optional("/etc/nise/nise.toml")
    ///     .add_toml_file_optional("nise.toml")
    ///     .with_env_prefix("NISE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load settings from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Settings` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Settings` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve relative paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.paths.resolve()?;
        Ok(())
    }

    /// Format settings for display, one `key = value` line each, sorted.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert("global.assume_yes", self.global.assume_yes.to_string());
        options.insert("global.log_level", self.global.log_level.as_u8().to_string());
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("paths.install_dir", self.paths.install_dir.display().to_string());
        options.insert("paths.working_dir", self.paths.working_dir.display().to_string());
        options.insert("packaging.shell", self.packaging.shell.display().to_string());
        options.insert("packaging.strip_env", self.packaging.strip_env.join(","));
        options.insert("host.ip", self.host.ip.clone().unwrap_or_default());
        options.insert(
            "host.index",
            self.host.index.map_or_else(String::new, |i| i.to_string()),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

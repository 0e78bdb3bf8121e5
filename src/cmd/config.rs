// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings-related commands for nise-rs.

use crate::config::Settings;

/// Display current settings.
pub fn run_options_command(settings: &Settings) {
    for line in settings.format_options() {
        println!("{line}");
    }
}

/// Display loaded settings files.
pub fn run_configs_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No settings files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}

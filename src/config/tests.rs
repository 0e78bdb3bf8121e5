// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigLoader, Settings};
use crate::error::ConfigurationError;
use crate::logging::LogLevel;
use std::path::PathBuf;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.paths.install_dir, PathBuf::from("/var/vcap"));
    assert_eq!(settings.paths.working_dir, PathBuf::from("/tmp/nise_bosh"));
    assert_eq!(settings.packaging.shell, PathBuf::from("/bin/bash"));
    assert!(settings.packaging.strip_env.iter().any(|s| s == "CARGO_*"));
    assert!(settings.host.ip.is_none());
    assert!(settings.host.index.is_none());
    assert_eq!(settings.global.log_level, LogLevel::INFO);
}

#[test]
fn test_parse_overrides_sections() {
    let settings = Settings::parse(
        r#"
        [paths]
        install_dir = "/opt/vcap"

        [packaging]
        shell = "/bin/sh"
        strip_env = ["GEM_HOME"]

        [host]
        ip = "10.0.0.5"
        index = 2
        "#,
    )
    .expect("valid settings");

    assert_eq!(settings.paths.install_dir, PathBuf::from("/opt/vcap"));
    assert_eq!(settings.paths.working_dir, PathBuf::from("/tmp/nise_bosh"));
    assert_eq!(settings.packaging.shell, PathBuf::from("/bin/sh"));
    assert_eq!(settings.packaging.strip_env, vec!["GEM_HOME".to_string()]);
    assert_eq!(settings.host.ip.as_deref(), Some("10.0.0.5"));
    assert_eq!(settings.host.index, Some(2));
}

#[test]
fn test_unknown_key_is_rejected() {
    let err = Settings::parse("[paths]\nprefix = \"/x\"\n").expect_err("unknown key");
    assert!(matches!(
        err.downcast_ref::<ConfigurationError>(),
        Some(ConfigurationError::ParseError { .. })
    ));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    assert!(Settings::parse("[global]\nlog_level = 9\n").is_err());
}

#[test]
fn test_cli_override_wins_over_file() {
    let settings = ConfigLoader::new()
        .add_toml_str("[host]\nindex = 1\n")
        .set("host.index", 39_i64)
        .and_then(|l| l.set_opt("host.ip", Some("39.39.39.39")))
        .and_then(|l| l.set_opt::<String>("paths.working_dir", None))
        .and_then(ConfigLoader::build)
        .expect("settings");

    assert_eq!(settings.host.index, Some(39));
    assert_eq!(settings.host.ip.as_deref(), Some("39.39.39.39"));
    assert_eq!(settings.paths.working_dir, PathBuf::from("/tmp/nise_bosh"));
}

#[test]
fn test_relative_paths_are_resolved() {
    let settings = Settings::parse("[paths]\ninstall_dir = \"vcap\"\n").expect("settings");
    assert!(settings.paths.install_dir.is_absolute());
    assert!(settings.paths.install_dir.ends_with("vcap"));
}

#[test]
fn test_optional_file_missing_is_ignored() {
    let loader = ConfigLoader::new().add_toml_file_optional("/nonexistent/nise.toml");
    assert!(loader.loaded_files().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn test_required_file_missing_fails() {
    assert!(Settings::from_file("/nonexistent/nise.toml").is_err());
}

#[test]
fn test_format_options() {
    let options = Settings::default().format_options();
    assert_eq!(options.len(), 9);
    assert_eq!(options[0], "global.assume_yes   = false");
    assert!(options.contains(&"paths.install_dir   = /var/vcap".to_string()));
    assert!(options.contains(&"packaging.shell     = /bin/bash".to_string()));
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Settings --> Logging --> Command Dispatch
//!   Job | Package | Archive | Options | Configs | Version
//! ```

use std::process::ExitCode;

use nise_rs::cli::global::GlobalOptions;
use nise_rs::cli::{self, Command};
use nise_rs::cmd::archive::run_archive_command;
use nise_rs::cmd::config::{run_configs_command, run_options_command};
use nise_rs::cmd::job::run_job_command;
use nise_rs::cmd::package::run_package_command;
use nise_rs::config::Settings;
use nise_rs::logging::{LogConfig, LogLevel, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let settings = match load_settings(&cli.global) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&settings);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &settings).await
}

fn build_log_config(settings: &Settings) -> LogConfig {
    let console_level = settings.global.log_level;
    let file_level = if console_level < LogLevel::DEBUG {
        LogLevel::DEBUG
    } else {
        console_level
    };

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(
            settings
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

async fn dispatch_command(cli: &cli::Cli, settings: &Settings) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(settings);
            Ok(())
        }
        Some(Command::Configs) => cli.global.config_loader().map(|loader| {
            run_configs_command(&loader.format_loaded_files());
        }),
        Some(Command::Job(args)) => run_job_command(args, settings, &cli.global).await,
        Some(Command::Package(args)) => run_package_command(args, settings, &cli.global).await,
        Some(Command::Archive(args)) => run_archive_command(args, settings, &cli.global).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_settings(global: &GlobalOptions) -> nise_rs::error::Result<Settings> {
    global.config_loader()?.build()
}

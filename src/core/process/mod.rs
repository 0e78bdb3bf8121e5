// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("/bin/bash")
//!   .arg() .cwd() .env() .capture_stdout()
//!   .run()
//!       --> tokio::process::Command
//!           stream stdout/stderr
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```
//!
//! Child processes run one at a time. The only concurrency is the pair of
//! reader tasks draining a single child's stdout and stderr.

pub mod builder;
mod io;
mod runner;

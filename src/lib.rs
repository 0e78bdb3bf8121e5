// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |             job / package / archive
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          engine           |
//!              |  release + deploy config  |
//!              '--+--------+--------+------'
//!                 |        |        |
//!                 v        v        v
//!             install  template  archive
//!             packages  ERB tags  bundle
//!                 |        |        |
//!                 +--------+--------+
//!                          v
//!           release (index, versions) / resolve / job
//!
//!   +-----------------------------------------+
//!   |  core   process, env; tools tar; net    |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, config,   |
//!   |               utility                   |
//!   +-----------------------------------------+
//! ```

pub mod archive;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod install;
pub mod job;
pub mod logging;
pub mod net;
pub mod release;
pub mod resolve;
pub mod template;
pub mod tools;
pub mod utility;

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External tools driven through [`ProcessBuilder`](crate::core::process::builder::ProcessBuilder).
//!
//! ```text
//! TarTool --> tar -xzf / tar -czf
//! ```

pub mod tar;

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management.
//!
//! # Architecture
//!
//! ```text
//! Env (copy-on-write BTreeMap<String, String>)
//! Sources: current_env(), Env::new()
//! Ops: set/get/remove/remove_matching/strip
//! ```
//!
//! Scripts never see the host process environment directly. Every child
//! process gets an explicit [`container::Env`] built from a snapshot, so
//! `std::env::set_var` is never needed.

pub mod container;


/// Captures the current process environment.
#[must_use]
pub fn current_env() -> container::Env {
    let vars = std::env::vars().collect();
    container::Env::from_map(vars)
}

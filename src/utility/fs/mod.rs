// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities.
//!
//! ```text
//! copy:  copy_dir_contents_async()  recursive directory copy
//!        copy_into_tree_async()     file or directory, keeping its path
//!                                   relative to a root
//! ```

pub mod copy;

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Confirmation prompt.

use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::error::Result;

/// Asks "Do you want to continue?" unless `assume_yes`; prints "Abort." on
/// refusal.
///
/// Enter accepts the default (yes). Escape counts as a refusal.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read.
pub fn confirm_or_abort(assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    let proceed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Do you want to continue?")
        .default(true)
        .interact_opt()?
        .unwrap_or(false);

    if !proceed {
        println!("Abort.");
    }
    Ok(proceed)
}

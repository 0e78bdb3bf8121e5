// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host network discovery.
//!
//! ```text
//! ip -4 -o address show
//!   2: eth0    inet 10.0.2.15/24 brd 10.0.2.255 scope global eth0 ...
//!                   ^^^^^^^^^         first "scope global" address
//! ```

use regex::Regex;
use tracing::{debug, warn};

use crate::core::process::builder::{ProcessBuilder, StreamFlags};

const INET_PATTERN: &str = r"inet ([\d.]+)/.*? scope global";

/// Extracts the first globally scoped IPv4 address from `ip -o` output.
#[must_use]
pub fn parse_primary_ipv4(output: &str) -> Option<String> {
    let re = Regex::new(INET_PATTERN).ok()?;
    output
        .lines()
        .find_map(|line| re.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Detects the host's primary IPv4 address.
///
/// Returns an empty string when the `ip` tool is unavailable or reports no
/// global address; templates then see an empty `spec.networks.default.ip`.
pub async fn detect_host_ip() -> String {
    let builder = match ProcessBuilder::which("ip") {
        Ok(builder) => builder,
        Err(e) => {
            warn!("Failed to detect the host IP address: {e:#}");
            return String::new();
        }
    };

    let output = builder
        .args(["-4", "-o", "address", "show"])
        .capture_stdout()
        .stderr_flags(StreamFlags::BIT_BUCKET)
        .run()
        .await;

    match output {
        Ok(output) => parse_primary_ipv4(output.stdout()).map_or_else(
            || {
                warn!("No global IPv4 address found on this host");
                String::new()
            },
            |ip| {
                debug!(ip = %ip, "detected host IP address");
                ip
            },
        ),
        Err(e) => {
            warn!("Failed to detect the host IP address: {e:#}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
1: lo    inet 127.0.0.1/8 scope host lo\\       valid_lft forever preferred_lft forever
2: eth0    inet 10.0.2.15/24 brd 10.0.2.255 scope global dynamic eth0\\       valid_lft 86053sec
3: eth1    inet 192.168.33.10/24 brd 192.168.33.255 scope global eth1\\       valid_lft forever
";

    #[test]
    fn test_parse_primary_ipv4_skips_loopback() {
        assert_eq!(parse_primary_ipv4(SAMPLE), Some("10.0.2.15".to_string()));
    }

    #[test]
    fn test_parse_primary_ipv4_none() {
        assert_eq!(
            parse_primary_ipv4("1: lo    inet 127.0.0.1/8 scope host lo\n"),
            None
        );
        assert_eq!(parse_primary_ipv4(""), None);
    }
}

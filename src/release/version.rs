// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release version ordering.
//!
//! ```text
//! "2.1-dev" --> VersionToken { major: 2, minor: 1, dev: true }
//!
//! order: major, then minor (absent = 0), then dev < final
//! 1 < 1.1-dev < 1.1 < 2 < 2.1-dev < 2.1 < 33-dev < 33
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::IndexError;

const DEV_SUFFIX: &str = "dev";

/// Parsed form of `MAJOR[.MINOR][-dev]`.
///
/// Components after `MINOR` are accepted and ignored for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionToken {
    major: u64,
    minor: u64,
    dev: bool,
}

impl VersionToken {
    /// Parses a version string.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::InvalidVersion` when a numeric component does not
    /// parse or the suffix is anything other than `dev`.
    pub fn parse(version: &str) -> Result<Self, IndexError> {
        let invalid = |message: &str| IndexError::InvalidVersion {
            version: version.to_string(),
            message: message.to_string(),
        };

        let (numbers, suffix) = match version.split_once('-') {
            Some((numbers, suffix)) => (numbers, Some(suffix)),
            None => (version, None),
        };

        let dev = match suffix {
            None => false,
            Some(DEV_SUFFIX) => true,
            Some(_) => return Err(invalid("only a '-dev' suffix is allowed")),
        };

        let mut parts = numbers.split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse::<u64>().ok())
            .ok_or_else(|| invalid("major component is not a number"))?;
        let minor = match parts.next() {
            Some(p) => p
                .parse::<u64>()
                .map_err(|_| invalid("minor component is not a number"))?,
            None => 0,
        };

        Ok(Self { major, minor, dev })
    }

    #[must_use]
    pub const fn major(&self) -> u64 {
        self.major
    }

    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.minor
    }

    /// True for versions carrying the `-dev` suffix.
    #[must_use]
    pub const fn is_dev(&self) -> bool {
        self.dev
    }
}

impl Ord for VersionToken {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            // a dev build precedes the final build of the same number
            .then(other.dev.cmp(&self.dev))
    }
}

impl PartialOrd for VersionToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.dev {
            write!(f, "-{DEV_SUFFIX}")?;
        }
        Ok(())
    }
}

/// Returns true when `version` carries the `-dev` suffix.
///
/// Only looks at the suffix, so it also works for package versions that are
/// not index versions (e.g. content hashes).
#[must_use]
pub fn is_dev_version(version: &str) -> bool {
    version.split('-').nth(1) == Some(DEV_SUFFIX)
}

/// Sorts version strings ascending.
///
/// The original strings are returned in order; the newest is last.
///
/// # Errors
///
/// Returns `IndexError::InvalidVersion` for an unparsable version and
/// `IndexError::CorruptIndex` when two versions share major, minor and dev
/// flag.
pub fn sort_versions<S: AsRef<str>>(versions: &[S]) -> Result<Vec<String>, IndexError> {
    let mut tokens = versions
        .iter()
        .map(|v| {
            let v = v.as_ref();
            VersionToken::parse(v).map(|t| (t, v.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tokens.sort_by(|(a, _), (b, _)| a.cmp(b));

    if let Some(pair) = tokens.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(IndexError::CorruptIndex {
            left: pair[0].1.clone(),
            right: pair[1].1.clone(),
        });
    }

    Ok(tokens.into_iter().map(|(_, v)| v).collect())
}

/// Returns the newest version, or `None` for an empty list.
///
/// # Errors
///
/// Same as [`sort_versions`].
pub fn newest_version<S: AsRef<str>>(versions: &[S]) -> Result<Option<String>, IndexError> {
    Ok(sort_versions(versions)?.pop())
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable struct and copy-on-write implementation.
//!
//! ```text
//! Env (copy-on-write)
//! data: Arc<BTreeMap<String, String>>
//! clone shares Arc until the first mutation (Arc::make_mut)
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

/// A set of environment variables with copy-on-write semantics.
///
/// Clones share their data until one of them is modified.
#[derive(Debug, Clone, Default)]
pub struct Env {
    data: Arc<BTreeMap<String, String>>,
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self {
            data: Arc::new(vars),
        }
    }

    /// Sets an environment variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.data).insert(key.into(), value.into());
        self
    }

    /// Gets an environment variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Removes an environment variable.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        if self.data.contains_key(key) {
            Arc::make_mut(&mut self.data).remove(key);
        }
        self
    }

    /// Removes every variable whose name starts with `prefix`.
    pub fn remove_matching(&mut self, prefix: &str) -> &mut Self {
        if self.data.keys().any(|k| k.starts_with(prefix)) {
            Arc::make_mut(&mut self.data).retain(|k, _| !k.starts_with(prefix));
        }
        self
    }

    /// Removes variables named by `patterns`.
    ///
    /// A pattern ending in `*` removes every variable with that prefix;
    /// anything else removes the exact name.
    pub fn strip<S: AsRef<str>>(&mut self, patterns: &[S]) -> &mut Self {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match pattern.strip_suffix('*') {
                Some(prefix) => self.remove_matching(prefix),
                None => self.remove(pattern),
            };
        }
        self
    }

    /// Returns an iterator over environment variables.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

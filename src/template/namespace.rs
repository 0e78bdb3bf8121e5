// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hierarchical template variables addressed by dot paths.
//!
//! ```text
//! spec:
//!   networks:            get("spec.networks.default.ip")
//!     default:     -->   Subtree -> Subtree -> Subtree -> Scalar
//!       ip: 10.0.0.1
//! ```

use std::collections::BTreeMap;

use crate::error::TemplateError;

/// A node in a [`ConfigNamespace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceValue {
    Null,
    Scalar(String),
    Sequence(Vec<NamespaceValue>),
    Subtree(ConfigNamespace),
}

impl NamespaceValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    /// Converts a YAML node; mapping keys become strings.
    #[must_use]
    pub fn from_yaml(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Scalar(b.to_string()),
            Value::Number(n) => Self::Scalar(n.to_string()),
            Value::String(s) => Self::Scalar(s),
            Value::Sequence(items) => {
                Self::Sequence(items.into_iter().map(Self::from_yaml).collect())
            }
            Value::Mapping(map) => Self::Subtree(ConfigNamespace::from_mapping(map)),
            Value::Tagged(tagged) => Self::from_yaml(tagged.value),
        }
    }

    /// JSON form used when a sequence or subtree is printed.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Scalar(s) => serde_json::Value::String(s.clone()),
            Self::Sequence(items) => items.iter().map(Self::to_json).collect(),
            Self::Subtree(tree) => serde_json::Value::Object(
                tree.entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Text written into a rendered template.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Scalar(s) => s.clone(),
            Self::Sequence(_) | Self::Subtree(_) => self.to_json().to_string(),
        }
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    use serde_yaml::Value;
    match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// A tree of named values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigNamespace {
    entries: BTreeMap<String, NamespaceValue>,
}

impl ConfigNamespace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_mapping(map: serde_yaml::Mapping) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(k, v)| (yaml_key(k), NamespaceValue::from_yaml(v)))
                .collect(),
        }
    }

    /// Builds a namespace from a YAML document.
    ///
    /// An empty document yields an empty namespace; anything other than a
    /// mapping is rejected.
    ///
    /// # Errors
    ///
    /// Returns a description of the offending node type.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, String> {
        match value {
            serde_yaml::Value::Null => Ok(Self::new()),
            serde_yaml::Value::Mapping(map) => Ok(Self::from_mapping(map)),
            other => Err(format!("expected a mapping at the top level, got {other:?}")),
        }
    }

    /// Top-level keys and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamespaceValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a dot-separated path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&NamespaceValue> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut node = self.entries.get(first)?;
        for segment in segments {
            match node {
                NamespaceValue::Subtree(tree) => node = tree.entries.get(segment)?,
                _ => return None,
            }
        }
        Some(node)
    }

    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Sets a dot-separated path, creating intermediate subtrees.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::NotASubtree` if an intermediate segment holds a
    /// non-subtree value.
    pub fn set(&mut self, path: &str, value: NamespaceValue) -> Result<(), TemplateError> {
        let not_a_subtree = |segment: &str| TemplateError::NotASubtree {
            path: path.to_string(),
            segment: segment.to_string(),
        };

        let (parents, leaf) = match path.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, path),
        };

        let mut tree = self;
        for segment in parents.into_iter().flat_map(|p| p.split('.')) {
            let node = tree
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| NamespaceValue::Subtree(Self::new()));
            tree = match node {
                NamespaceValue::Subtree(child) => child,
                _ => return Err(not_a_subtree(segment)),
            };
        }
        tree.entries.insert(leaf.to_string(), value);
        Ok(())
    }

    /// Sets `path` only if nothing is there yet; returns whether it was set.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigNamespace::set`].
    pub fn set_default(&mut self, path: &str, value: NamespaceValue) -> Result<bool, TemplateError> {
        if self.exists(path) {
            return Ok(false);
        }
        self.set(path, value)?;
        Ok(true)
    }
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Job specification (`jobs/<job>/spec`).

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::error::{ExistenceError, ManifestError, Result};
use crate::release::load_yaml;

fn packages_or_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keeps the declaration order of the `templates` mapping.
fn template_pairs<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(mapping) = Option::<serde_yaml::Mapping>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    mapping
        .into_iter()
        .map(|(source, dest)| match (source, dest) {
            (serde_yaml::Value::String(source), serde_yaml::Value::String(dest)) => {
                Ok((source, dest))
            }
            (source, dest) => Err(serde::de::Error::custom(format!(
                "template entries must map a file name to a path, got {source:?}: {dest:?}"
            ))),
        })
        .collect()
}

/// A job as declared in the release repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobSpec {
    /// Directory name under `jobs/`. A `name` key in the spec file is
    /// replaced by it on load.
    #[serde(default)]
    pub name: String,
    /// Packages the job needs, in declaration order.
    #[serde(default, deserialize_with = "packages_or_empty")]
    pub packages: Vec<String>,
    /// `(source under templates/, destination under jobs/<job>/)` pairs.
    #[serde(default, deserialize_with = "template_pairs")]
    pub templates: Vec<(String, String)>,
}

impl JobSpec {
    /// Directory of `job` inside the repository.
    #[must_use]
    pub fn dir(repo: &Path, job: &str) -> PathBuf {
        repo.join("jobs").join(job)
    }

    /// Loads `jobs/<job>/spec`.
    ///
    /// # Errors
    ///
    /// Returns `ExistenceError::JobNotFound` if the job directory is missing
    /// and `ManifestError::JobSpecInvalid` if the spec cannot be parsed.
    pub async fn load(repo: &Path, job: &str) -> Result<Self> {
        let dir = Self::dir(repo, job);
        if !dir.is_dir() {
            return Err(ExistenceError::JobNotFound {
                job: job.to_string(),
            }
            .into());
        }

        let path = dir.join("spec");
        let mut spec: Self = load_yaml(&path)
            .await
            .map_err(|message| ManifestError::JobSpecInvalid {
                path: path.display().to_string(),
                message,
            })?;
        spec.name = job.to_string();
        Ok(spec)
    }
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release manifest discovery and parsing.
//!
//! ```text
//! <repo>/config/final.yml        final_name
//! <repo>/releases/index.yml      builds: { id: { version } }
//! <repo>/config/dev.yml          dev_name
//! <repo>/dev_releases/index.yml  builds: { id: { version } }
//!            |
//!            v
//!   merge by build id (dev wins) --> newest_version()
//!            |
//!     -dev? -+- yes --> dev_releases/<dev_name>-<version>.yml
//!            +- no  --> releases/<final_name>-<version>.yml
//!            |
//!            v
//!   Release { manifest, packages by name }
//! ```

pub mod version;


use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::error::{ArchiveError, ConfigurationError, IndexError, ManifestError, Result};
use version::{is_dev_version, newest_version};

/// Accepts a YAML string, integer or float and returns its text.
///
/// Release tooling writes `version: 39` as often as `version: "39.1-dev"`.
fn version_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a version string or number, got {other:?}"
        ))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One package entry of a release manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageSpec {
    pub name: String,
    #[serde(deserialize_with = "version_string")]
    pub version: String,
    /// Names of packages this one depends on; looked up at resolution time.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: Vec<String>,
}

/// A release manifest (`<name>-<version>.yml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseManifest {
    pub name: String,
    #[serde(deserialize_with = "version_string")]
    pub version: String,
    #[serde(default)]
    pub packages: Vec<PackageSpec>,
}

#[derive(Debug, Default, Deserialize)]
struct FinalConfig {
    final_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DevConfig {
    dev_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BuildEntry {
    #[serde(deserialize_with = "version_string")]
    version: String,
}

#[derive(Debug, Default, Deserialize)]
struct ReleaseIndex {
    #[serde(default)]
    builds: Option<serde_yaml::Mapping>,
}

impl ReleaseIndex {
    /// Build entries keyed by build id; ids may be written as numbers.
    fn into_builds(self, path: &Path) -> Result<BTreeMap<String, String>> {
        let unreadable = |message: String| IndexError::Unreadable {
            path: path.display().to_string(),
            message,
        };

        self.builds
            .unwrap_or_default()
            .into_iter()
            .map(|(id, entry)| {
                let id = match id {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    other => return Err(unreadable(format!("invalid build id {other:?}")).into()),
                };
                let entry: BuildEntry =
                    serde_yaml::from_value(entry).map_err(|e| unreadable(e.to_string()))?;
                Ok((id, entry.version))
            })
            .collect()
    }
}

/// A loaded release: the selected manifest and its package table.
///
/// Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Release {
    repo: PathBuf,
    manifest_path: PathBuf,
    manifest: ReleaseManifest,
    packages: BTreeMap<String, PackageSpec>,
}

impl Release {
    /// Builds the package table for an already parsed manifest.
    #[must_use]
    pub fn from_manifest(repo: PathBuf, manifest_path: PathBuf, manifest: ReleaseManifest) -> Self {
        let packages = manifest
            .packages
            .iter()
            .map(|p| (p.name.clone(), p.clone()))
            .collect();
        Self {
            repo,
            manifest_path,
            manifest,
            packages,
        }
    }

    #[must_use]
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Path of the manifest file this release was loaded from.
    #[must_use]
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.manifest.version
    }

    #[must_use]
    pub const fn manifest(&self) -> &ReleaseManifest {
        &self.manifest
    }

    #[must_use]
    pub fn package(&self, name: &str) -> Option<&PackageSpec> {
        self.packages.get(name)
    }

    #[must_use]
    pub const fn packages(&self) -> &BTreeMap<String, PackageSpec> {
        &self.packages
    }

    /// Location of the compiled archive for `spec`.
    ///
    /// Dev versions live in `.dev_builds`, everything else in `.final_builds`.
    #[must_use]
    pub fn archive_path(&self, spec: &PackageSpec) -> PathBuf {
        let store = if is_dev_version(&spec.version) {
            ".dev_builds"
        } else {
            ".final_builds"
        };
        self.repo
            .join(store)
            .join("packages")
            .join(&spec.name)
            .join(format!("{}.tgz", spec.version))
    }

    /// Like [`Release::archive_path`], but fails if the archive is absent.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::PackageArchiveMissing` naming the package and path.
    pub fn find_archive(&self, spec: &PackageSpec) -> Result<PathBuf> {
        let path = self.archive_path(spec);
        if !path.is_file() {
            return Err(ArchiveError::PackageArchiveMissing {
                package: spec.name.clone(),
                path: path.display().to_string(),
            }
            .into());
        }
        Ok(path)
    }
}

/// Locates and parses the release manifest of a repository.
#[derive(Debug, Clone)]
pub struct ReleaseLoader {
    repo: PathBuf,
    manifest_override: Option<PathBuf>,
}

impl ReleaseLoader {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self {
            repo: repo.into(),
            manifest_override: None,
        }
    }

    /// Load this manifest instead of the newest indexed one.
    #[must_use]
    pub fn with_manifest_override(mut self, path: Option<PathBuf>) -> Self {
        self.manifest_override = path;
        self
    }

    /// Loads the release.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::RepositoryNotFound` if the repository is missing.
    /// - `ConfigurationError::ReleaseFileNotFound` if the override is missing.
    /// - `IndexError` if no index lists a build or the index is corrupt.
    /// - `ManifestError::LoadFailed` if the manifest cannot be read or parsed.
    pub async fn load(self) -> Result<Release> {
        if !self.repo.is_dir() {
            return Err(ConfigurationError::RepositoryNotFound {
                path: self.repo.display().to_string(),
            }
            .into());
        }

        let manifest_path = match self.manifest_override.clone() {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigurationError::ReleaseFileNotFound {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                path
            }
            None => self.newest_manifest_path().await?,
        };

        info!(manifest = %manifest_path.display(), "loading release manifest");
        let manifest: ReleaseManifest = load_yaml(&manifest_path).await.map_err(|message| {
            ManifestError::LoadFailed {
                path: manifest_path.display().to_string(),
                message,
            }
        })?;

        Ok(Release::from_manifest(self.repo, manifest_path, manifest))
    }

    async fn newest_manifest_path(&self) -> Result<PathBuf> {
        let final_index_path = self.repo.join("releases/index.yml");
        let dev_index_path = self.repo.join("dev_releases/index.yml");

        let final_config: FinalConfig = load_optional(&self.repo.join("config/final.yml")).await?;
        let dev_config: DevConfig = load_optional(&self.repo.join("config/dev.yml")).await?;
        let final_index: ReleaseIndex = load_optional(&final_index_path).await?;
        let dev_index: ReleaseIndex = load_optional(&dev_index_path).await?;

        let mut builds = final_index.into_builds(&final_index_path)?;
        builds.extend(dev_index.into_builds(&dev_index_path)?);

        let versions: Vec<String> = builds.into_values().collect();
        debug!(count = versions.len(), "collected indexed versions");

        let newest = newest_version(&versions)?.ok_or_else(|| IndexError::NoReleaseIndex {
            repo: self.repo.display().to_string(),
        })?;

        let path = if is_dev_version(&newest) {
            let name = dev_config.dev_name.unwrap_or_default();
            self.repo.join("dev_releases").join(format!("{name}-{newest}.yml"))
        } else {
            let name = final_config.final_name.unwrap_or_default();
            self.repo.join("releases").join(format!("{name}-{newest}.yml"))
        };
        Ok(path)
    }
}

/// Reads and parses a YAML file, flattening failures to a message.
pub(crate) async fn load_yaml<T>(path: &Path) -> std::result::Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path).await.map_err(|e| e.to_string())?;
    serde_yaml::from_str(&content).map_err(|e| e.to_string())
}

/// Like [`load_yaml`], but an absent or empty file yields `T::default()`.
async fn load_optional<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !path.is_file() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path).await?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(&content).map_err(|e| {
        IndexError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

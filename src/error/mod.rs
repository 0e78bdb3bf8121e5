// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!   anyhow::Error  <-- Err(XxxError::... .into())
//!        |
//!        +-- downcast_ref::<XxxError>()
//!
//!   Configuration  RepositoryNotFound, ReleaseFileNotFound, DeployConfig, ...
//!   Index          NoReleaseIndex, CorruptIndex, Unreadable, InvalidVersion
//!   Manifest       LoadFailed, JobSpecInvalid
//!   Resolution     CyclicDependency, UnknownPackage
//!   Archive        PackageArchiveMissing
//!   Script         PackagingFailed, PostInstallFailed
//!   Template       SourceMissing, UnknownVariable, UnsupportedTag, ...
//!   Existence      JobNotFound, PackageNotFound
//!   Process        ExecutableNotFound, SpawnFailed, NonZeroExit
//! ```
//!
//! Operations return [`Result`] (anyhow). Typed errors are raised through
//! `Err(XxxError::... .into())` so callers can `downcast_ref` to tell them
//! apart.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

// --- Configuration Errors ---

/// Errors in how the engine was pointed at its inputs.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The release repository root does not exist.
    #[error("Release repository does not exist: {path}")]
    RepositoryNotFound { path: String },

    /// An explicit release manifest override does not exist.
    #[error("release file not found: {path}")]
    ReleaseFileNotFound { path: String },

    /// The deploy configuration could not be read or parsed.
    #[error("Deploy config file not found or invalid: {path}: {message}")]
    DeployConfig { path: String, message: String },

    /// Failed to parse a settings file.
    #[error("failed to parse settings: {message}")]
    ParseError { message: String },

    /// Invalid settings value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Index Errors ---

/// Release index errors.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Neither the final nor the dev index lists a build.
    #[error(
        "No release index found in {repo}!\nTry `bosh create release` in your release repository."
    )]
    NoReleaseIndex { repo: String },

    /// Two index entries share major, minor and dev flag.
    #[error("Invalid index file: versions '{left}' and '{right}' are ambiguous")]
    CorruptIndex { left: String, right: String },

    /// An index or release config file exists but cannot be parsed.
    #[error("Failed to read release index {path}: {message}")]
    Unreadable { path: String, message: String },

    /// A version string does not follow `MAJOR[.MINOR][-dev]`.
    #[error("invalid version string '{version}': {message}")]
    InvalidVersion { version: String, message: String },
}

// --- Manifest Errors ---

/// Release manifest and job spec errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest could not be read or parsed.
    #[error("Failed to load release file {path}: {message}")]
    LoadFailed { path: String, message: String },

    /// A `jobs/<job>/spec` file could not be read or parsed.
    #[error("Failed to load job spec {path}: {message}")]
    JobSpecInvalid { path: String, message: String },
}

// --- Resolution Errors ---

/// Dependency resolution errors.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// A dependency chain loops back on one of its ancestors.
    #[error("Detected a cyclic dependency: {package} depends on '{dependency}' which is one of its ancestors")]
    CyclicDependency { package: String, dependency: String },

    /// A package name is not present in the release manifest.
    #[error("package '{package}' is not defined in the release")]
    UnknownPackage { package: String },
}

// --- Archive Errors ---

/// Package archive errors.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The build store has no archive for the resolved version.
    #[error("Package archive for {package} not found in {path}.")]
    PackageArchiveMissing { package: String, path: String },
}

// --- Script Errors ---

/// Errors from scripts shipped with packages and jobs.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The `packaging` script exited unsuccessfully.
    #[error("packaging script failed for {package} {version} (exit code {code})")]
    PackagingFailed {
        package: String,
        version: String,
        code: i32,
    },

    /// The job's `bin/post_install` hook exited unsuccessfully.
    #[error("post install hook failed for job {job} (exit code {code})")]
    PostInstallFailed { job: String, code: i32 },
}

// --- Template Errors ---

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A template source declared by the job is missing.
    #[error("template not found: {path}")]
    SourceMissing { path: String },

    /// A tag refers to a variable that is not in the namespace.
    #[error("undefined variable '{expression}' in {template}")]
    UnknownVariable {
        template: String,
        expression: String,
    },

    /// A tag uses a form the renderer does not evaluate.
    #[error("unsupported tag '{tag}' in {template}")]
    UnsupportedTag { template: String, tag: String },

    /// A tag is opened but never closed.
    #[error("unterminated tag in {template} at byte {offset}")]
    Unterminated { template: String, offset: usize },

    /// A dot path walks through a scalar.
    #[error("cannot set '{path}': '{segment}' is not a subtree")]
    NotASubtree { path: String, segment: String },
}

// --- Existence Errors ---

/// The caller named a job or package the repository does not contain.
#[derive(Debug, Error)]
pub enum ExistenceError {
    #[error("Given job does not exist!")]
    JobNotFound { job: String },

    #[error("Given package {package} does not exist!")]
    PackageNotFound { package: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package dependency resolution.
//!
//! ```text
//! resolve([tako, kaito])
//!   tako  trace=[tako]        -> luca -> miku
//!   kaito trace=[kaito]       -> tako (already resolved)
//!   ==> [miku, luca, tako, kaito]
//! ```
//!
//! Depth-first, caller order preserved, each package appended once after
//! all of its dependencies. A dependency that is already on the current
//! branch is a cycle.


use tracing::trace;

use crate::error::{ResolutionError, Result};
use crate::release::{PackageSpec, Release};

/// Computes install order for a set of packages.
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'a> {
    release: &'a Release,
}

impl<'a> DependencyResolver<'a> {
    #[must_use]
    pub const fn new(release: &'a Release) -> Self {
        Self { release }
    }

    /// Returns `packages` and their transitive dependencies, dependencies first.
    ///
    /// # Errors
    ///
    /// - `ResolutionError::UnknownPackage` if a requested or dependency name is
    ///   not in the release.
    /// - `ResolutionError::CyclicDependency` if a dependency chain loops.
    pub fn resolve<S: AsRef<str>>(&self, packages: &[S]) -> Result<Vec<String>> {
        let mut resolved = Vec::new();
        self.visit(packages, &[], &mut resolved)?;
        Ok(resolved)
    }

    fn visit<S: AsRef<str>>(
        &self,
        packages: &[S],
        ancestors: &[&str],
        resolved: &mut Vec<String>,
    ) -> Result<()> {
        for package in packages {
            let package = package.as_ref();
            if resolved.iter().any(|r| r == package) {
                continue;
            }

            let spec = self.lookup(package)?;

            let mut branch = ancestors.to_vec();
            branch.push(package);

            if let Some(dependency) = spec
                .dependencies
                .iter()
                .find(|d| branch.contains(&d.as_str()))
            {
                return Err(ResolutionError::CyclicDependency {
                    package: package.to_string(),
                    dependency: dependency.clone(),
                }
                .into());
            }

            self.visit(&spec.dependencies, &branch, resolved)?;

            trace!(package, depth = ancestors.len(), "resolved");
            resolved.push(package.to_string());
        }
        Ok(())
    }

    fn lookup(&self, package: &str) -> Result<&'a PackageSpec> {
        self.release.package(package).ok_or_else(|| {
            ResolutionError::UnknownPackage {
                package: package.to_string(),
            }
            .into()
        })
    }
}

//! Seams toward external collaborators
//!
//! Manifest parsing and registry lookups live outside this crate. The
//! planner talks to them through these traits only.

use crate::domain::Dependency;
use crate::error::CollaboratorError;
use std::path::Path;

/// Discovers dependencies declared under a repository root
pub trait ManifestScanner {
    /// Scanner name used in logs (e.g. "npm", "composer")
    fn name(&self) -> &str;

    /// Returns every dependency found under `root`
    fn scan(&self, root: &Path) -> Result<Vec<Dependency>, CollaboratorError>;
}

/// Resolves the newest available version of a dependency
pub trait VersionResolver {
    /// `Ok(None)` when the dependency is already up to date or unknown
    fn latest_version(&self, dependency: &Dependency) -> Result<Option<String>, CollaboratorError>;
}

/// A scanner returning a fixed list, for wiring pre-scanned input
#[derive(Debug, Clone, Default)]
pub struct StaticScanner {
    name: String,
    dependencies: Vec<Dependency>,
}

impl StaticScanner {
    /// Creates a scanner that always yields `dependencies`
    pub fn new(name: impl Into<String>, dependencies: Vec<Dependency>) -> Self {
        Self {
            name: name.into(),
            dependencies,
        }
    }
}

impl ManifestScanner for StaticScanner {
    fn name(&self) -> &str {
        &self.name
    }

    fn scan(&self, _root: &Path) -> Result<Vec<Dependency>, CollaboratorError> {
        Ok(self.dependencies.clone())
    }
}

impl<F> VersionResolver for F
where
    F: Fn(&Dependency) -> Result<Option<String>, CollaboratorError>,
{
    fn latest_version(&self, dependency: &Dependency) -> Result<Option<String>, CollaboratorError> {
        self(dependency)
    }
}

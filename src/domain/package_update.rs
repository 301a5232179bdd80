//! Classified package updates

use super::{Dependency, SourceFileKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic severity of a version change
///
/// Variants are declared in ascending severity so that `Ord` can pick the
/// dominant type of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    /// Bug fix level change
    Patch,
    /// Backwards compatible feature change
    Minor,
    /// Potentially breaking change
    Major,
}

impl UpdateType {
    /// Returns the lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Patch => "patch",
            UpdateType::Minor => "minor",
            UpdateType::Major => "major",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency together with the version it should move to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageUpdate {
    /// The dependency being updated
    #[serde(flatten)]
    pub dependency: Dependency,
    /// Target version
    #[serde(alias = "newVersion")]
    pub new_version: String,
    /// Severity of the change
    #[serde(alias = "updateType")]
    pub update_type: UpdateType,
}

impl PackageUpdate {
    /// Creates a new PackageUpdate with an explicit update type
    pub fn new(
        dependency: Dependency,
        new_version: impl Into<String>,
        update_type: UpdateType,
    ) -> Self {
        Self {
            dependency,
            new_version: new_version.into(),
            update_type,
        }
    }

    /// Creates a new PackageUpdate, classifying the change from the versions
    pub fn classified(dependency: Dependency, new_version: impl Into<String>) -> Self {
        let new_version = new_version.into();
        let update_type = crate::update::classify(&dependency.current_version, &new_version);
        Self::new(dependency, new_version, update_type)
    }

    /// Returns the package name
    pub fn name(&self) -> &str {
        &self.dependency.name
    }

    /// Returns the current version spec as written in the manifest
    pub fn current_version(&self) -> &str {
        &self.dependency.current_version
    }

    /// Returns the source file path
    pub fn file(&self) -> &str {
        &self.dependency.file
    }

    /// Returns the identity used to collapse duplicates
    pub fn dedup_key(&self) -> (String, String, String) {
        (
            self.dependency.name.clone(),
            self.dependency.current_version.clone(),
            self.new_version.clone(),
        )
    }

    /// Returns the source file kind of this update
    pub fn source_kind(&self) -> SourceFileKind {
        self.dependency.source_kind()
    }

    /// Returns the source file priority of this update
    pub fn source_priority(&self) -> u8 {
        self.source_kind().priority()
    }
}

impl fmt::Display for PackageUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} → {} ({})",
            self.dependency.name, self.dependency.current_version, self.new_version, self.update_type
        )
    }
}

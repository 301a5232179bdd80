//! Dependency information structures

use super::SourceFileKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The section of a manifest a dependency was declared in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DependencyType {
    /// npm `dependencies`
    Dependencies,
    /// npm `devDependencies`
    DevDependencies,
    /// npm `peerDependencies`
    PeerDependencies,
    /// npm `optionalDependencies`
    OptionalDependencies,
    /// `uses:` steps of a CI workflow
    GithubActions,
    /// `build.zig.zon` dependencies
    ZigDependencies,
    /// Composer `require`
    Require,
    /// Composer `require-dev`
    RequireDev,
    /// Any other section name, kept verbatim
    Other(String),
}

impl DependencyType {
    /// Returns the manifest section name
    pub fn as_str(&self) -> &str {
        match self {
            DependencyType::Dependencies => "dependencies",
            DependencyType::DevDependencies => "devDependencies",
            DependencyType::PeerDependencies => "peerDependencies",
            DependencyType::OptionalDependencies => "optionalDependencies",
            DependencyType::GithubActions => "github-actions",
            DependencyType::ZigDependencies => "zig-dependencies",
            DependencyType::Require => "require",
            DependencyType::RequireDev => "require-dev",
            DependencyType::Other(name) => name,
        }
    }

    /// Returns true for development-only sections
    pub fn is_dev(&self) -> bool {
        matches!(
            self,
            DependencyType::DevDependencies | DependencyType::RequireDev
        )
    }
}

impl From<&str> for DependencyType {
    fn from(value: &str) -> Self {
        match value {
            "dependencies" => DependencyType::Dependencies,
            "devDependencies" => DependencyType::DevDependencies,
            "peerDependencies" => DependencyType::PeerDependencies,
            "optionalDependencies" => DependencyType::OptionalDependencies,
            "github-actions" => DependencyType::GithubActions,
            "zig-dependencies" => DependencyType::ZigDependencies,
            "require" => DependencyType::Require,
            "require-dev" => DependencyType::RequireDev,
            other => DependencyType::Other(other.to_string()),
        }
    }
}

impl From<String> for DependencyType {
    fn from(value: String) -> Self {
        DependencyType::from(value.as_str())
    }
}

impl From<DependencyType> for String {
    fn from(value: DependencyType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency declaration as reported by a manifest scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name
    pub name: String,
    /// Version specification exactly as written, range prefix included
    #[serde(alias = "currentVersion")]
    pub current_version: String,
    /// Manifest section the dependency was declared in
    #[serde(rename = "type", alias = "dependencyType", alias = "dependency_type")]
    pub dependency_type: DependencyType,
    /// Source path of the manifest
    pub file: String,
    /// Free-form scanner metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(
        name: impl Into<String>,
        current_version: impl Into<String>,
        dependency_type: DependencyType,
        file: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current_version: current_version.into(),
            dependency_type,
            file: file.into(),
            metadata: None,
        }
    }

    /// Attaches a metadata entry (builder pattern)
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Classifies the source file this dependency came from
    pub fn source_kind(&self) -> SourceFileKind {
        SourceFileKind::from_path(&self.file)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} ({}) [{}]",
            self.name, self.current_version, self.dependency_type, self.file
        )
    }
}

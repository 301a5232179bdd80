//! Source file classification
//!
//! When the same update is discovered in several manifests, the record from
//! the most authoritative file survives. Authority is an explicit ordinal:
//!
//! | Kind | Priority |
//! |---|---|
//! | `package.json` | 3 |
//! | Composer manifest (`composer.json`) | 2 |
//! | CI workflow (`.github/workflows/*.yml`) | 1 |
//! | anything else | 0 |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of manifest a dependency fact was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFileKind {
    /// npm `package.json`
    PackageJson,
    /// Composer `composer.json`
    ComposerManifest,
    /// GitHub Actions workflow file
    WorkflowFile,
    /// Any other dependency manifest (`deps.yaml`, `build.zig.zon`, ...)
    OtherManifest,
}

impl SourceFileKind {
    /// Classifies a source path
    pub fn from_path(path: &str) -> Self {
        let normalized = path.replace('\\', "/");
        let file_name = normalized.rsplit('/').next().unwrap_or_default();

        match file_name {
            "package.json" => SourceFileKind::PackageJson,
            "composer.json" => SourceFileKind::ComposerManifest,
            _ if is_workflow_path(&normalized, file_name) => SourceFileKind::WorkflowFile,
            _ => SourceFileKind::OtherManifest,
        }
    }

    /// Ordinal priority; higher wins when resolving duplicates
    pub fn priority(&self) -> u8 {
        match self {
            SourceFileKind::PackageJson => 3,
            SourceFileKind::ComposerManifest => 2,
            SourceFileKind::WorkflowFile => 1,
            SourceFileKind::OtherManifest => 0,
        }
    }

    /// Returns the display name for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceFileKind::PackageJson => "package.json",
            SourceFileKind::ComposerManifest => "Composer manifest",
            SourceFileKind::WorkflowFile => "CI workflow",
            SourceFileKind::OtherManifest => "dependency manifest",
        }
    }
}

fn is_workflow_path(normalized: &str, file_name: &str) -> bool {
    let in_workflows_dir = normalized.starts_with(".github/workflows/")
        || normalized.contains("/.github/workflows/");
    in_workflows_dir && (file_name.ends_with(".yml") || file_name.ends_with(".yaml"))
}

impl fmt::Display for SourceFileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_json() {
        assert_eq!(SourceFileKind::from_path("package.json"), SourceFileKind::PackageJson);
        assert_eq!(
            SourceFileKind::from_path("apps/web/package.json"),
            SourceFileKind::PackageJson
        );
        assert_eq!(
            SourceFileKind::from_path("apps\\web\\package.json"),
            SourceFileKind::PackageJson
        );
    }

    #[test]
    fn test_composer_manifest() {
        assert_eq!(
            SourceFileKind::from_path("composer.json"),
            SourceFileKind::ComposerManifest
        );
        assert_eq!(
            SourceFileKind::from_path("backend/composer.json"),
            SourceFileKind::ComposerManifest
        );
    }

    #[test]
    fn test_workflow_file() {
        assert_eq!(
            SourceFileKind::from_path(".github/workflows/ci.yml"),
            SourceFileKind::WorkflowFile
        );
        assert_eq!(
            SourceFileKind::from_path("sub/.github/workflows/release.yaml"),
            SourceFileKind::WorkflowFile
        );
    }

    #[test]
    fn test_other_manifests() {
        for path in [
            "deps.yaml",
            "dependencies.yml",
            "pkgx.yaml",
            "build.zig.zon",
            "composer.lock",
            "package-lock.json",
            "my-package.json",
            ".github/dependabot.yml",
            ".github/workflows/README.md",
            "workflows/ci.yml",
        ] {
            assert_eq!(
                SourceFileKind::from_path(path),
                SourceFileKind::OtherManifest,
                "{}",
                path
            );
        }
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(SourceFileKind::PackageJson.priority(), 3);
        assert_eq!(SourceFileKind::ComposerManifest.priority(), 2);
        assert_eq!(SourceFileKind::WorkflowFile.priority(), 1);
        assert_eq!(SourceFileKind::OtherManifest.priority(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(SourceFileKind::WorkflowFile.to_string(), "CI workflow");
    }
}

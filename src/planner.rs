//! Update planning workflow
//!
//! This module wires the engine together:
//! - Workflow coordination: scan → resolve → classify → group → render → name
//! - Skipping of no-op updates (target equals the current version)
//! - Error handling with partial continuation on collaborator failures

use crate::collaborator::{ManifestScanner, VersionResolver};
use crate::domain::{Dependency, PackageUpdate, UpdateGroup};
use crate::error::{CollaboratorError, InputError};
use crate::state::render_group;
use crate::update::{
    branch_name, branch_name_on, group_updates, is_same_version, DEFAULT_BRANCH_PREFIX,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A dependency whose latest version has been resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    /// The dependency as declared
    #[serde(flatten)]
    pub dependency: Dependency,
    /// Latest available version
    #[serde(alias = "newVersion")]
    pub new_version: String,
}

impl ResolvedDependency {
    /// Creates a new resolved dependency
    pub fn new(dependency: Dependency, new_version: impl Into<String>) -> Self {
        Self {
            dependency,
            new_version: new_version.into(),
        }
    }

    /// Reads a JSON array of resolved dependencies
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Self>, InputError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| InputError::read_error(path, e))?;
        serde_json::from_str(&content).map_err(|e| InputError::json_parse_error(path, e.to_string()))
    }

    /// Returns true if the target names the same release as the current
    /// version, ignoring range operators and zero padding
    pub fn is_noop(&self) -> bool {
        is_same_version(&self.dependency.current_version, &self.new_version)
    }
}

/// A rendered group together with its branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedGroup {
    /// The rendered group
    pub group: UpdateGroup,
    /// Branch the pull request lives on
    pub branch: String,
}

/// Result of a planning run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanReport {
    /// Groups in pull request order
    pub groups: Vec<PlannedGroup>,
    /// Number of resolved dependencies that were already at their target
    pub unchanged: usize,
    /// Collaborator failures that were skipped
    pub errors: Vec<CollaboratorError>,
}

impl PlanReport {
    /// Total number of updates across all groups
    pub fn total_updates(&self) -> usize {
        self.groups.iter().map(|g| g.group.len()).sum()
    }

    /// Returns true if no pull request would be opened
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns true if any collaborator failed
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Planner turning resolved dependencies into pull request groups
#[derive(Debug, Clone)]
pub struct Planner {
    /// Branch prefix for every group
    branch_prefix: String,
    /// Fixed branch date; today (UTC) when unset
    date: Option<NaiveDate>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(DEFAULT_BRANCH_PREFIX)
    }
}

impl Planner {
    /// Create a planner dating branches today
    pub fn new(branch_prefix: impl Into<String>) -> Self {
        Self {
            branch_prefix: branch_prefix.into(),
            date: None,
        }
    }

    /// Create a planner dating branches on a fixed day (for testing)
    pub fn with_date(branch_prefix: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            branch_prefix: branch_prefix.into(),
            date: Some(date),
        }
    }

    /// Classifies every resolved dependency, dropping no-ops
    ///
    /// Returns the updates and the number of dropped entries.
    pub fn classify_all(&self, resolved: Vec<ResolvedDependency>) -> (Vec<PackageUpdate>, usize) {
        let mut unchanged = 0;
        let mut updates = Vec::with_capacity(resolved.len());

        for entry in resolved {
            if entry.is_noop() {
                log::debug!(
                    "{} is already at {}, skipping",
                    entry.dependency.name,
                    entry.new_version
                );
                unchanged += 1;
                continue;
            }
            updates.push(PackageUpdate::classified(entry.dependency, entry.new_version));
        }

        (updates, unchanged)
    }

    /// Plans groups for already resolved dependencies
    pub fn plan(&self, resolved: Vec<ResolvedDependency>) -> PlanReport {
        let (updates, unchanged) = self.classify_all(resolved);

        let groups: Vec<PlannedGroup> = group_updates(updates)
            .into_iter()
            .map(|group| {
                let branch = self.branch_for(&group);
                PlannedGroup {
                    group: render_group(group),
                    branch,
                }
            })
            .collect();

        log::info!(
            "planned {} pull request(s), {} dependency(ies) already up to date",
            groups.len(),
            unchanged
        );

        PlanReport {
            groups,
            unchanged,
            errors: Vec::new(),
        }
    }

    /// Runs the full workflow against external collaborators
    ///
    /// A failing scanner skips its dependencies; a failing resolver skips
    /// one dependency. Both are recorded in the report.
    pub fn plan_with(
        &self,
        scanners: &[&dyn ManifestScanner],
        resolver: &dyn VersionResolver,
        root: &Path,
    ) -> PlanReport {
        let mut errors = Vec::new();
        let mut resolved = Vec::new();

        for scanner in scanners {
            let dependencies = match scanner.scan(root) {
                Ok(deps) => deps,
                Err(e) => {
                    log::warn!("scanner {} failed: {}", scanner.name(), e);
                    errors.push(e);
                    continue;
                }
            };
            log::debug!(
                "scanner {} found {} dependency(ies)",
                scanner.name(),
                dependencies.len()
            );

            for dependency in dependencies {
                match resolver.latest_version(&dependency) {
                    Ok(Some(latest)) => resolved.push(ResolvedDependency::new(dependency, latest)),
                    Ok(None) => {}
                    Err(e) => {
                        log::warn!("{}", e);
                        errors.push(e);
                    }
                }
            }
        }

        let mut report = self.plan(resolved);
        report.errors = errors;
        report
    }

    fn branch_for(&self, group: &UpdateGroup) -> String {
        match self.date {
            Some(date) => branch_name_on(&group.updates, &self.branch_prefix, date),
            None => branch_name(&group.updates, &self.branch_prefix),
        }
    }
}

//! Partitioning of updates into pull request groups
//!
//! Every major update gets its own pull request so that breaking changes can
//! be reviewed and reverted in isolation. Minor and patch updates share one
//! combined pull request.

use super::{dedupe, highest_update_type};
use crate::domain::{PackageUpdate, UpdateGroup, UpdateType};

/// Name prefix of singleton major groups
pub const MAJOR_GROUP_PREFIX: &str = "Major Update - ";

/// Name of the combined minor/patch group
pub const NON_MAJOR_GROUP_NAME: &str = "Non-Major Updates";

/// Title of the combined minor/patch group
pub const NON_MAJOR_TITLE: &str = "chore(deps): update all non-major dependencies";

/// Deduplicates and partitions updates into groups
///
/// Output is the major singletons in input order, followed by at most one
/// combined group holding minor updates before patch updates. Empty input
/// yields no groups.
pub fn group_updates(updates: Vec<PackageUpdate>) -> Vec<UpdateGroup> {
    let mut major = Vec::new();
    let mut minor = Vec::new();
    let mut patch = Vec::new();

    for update in dedupe(updates) {
        match update.update_type {
            UpdateType::Major => major.push(update),
            UpdateType::Minor => minor.push(update),
            UpdateType::Patch => patch.push(update),
        }
    }

    let mut groups: Vec<UpdateGroup> = major
        .into_iter()
        .map(|update| {
            UpdateGroup::new(
                format!("{}{}", MAJOR_GROUP_PREFIX, update.name()),
                UpdateType::Major,
                format!(
                    "chore(deps): update dependency {} to {}",
                    update.name(),
                    update.new_version
                ),
                vec![update],
            )
        })
        .collect();

    if !minor.is_empty() || !patch.is_empty() {
        let update_type = if minor.is_empty() {
            UpdateType::Patch
        } else {
            UpdateType::Minor
        };
        minor.extend(patch);
        groups.push(UpdateGroup::new(
            NON_MAJOR_GROUP_NAME,
            update_type,
            NON_MAJOR_TITLE,
            minor,
        ));
    }

    log::debug!("grouped updates into {} group(s)", groups.len());
    groups
}

/// Titles an arbitrary list of updates by count and highest severity
pub fn overview_title(updates: &[PackageUpdate]) -> String {
    match updates {
        [] => "chore(deps): update dependencies".to_string(),
        [single] => format!(
            "chore(deps): update dependency {} to v{}",
            single.name(),
            single.new_version.trim_start_matches('v')
        ),
        _ => {
            let severity = highest_update_type(updates).unwrap_or(UpdateType::Patch);
            format!(
                "chore(deps): update {} dependencies ({})",
                updates.len(),
                severity
            )
        }
    }
}

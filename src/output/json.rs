//! JSON output formatter for machine processing

use crate::autoclose::AutoCloseReason;
use crate::domain::{RecoveredUpdate, UpdateType};
use crate::output::OutputFormatter;
use crate::planner::{PlanReport, PlannedGroup};
use crate::review::PullRequestReview;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of a plan
#[derive(Serialize)]
struct JsonPlan<'a> {
    /// Summary statistics
    summary: JsonSummary,
    /// Planned pull requests
    groups: Vec<JsonGroup<'a>>,
    /// Errors encountered
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    /// Number of pull requests
    groups: usize,
    /// Number of updates across all groups
    updates: usize,
    /// Number of dependencies already at their target
    unchanged: usize,
}

/// JSON representation of a planned group
#[derive(Serialize)]
struct JsonGroup<'a> {
    name: &'a str,
    title: &'a str,
    branch: &'a str,
    update_type: UpdateType,
    updates: Vec<JsonUpdate<'a>>,
}

/// JSON representation of an update
#[derive(Serialize)]
struct JsonUpdate<'a> {
    /// Package name
    name: &'a str,
    /// Current version spec
    from: &'a str,
    /// Target version
    to: &'a str,
    /// Severity
    update_type: UpdateType,
    /// Source file
    file: &'a str,
}

/// JSON representation of a review
#[derive(Serialize)]
struct JsonReview<'a> {
    updates: &'a [RecoveredUpdate],
    file_paths: &'a [String],
    should_close: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<&'a AutoCloseReason>,
}

impl JsonFormatter {
    fn group_to_json(planned: &PlannedGroup) -> JsonGroup<'_> {
        JsonGroup {
            name: &planned.group.name,
            title: &planned.group.title,
            branch: &planned.branch,
            update_type: planned.group.update_type,
            updates: planned
                .group
                .updates
                .iter()
                .map(|u| JsonUpdate {
                    name: u.name(),
                    from: u.current_version(),
                    to: &u.new_version,
                    update_type: u.update_type,
                    file: u.file(),
                })
                .collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_plan(&self, report: &PlanReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonPlan {
            summary: JsonSummary {
                groups: report.groups.len(),
                updates: report.total_updates(),
                unchanged: report.unchanged,
            },
            groups: report.groups.iter().map(Self::group_to_json).collect(),
            errors: report.errors.iter().map(|e| e.to_string()).collect(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }

    fn format_review(
        &self,
        review: &PullRequestReview,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonReview {
            updates: &review.updates,
            file_paths: &review.file_paths,
            should_close: review.should_close(),
            reason: review.auto_close.as_ref().map(|r| r.to_string()),
            rule: review.auto_close.as_ref(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}

//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One section per planned pull request with its branch and title
//! - Per-update lines with severity labels
//! - Review verdicts with the triggering auto-close rule

use crate::domain::{PackageUpdate, UpdateType};
use crate::output::OutputFormatter;
use crate::planner::{PlanReport, PlannedGroup};
use crate::review::PullRequestReview;
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Create a new text formatter with color option
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    fn type_label(&self, update_type: UpdateType) -> String {
        if !self.color {
            return update_type.as_str().to_string();
        }
        match update_type {
            UpdateType::Major => "major".red().bold().to_string(),
            UpdateType::Minor => "minor".yellow().to_string(),
            UpdateType::Patch => "patch".green().to_string(),
        }
    }

    fn format_update_line(
        &self,
        update: &PackageUpdate,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let is_dev = update.dependency.dependency_type.is_dev();

        if self.color {
            let name_display = format!("{:width$}", update.name(), width = max_name_len);
            let dev_display = if is_dev {
                " 🔧".dimmed().to_string()
            } else {
                String::new()
            };
            writeln!(
                writer,
                "  {} {} {} {} [{}] {}{}",
                name_display,
                update.current_version().dimmed(),
                "→".dimmed(),
                update.new_version.bright_white().bold(),
                self.type_label(update.update_type),
                update.file().dimmed(),
                dev_display
            )
        } else {
            let dev_marker = if is_dev { " 🔧" } else { "" };
            writeln!(
                writer,
                "  {:width$} {} -> {} [{}] {}{}",
                update.name(),
                update.current_version(),
                update.new_version,
                update.update_type,
                update.file(),
                dev_marker,
                width = max_name_len
            )
        }
    }

    fn format_group(&self, planned: &PlannedGroup, writer: &mut dyn Write) -> std::io::Result<()> {
        let group = &planned.group;
        if self.color {
            writeln!(
                writer,
                "{} {}",
                group.name.bold(),
                format!("({})", planned.branch).dimmed()
            )?;
            writeln!(writer, "  {}", group.title.cyan())?;
            writeln!(writer, "  {}", format!("files: {}", group.files().join(", ")).dimmed())?;
        } else {
            writeln!(writer, "{} ({})", group.name, planned.branch)?;
            writeln!(writer, "  {}", group.title)?;
            writeln!(writer, "  files: {}", group.files().join(", "))?;
        }

        let max_name_len = group
            .updates
            .iter()
            .map(|u| u.name().len())
            .max()
            .unwrap_or(0)
            .max(20);
        for update in &group.updates {
            self.format_update_line(update, max_name_len, writer)?;
        }
        writeln!(writer)
    }
}

impl OutputFormatter for TextFormatter {
    fn format_plan(&self, report: &PlanReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if report.is_empty() {
            writeln!(writer, "All dependencies are up to date.")?;
        }

        for planned in &report.groups {
            self.format_group(planned, writer)?;
        }

        let summary = format!(
            "{} pull request(s), {} update(s), {} unchanged",
            report.groups.len(),
            report.total_updates(),
            report.unchanged
        );
        if self.color {
            writeln!(writer, "{}", summary.bold())?;
        } else {
            writeln!(writer, "{}", summary)?;
        }

        for error in &report.errors {
            if self.color {
                writeln!(writer, "  {} {}", "error:".red(), error)?;
            } else {
                writeln!(writer, "  error: {}", error)?;
            }
        }
        Ok(())
    }

    fn format_review(
        &self,
        review: &PullRequestReview,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "Recovered {} update(s):", review.updates.len())?;
        for update in &review.updates {
            writeln!(writer, "  {}", update)?;
        }

        if !review.file_paths.is_empty() {
            writeln!(writer, "Files:")?;
            for path in &review.file_paths {
                writeln!(writer, "  {}", path)?;
            }
        }

        match (&review.auto_close, self.color) {
            (Some(reason), true) => writeln!(writer, "{} {}", "Should close:".red().bold(), reason),
            (Some(reason), false) => writeln!(writer, "Should close: {}", reason),
            (None, true) => writeln!(writer, "{}", "Keep open".green()),
            (None, false) => writeln!(writer, "Keep open"),
        }
    }
}

//! Deterministic branch naming

use crate::domain::{PackageUpdate, UpdateType};
use chrono::{NaiveDate, Utc};

/// Branch prefix used when none is configured
pub const DEFAULT_BRANCH_PREFIX: &str = "buddy";

/// Derives the branch name for a batch of updates, dated today (UTC)
pub fn branch_name(updates: &[PackageUpdate], prefix: &str) -> String {
    branch_name_on(updates, prefix, Utc::now().date_naive())
}

/// Derives the branch name for a batch of updates on a given date
///
/// - one update: `{prefix}/update-{slug}-to-{version}-{YYYYMMDD}`
/// - several, one or more major: `{prefix}/update-major-dependencies-{YYYYMMDD}`
/// - otherwise: `{prefix}/update-dependencies-{YYYYMMDD}`
pub fn branch_name_on(updates: &[PackageUpdate], prefix: &str, date: NaiveDate) -> String {
    let prefix = sanitize_prefix(prefix);
    let stamp = date.format("%Y%m%d");

    match updates {
        [single] => format!(
            "{}/update-{}-to-{}-{}",
            prefix,
            slugify(single.name()),
            ref_safe(&single.new_version),
            stamp
        ),
        _ if updates.iter().any(|u| u.update_type == UpdateType::Major) => {
            format!("{}/update-major-dependencies-{}", prefix, stamp)
        }
        _ => format!("{}/update-dependencies-{}", prefix, stamp),
    }
}

/// Lower-cases a package name and replaces everything outside `[a-z0-9-]` with `-`
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Makes a version usable inside a git ref component
fn ref_safe(version: &str) -> String {
    let mut safe: String = version
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();

    while safe.contains("..") {
        safe = safe.replace("..", ".");
    }
    while let Some(stripped) = safe.strip_suffix(".lock") {
        safe = stripped.to_string();
    }
    let safe = safe.trim_matches('.');

    if safe.is_empty() {
        "unknown".to_string()
    } else {
        safe.to_string()
    }
}

/// Sanitizes each `/`-separated prefix segment; falls back to the default
fn sanitize_prefix(prefix: &str) -> String {
    let segments: Vec<String> = prefix
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ref_safe)
        .collect();

    if segments.is_empty() {
        DEFAULT_BRANCH_PREFIX.to_string()
    } else {
        segments.join("/")
    }
}

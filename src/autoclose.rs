//! Auto-close evaluation for previously opened update pull requests
//!
//! A pull request is invalidated when current policy could no longer have
//! produced it. Two independent rules are checked, in this order:
//! 1. Dynamic versions: with `respect_latest` on, a fact moving away from a
//!    dynamic indicator (`latest`, `*`, `main`, ...) is no longer proposable.
//! 2. Ignored paths: a file touched by the pull request now matches one of
//!    the `ignore_paths` globs.
//!
//! Absent configuration disables a rule; nothing is ever closed by default.

use crate::domain::RecoveredUpdate;
use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version specifiers that do not name an exact release
pub const DYNAMIC_VERSION_INDICATORS: [&str; 6] = ["latest", "*", "main", "master", "develop", "dev"];

/// Policy inputs of the auto-close rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoCloseConfig {
    /// Whether dynamic versions must resolve to pinned ones (unset means true)
    #[serde(default, alias = "respectLatest")]
    pub respect_latest: Option<bool>,
    /// Glob patterns of paths that must not be updated
    #[serde(default, alias = "ignorePaths")]
    pub ignore_paths: Option<Vec<String>>,
}

impl AutoCloseConfig {
    /// Creates a config with both rules unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `respect_latest` (builder pattern)
    pub fn with_respect_latest(mut self, respect_latest: bool) -> Self {
        self.respect_latest = Some(respect_latest);
        self
    }

    /// Sets `ignore_paths` (builder pattern)
    pub fn with_ignore_paths(mut self, patterns: Vec<String>) -> Self {
        self.ignore_paths = Some(patterns);
        self
    }

    /// Effective `respect_latest` value
    pub fn respects_latest(&self) -> bool {
        self.respect_latest.unwrap_or(true)
    }
}

/// Why a pull request should be closed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum AutoCloseReason {
    /// A fact moves away from a dynamic version indicator
    DynamicVersion {
        /// Package name
        package: String,
        /// The dynamic indicator found
        version: String,
    },
    /// A touched file matches an ignore pattern
    IgnoredPath {
        /// File path recovered from the body
        path: String,
        /// The matching pattern
        pattern: String,
    },
}

impl fmt::Display for AutoCloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutoCloseReason::DynamicVersion { package, version } => write!(
                f,
                "{} was proposed from dynamic version '{}' while respect_latest is on",
                package, version
            ),
            AutoCloseReason::IgnoredPath { path, pattern } => {
                write!(f, "{} matches ignored path '{}'", path, pattern)
            }
        }
    }
}

/// Returns true if `version` is a dynamic indicator (case-insensitive)
pub fn is_dynamic_version(version: &str) -> bool {
    let version = version.trim();
    DYNAMIC_VERSION_INDICATORS
        .iter()
        .any(|indicator| indicator.eq_ignore_ascii_case(version))
}

/// Evaluates both rules and returns the first one that fires
pub fn evaluate(
    facts: &[RecoveredUpdate],
    file_paths: &[String],
    config: Option<&AutoCloseConfig>,
) -> Option<AutoCloseReason> {
    let Some(config) = config else {
        log::debug!("no configuration, auto-close disabled");
        return None;
    };

    if config.respects_latest() {
        if let Some(fact) = facts.iter().find(|f| is_dynamic_version(&f.current_version)) {
            return Some(AutoCloseReason::DynamicVersion {
                package: fact.name.clone(),
                version: fact.current_version.clone(),
            });
        }
    }

    let patterns = compile_patterns(config.ignore_paths.as_deref().unwrap_or_default());
    if patterns.is_empty() {
        return None;
    }

    file_paths.iter().find_map(|path| {
        patterns
            .iter()
            .find(|(pattern, _)| path_matches(pattern, path))
            .map(|(_, raw)| AutoCloseReason::IgnoredPath {
                path: path.clone(),
                pattern: raw.clone(),
            })
    })
}

/// Returns true if the pull request should be closed
pub fn should_auto_close(
    facts: &[RecoveredUpdate],
    file_paths: &[String],
    config: Option<&AutoCloseConfig>,
) -> bool {
    match evaluate(facts, file_paths, config) {
        Some(reason) => {
            log::info!("auto-close: {}", reason);
            true
        }
        None => false,
    }
}

/// Compiles glob patterns, skipping invalid ones
fn compile_patterns(raw_patterns: &[String]) -> Vec<(Pattern, String)> {
    raw_patterns
        .iter()
        .filter(|raw| !raw.trim().is_empty())
        .filter_map(|raw| {
            let normalized = normalize_path(raw);
            match Pattern::new(&normalized) {
                Ok(pattern) => Some((pattern, raw.clone())),
                Err(e) => {
                    log::warn!("ignoring invalid ignore_paths pattern '{}': {}", raw, e);
                    None
                }
            }
        })
        .collect()
}

/// Matches a path against a pattern
///
/// `*` does not cross `/`; `**` does. A pattern without a `/` is also
/// tried against the file name alone.
fn path_matches(pattern: &Pattern, path: &str) -> bool {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let path = normalize_path(path);

    if pattern.matches_with(&path, options) {
        return true;
    }
    if !pattern.as_str().contains('/') {
        let file_name = path.rsplit('/').next().unwrap_or_default();
        return pattern.matches_with(file_name, options);
    }
    false
}

fn normalize_path(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    path.strip_prefix("./").map(str::to_string).unwrap_or(path)
}

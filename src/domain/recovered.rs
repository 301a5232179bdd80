//! Update facts recovered from rendered pull request bodies

use super::PackageUpdate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The `(name, current, new)` projection of a past [`PackageUpdate`]
///
/// This is all that survives a render/decode round trip; versions carry no
/// leading `^`/`~` range operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecoveredUpdate {
    /// Package name
    pub name: String,
    /// Version the pull request moved away from
    pub current_version: String,
    /// Version the pull request moved to
    pub new_version: String,
}

impl RecoveredUpdate {
    /// Creates a new RecoveredUpdate, stripping range operators from both versions
    pub fn new(
        name: impl Into<String>,
        current_version: impl AsRef<str>,
        new_version: impl AsRef<str>,
    ) -> Self {
        Self {
            name: name.into(),
            current_version: strip_range_operator(current_version.as_ref()).to_string(),
            new_version: strip_range_operator(new_version.as_ref()).to_string(),
        }
    }
}

impl From<&PackageUpdate> for RecoveredUpdate {
    fn from(update: &PackageUpdate) -> Self {
        RecoveredUpdate::new(
            update.name(),
            update.current_version(),
            &update.new_version,
        )
    }
}

impl fmt::Display for RecoveredUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} → {}",
            self.name, self.current_version, self.new_version
        )
    }
}

/// Strips a leading `^` or `~` range operator and surrounding whitespace
pub fn strip_range_operator(version: &str) -> &str {
    version.trim().trim_start_matches(['^', '~']).trim()
}

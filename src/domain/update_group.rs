//! Pull request sized batches of updates

use super::{PackageUpdate, UpdateType};
use serde::{Deserialize, Serialize};

/// A batch of updates intended to become a single pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateGroup {
    /// Group name (e.g., `Non-Major Updates`)
    pub name: String,
    /// Dominant severity of the batch
    pub update_type: UpdateType,
    /// Pull request title
    pub title: String,
    /// Pull request body; empty until rendered
    #[serde(default)]
    pub body: String,
    /// Updates in presentation order
    pub updates: Vec<PackageUpdate>,
}

impl UpdateGroup {
    /// Creates a new, unrendered group
    pub fn new(
        name: impl Into<String>,
        update_type: UpdateType,
        title: impl Into<String>,
        updates: Vec<PackageUpdate>,
    ) -> Self {
        Self {
            name: name.into(),
            update_type,
            title: title.into(),
            body: String::new(),
            updates,
        }
    }

    /// Sets the rendered body (builder pattern)
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the number of updates in the group
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Returns true if the group holds no updates
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Returns true if any update is a major change
    pub fn has_major(&self) -> bool {
        self.updates
            .iter()
            .any(|u| u.update_type == UpdateType::Major)
    }

    /// Returns the distinct source files, in first-seen order
    pub fn files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for update in &self.updates {
            if !files.contains(&update.file()) {
                files.push(update.file());
            }
        }
        files
    }
}

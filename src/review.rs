//! Review of a previously opened pull request
//!
//! Recovers what a pull request proposed from its body and decides whether
//! it should be closed or refreshed.

use crate::autoclose::{evaluate, AutoCloseConfig, AutoCloseReason};
use crate::domain::{RecoveredUpdate, UpdateGroup};
use crate::error::InputError;
use crate::state::decode_state;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Outcome of reviewing a pull request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestReview {
    /// Facts recovered from the body
    pub updates: Vec<RecoveredUpdate>,
    /// File paths recovered from the body
    pub file_paths: Vec<String>,
    /// Why the pull request should be closed, if it should
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_close: Option<AutoCloseReason>,
}

impl PullRequestReview {
    /// Returns true if the pull request should be closed
    pub fn should_close(&self) -> bool {
        self.auto_close.is_some()
    }

    /// Returns true if `planned` proposes a different set of updates
    ///
    /// Order and decoration are ignored; only the facts are compared.
    pub fn needs_update(&self, planned: &UpdateGroup) -> bool {
        let existing: BTreeSet<&RecoveredUpdate> = self.updates.iter().collect();
        let planned: Vec<RecoveredUpdate> = planned.updates.iter().map(RecoveredUpdate::from).collect();
        let planned: BTreeSet<&RecoveredUpdate> = planned.iter().collect();
        existing != planned
    }
}

/// Reads a pull request body from disk
pub fn read_body(path: impl AsRef<Path>) -> Result<String, InputError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| InputError::read_error(path, e))
}

/// Decodes a pull request body and evaluates the auto-close rules
pub fn review_pull_request(body: &str, config: Option<&AutoCloseConfig>) -> PullRequestReview {
    let state = decode_state(body);
    let auto_close = evaluate(&state.updates, &state.file_paths, config);

    match &auto_close {
        Some(reason) => log::info!("pull request should be closed: {}", reason),
        None => log::debug!(
            "pull request still valid ({} update(s))",
            state.updates.len()
        ),
    }

    PullRequestReview {
        updates: state.updates,
        file_paths: state.file_paths,
        auto_close,
    }
}

//! State round trip through pull request bodies
//!
//! There is no database: what a pull request proposed is recovered from its
//! rendered body. This module provides:
//! - The structured metadata block (authoritative when present)
//! - The legacy table decoder, for bodies written without a block
//! - A reference renderer producing bodies both decoders understand
//!
//! Decoding never fails. Unmatched or malformed content is skipped.

mod metadata;
mod render;
mod table;

pub use metadata::{decode_metadata, encode_metadata, MetadataEntry, StateMetadata, METADATA_VERSION};
pub use render::{render_body, render_group};
pub use table::{scan_tables, TableScan};

use crate::domain::RecoveredUpdate;

/// Everything recoverable from a pull request body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedState {
    /// Update facts in document order
    pub updates: Vec<RecoveredUpdate>,
    /// Source file paths mentioned by the body
    pub file_paths: Vec<String>,
}

/// Decodes facts and file paths from a body
///
/// A well-formed metadata block is authoritative: when one is present the
/// tables are not consulted. Bodies without a block go through the legacy
/// table decoder.
pub fn decode_state(body: &str) -> DecodedState {
    let blocks = decode_metadata(body);
    if blocks.is_empty() {
        let scan = scan_tables(body);
        log::debug!(
            "no metadata block, decoded {} update(s) from tables",
            scan.updates.len()
        );
        return DecodedState {
            updates: scan.updates,
            file_paths: scan.files,
        };
    }

    let mut state = DecodedState::default();
    for entry in blocks.iter().flat_map(|block| &block.updates) {
        push_unique(&mut state.updates, entry.to_recovered());
        if let Some(file) = entry.file.as_ref().filter(|f| !f.trim().is_empty()) {
            push_unique(&mut state.file_paths, file.clone());
        }
    }

    log::debug!(
        "decoded {} update(s) and {} file path(s) from metadata",
        state.updates.len(),
        state.file_paths.len()
    );
    state
}

/// Decodes the `(name, current, new)` facts from a body
pub fn decode(body: &str) -> Vec<RecoveredUpdate> {
    decode_state(body).updates
}

/// Decodes the source file paths mentioned by a body
pub fn decode_file_paths(body: &str) -> Vec<String> {
    decode_state(body).file_paths
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

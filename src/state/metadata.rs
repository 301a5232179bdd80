//! Structured metadata block embedded in pull request bodies
//!
//! The block is an HTML comment invisible in the rendered markdown:
//!
//! ```text
//! <!-- buddy-bot:metadata {"version":1,"updates":[...]} -->
//! ```
//!
//! When present it is the authoritative record of the updates a pull request
//! proposed.

use crate::domain::{RecoveredUpdate, UpdateGroup, UpdateType};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Current block schema version
pub const METADATA_VERSION: u32 = 1;

/// Marker opening the comment
const METADATA_MARKER: &str = "buddy-bot:metadata";

static METADATA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--\s*buddy-bot:metadata\s*(?<json>\{.*?\})\s*-->").unwrap()
});

/// Serialized content of a metadata block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMetadata {
    /// Schema version
    pub version: u32,
    /// Proposed updates
    pub updates: Vec<MetadataEntry>,
}

/// A single proposed update inside a metadata block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Package name
    pub name: String,
    /// Version moved away from, without range operator
    pub current_version: String,
    /// Version moved to
    pub new_version: String,
    /// Severity, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_type: Option<UpdateType>,
    /// Source manifest, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl MetadataEntry {
    /// Projects the entry onto a recovered fact
    pub fn to_recovered(&self) -> RecoveredUpdate {
        RecoveredUpdate::new(&self.name, &self.current_version, &self.new_version)
    }
}

impl StateMetadata {
    /// Builds the metadata for a group
    pub fn from_group(group: &UpdateGroup) -> Self {
        let updates = group
            .updates
            .iter()
            .map(|update| {
                let fact = RecoveredUpdate::from(update);
                MetadataEntry {
                    name: fact.name,
                    current_version: fact.current_version,
                    new_version: fact.new_version,
                    update_type: Some(update.update_type),
                    file: Some(update.file().to_string()),
                }
            })
            .collect();

        Self {
            version: METADATA_VERSION,
            updates,
        }
    }
}

/// Renders the metadata block for a group
pub fn encode_metadata(group: &UpdateGroup) -> String {
    let metadata = StateMetadata::from_group(group);
    // serializing plain strings and enums cannot fail
    let json = serde_json::to_string(&metadata).unwrap_or_default();
    // keep a literal comment terminator out of the payload
    let json = json.replace("-->", "--\\u003e");
    format!("<!-- {} {} -->", METADATA_MARKER, json)
}

/// Extracts every well-formed metadata block from a body
///
/// Blocks whose payload is not valid JSON are skipped.
pub fn decode_metadata(body: &str) -> Vec<StateMetadata> {
    METADATA_REGEX
        .captures_iter(body)
        .filter_map(|caps| {
            let json = caps.name("json")?.as_str();
            match serde_json::from_str::<StateMetadata>(json) {
                Ok(metadata) => Some(metadata),
                Err(e) => {
                    log::debug!("skipping malformed metadata block: {}", e);
                    None
                }
            }
        })
        .collect()
}

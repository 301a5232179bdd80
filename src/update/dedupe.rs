//! Deduplication of update facts found in several manifests

use crate::domain::PackageUpdate;
use std::collections::HashMap;

/// Collapses updates sharing `(name, current_version, new_version)`
///
/// The surviving record is the one from the highest priority source file;
/// on equal priority the first one seen wins. Output keeps the order in
/// which each key was first seen.
pub fn dedupe(updates: Vec<PackageUpdate>) -> Vec<PackageUpdate> {
    let mut slots: HashMap<(String, String, String), usize> = HashMap::new();
    let mut kept: Vec<PackageUpdate> = Vec::with_capacity(updates.len());

    for update in updates {
        match slots.get(&update.dedup_key()) {
            Some(&slot) => {
                let existing = &kept[slot];
                if update.source_priority() > existing.source_priority() {
                    log::debug!(
                        "{}: preferring {} over {}",
                        update.name(),
                        update.file(),
                        existing.file()
                    );
                    kept[slot] = update;
                } else {
                    log::debug!(
                        "{}: dropping duplicate from {}, keeping {}",
                        update.name(),
                        update.file(),
                        existing.file()
                    );
                }
            }
            None => {
                slots.insert(update.dedup_key(), kept.len());
                kept.push(update);
            }
        }
    }

    kept
}

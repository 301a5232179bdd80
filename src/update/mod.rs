//! Update classification and batching
//!
//! This module provides:
//! - Version classifier deciding major/minor/patch for a version pair
//! - Deduplicator collapsing the same update found in several manifests
//! - Grouper partitioning updates into pull request sized batches
//! - Branch namer deriving deterministic, ref-safe branch names

mod branch;
mod classify;
mod dedupe;
mod group;

pub use branch::{branch_name, branch_name_on, slugify, DEFAULT_BRANCH_PREFIX};
pub use classify::{classify, clean_version, highest_update_type, is_same_version};
pub use dedupe::dedupe;
pub use group::{
    group_updates, overview_title, MAJOR_GROUP_PREFIX, NON_MAJOR_GROUP_NAME, NON_MAJOR_TITLE,
};

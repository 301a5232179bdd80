//! buddy-bot - Dependency update bot core library
//!
//! This library provides the engine behind dependency update pull requests:
//! - Classification of version changes (major/minor/patch)
//! - Deduplication of updates found in several manifests
//! - Grouping into pull requests and deterministic branch names
//! - Recovery of past proposals from rendered pull request bodies
//! - Auto-close decisions for pull requests invalidated by policy

pub mod autoclose;
pub mod cli;
pub mod collaborator;
pub mod config;
pub mod domain;
pub mod error;
pub mod output;
pub mod planner;
pub mod review;
pub mod state;
pub mod update;

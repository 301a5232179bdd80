//! Core domain models for buddy-bot
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency records supplied by manifest scanners
//! - Source file classification used to rank duplicate facts
//! - Classified package updates and their severity
//! - Pull request sized update groups
//! - Facts recovered from previously rendered pull request bodies

mod dependency;
mod package_update;
mod recovered;
mod source_file;
mod update_group;

pub use dependency::{Dependency, DependencyType};
pub use package_update::{PackageUpdate, UpdateType};
pub use recovered::{strip_range_operator, RecoveredUpdate};
pub use source_file::SourceFileKind;
pub use update_group::UpdateGroup;

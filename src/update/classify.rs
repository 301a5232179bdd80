//! Version change classification
//!
//! Decides whether moving from one version to another is a major, minor or
//! patch change. Classification never fails. Pairs that do not both read as
//! semver (after padding `1.2` to `1.2.0`) go through range satisfaction
//! against the current version, then a component comparison where unreadable
//! components count as zero, and finally default to `major`.

use crate::domain::{PackageUpdate, UpdateType};
use semver::{Version, VersionReq};
use std::cmp::Ordering;

/// Characters stripped from the front of a version before comparison
const PREFIX_CHARS: [char; 7] = ['^', '~', '>', '=', '<', '@', 'v'];

/// Strips range operators and a `v` prefix (e.g., `^1.2.3`, `>=1.2`, `v4`)
pub fn clean_version(raw: &str) -> &str {
    raw.trim().trim_start_matches(PREFIX_CHARS).trim()
}

/// Classifies the change from `current` to `new`
///
/// A non-upgrade (downgrade or no-op) is always `Patch`.
pub fn classify(current: &str, new: &str) -> UpdateType {
    let current = clean_version(current);
    let new = clean_version(new);

    if current == new {
        return UpdateType::Patch;
    }

    if let (Some(a), Some(b)) = (coerce_semver(current), coerce_semver(new)) {
        return match a.cmp(&b) {
            Ordering::Less => compare_components(current, new),
            _ => UpdateType::Patch,
        };
    }

    let ordering = numeric_ordering(current, new);
    if ordering == Some(Ordering::Greater) {
        return UpdateType::Patch;
    }

    log::debug!("'{}' -> '{}' is not plain semver, using range fallback", current, new);
    if let Some(update_type) = classify_by_range(current, new) {
        return update_type;
    }

    match ordering {
        Some(Ordering::Less) => compare_components(current, new),
        Some(_) => UpdateType::Patch,
        None => UpdateType::Major,
    }
}

/// True when both versions name the same release (`^1.2` and `1.2.0`)
pub fn is_same_version(a: &str, b: &str) -> bool {
    let a = clean_version(a);
    let b = clean_version(b);

    a == b || matches!((coerce_semver(a), coerce_semver(b)), (Some(x), Some(y)) if x == y)
}

/// Returns the most severe update type among `updates`
pub fn highest_update_type<'a>(
    updates: impl IntoIterator<Item = &'a PackageUpdate>,
) -> Option<UpdateType> {
    updates.into_iter().map(|u| u.update_type).max()
}

/// Orders two cleaned versions by components, `None` if either has no digit
fn numeric_ordering(current: &str, new: &str) -> Option<Ordering> {
    let a = numeric_components(current)?;
    let b = numeric_components(new)?;
    Some(a.cmp(&b))
}

/// Positional comparison of zero-padded `major.minor.patch` components
fn compare_components(current: &str, new: &str) -> UpdateType {
    let a = numeric_components(current).unwrap_or_default();
    let b = numeric_components(new).unwrap_or_default();

    if b[0] > a[0] {
        UpdateType::Major
    } else if b[1] > a[1] {
        UpdateType::Minor
    } else {
        UpdateType::Patch
    }
}

/// `~current` satisfied ⇒ patch, `^current` satisfied ⇒ minor, else major
///
/// Handles wildcard currents such as `1.2.x`. Returns `None` when `new` is
/// not a version or `current` is not usable as a requirement.
fn classify_by_range(current: &str, new: &str) -> Option<UpdateType> {
    let target = coerce_semver(new)?;
    let tilde = VersionReq::parse(&format!("~{current}")).ok()?;
    let caret = VersionReq::parse(&format!("^{current}")).ok()?;

    Some(if tilde.matches(&target) {
        UpdateType::Patch
    } else if caret.matches(&target) {
        UpdateType::Minor
    } else {
        UpdateType::Major
    })
}

/// Reads the first three dot-separated components as numbers
///
/// Each component contributes its leading digits; a component without any
/// becomes 0. Returns `None` when no component has a digit.
fn numeric_components(version: &str) -> Option<[u64; 3]> {
    let mut components = [0u64; 3];
    let mut any_numeric = false;

    for (slot, part) in components.iter_mut().zip(version.split('.')) {
        let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
        if let Ok(value) = digits.parse::<u64>() {
            *slot = value;
            any_numeric = true;
        }
    }

    any_numeric.then_some(components)
}

/// Pads a version core to three components and parses it as semver
///
/// Pre-release and build suffixes are kept so that `1.0.0-beta < 1.0.0`.
fn coerce_semver(version: &str) -> Option<Version> {
    let split_at = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(split_at);

    let mut parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    while parts.len() < 3 {
        parts.push("0");
    }

    Version::parse(&format!("{}{}", parts.join("."), suffix)).ok()
}

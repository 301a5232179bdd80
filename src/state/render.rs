//! Reference renderer for pull request bodies
//!
//! Produces a summary table followed by the metadata block. The table layout
//! is informational; only the metadata block and the change cells are relied
//! on when decoding.

use super::encode_metadata;
use crate::domain::{DependencyType, PackageUpdate, SourceFileKind, UpdateGroup};

/// Renders the body of a group's pull request
pub fn render_body(group: &UpdateGroup) -> String {
    let mut body = String::new();

    body.push_str("This PR contains the following updates:\n\n");
    body.push_str("| Package | Change | Type | File |\n");
    body.push_str("|---|---|---|---|\n");
    for update in &group.updates {
        body.push_str(&format!(
            "| {} | `{}` -> `{}` | {} | `{}` |\n",
            package_cell(update),
            update.current_version(),
            update.new_version,
            update.update_type,
            update.file()
        ));
    }

    if group.has_major() {
        body.push_str(
            "\n⚠️ This PR contains a major update. Review the changelog for breaking changes.\n",
        );
    }

    body.push_str("\n---\n\n");
    body.push_str(&format!(
        "🤖 This PR was generated by buddy-bot and updates {} package(s).\n\n",
        group.len()
    ));
    body.push_str(&encode_metadata(group));
    body.push('\n');
    body
}

/// Fills in the body of a group
pub fn render_group(group: UpdateGroup) -> UpdateGroup {
    let body = render_body(&group);
    group.with_body(body)
}

/// Package name, linked to its registry page where one is known
fn package_cell(update: &PackageUpdate) -> String {
    let name = update.name();
    let url = match (&update.dependency.dependency_type, update.source_kind()) {
        (DependencyType::GithubActions, _) | (_, SourceFileKind::WorkflowFile) => {
            Some(format!("https://github.com/{}", name))
        }
        (DependencyType::Require | DependencyType::RequireDev, _)
        | (_, SourceFileKind::ComposerManifest) => {
            Some(format!("https://packagist.org/packages/{}", name))
        }
        (_, SourceFileKind::PackageJson) => Some(format!("https://www.npmjs.com/package/{}", name)),
        _ => None,
    };

    match url {
        Some(url) => format!("[{}]({})", name, url),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dependency, UpdateType};

    fn update(name: &str, dependency_type: DependencyType, file: &str) -> PackageUpdate {
        let dep = Dependency::new(name, "^1.0.0", dependency_type, file);
        PackageUpdate::new(dep, "1.1.0", UpdateType::Minor)
    }

    #[test]
    fn test_render_body_contains_rows_and_metadata() {
        let group = UpdateGroup::new(
            "Non-Major Updates",
            UpdateType::Minor,
            "t",
            vec![update("lodash", DependencyType::Dependencies, "package.json")],
        );
        let body = render_body(&group);
        assert!(body.contains(
            "| [lodash](https://www.npmjs.com/package/lodash) | `^1.0.0` -> `1.1.0` | minor | `package.json` |"
        ));
        assert!(body.contains("<!-- buddy-bot:metadata"));
        assert!(!body.contains("major update"));
    }

    #[test]
    fn test_render_body_warns_on_major() {
        let dep = Dependency::new("react", "17.0.0", DependencyType::Dependencies, "package.json");
        let group = UpdateGroup::new(
            "Major Update - react",
            UpdateType::Major,
            "t",
            vec![PackageUpdate::new(dep, "18.0.0", UpdateType::Major)],
        );
        assert!(render_body(&group).contains("major update"));
    }

    #[test]
    fn test_package_cell_links() {
        assert_eq!(
            package_cell(&update("actions/checkout", DependencyType::GithubActions, ".github/workflows/ci.yml")),
            "[actions/checkout](https://github.com/actions/checkout)"
        );
        assert_eq!(
            package_cell(&update("laravel/framework", DependencyType::Require, "composer.json")),
            "[laravel/framework](https://packagist.org/packages/laravel/framework)"
        );
        assert_eq!(
            package_cell(&update("bun.sh", DependencyType::Other("packages".into()), "deps.yaml")),
            "bun.sh"
        );
    }

    #[test]
    fn test_render_group_sets_body() {
        let group = UpdateGroup::new(
            "g",
            UpdateType::Minor,
            "t",
            vec![update("zod", DependencyType::Dependencies, "package.json")],
        );
        let rendered = render_group(group);
        assert!(!rendered.body.is_empty());
    }
}

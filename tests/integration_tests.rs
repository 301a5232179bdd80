//! Integration tests for buddy-bot
//!
//! These tests verify:
//! - Planning from resolved dependencies to rendered, named groups
//! - Round trips between rendered bodies and recovered facts
//! - Auto-close decisions driven by loaded configuration

use buddy_bot::autoclose::{should_auto_close, AutoCloseConfig};
use buddy_bot::config::BuddyConfig;
use buddy_bot::domain::{Dependency, DependencyType, PackageUpdate, RecoveredUpdate, UpdateType};
use buddy_bot::planner::{Planner, ResolvedDependency};
use buddy_bot::review::review_pull_request;
use buddy_bot::state::{decode, decode_file_paths, render_body};
use buddy_bot::update::{classify, dedupe, group_updates};
use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;

fn dep(name: &str, current: &str, dependency_type: DependencyType, file: &str) -> Dependency {
    Dependency::new(name, current, dependency_type, file)
}

fn planner() -> Planner {
    Planner::with_date("buddy", NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
}

mod planning {
    use super::*;

    #[test]
    fn test_classification_properties() {
        assert_eq!(classify("1.0.0", "1.0.0"), UpdateType::Patch);
        assert_eq!(classify("2.0.0", "1.0.0"), UpdateType::Patch);
        assert_eq!(classify("0.14.1", "0.15.0"), UpdateType::Minor);
        assert_eq!(classify("1.0.0", "2.0.0"), UpdateType::Major);
        assert_eq!(classify("1.2.3", "1.2.10"), UpdateType::Patch);
        assert_eq!(classify("^1.0.0", "1.1.0"), UpdateType::Minor);
    }

    #[test]
    fn test_dedupe_prefers_package_json_in_any_order() {
        let from_yaml = PackageUpdate::classified(
            dep("lodash", "4.17.20", DependencyType::Other("packages".into()), "deps.yaml"),
            "4.17.21",
        );
        let from_npm = PackageUpdate::classified(
            dep("lodash", "4.17.20", DependencyType::Dependencies, "package.json"),
            "4.17.21",
        );

        for input in [
            vec![from_yaml.clone(), from_npm.clone()],
            vec![from_npm.clone(), from_yaml.clone()],
        ] {
            let result = dedupe(input);
            assert_eq!(result.len(), 1);
            assert_eq!(result[0].file(), "package.json");
        }
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let updates = vec![
            PackageUpdate::classified(dep("a", "1.0.0", DependencyType::Dependencies, "package.json"), "2.0.0"),
            PackageUpdate::classified(dep("b", "1.0.0", DependencyType::Dependencies, "package.json"), "1.1.0"),
            PackageUpdate::classified(dep("c", "1.0.0", DependencyType::Dependencies, "package.json"), "1.0.1"),
            PackageUpdate::classified(dep("d", "3.0.0", DependencyType::Require, "composer.json"), "4.0.0"),
        ];

        let first = group_updates(updates);
        let flattened: Vec<PackageUpdate> =
            first.iter().flat_map(|g| g.updates.iter().cloned()).collect();
        let second = group_updates(flattened);

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first[2].updates.len(), 2);
        assert_eq!(first[2].update_type, UpdateType::Minor);
    }

    #[test]
    fn test_plan_from_json_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("updates.json");
        fs::write(
            &path,
            r#"[
  {"name": "react", "current_version": "^17.0.2", "type": "dependencies", "file": "package.json", "new_version": "18.2.0"},
  {"name": "lodash", "currentVersion": "^4.17.20", "type": "dependencies", "file": "package.json", "newVersion": "4.17.21"},
  {"name": "lodash", "current_version": "^4.17.20", "type": "packages", "file": "deps.yaml", "new_version": "4.17.21"},
  {"name": "actions/checkout", "current_version": "v4", "type": "github-actions", "file": ".github/workflows/ci.yml", "new_version": "v4"}
]"#,
        )
        .unwrap();

        let resolved = ResolvedDependency::load_all(&path).unwrap();
        let report = planner().plan(resolved);

        assert_eq!(report.unchanged, 1);
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].branch, "buddy/update-react-to-18.2.0-20240307");
        assert_eq!(report.groups[1].branch, "buddy/update-lodash-to-4.17.21-20240307");
        assert_eq!(report.groups[1].group.updates[0].file(), "package.json");
    }
}

mod round_trip {
    use super::*;

    fn rendered_group() -> buddy_bot::domain::UpdateGroup {
        let report = planner().plan(vec![
            ResolvedDependency::new(
                dep("lodash", "^4.17.20", DependencyType::Dependencies, "package.json"),
                "4.18.0",
            ),
            ResolvedDependency::new(
                dep("laravel/framework", "10.0.0", DependencyType::Require, "composer.json"),
                "10.0.5",
            ),
            ResolvedDependency::new(
                dep("actions/setup-node", "v4.0.0", DependencyType::GithubActions, ".github/workflows/ci.yml"),
                "v4.1.0",
            ),
        ]);
        report.groups[0].group.clone()
    }

    #[test]
    fn test_decode_recovers_every_planned_triple() {
        let group = rendered_group();
        let decoded = decode(&group.body);

        assert_eq!(decoded.len(), group.updates.len());
        for update in &group.updates {
            assert!(decoded.contains(&RecoveredUpdate::from(update)), "{}", update);
        }
    }

    #[test]
    fn test_legacy_table_decoder_recovers_rendered_table() {
        let group = rendered_group();
        let without_block: String = group
            .body
            .lines()
            .filter(|line| !line.contains("buddy-bot:metadata"))
            .collect::<Vec<_>>()
            .join("\n");

        let decoded = decode(&without_block);
        for update in &group.updates {
            assert!(decoded.contains(&RecoveredUpdate::from(update)), "{}", update);
        }
        assert_eq!(
            decode_file_paths(&without_block),
            vec!["package.json", ".github/workflows/ci.yml", "composer.json"]
        );
    }

    #[test]
    fn test_decode_survives_decoration() {
        let group = rendered_group();
        let decorated = format!(
            "> [!NOTE]\n> Automerge is off.\n\n{}\n\n<details><summary>Release notes</summary>\n\n```diff\n| fake | `0.0.1` -> `0.0.2` |\n```\n\n</details>\n",
            group.body
        );
        assert_eq!(decode(&decorated).len(), group.updates.len());
    }

    #[test]
    fn test_decode_link_row() {
        let body = "| [pkg](https://www.npmjs.com/package/pkg) | `1.0.0` -> `2.0.0` |";
        assert_eq!(decode(body), vec![RecoveredUpdate::new("pkg", "1.0.0", "2.0.0")]);
    }

    #[test]
    fn test_decode_table_with_type_column() {
        let body = "| Package | Type | Change |\n|---|---|---|\n| [lodash](https://x) | devDependencies | `1.0.0` -> `2.0.0` |\n| react | dependencies | `17.0.0` -> `18.0.0` |";
        let review = review_pull_request(body, None);

        assert_eq!(
            review.updates,
            vec![
                RecoveredUpdate::new("lodash", "1.0.0", "2.0.0"),
                RecoveredUpdate::new("react", "17.0.0", "18.0.0"),
            ]
        );
    }
}

mod auto_close {
    use super::*;

    fn body_for(name: &str, current: &str, new: &str, file: &str) -> String {
        let group = buddy_bot::domain::UpdateGroup::new(
            "Non-Major Updates",
            UpdateType::Minor,
            "chore(deps): update all non-major dependencies",
            vec![PackageUpdate::classified(
                dep(name, current, DependencyType::Dependencies, file),
                new,
            )],
        );
        render_body(&group)
    }

    #[test]
    fn test_respect_latest_true_and_false() {
        let facts = vec![RecoveredUpdate::new("bun", "latest", "1.1.0")];
        let on = AutoCloseConfig::new().with_respect_latest(true);
        let off = AutoCloseConfig::new().with_respect_latest(false);

        assert!(should_auto_close(&facts, &[], Some(&on)));
        assert!(!should_auto_close(&facts, &[], Some(&off)));
    }

    #[test]
    fn test_review_with_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("buddy-bot.toml");
        fs::write(
            &path,
            "respect_latest = false\nignore_paths = [\"packages/legacy/**\"]\n",
        )
        .unwrap();
        let config = BuddyConfig::load(&path).unwrap().auto_close();

        let legacy = body_for("a", "1.0.0", "1.1.0", "packages/legacy/package.json");
        assert!(review_pull_request(&legacy, Some(&config)).should_close());

        let dynamic = body_for("bun", "latest", "1.1.0", "package.json");
        assert!(!review_pull_request(&dynamic, Some(&config)).should_close());

        let current = body_for("b", "1.0.0", "1.1.0", "packages/app/package.json");
        assert!(!review_pull_request(&current, Some(&config)).should_close());
    }

    #[test]
    fn test_review_without_config_is_fail_open() {
        let dir = TempDir::new().unwrap();
        assert_eq!(BuddyConfig::discover(None, dir.path()).unwrap(), None);

        let dynamic = body_for("bun", "latest", "1.1.0", "package.json");
        assert!(!review_pull_request(&dynamic, None).should_close());
    }

    #[test]
    fn test_empty_config_file_defaults_respect_latest() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("buddy-bot.toml"), "").unwrap();
        let config = BuddyConfig::discover(None, dir.path()).unwrap().unwrap();

        let dynamic = body_for("bun", "latest", "1.1.0", "package.json");
        assert!(review_pull_request(&dynamic, Some(&config.auto_close())).should_close());
    }
}

//! Legacy decoder for update tables in rendered pull request bodies
//!
//! Bodies written before the metadata block existed only carry markdown
//! tables. Several shapes are in circulation and none is announced up front:
//!
//! ```text
//! | Package | Change | Age | Adoption | Passing | Confidence |            (npm)
//! | [lodash](https://...) | [`4.17.20` -> `4.17.21`](https://...) | ... |
//!
//! | Package | Change | File | Status |                                   (Composer)
//! | [laravel/framework](https://...) | `10.0.0` -> `10.1.0` | `composer.json` | ✅ |
//!
//! | Package | Change |                                                  (generic)
//! | actions/checkout | `v3` → `v4` |
//! ```
//!
//! A row yields a fact when one of its cells is a change cell and a cell
//! before it holds something shaped like a package name. When the table has
//! a header naming the package column, that column is read first; otherwise
//! the leftmost package-shaped cell wins.

use crate::domain::RecoveredUpdate;
use regex::Regex;
use std::sync::LazyLock;

static HTML_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static CHANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`\s*(?<current>[^`]+?)\s*`\s*(?:->|→|-&gt;)\s*`\s*(?<new>[^`]+?)\s*`").unwrap()
});

static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^!])\[(?<text>[^\]]+)\]\([^)]*\)").unwrap());

static INLINE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(?<code>[^`]+)`").unwrap());

static PACKAGE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[A-Za-z0-9][\w.\-]*/[\w.\-]+|[A-Za-z0-9][\w.\-]*(?:[/:][\w.\-]+)*)$")
        .unwrap()
});

static SEPARATOR_CELL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?-+:?$").unwrap());

static FILE_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:[-*+]\s+)?(?:📁\s*)?(?:\*\*files?:\*\*|\*\*files?\*\*:|files?:)\s*(?<rest>.+)$",
    )
    .unwrap()
});

/// Header cells naming a file column
const FILE_HEADERS: [&str; 4] = ["file", "files", "path", "source file"];

/// Header cells naming the package column
const NAME_HEADERS: [&str; 5] = ["package", "action", "dependency", "name", "package name"];

/// Everything the legacy decoder found in a body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableScan {
    /// Facts in document order, without duplicates
    pub updates: Vec<RecoveredUpdate>,
    /// File paths in document order, without duplicates
    pub files: Vec<String>,
}

impl TableScan {
    fn push_update(&mut self, fact: RecoveredUpdate) {
        if !self.updates.contains(&fact) {
            self.updates.push(fact);
        }
    }

    fn push_file(&mut self, path: String) {
        if !self.files.contains(&path) {
            self.files.push(path);
        }
    }
}

/// Scans a body for update rows and file references
///
/// Fenced code blocks and HTML comments are skipped entirely.
pub fn scan_tables(body: &str) -> TableScan {
    let body = HTML_COMMENT_REGEX.replace_all(body, "");
    let mut scan = TableScan::default();
    let mut fence: Option<char> = None;
    let mut previous_row: Option<Vec<String>> = None;
    let mut file_column: Option<usize> = None;
    let mut name_column: Option<usize> = None;

    for line in body.lines() {
        let trimmed = line.trim();

        if let Some(marker) = fence_marker(trimmed) {
            match fence {
                None => fence = Some(marker),
                Some(open) if open == marker => fence = None,
                Some(_) => {}
            }
            previous_row = None;
            file_column = None;
            name_column = None;
            continue;
        }
        if fence.is_some() {
            continue;
        }

        if !trimmed.contains('|') {
            previous_row = None;
            file_column = None;
            name_column = None;
            for path in file_line_paths(trimmed) {
                scan.push_file(path);
            }
            continue;
        }

        let cells = split_cells(trimmed);
        if is_separator_row(&cells) {
            if let Some(header) = previous_row.take() {
                file_column = header.iter().position(|cell| is_file_header(cell));
                name_column = header.iter().position(|cell| is_name_header(cell));
            }
            continue;
        }

        if let Some(fact) = decode_row(&cells, name_column) {
            log::debug!("decoded table row: {}", fact);
            scan.push_update(fact);
        }
        if let Some(path) = file_column
            .and_then(|column| cells.get(column))
            .and_then(|cell| extract_path(cell))
        {
            scan.push_file(path);
        }
        previous_row = Some(cells);
    }

    scan
}

/// Decodes a single row's cells into a fact
///
/// `name_column` is the header's package column, if the table has one.
fn decode_row(cells: &[String], name_column: Option<usize>) -> Option<RecoveredUpdate> {
    let (change_index, caps) = cells
        .iter()
        .enumerate()
        .find_map(|(i, cell)| CHANGE_REGEX.captures(cell).map(|caps| (i, caps)))?;

    let fact = RecoveredUpdate::new(String::new(), &caps["current"], &caps["new"]);
    if fact.current_version.is_empty() || fact.new_version.is_empty() {
        return None;
    }

    let name_cells = &cells[..change_index];
    let name = name_column
        .and_then(|column| name_cells.get(column))
        .and_then(|cell| extract_package_name(cell))
        .or_else(|| {
            name_cells
                .iter()
                .filter(|cell| !cell.is_empty())
                .find_map(|cell| extract_package_name(cell))
        })?;

    Some(RecoveredUpdate { name, ..fact })
}

/// Reads a package name out of a cell (plain, bold, code or link text)
fn extract_package_name(cell: &str) -> Option<String> {
    let text = LINK_REGEX
        .captures(cell)
        .and_then(|caps| caps.name("text"))
        .map_or(cell, |m| m.as_str());

    let cleaned = text.replace("**", "").replace("__", "").replace('`', "");
    // status glyphs such as 🟢 or ⚠️ may precede the name
    let stripped = cleaned.trim_start_matches(|c: char| !c.is_ascii_alphanumeric() && c != '@');
    let candidate = stripped.split_whitespace().next()?;

    PACKAGE_NAME_REGEX
        .is_match(candidate)
        .then(|| candidate.to_string())
}

/// Reads a file path out of a cell (code span, link text or plain)
fn extract_path(cell: &str) -> Option<String> {
    let text = INLINE_CODE_REGEX
        .captures(cell)
        .and_then(|caps| caps.name("code"))
        .or_else(|| LINK_REGEX.captures(cell).and_then(|caps| caps.name("text")))
        .map_or(cell, |m| m.as_str())
        .trim();

    let looks_like_path = !text.is_empty()
        && !text.chars().any(char::is_whitespace)
        && text.chars().any(|c| c.is_ascii_alphanumeric());
    looks_like_path.then(|| text.to_string())
}

/// Paths quoted in a `**File:** `path`` style line
fn file_line_paths(line: &str) -> Vec<String> {
    let Some(rest) = FILE_LINE_REGEX
        .captures(line)
        .and_then(|caps| caps.name("rest"))
    else {
        return Vec::new();
    };

    INLINE_CODE_REGEX
        .captures_iter(rest.as_str())
        .filter_map(|caps| caps.name("code"))
        .filter_map(|m| extract_path(m.as_str()))
        .collect()
}

/// Returns the fence character if the line opens or closes a fenced block
fn fence_marker(line: &str) -> Option<char> {
    if line.starts_with("```") {
        Some('`')
    } else if line.starts_with("~~~") {
        Some('~')
    } else {
        None
    }
}

/// Splits a table row on unescaped pipes outside code spans
fn split_cells(line: &str) -> Vec<String> {
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_code = false;
    let mut escaped = false;

    for c in line.chars() {
        match c {
            _ if escaped => {
                current.push(c);
                escaped = false;
            }
            '\\' => {
                current.push(c);
                escaped = true;
            }
            '`' => {
                current.push(c);
                in_code = !in_code;
            }
            '|' if !in_code => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|cell| SEPARATOR_CELL_REGEX.is_match(cell))
}

fn is_file_header(cell: &str) -> bool {
    FILE_HEADERS.contains(&header_text(cell).as_str())
}

fn is_name_header(cell: &str) -> bool {
    NAME_HEADERS.contains(&header_text(cell).as_str())
}

fn header_text(cell: &str) -> String {
    cell.replace("**", "").trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(name: &str, current: &str, new: &str) -> RecoveredUpdate {
        RecoveredUpdate::new(name, current, new)
    }

    #[test]
    fn test_link_text_row() {
        let body = "| Package | Change |\n|---|---|\n| [pkg](https://example.com) | `1.0.0` -> `2.0.0` |";
        assert_eq!(scan_tables(body).updates, vec![fact("pkg", "1.0.0", "2.0.0")]);
    }

    #[test]
    fn test_npm_shape() {
        let body = r#"
| Package | Change | Age | Adoption | Passing | Confidence |
|---|---|---|---|---|---|
| [lodash](https://lodash.com/) ([source](https://github.com/lodash/lodash)) | [`^4.17.20` -> `^4.17.21`](https://renovatebot.com/diffs/npm/lodash/4.17.20/4.17.21) | [![age](https://developer.mend.io/api/mc/badges/age/npm/lodash/4.17.21?slim=true)](https://docs.renovatebot.com/merge-confidence/) | [![adoption](https://developer.mend.io/api/mc/badges/adoption/npm/lodash/4.17.21?slim=true)](https://docs.renovatebot.com/merge-confidence/) | [![passing](https://x/passing)](https://y) | [![confidence](https://x/confidence)](https://y) |
| [@types/node](https://www.npmjs.com/package/@types/node) | [`~20.1.0` -> `~20.2.5`](https://renovatebot.com/diffs/npm/@types%2fnode/20.1.0/20.2.5) | | | | |
"#;
        assert_eq!(
            scan_tables(body).updates,
            vec![
                fact("lodash", "4.17.20", "4.17.21"),
                fact("@types/node", "20.1.0", "20.2.5"),
            ]
        );
    }

    #[test]
    fn test_composer_shape_with_trailing_columns() {
        let body = r#"
| Package | Change | File | Status |
|---|---|---|---|
| [laravel/framework](https://packagist.org/packages/laravel/framework) | `^10.0.0` -> `^10.1.0` | `composer.json` | ✅ Available |
| [symfony/console](https://packagist.org/packages/symfony/console) | `6.0.0` → `7.0.0` | `backend/composer.json` | ⚠️ Major |
"#;
        let scan = scan_tables(body);
        assert_eq!(
            scan.updates,
            vec![
                fact("laravel/framework", "10.0.0", "10.1.0"),
                fact("symfony/console", "6.0.0", "7.0.0"),
            ]
        );
        assert_eq!(scan.files, vec!["composer.json", "backend/composer.json"]);
    }

    #[test]
    fn test_minimal_generic_shape() {
        let body = "Package | Change\n--- | ---\nactions/checkout | `v3` → `v4`\n";
        assert_eq!(scan_tables(body).updates, vec![fact("actions/checkout", "v3", "v4")]);
    }

    #[test]
    fn test_bold_and_code_names() {
        let body = "| **zod** | `3.22.0` -> `3.23.0` |\n| `yaml` | `2.3.0` -> `2.4.0` |";
        assert_eq!(
            scan_tables(body).updates,
            vec![fact("zod", "3.22.0", "3.23.0"), fact("yaml", "2.3.0", "2.4.0")]
        );
    }

    #[test]
    fn test_name_with_trailing_annotation() {
        let body = "| typescript (dev) | `5.0.0` -> `5.4.0` |";
        assert_eq!(scan_tables(body).updates, vec![fact("typescript", "5.0.0", "5.4.0")]);
    }

    #[test]
    fn test_fenced_code_blocks_are_ignored() {
        let body = r#"
```markdown
| pkg | `1.0.0` -> `2.0.0` |
```
~~~
| other | `1.0.0` -> `2.0.0` |
~~~
| real | `1.0.0` -> `1.1.0` |
"#;
        assert_eq!(scan_tables(body).updates, vec![fact("real", "1.0.0", "1.1.0")]);
    }

    #[test]
    fn test_nested_fence_of_other_kind_stays_open() {
        let body = "```\n~~~\n| pkg | `1.0.0` -> `2.0.0` |\n```\n";
        assert!(scan_tables(body).updates.is_empty());
    }

    #[test]
    fn test_html_comments_are_ignored() {
        let body = "<!--\n| hidden | `1.0.0` -> `2.0.0` |\n-->\n| shown | `1.0.0` -> `2.0.0` |";
        assert_eq!(scan_tables(body).updates, vec![fact("shown", "1.0.0", "2.0.0")]);
    }

    #[test]
    fn test_inline_code_without_change_shape_is_ignored() {
        let body = "| pkg | `npm install pkg` | `1.0.0 -> 2.0.0` |\n| cmd | `a` `b` |";
        assert!(scan_tables(body).updates.is_empty());
    }

    #[test]
    fn test_emails_and_handles_are_not_packages() {
        let body = "| dev@example.com | `1.0.0` -> `2.0.0` |\n| @octocat | `1.0.0` -> `2.0.0` |";
        assert!(scan_tables(body).updates.is_empty());
    }

    #[test]
    fn test_mentions_in_prose_do_not_disturb_rows() {
        let body = "Thanks @octocat, mail dev@example.com.\n\n| [@scope/pkg](https://x) | `1.0.0` -> `1.0.1` |";
        assert_eq!(scan_tables(body).updates, vec![fact("@scope/pkg", "1.0.0", "1.0.1")]);
    }

    #[test]
    fn test_change_cell_without_name_is_skipped() {
        let body = "| | `1.0.0` -> `2.0.0` |\n| `1.0.0` -> `2.0.0` |";
        assert!(scan_tables(body).updates.is_empty());
    }

    #[test]
    fn test_malformed_input_yields_nothing() {
        for body in ["", "|", "||||", "`", "| `` -> `` |", "no tables here", "| a | ` -> ` |"] {
            assert!(scan_tables(body).updates.is_empty(), "{:?}", body);
        }
    }

    #[test]
    fn test_duplicate_rows_are_collapsed() {
        let body = "| a | `1.0.0` -> `2.0.0` |\n| a | `1.0.0` -> `2.0.0` |";
        assert_eq!(scan_tables(body).updates.len(), 1);
    }

    #[test]
    fn test_escaped_pipes_do_not_split_cells() {
        let cells = split_cells(r"| a \| b | `x|y` | c |");
        assert_eq!(cells, vec![r"a \| b", "`x|y`", "c"]);
    }

    #[test]
    fn test_file_lines() {
        let body = "**File:** `package.json`\n- 📁 **Files**: `apps/web/package.json`, `deps.yaml`\nfile: not quoted";
        assert_eq!(
            scan_tables(body).files,
            vec!["package.json", "apps/web/package.json", "deps.yaml"]
        );
    }

    #[test]
    fn test_file_column_resets_between_tables() {
        let body = r#"
| Package | Change | File |
|---|---|---|
| a | `1.0.0` -> `1.1.0` | `package.json` |

| Package | Change | Notes |
|---|---|---|
| b | `1.0.0` -> `1.1.0` | `not-a-file-column` |
"#;
        let scan = scan_tables(body);
        assert_eq!(scan.updates.len(), 2);
        assert_eq!(scan.files, vec!["package.json"]);
    }

    #[test]
    fn test_package_column_from_header() {
        let body = r#"
| Package | Type | Change |
|---|---|---|
| [lodash](https://x) | devDependencies | `1.0.0` -> `2.0.0` |
| react | dependencies | `17.0.0` -> `18.0.0` |
"#;
        assert_eq!(
            scan_tables(body).updates,
            vec![fact("lodash", "1.0.0", "2.0.0"), fact("react", "17.0.0", "18.0.0")]
        );
    }

    #[test]
    fn test_package_column_not_first() {
        let body = "| Type | Dependency | Change |\n|---|---|---|\n| dev | eslint | `8.0.0` -> `9.0.0` |";
        assert_eq!(scan_tables(body).updates, vec![fact("eslint", "8.0.0", "9.0.0")]);
    }

    #[test]
    fn test_headerless_row_takes_leftmost_name() {
        let body = "| lodash | 5 days | `1.0.0` -> `2.0.0` |";
        assert_eq!(scan_tables(body).updates, vec![fact("lodash", "1.0.0", "2.0.0")]);
    }

    #[test]
    fn test_name_column_resets_between_tables() {
        let body = r#"
| Notes | Package | Change |
|---|---|---|
| pinned | a | `1.0.0` -> `1.1.0` |

| b | weekly | `1.0.0` -> `1.1.0` |
"#;
        assert_eq!(
            scan_tables(body).updates,
            vec![fact("a", "1.0.0", "1.1.0"), fact("b", "1.0.0", "1.1.0")]
        );
    }

    #[test]
    fn test_leading_status_glyph_before_name() {
        let body = "| 🟢 lodash | `1.0.0` -> `1.1.0` |\n| ⚠️ **react** | `17.0.0` -> `18.0.0` |";
        assert_eq!(
            scan_tables(body).updates,
            vec![fact("lodash", "1.0.0", "1.1.0"), fact("react", "17.0.0", "18.0.0")]
        );
    }

    #[test]
    fn test_extract_package_name() {
        assert_eq!(extract_package_name("[lodash](https://x)"), Some("lodash".to_string()));
        assert_eq!(extract_package_name("![badge](https://x)"), None);
        assert_eq!(extract_package_name("vendor/package"), Some("vendor/package".to_string()));
        assert_eq!(
            extract_package_name("org.jetbrains:annotations"),
            Some("org.jetbrains:annotations".to_string())
        );
        assert_eq!(extract_package_name("@handle"), None);
        assert_eq!(extract_package_name("a@b.com"), None);
        assert_eq!(extract_package_name("🟢 lodash"), Some("lodash".to_string()));
        assert_eq!(extract_package_name("✅"), None);
    }
}

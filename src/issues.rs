//! Issue sets: reading them from HAL resources and indexing them by name.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::Error;
use crate::types::Issue;

/// Link relation that carries the issue references of a HAL resource.
pub const ISSUES_RELATION: &str = "issues";

/// Read issues from a HAL resource's `_links.issues` relation.
/// A resource without the relation has no issues.
pub fn from_hal(resource: &Value) -> Vec<Issue> {
    let Some(relation) = resource.get("_links").and_then(|links| return links.get(ISSUES_RELATION)) else {
        log::debug!("resource has no `{ISSUES_RELATION}` relation");
        return Vec::new();
    };
    return from_array(relation);
}

/// Read issues from either a HAL resource or a bare array of `{name, href}`.
pub fn from_json(value: &Value) -> Vec<Issue> {
    if value.is_array() {
        return from_array(value);
    }
    return from_hal(value);
}

/// Convert a JSON array into issues, skipping malformed entries so one bad
/// entry does not suppress linking of the others.
fn from_array(value: &Value) -> Vec<Issue> {
    let Some(entries) = value.as_array() else {
        log::warn!("`{ISSUES_RELATION}` is not an array, ignoring it");
        return Vec::new();
    };

    let issues: Vec<Issue> = entries.iter().filter_map(issue_from_entry).collect();
    log::debug!("read {} of {} issue entries", issues.len(), entries.len());
    return issues;
}

/// Build a single issue, or `None` when `name` or `href` is missing or unusable.
fn issue_from_entry(entry: &Value) -> Option<Issue> {
    let name = entry.get("name").and_then(Value::as_str);
    let href = entry.get("href").and_then(Value::as_str);

    return match (name, href) {
        (Some(name), Some(href)) if !name.is_empty() => Some(Issue::new(name, href)),
        _ => {
            log::warn!("skipping malformed issue entry: {entry}");
            None
        },
    };
}

/// Build a name lookup. When two issues share a name the last one wins.
pub fn index_by_name(issues: &[Issue]) -> HashMap<&str, &Issue> {
    let mut index = HashMap::with_capacity(issues.len());
    for issue in issues {
        index.insert(issue.name.as_str(), issue);
    }
    return index;
}

/// Load issues from a JSON file holding a HAL resource or a bare array.
///
/// # Errors
///
/// Returns `Error::IssuesNotFound` if the file doesn't exist,
/// `Error::Io` for other read failures,
/// or `Error::Json` if the content is not valid JSON.
pub fn load(path: &Path) -> Result<Vec<Issue>, Error> {
    let content = match std::fs::read_to_string(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::IssuesNotFound {
                path: path.to_path_buf(),
            });
        },
        Err(e) => return Err(Error::Io(e)),
        Ok(c) => c,
    };

    let value: Value = serde_json::from_str(&content)?;
    let issues = from_json(&value);
    log::debug!("loaded {} issues from {}", issues.len(), path.display());
    return Ok(issues);
}

/// Parse a `NAME=HREF` command line argument. Splits on the first `=`,
/// so the href may itself contain `=`.
///
/// # Errors
///
/// Returns `Error::InvalidIssueArgument` if there is no `=` or the name is empty.
pub fn parse_argument(argument: &str) -> Result<Issue, Error> {
    return match argument.split_once('=') {
        Some((name, href)) if !name.is_empty() => Ok(Issue::new(name, href)),
        _ => Err(Error::InvalidIssueArgument {
            argument: argument.to_string(),
        }),
    };
}

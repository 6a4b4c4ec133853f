use crate::config::CONFIG_FILE;
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is
/// one, how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::ConfigInvalid { path, reason } => render_config_invalid(path, reason),
        Error::InvalidIssueArgument { argument } => render_invalid_issue_argument(argument),
        Error::IssuesNotFound { path } => render_issues_not_found(path),
        Error::UnknownExtensionPoint { name } => render_unknown_extension_point(name),
        _ => render_generic(e),
    }
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::Json(e) => format!("\
# Error: Invalid JSON

{e}

## Fix

Issue files hold a HAL resource with an `_links.issues` array, or the array itself:

    [{{\"name\": \"#1\", \"href\": \"https://tracker/issues/1\"}}]
"),
        Error::ParseFailed { reason } => format!("\
# Error: Parse Failed

Could not parse the markdown document: {reason}
"),
        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Check `{CONFIG_FILE}`. Known keys are `issues`, `new_tab` and `title`.
"),
        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    }
}

fn render_config_invalid(path: &std::path::Path, reason: &str) -> String {
    format!("\
# Error: Invalid Config

`{}`: {reason}

## Fix

Use a title template such as:

    title = \"Issue {{name}}\"
", path.display())
}

fn render_invalid_issue_argument(argument: &str) -> String {
    format!("\
# Error: Invalid Issue Argument

`{argument}` is not of the form `NAME=HREF`.

## Fix

    issuelink scan --issue '#1=https://tracker/issues/1' 'Fixes #1'
")
}

fn render_issues_not_found(path: &std::path::Path) -> String {
    format!("\
# Error: Issue File Not Found

`{}` does not exist.

## Fix

Pass an existing file with `--issues`, or set `issues` in `{CONFIG_FILE}`.
", path.display())
}

fn render_unknown_extension_point(name: &str) -> String {
    format!("\
# Error: Unknown Extension Point

Nothing is bound to `{name}`.
")
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn issues_not_found_names_the_file() {
        let md = render_error(&Error::IssuesNotFound {
            path: PathBuf::from("missing.json"),
        });
        assert!(md.starts_with("# Error: Issue File Not Found"));
        assert!(md.contains("`missing.json` does not exist."));
    }

    #[test]
    fn invalid_argument_shows_usage() {
        let md = render_error(&Error::InvalidIssueArgument {
            argument: "#1".to_string(),
        });
        assert!(md.contains("`#1` is not of the form `NAME=HREF`."));
        assert!(md.contains("issuelink scan --issue"));
    }

    #[test]
    fn config_invalid_keeps_placeholder_literal() {
        let md = render_error(&Error::ConfigInvalid {
            path: PathBuf::from(CONFIG_FILE),
            reason: "bad".to_string(),
        });
        assert!(md.contains("title = \"Issue {name}\""));
    }

    #[test]
    fn json_error_shows_expected_shape() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let md = render_error(&Error::Json(err));
        assert!(md.starts_with("# Error: Invalid JSON"));
        assert!(md.contains("[{\"name\": \"#1\""));
    }
}

//! Replacement table for renderers that substitute tokens themselves.

use serde::Serialize;

use crate::types::{Issue, IssueLink};

/// Tells a token-substituting renderer to swap `text_to_replace` for `link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Replacement {
    /// Link to render in place of the text.
    pub link: IssueLink,
    /// Literal text to look for.
    pub text_to_replace: String,
}

/// One replacement per issue, in issue order. Empty when the text is empty
/// or no issue set is given, since there is nothing to substitute.
pub fn replacements(text: &str, issues: Option<&[Issue]>) -> Vec<Replacement> {
    let Some(issues) = issues else {
        return Vec::new();
    };
    if text.is_empty() {
        return Vec::new();
    }

    return issues
        .iter()
        .map(|issue| {
            return Replacement {
                link: issue.link(None),
                text_to_replace: issue.name.clone(),
            };
        })
        .collect();
}

//! Core domain types shared by the tokenizer, the scanner, and the renderers.
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the issue name in a title template.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Default link title template, rendered as `Issue #22`.
pub const DEFAULT_TITLE_TEMPLATE: &str = "Issue {name}";

/// A piece of output: either original text or a resolved issue link.
/// Serialized as `{"type": "text", "value": "..."}` or
/// `{"type": "link", "value": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Fragment {
    /// A resolved issue reference.
    Link(IssueLink),
    /// Literal text copied from the input.
    Text(String),
}

impl Fragment {
    /// The input text this fragment stands for. Links stand for their label.
    pub fn literal(&self) -> &str {
        return match self {
            Fragment::Link(link) => &link.label,
            Fragment::Text(text) => text,
        };
    }

    /// Shorthand for a text fragment.
    pub fn text(value: impl Into<String>) -> Self {
        return Fragment::Text(value.into());
    }
}

/// An issue reference known to the caller, e.g. `#123` pointing at its tracker page.
/// Names are matched literally and assumed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Target URL of the issue.
    pub href: String,
    /// Literal key searched for in text.
    pub name: String,
}

impl Issue {
    /// Build an issue from its key and target URL.
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        return Self {
            href: href.into(),
            name: name.into(),
        };
    }

    /// Link to this issue labelled with its name.
    pub fn link(&self, title: Option<String>) -> IssueLink {
        return IssueLink {
            href: self.href.clone(),
            label: self.name.clone(),
            title,
        };
    }
}

/// Link descriptor handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueLink {
    /// Target URL.
    pub href: String,
    /// Visible text; always the issue name.
    pub label: String,
    /// Optional hover title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// How generated links are titled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStyle {
    /// Template containing `{name}`; `None` means links carry no title.
    pub title_template: Option<String>,
}

impl Default for LinkStyle {
    fn default() -> Self {
        return Self {
            title_template: Some(DEFAULT_TITLE_TEMPLATE.to_string()),
        };
    }
}

impl LinkStyle {
    /// Style that produces untitled links.
    pub const fn untitled() -> Self {
        return Self { title_template: None };
    }

    /// Build a style from a config template. An empty template disables titles.
    pub fn from_template(template: &str) -> Self {
        if template.is_empty() {
            return Self::untitled();
        }
        return Self {
            title_template: Some(template.to_string()),
        };
    }

    /// Title for a link to the named issue.
    pub fn title_for(&self, name: &str) -> Option<String> {
        return self
            .title_template
            .as_ref()
            .map(|template| return template.replace(NAME_PLACEHOLDER, name));
    }
}

/// Concatenate the literal content of every fragment.
/// For any tokenizer or scanner output this equals the original input.
pub fn reconstruct(fragments: &[Fragment]) -> String {
    return fragments.iter().map(Fragment::literal).collect();
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn default_title_names_the_issue() {
        let style = LinkStyle::default();
        assert_eq!(style.title_for("#22").as_deref(), Some("Issue #22"));
    }

    #[test]
    fn empty_template_disables_titles() {
        let style = LinkStyle::from_template("");
        assert_eq!(style.title_for("#22"), None);
    }

    #[test]
    fn custom_template_substitutes_every_placeholder() {
        let style = LinkStyle::from_template("{name} ({name})");
        assert_eq!(style.title_for("ABC-1").as_deref(), Some("ABC-1 (ABC-1)"));
    }

    #[test]
    fn reconstruct_uses_link_labels() {
        let issue = Issue::new("#1", "https://tracker/1");
        let fragments = vec![
            Fragment::text("see "),
            Fragment::Link(issue.link(None)),
            Fragment::text("."),
        ];
        assert_eq!(reconstruct(&fragments), "see #1.");
    }

    #[test]
    fn fragments_serialize_with_type_tag() {
        let issue = Issue::new("#1", "https://tracker/1");
        let json = serde_json::to_value(vec![
            Fragment::text("a"),
            Fragment::Link(issue.link(Some("Issue #1".to_string()))),
        ])
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"type": "text", "value": "a"},
                {"type": "link", "value": {"href": "https://tracker/1", "label": "#1", "title": "Issue #1"}}
            ])
        );
    }
}

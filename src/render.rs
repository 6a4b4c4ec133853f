//! Fragment renderers: HTML anchors, markdown links, and JSON.

use crate::doc::Node;
use crate::error::Error;
use crate::markdown;
use crate::types::{Fragment, IssueLink};

/// Escape text for use in HTML content and double-quoted attributes.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    return out;
}

/// Render one link as an anchor element.
fn html_anchor(link: &IssueLink, new_tab: bool) -> String {
    let mut anchor = format!("<a href=\"{}\"", escape_html(&link.href));
    if let Some(title) = &link.title {
        anchor.push_str(&format!(" title=\"{}\"", escape_html(title)));
    }
    if new_tab {
        anchor.push_str(" target=\"_blank\"");
    }
    anchor.push_str(&format!(">{}</a>", escape_html(&link.label)));
    return anchor;
}

/// Render fragments as HTML: escaped text and one anchor per link.
/// With `new_tab` anchors open in a new browsing context.
pub fn to_html(fragments: &[Fragment], new_tab: bool) -> String {
    return fragments
        .iter()
        .map(|fragment| {
            return match fragment {
                Fragment::Link(link) => html_anchor(link, new_tab),
                Fragment::Text(text) => escape_html(text),
            };
        })
        .collect();
}

/// Render fragments as pretty-printed JSON.
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails.
pub fn to_json(fragments: &[Fragment]) -> Result<String, Error> {
    return Ok(serde_json::to_string_pretty(fragments)?);
}

/// Render fragments as markdown: text verbatim, links as `[label](href "title")`.
pub fn to_markdown(fragments: &[Fragment]) -> String {
    return markdown::render(&Node::group(fragments));
}

//! Owned document tree and the text-node visitor that rewrites it.
//!
//! The tree is a small unist-style model: every node has a kind, an optional
//! literal value, and children. Parsers fill it (see `markdown`), plugins
//! rewrite it through [`walk_text`], renderers print it.

use serde::Serialize;

use crate::types::{Fragment, IssueLink};

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Child nodes in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    /// What the node is.
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Literal content for text, code and syntax nodes. For links parsed
    /// from a document this holds the original markup; for generated links
    /// it is empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

/// Node kinds. Only `Text` nodes are offered to visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum NodeKind {
    /// Any other block container (sections, tables, ...).
    Block,
    /// Quoted block.
    BlockQuote,
    /// Code block; its value is never scanned.
    Code,
    /// Emphasized inline content.
    Emphasis,
    /// Wrapper holding the fragments that replaced a single text node.
    Group,
    /// Heading block.
    Heading,
    /// Inline code span; its value is never scanned.
    InlineCode,
    /// Hyperlink whose children are its label.
    Link {
        /// Optional hover title.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Link target; the reference label for reference-style links.
        url: String,
    },
    /// List container.
    List,
    /// Single list entry.
    ListItem,
    /// Paragraph block.
    Paragraph,
    /// Document root.
    Root,
    /// Strongly emphasized inline content.
    Strong,
    /// Markup that is kept verbatim: markers, delimiters, escapes, whitespace.
    Syntax,
    /// Prose.
    Text,
}

impl Node {
    /// Container node with the given children.
    pub const fn parent(kind: NodeKind, children: Vec<Node>) -> Self {
        return Self {
            children,
            kind,
            value: String::new(),
        };
    }

    /// Leaf node with a literal value.
    pub fn literal(kind: NodeKind, value: impl Into<String>) -> Self {
        return Self {
            children: Vec::new(),
            kind,
            value: value.into(),
        };
    }

    /// Prose leaf.
    pub fn text(value: impl Into<String>) -> Self {
        return Self::literal(NodeKind::Text, value);
    }

    /// Generated link node labelled by a single text child.
    pub fn link(link: &IssueLink) -> Self {
        return Self::parent(
            NodeKind::Link {
                title: link.title.clone(),
                url: link.href.clone(),
            },
            vec![Self::text(link.label.clone())],
        );
    }

    /// Wrapper node standing in for one text node that was split into fragments.
    pub fn group(fragments: &[Fragment]) -> Self {
        let children = fragments
            .iter()
            .map(|fragment| {
                return match fragment {
                    Fragment::Link(link) => Self::link(link),
                    Fragment::Text(text) => Self::text(text.clone()),
                };
            })
            .collect();
        return Self::parent(NodeKind::Group, children);
    }

    /// Whether this is a prose leaf.
    pub const fn is_text(&self) -> bool {
        return matches!(self.kind, NodeKind::Text);
    }

    /// Whether this is a link of any origin.
    pub const fn is_link(&self) -> bool {
        return matches!(self.kind, NodeKind::Link { .. });
    }

    /// Concatenated prose of this subtree. Syntax and code are included
    /// verbatim, link markup is reduced to the label.
    pub fn plain_text(&self) -> String {
        if self.children.is_empty() {
            return self.value.clone();
        }
        return self.children.iter().map(Node::plain_text).collect();
    }
}

/// Callback invoked once per text node during [`walk_text`].
pub trait TextVisitor {
    /// Inspect `node`, the child at `index` of `parent`. Returning a node
    /// replaces it in `parent`; the replacement is not walked.
    fn visit_text(&mut self, node: &Node, index: usize, parent: &Node) -> Option<Node>;
}

impl<F> TextVisitor for F
where
    F: FnMut(&Node, usize, &Node) -> Option<Node>,
{
    fn visit_text(&mut self, node: &Node, index: usize, parent: &Node) -> Option<Node> {
        return self(node, index, parent);
    }
}

/// Walk `root` depth-first and offer every text node that has a parent to
/// `visitor`, replacing nodes in place as the visitor asks. Returns the
/// number of replaced nodes.
pub fn walk_text(root: &mut Node, visitor: &mut impl TextVisitor) -> usize {
    let mut replaced = 0_usize;
    let mut index = 0_usize;

    while index < root.children.len() {
        let replacement = match root.children.get(index) {
            Some(child) if child.is_text() => visitor.visit_text(child, index, root),
            _ => None,
        };

        if let Some(slot) = root.children.get_mut(index) {
            match replacement {
                Some(node) => {
                    *slot = node;
                    replaced = replaced.saturating_add(1);
                },
                None => replaced = replaced.saturating_add(walk_text(slot, visitor)),
            }
        }
        index = index.saturating_add(1);
    }
    return replaced;
}

//! Markdown adapter: parses a document into the owned tree with
//! tree-sitter-md and renders the tree back to markdown.
//!
//! Parsing keeps every byte. Anything the tree does not model becomes a
//! `Syntax` (block level) or `Text` (inline level) node, so rendering an
//! untouched tree reproduces the source exactly.

use tree_sitter::Node as SyntaxNode;

use crate::doc::{Node, NodeKind};
use crate::error::Error;
use crate::grammar::Grammar;
use crate::linker;
use crate::types::{Issue, LinkStyle};

/// Block nodes kept verbatim and never scanned.
const CODE_BLOCKS: &[&str] = &[
    "fenced_code_block",
    "html_block",
    "indented_code_block",
    "link_reference_definition",
    "minus_metadata",
    "plus_metadata",
];

/// Block nodes whose text is inline markdown.
const INLINE_CONTAINERS: &[&str] = &["inline", "pipe_table_cell"];

/// Inline nodes kept verbatim as syntax.
const LITERAL_INLINES: &[&str] = &[
    "backslash_escape",
    "code_span_delimiter",
    "email_autolink",
    "emphasis_delimiter",
    "entity_reference",
    "hard_line_break",
    "html_tag",
    "image",
    "latex_block",
    "numeric_character_reference",
    "uri_autolink",
];

/// Map a tree-sitter block kind to a tree node kind.
fn block_kind(kind: &str) -> NodeKind {
    return match kind {
        "atx_heading" | "setext_heading" => NodeKind::Heading,
        "block_quote" => NodeKind::BlockQuote,
        "list" => NodeKind::List,
        "list_item" => NodeKind::ListItem,
        "paragraph" => NodeKind::Paragraph,
        _ => NodeKind::Block,
    };
}

/// Convert the children of a block node, filling gaps with syntax.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if a node range falls outside the source.
fn block_children(node: SyntaxNode<'_>, source: &str) -> Result<Vec<Node>, Error> {
    let mut children = Vec::new();
    let mut position = node.start_byte();
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        push_gap(source, position, child.start_byte(), NodeKind::Syntax, &mut children);
        push_block(child, source, &mut children)?;
        position = position.max(child.end_byte());
    }
    push_gap(source, position, node.end_byte(), NodeKind::Syntax, &mut children);
    return Ok(children);
}

/// Build a link node from an existing inline or reference link. The label
/// and target are read from the link's parts; the original markup is kept
/// as the node's value. Reference links have no destination of their own,
/// so their `url` is the reference label.
fn existing_link(node: SyntaxNode<'_>, source: &str, markup: &str) -> Node {
    let mut label = "";
    let mut reference = None;
    let mut title = None;
    let mut url = "";

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let text = source.get(child.byte_range()).unwrap_or("");
        match child.kind() {
            "link_destination" => url = strip_pair(text, '<', '>'),
            "link_label" => reference = Some(strip_pair(text, '[', ']')),
            "link_text" => label = link_text(node, child, text),
            "link_title" => {
                title = Some(text.trim_matches(|c: char| return matches!(c, '"' | '\'' | '(' | ')')).to_string());
            },
            _ => {},
        }
    }

    // Collapsed and shortcut references use the label as the reference.
    if node.kind() != "inline_link" {
        url = reference.unwrap_or(label);
    }

    return Node {
        children: vec![Node::text(label)],
        kind: NodeKind::Link {
            title,
            url: url.to_string(),
        },
        value: markup.to_string(),
    };
}

/// Convert the children of an inline node into `out`, filling gaps with text.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if a node range falls outside the source.
fn inline_children(node: SyntaxNode<'_>, source: &str, out: &mut Vec<Node>) -> Result<(), Error> {
    let mut position = node.start_byte();
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        push_gap(source, position, child.start_byte(), NodeKind::Text, out);
        push_inline(child, source, out)?;
        position = position.max(child.end_byte());
    }
    push_gap(source, position, node.end_byte(), NodeKind::Text, out);
    return Ok(());
}

/// Parse and link issues in a markdown document, returning the rewritten markdown.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if tree-sitter cannot parse the document.
pub fn link_markdown(source: &str, issues: Option<&[Issue]>, style: &LinkStyle) -> Result<String, Error> {
    let mut root = parse(source)?;
    linker::link_issues(&mut root, issues, style);
    return Ok(render(&root));
}

/// Label of a link. The label may itself contain balanced brackets, so the
/// outer pair is only removed when the `link_text` node spans it.
fn link_text<'s>(link: SyntaxNode<'_>, label: SyntaxNode<'_>, text: &'s str) -> &'s str {
    if label.start_byte() == link.start_byte() {
        return strip_pair(text, '[', ']');
    }
    return text;
}

/// Merge runs of adjacent text nodes so a name split across parser tokens
/// is still seen as one string.
fn merge_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if node.is_text()
            && let Some(last) = merged.last_mut()
            && last.is_text()
        {
            last.value.push_str(&node.value);
            continue;
        }
        merged.push(node);
    }
    return merged;
}

/// Parse a markdown document into a tree.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if tree-sitter cannot parse the document.
pub fn parse(source: &str) -> Result<Node, Error> {
    let tree = Grammar::Block.parse(source)?;
    let root = tree.root_node();

    let mut children = Vec::new();
    push_gap(source, 0, root.start_byte(), NodeKind::Syntax, &mut children);
    children.extend(block_children(root, source)?);
    push_gap(source, root.end_byte(), source.len(), NodeKind::Syntax, &mut children);
    return Ok(Node::parent(NodeKind::Root, children));
}

/// Parse the text of one inline container with the inline grammar.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if tree-sitter cannot parse the text.
fn parse_inline(text: &str) -> Result<Vec<Node>, Error> {
    let tree = Grammar::Inline.parse(text)?;
    let root = tree.root_node();

    let mut nodes = Vec::new();
    push_gap(text, 0, root.start_byte(), NodeKind::Text, &mut nodes);
    inline_children(root, text, &mut nodes)?;
    push_gap(text, root.end_byte(), text.len(), NodeKind::Text, &mut nodes);
    return Ok(merge_text(nodes));
}

/// Convert one block node into `out`.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if the node range falls outside the source.
fn push_block(node: SyntaxNode<'_>, source: &str, out: &mut Vec<Node>) -> Result<(), Error> {
    let kind = node.kind();
    let text = slice(source, node)?;

    if CODE_BLOCKS.contains(&kind) {
        out.push(Node::literal(NodeKind::Code, text));
    } else if INLINE_CONTAINERS.contains(&kind) {
        out.extend(parse_inline(text)?);
    } else if node.child_count() == 0 {
        if !text.is_empty() {
            out.push(Node::literal(NodeKind::Syntax, text));
        }
    } else {
        out.push(Node::parent(block_kind(kind), block_children(node, source)?));
    }
    return Ok(());
}

/// Append the source between `start` and `end` as a leaf of `kind`, if non-empty.
fn push_gap(source: &str, start: usize, end: usize, kind: NodeKind, out: &mut Vec<Node>) {
    if let Some(gap) = source.get(start..end)
        && !gap.is_empty()
    {
        out.push(Node::literal(kind, gap));
    }
}

/// Convert one inline node into `out`. Existing links of every form become
/// link nodes. Unknown containers such as strikethrough are flattened so
/// their prose stays scannable.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if the node range falls outside the source.
fn push_inline(node: SyntaxNode<'_>, source: &str, out: &mut Vec<Node>) -> Result<(), Error> {
    let kind = node.kind();
    let text = slice(source, node)?;
    if text.is_empty() {
        return Ok(());
    }

    match kind {
        "code_span" => out.push(Node::literal(NodeKind::InlineCode, text)),
        "emphasis" | "strong_emphasis" => {
            let mut children = Vec::new();
            inline_children(node, source, &mut children)?;
            let container = if kind == "emphasis" { NodeKind::Emphasis } else { NodeKind::Strong };
            out.push(Node::parent(container, merge_text(children)));
        },
        "collapsed_reference_link" | "full_reference_link" | "inline_link" | "shortcut_link" => {
            out.push(existing_link(node, source, text));
        },
        _ if LITERAL_INLINES.contains(&kind) => out.push(Node::literal(NodeKind::Syntax, text)),
        _ if node.child_count() == 0 => out.push(Node::text(text)),
        _ => inline_children(node, source, out)?,
    }
    return Ok(());
}

/// Render a tree back to markdown. Generated links become
/// `[label](url "title")`; everything else is printed as parsed.
pub fn render(node: &Node) -> String {
    let mut out = String::new();
    render_into(node, &mut out);
    return out;
}

/// Append the markdown for `node` to `out`.
fn render_into(node: &Node, out: &mut String) {
    if !node.value.is_empty() {
        out.push_str(&node.value);
        return;
    }

    if let NodeKind::Link { title, url } = &node.kind {
        out.push('[');
        for child in &node.children {
            out.push_str(&escape_label(&child.plain_text()));
        }
        out.push_str("](");
        out.push_str(&escape_destination(url));
        if let Some(title) = title {
            out.push_str(" \"");
            out.push_str(&title.replace('"', "\\\""));
            out.push('"');
        }
        out.push(')');
        return;
    }

    for child in &node.children {
        render_into(child, out);
    }
}

/// Backslash-escape brackets in a generated link label.
fn escape_label(label: &str) -> String {
    return label.replace('[', "\\[").replace(']', "\\]");
}

/// Wrap a destination in angle brackets when it would otherwise end the link early.
fn escape_destination(url: &str) -> String {
    if url.contains(|c: char| return c.is_whitespace() || c == '(' || c == ')') {
        return format!("<{url}>");
    }
    return url.to_string();
}

/// Source text covered by a syntax node.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if the node range falls outside the source.
fn slice<'s>(source: &'s str, node: SyntaxNode<'_>) -> Result<&'s str, Error> {
    return source.get(node.byte_range()).ok_or_else(|| return Error::ParseFailed {
        reason: format!("`{}` node range {:?} is outside the source", node.kind(), node.byte_range()),
    });
}

/// Remove exactly one `open` prefix and `close` suffix when both are present.
fn strip_pair(text: &str, open: char, close: char) -> &str {
    return text
        .strip_prefix(open)
        .and_then(|inner| return inner.strip_suffix(close))
        .unwrap_or(text);
}

//! Document-tree plugin that links issue occurrences inside prose.

use crate::doc::{self, Node, TextVisitor};
use crate::scanner;
use crate::types::{Issue, LinkStyle};

/// Rewrites text nodes that mention issues into groups of text and links.
pub struct IssueLinker<'i> {
    /// Issues to look for.
    issues: &'i [Issue],
    /// Title convention for generated links.
    style: LinkStyle,
}

impl<'i> IssueLinker<'i> {
    /// Build the plugin for an issue set. Returns `None` when the set is
    /// absent or empty, in which case there is nothing to do.
    pub fn new(issues: Option<&'i [Issue]>, style: LinkStyle) -> Option<Self> {
        let issues = issues.filter(|issues| return !issues.is_empty())?;
        return Some(Self { issues, style });
    }

    /// Rewrite every eligible text node under `root`. Returns the number of
    /// text nodes that were replaced.
    pub fn apply(&mut self, root: &mut Node) -> usize {
        let replaced = doc::walk_text(root, self);
        log::debug!("linked issues in {replaced} text nodes");
        return replaced;
    }
}

impl TextVisitor for IssueLinker<'_> {
    fn visit_text(&mut self, node: &Node, _index: usize, parent: &Node) -> Option<Node> {
        // Link labels are already links; scanning them would nest links.
        if parent.is_link() || node.value.is_empty() {
            return None;
        }
        let fragments = scanner::scan_and_link(&node.value, self.issues, &self.style)?;
        return Some(Node::group(&fragments));
    }
}

/// Plugin factory bound at the registry's tree extension points.
pub fn plugin<'i>(issues: Option<&'i [Issue]>, style: LinkStyle) -> Option<IssueLinker<'i>> {
    return IssueLinker::new(issues, style);
}

/// Link issues in a document tree in place. A no-op for an absent or empty
/// issue set. Returns the number of replaced text nodes.
pub fn link_issues(root: &mut Node, issues: Option<&[Issue]>, style: &LinkStyle) -> usize {
    return IssueLinker::new(issues, style.clone()).map_or(0, |mut linker| return linker.apply(root));
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;
    use crate::doc::NodeKind;

    const CONTENT: &str = "I am a description of issue #22. This issue, (#22) is awesome. Lets see more #22s.";

    fn parent_of(text: &str) -> Node {
        Node::parent(NodeKind::Paragraph, vec![Node::text(text)])
    }

    fn issue_link(name: &str) -> Node {
        Node::parent(
            NodeKind::Link {
                title: Some(format!("Issue {name}")),
                url: format!("https://hitchhiker.com/issues/{}", name.trim_start_matches('#')),
            },
            vec![Node::text(name)],
        )
    }

    #[test]
    fn replaces_text_node_with_group() {
        let issues = vec![Issue::new("#22", "https://hitchhiker.com/issues/22")];
        let mut parent = parent_of(CONTENT);
        let replaced = link_issues(&mut parent, Some(&issues), &LinkStyle::default());

        assert_eq!(replaced, 1);
        assert_eq!(parent.children.len(), 1);
        let group = &parent.children[0];
        assert_eq!(group.kind, NodeKind::Group);
        assert_eq!(
            group.children,
            vec![
                Node::text("I am a description of issue "),
                issue_link("#22"),
                Node::text(". This issue, ("),
                issue_link("#22"),
                Node::text(") is awesome. Lets see more "),
                issue_link("#22"),
                Node::text("s."),
            ]
        );
    }

    #[test]
    fn absent_issues_leave_node_untouched() {
        let mut parent = parent_of(CONTENT);
        let before = parent.clone();
        assert_eq!(link_issues(&mut parent, None, &LinkStyle::default()), 0);
        assert_eq!(parent, before);
        assert!(IssueLinker::new(None, LinkStyle::default()).is_none());
    }

    #[test]
    fn empty_issues_leave_node_untouched() {
        let mut parent = parent_of(CONTENT);
        let before = parent.clone();
        assert_eq!(link_issues(&mut parent, Some(&[]), &LinkStyle::default()), 0);
        assert_eq!(parent, before);
    }

    #[test]
    fn unmatched_text_is_not_wrapped() {
        let issues = vec![Issue::new("#99", "https://hitchhiker.com/issues/99")];
        let mut parent = parent_of(CONTENT);
        let before = parent.clone();
        assert_eq!(link_issues(&mut parent, Some(&issues), &LinkStyle::default()), 0);
        assert_eq!(parent, before);
        assert!(parent.children[0].is_text());
    }

    #[test]
    fn link_labels_are_not_relinked() {
        let issues = vec![Issue::new("#22", "https://hitchhiker.com/issues/22")];
        let existing = Node::parent(
            NodeKind::Link {
                title: None,
                url: "https://elsewhere".to_string(),
            },
            vec![Node::text("see #22")],
        );
        let mut root = Node::parent(NodeKind::Paragraph, vec![existing.clone()]);
        assert_eq!(link_issues(&mut root, Some(&issues), &LinkStyle::default()), 0);
        assert_eq!(root.children[0], existing);
    }

    #[test]
    fn nested_prose_is_linked() {
        let issues = vec![Issue::new("#1", "https://hitchhiker.com/issues/1")];
        let mut root = Node::parent(
            NodeKind::Root,
            vec![Node::parent(
                NodeKind::Paragraph,
                vec![
                    Node::text("fixes #1 "),
                    Node::parent(NodeKind::Strong, vec![Node::text("and #1")]),
                    Node::literal(NodeKind::InlineCode, "`#1`"),
                ],
            )],
        );
        assert_eq!(link_issues(&mut root, Some(&issues), &LinkStyle::default()), 2);
        assert_eq!(root.plain_text(), "fixes #1 and #1`#1`");
        let paragraph = &root.children[0];
        assert_eq!(paragraph.children[0].kind, NodeKind::Group);
        assert_eq!(paragraph.children[1].children[0].kind, NodeKind::Group);
        assert_eq!(paragraph.children[2].kind, NodeKind::InlineCode);
    }
}

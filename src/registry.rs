//! Extension registry: named extension points bound to issue-link
//! implementations by the composition root.

use std::collections::HashMap;

use crate::error::Error;
use crate::linker::{self, IssueLinker};
use crate::replacements::{self, Replacement};
use crate::types::{Issue, LinkStyle};
use crate::words::{self, Tokenized};

/// Word tokenizer for changeset descriptions.
pub const CHANGESET_DESCRIPTION: &str = "changeset.description";

/// Replacement table for changeset descriptions.
pub const CHANGESET_DESCRIPTION_TOKENS: &str = "changeset.description.tokens";

/// Tree plugin for pull request comments.
pub const PULL_REQUEST_COMMENT_PLUGINS: &str = "pullrequest.comment.plugins";

/// Tree plugin for pull request descriptions.
pub const PULL_REQUEST_DESCRIPTION_PLUGINS: &str = "pullrequest.description.plugins";

/// Replacement table for pull request titles.
pub const PULL_REQUEST_TITLE_TOKENS: &str = "reviewPlugin.pullrequest.title.tokens";

/// Builds a tree plugin for an issue set, `None` when there is nothing to link.
pub type PluginFactory = for<'i> fn(Option<&'i [Issue]>, LinkStyle) -> Option<IssueLinker<'i>>;

/// Builds a replacement table for a text.
pub type ReplacementFactory = fn(&str, Option<&[Issue]>) -> Vec<Replacement>;

/// Splits a text into words and links.
pub type WordTokenizer = for<'t> fn(Option<&'t str>, Option<&[Issue]>) -> Tokenized<'t>;

/// Something that can be bound to an extension point.
#[derive(Clone, Copy)]
pub enum Extension {
    /// Document-tree plugin.
    Plugin(PluginFactory),
    /// Token replacement table.
    Replacements(ReplacementFactory),
    /// Whitespace tokenizer.
    Words(WordTokenizer),
}

impl std::fmt::Debug for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Extension::Plugin(_) => "Plugin",
            Extension::Replacements(_) => "Replacements",
            Extension::Words(_) => "Words",
        };
        return f.write_str(name);
    }
}

/// Extension points and their bound implementations, in binding order.
#[derive(Debug, Default)]
pub struct Registry {
    /// Bindings keyed by extension point name.
    bindings: HashMap<String, Vec<Extension>>,
}

impl Registry {
    /// Add an implementation to an extension point.
    pub fn bind(&mut self, point: &str, extension: Extension) {
        log::debug!("binding {extension:?} to `{point}`");
        self.bindings.entry(point.to_string()).or_default().push(extension);
    }

    /// All implementations bound to `point`, empty if none.
    pub fn extensions(&self, point: &str) -> &[Extension] {
        return match self.bindings.get(point) {
            Some(extensions) => extensions,
            None => &[],
        };
    }

    /// First implementation bound to `point`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownExtensionPoint` if nothing is bound there.
    pub fn first(&self, point: &str) -> Result<Extension, Error> {
        return self.extensions(point).first().copied().ok_or_else(|| return Error::UnknownExtensionPoint {
            name: point.to_string(),
        });
    }

    /// Registry with the issue-link bindings already made.
    pub fn with_issue_links() -> Self {
        let mut registry = Self::default();
        register_issue_links(&mut registry);
        return registry;
    }
}

/// Bind the issue-link implementations to their extension points.
pub fn register_issue_links(registry: &mut Registry) {
    registry.bind(CHANGESET_DESCRIPTION, Extension::Words(words::tokenize_words));
    registry.bind(CHANGESET_DESCRIPTION_TOKENS, Extension::Replacements(replacements::replacements));
    registry.bind(PULL_REQUEST_TITLE_TOKENS, Extension::Replacements(replacements::replacements));
    registry.bind(PULL_REQUEST_COMMENT_PLUGINS, Extension::Plugin(linker::plugin));
    registry.bind(PULL_REQUEST_DESCRIPTION_PLUGINS, Extension::Plugin(linker::plugin));
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;
    use crate::doc::{Node, NodeKind};

    #[test]
    fn binds_every_issue_link_point() {
        let registry = Registry::with_issue_links();
        for point in [
            CHANGESET_DESCRIPTION,
            CHANGESET_DESCRIPTION_TOKENS,
            PULL_REQUEST_COMMENT_PLUGINS,
            PULL_REQUEST_DESCRIPTION_PLUGINS,
            PULL_REQUEST_TITLE_TOKENS,
        ] {
            assert_eq!(registry.extensions(point).len(), 1, "{point}");
        }
    }

    #[test]
    fn unknown_point_is_an_error() {
        let registry = Registry::with_issue_links();
        assert!(registry.extensions("admin.route").is_empty());
        assert!(matches!(
            registry.first("admin.route"),
            Err(Error::UnknownExtensionPoint { name }) if name == "admin.route"
        ));
    }

    #[test]
    fn bound_plugin_links_issues() {
        let registry = Registry::with_issue_links();
        let Ok(Extension::Plugin(factory)) = registry.first(PULL_REQUEST_COMMENT_PLUGINS) else {
            panic!("comment plugin not bound");
        };
        let issues = vec![Issue::new("#5", "https://t/5")];
        let mut linker = factory(Some(&issues), LinkStyle::default()).unwrap();
        let mut root = Node::parent(NodeKind::Paragraph, vec![Node::text("see #5")]);
        assert_eq!(linker.apply(&mut root), 1);
    }

    #[test]
    fn bound_tokenizer_links_words() {
        let registry = Registry::with_issue_links();
        let Ok(Extension::Words(tokenize)) = registry.first(CHANGESET_DESCRIPTION) else {
            panic!("changeset description not bound");
        };
        let issues = vec![Issue::new("#5", "https://t/5")];
        assert!(matches!(tokenize(Some("#5"), Some(&issues)), Tokenized::Fragments(_)));
    }

    #[test]
    fn bindings_accumulate_in_order() {
        let mut registry = Registry::default();
        registry.bind("x", Extension::Words(words::tokenize_words));
        registry.bind("x", Extension::Replacements(replacements::replacements));
        let kinds: Vec<String> = registry.extensions("x").iter().map(|e| format!("{e:?}")).collect();
        assert_eq!(kinds, vec!["Words", "Replacements"]);
    }
}

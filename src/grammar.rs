//! Tree-sitter grammar selection for markdown documents.
use tree_sitter::{Language, Parser, Tree};

use crate::error::Error;

/// Markdown is parsed in two passes: the block grammar finds the document
/// structure, the inline grammar parses the content of each inline node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// Block structure: headings, paragraphs, lists, code blocks.
    Block,
    /// Inline content: emphasis, links, code spans.
    Inline,
}

impl Grammar {
    /// The tree-sitter language for this pass.
    pub fn language(self) -> Language {
        return match self {
            Grammar::Block => tree_sitter_md::LANGUAGE.into(),
            Grammar::Inline => tree_sitter_md::INLINE_LANGUAGE.into(),
        };
    }

    /// Parse `source` with this grammar.
    ///
    /// # Errors
    ///
    /// Returns `Error::ParseFailed` if the language cannot be set or parsing fails.
    pub fn parse(self, source: &str) -> Result<Tree, Error> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language())
            .map_err(|err| return Error::ParseFailed {
                reason: err.to_string(),
            })?;

        return parser.parse(source, None).ok_or_else(|| return Error::ParseFailed {
            reason: format!("tree-sitter returned no {self:?} tree"),
        });
    }
}

//! Whitespace tokenizer: links whole words that exactly match an issue name.
//!
//! Only the single character `' '` separates words. Runs of spaces produce
//! empty words and tabs or newlines stay inside words, so a word glued to a
//! newline (`"#1\n"`) is not linked.

use crate::issues;
use crate::types::{Fragment, Issue};

/// Word separator.
const SEPARATOR: char = ' ';

/// Result of [`tokenize_words`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tokenized<'t> {
    /// Ordered text and link fragments.
    Fragments(Vec<Fragment>),
    /// The input came back as-is: there was no text or no issue set.
    Unchanged(Option<&'t str>),
}

/// Split `text` on single spaces and replace every word equal to an issue
/// name with a link. Separators are emitted as `" "` text fragments between
/// words, so the fragments concatenate back to `text`.
///
/// Returns the input unchanged when `text` is absent or empty, or when no
/// issue set is given. An empty issue set still tokenizes.
pub fn tokenize_words<'t>(text: Option<&'t str>, issues: Option<&[Issue]>) -> Tokenized<'t> {
    let (Some(value), Some(issues)) = (text, issues) else {
        return Tokenized::Unchanged(text);
    };
    if value.is_empty() {
        return Tokenized::Unchanged(text);
    }

    let index = issues::index_by_name(issues);
    let mut fragments = Vec::new();

    for (position, word) in value.split(SEPARATOR).enumerate() {
        if position > 0 {
            fragments.push(Fragment::Text(SEPARATOR.to_string()));
        }
        match index.get(word) {
            Some(issue) => fragments.push(Fragment::Link(issue.link(None))),
            None => fragments.push(Fragment::text(word)),
        }
    }

    log::debug!("tokenized {} bytes into {} fragments", value.len(), fragments.len());
    return Tokenized::Fragments(fragments);
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;
    use crate::types::reconstruct;

    fn issues() -> Vec<Issue> {
        vec![Issue::new("#123", "http://foo.bar"), Issue::new("#456", "http://h2g2.com")]
    }

    fn link(name: &str, href: &str) -> Fragment {
        Fragment::Link(Issue::new(name, href).link(None))
    }

    fn fragments(result: Tokenized<'_>) -> Vec<Fragment> {
        match result {
            Tokenized::Fragments(fragments) => fragments,
            Tokenized::Unchanged(text) => panic!("expected fragments, got unchanged {text:?}"),
        }
    }

    #[test]
    fn replaces_issue_names_with_links() {
        let issues = issues();
        let text = "get #123 blabla #456 foofoo #123 #456";
        let result = fragments(tokenize_words(Some(text), Some(&issues)));

        let space = || Fragment::text(" ");
        assert_eq!(
            result,
            vec![
                Fragment::text("get"),
                space(),
                link("#123", "http://foo.bar"),
                space(),
                Fragment::text("blabla"),
                space(),
                link("#456", "http://h2g2.com"),
                space(),
                Fragment::text("foofoo"),
                space(),
                link("#123", "http://foo.bar"),
                space(),
                link("#456", "http://h2g2.com"),
            ]
        );
        assert_eq!(reconstruct(&result), text);
    }

    #[test]
    fn leading_issue_is_linked() {
        let issues = issues();
        let result = fragments(tokenize_words(Some("#123 blabla"), Some(&issues)));
        assert_eq!(
            result,
            vec![link("#123", "http://foo.bar"), Fragment::text(" "), Fragment::text("blabla")]
        );
    }

    #[test]
    fn only_whole_words_match() {
        let issues = issues();
        let result = fragments(tokenize_words(Some("(#123) #1234 #123,"), Some(&issues)));
        assert!(result.iter().all(|f| matches!(f, Fragment::Text(_))), "{result:?}");
    }

    #[test]
    fn empty_or_absent_text_is_returned_unchanged() {
        let issues = issues();
        assert_eq!(tokenize_words(Some(""), Some(&issues)), Tokenized::Unchanged(Some("")));
        assert_eq!(tokenize_words(None, Some(&issues)), Tokenized::Unchanged(None));
    }

    #[test]
    fn absent_issues_return_text_unchanged() {
        assert_eq!(tokenize_words(Some("#123"), None), Tokenized::Unchanged(Some("#123")));
    }

    #[test]
    fn empty_issue_set_still_tokenizes() {
        let result = fragments(tokenize_words(Some("a #123"), Some(&[])));
        assert_eq!(result, vec![Fragment::text("a"), Fragment::text(" "), Fragment::text("#123")]);
    }

    #[test]
    fn consecutive_spaces_yield_empty_words() {
        let issues = issues();
        let text = "#123  x ";
        let result = fragments(tokenize_words(Some(text), Some(&issues)));
        assert_eq!(
            result,
            vec![
                link("#123", "http://foo.bar"),
                Fragment::text(" "),
                Fragment::text(""),
                Fragment::text(" "),
                Fragment::text("x"),
                Fragment::text(" "),
                Fragment::text(""),
            ]
        );
        assert_eq!(reconstruct(&result), text);
    }

    #[test]
    fn newlines_are_not_separators() {
        let issues = issues();
        let result = fragments(tokenize_words(Some("#123\n#456"), Some(&issues)));
        assert_eq!(result, vec![Fragment::text("#123\n#456")]);
    }

    #[test]
    fn duplicate_names_use_the_last_issue() {
        let issues = vec![Issue::new("#1", "old"), Issue::new("#1", "new")];
        let result = fragments(tokenize_words(Some("#1"), Some(&issues)));
        assert_eq!(result, vec![link("#1", "new")]);
    }
}

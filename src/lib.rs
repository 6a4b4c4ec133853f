//! Issue-reference linking for free text and markdown documents.
//!
//! Two tokenizers turn issue names into links: [`words::tokenize_words`]
//! links whole space-separated words, [`scanner::scan_and_link`] finds every
//! occurrence anywhere in the text. [`linker::IssueLinker`] applies the
//! scanner to the text nodes of a [`doc::Node`] tree.

pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod doc;
pub mod error;
pub mod grammar;
pub mod issues;
pub mod linker;
pub mod markdown;
pub mod registry;
pub mod render;
pub mod replacements;
pub mod scanner;
pub mod types;
pub mod words;

//! CLI commands for issuelink: words, scan, markdown, replacements.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error;
use crate::issues;
use crate::markdown;
use crate::registry::{self, Extension, Registry};
use crate::render;
use crate::scanner;
use crate::types::{Fragment, Issue, LinkStyle};
use crate::words::Tokenized;

/// Output format for fragment sequences and documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// HTML anchors.
    Html,
    /// JSON fragments.
    Json,
    /// Markdown links.
    Markdown,
}

/// Where the text to process comes from.
pub struct Input {
    /// Read from this file instead of the argument or stdin.
    pub file: Option<PathBuf>,
    /// Literal text given on the command line.
    pub text: Option<String>,
}

/// Issue sources given on the command line.
pub struct IssueArgs {
    /// Repeated `NAME=HREF` flags.
    pub inline: Vec<String>,
    /// JSON issue file.
    pub path: Option<PathBuf>,
}

/// Everything a command needs besides its input.
struct Context {
    /// Project configuration.
    config: Config,
    /// Issue set, `None` when no source was given.
    issues: Option<Vec<Issue>>,
    /// Extension bindings.
    registry: Registry,
}

impl Context {
    /// Load config and issues and bind the extensions.
    ///
    /// # Errors
    ///
    /// Returns errors from config loading, issue loading or flag parsing.
    fn load(issue_args: &IssueArgs) -> Result<Self, error::Error> {
        let config = Config::load(Path::new("."))?;
        let issues = collect_issues(issue_args, &config)?;
        return Ok(Self {
            config,
            issues,
            registry: Registry::with_issue_links(),
        });
    }

    /// Issue set as a slice.
    fn issues(&self) -> Option<&[Issue]> {
        return self.issues.as_deref();
    }

    /// Link style from the config.
    fn style(&self) -> LinkStyle {
        return self.config.link_style();
    }
}

/// Gather issues from the issue file (flag or config) and inline flags.
/// Returns `None` when there is no source at all, so callers can tell
/// "no issue set" from "empty issue set".
///
/// # Errors
///
/// Returns errors from reading the issue file or parsing `--issue` flags.
fn collect_issues(args: &IssueArgs, config: &Config) -> Result<Option<Vec<Issue>>, error::Error> {
    let path = args.path.as_ref().or(config.issues.as_ref());
    if path.is_none() && args.inline.is_empty() {
        log::debug!("no issue source given");
        return Ok(None);
    }

    let mut collected = match path {
        Some(path) => issues::load(path)?,
        None => Vec::new(),
    };
    for argument in &args.inline {
        collected.push(issues::parse_argument(argument)?);
    }
    return Ok(Some(collected));
}

/// Print output, adding a final newline only when it lacks one.
fn emit(output: &str) {
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}

/// Render a fragment sequence in the requested format.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
fn format_fragments(fragments: &[Fragment], format: Format, config: &Config) -> Result<String, error::Error> {
    return match format {
        Format::Html => Ok(render::to_html(fragments, config.new_tab)),
        Format::Json => render::to_json(fragments),
        Format::Markdown => Ok(render::to_markdown(fragments)),
    };
}

/// Link issues inside a markdown document and print the result.
///
/// # Errors
///
/// Returns errors from input reading, issue loading, or markdown parsing.
pub fn markdown(input: &Input, issue_args: &IssueArgs, comment: bool, json: bool) -> Result<(), error::Error> {
    let context = Context::load(issue_args)?;
    let source = read_input(input)?;

    let point = if comment {
        registry::PULL_REQUEST_COMMENT_PLUGINS
    } else {
        registry::PULL_REQUEST_DESCRIPTION_PLUGINS
    };
    let Extension::Plugin(plugin) = context.registry.first(point)? else {
        return Err(error::Error::UnknownExtensionPoint {
            name: point.to_string(),
        });
    };

    let mut root = markdown::parse(&source)?;
    if let Some(mut linker) = plugin(context.issues(), context.style()) {
        linker.apply(&mut root);
    }

    let output = if json {
        serde_json::to_string_pretty(&root)?
    } else {
        markdown::render(&root)
    };
    emit(&output);
    return Ok(());
}

/// Read the text to process from the file, the argument, or stdin.
///
/// # Errors
///
/// Returns `Error::Io` if the file or stdin cannot be read.
fn read_input(input: &Input) -> Result<String, error::Error> {
    if let Some(path) = &input.file {
        return Ok(std::fs::read_to_string(path)?);
    }
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    return Ok(text);
}

/// Print the replacement table for a text as JSON.
///
/// # Errors
///
/// Returns errors from input reading, issue loading, or serialization.
pub fn replacements(input: &Input, issue_args: &IssueArgs, title: bool) -> Result<(), error::Error> {
    let context = Context::load(issue_args)?;
    let text = read_input(input)?;

    let point = if title {
        registry::PULL_REQUEST_TITLE_TOKENS
    } else {
        registry::CHANGESET_DESCRIPTION_TOKENS
    };
    let Extension::Replacements(build) = context.registry.first(point)? else {
        return Err(error::Error::UnknownExtensionPoint {
            name: point.to_string(),
        });
    };

    let table = build(&text, context.issues());
    emit(&serde_json::to_string_pretty(&table)?);
    return Ok(());
}

/// Link every issue occurrence in a text and print the fragments.
/// Text without occurrences is printed unchanged.
///
/// # Errors
///
/// Returns errors from input reading, issue loading, or serialization.
pub fn scan(input: &Input, issue_args: &IssueArgs, format: Format) -> Result<(), error::Error> {
    let context = Context::load(issue_args)?;
    let text = read_input(input)?;

    let fragments = context
        .issues()
        .and_then(|issues| return scanner::scan_and_link(&text, issues, &context.style()));

    let output = match (fragments, format) {
        (Some(fragments), _) => format_fragments(&fragments, format, &context.config)?,
        (None, Format::Json) if !text.is_empty() => render::to_json(&[Fragment::Text(text)])?,
        (None, Format::Json) => render::to_json(&[])?,
        (None, Format::Html) => render::to_html(&[Fragment::Text(text)], false),
        (None, Format::Markdown) => text,
    };
    emit(&output);
    return Ok(());
}

/// Link whole words that equal an issue name and print the fragments.
/// Without text or without an issue set the text is printed unchanged.
///
/// # Errors
///
/// Returns errors from input reading, issue loading, or serialization.
pub fn words(input: &Input, issue_args: &IssueArgs, format: Format) -> Result<(), error::Error> {
    let context = Context::load(issue_args)?;
    let text = read_input(input)?;

    let Extension::Words(tokenize) = context.registry.first(registry::CHANGESET_DESCRIPTION)? else {
        return Err(error::Error::UnknownExtensionPoint {
            name: registry::CHANGESET_DESCRIPTION.to_string(),
        });
    };

    let output = match tokenize(Some(text.as_str()), context.issues()) {
        Tokenized::Fragments(fragments) => format_fragments(&fragments, format, &context.config)?,
        Tokenized::Unchanged(unchanged) => {
            let unchanged = unchanged.unwrap_or_default();
            match format {
                Format::Json => serde_json::to_string(unchanged)?,
                Format::Html => render::to_html(&[Fragment::text(unchanged)], false),
                Format::Markdown => unchanged.to_string(),
            }
        },
    };
    emit(&output);
    return Ok(());
}

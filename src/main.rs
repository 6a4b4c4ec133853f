use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use issuelink::commands::{self, Format, Input, IssueArgs};
use issuelink::{diagnostics, error};

#[derive(Parser)]
#[command(name = "issuelink", about = "Turn issue references in text into links")]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Link issue occurrences inside a markdown document
    Markdown {
        /// Use the pull request comment extension point.
        #[arg(long)]
        comment: bool,
        /// Text and issue sources.
        #[command(flatten)]
        common: CommonArgs,
        /// Print the linked document tree as JSON instead of markdown.
        #[arg(long)]
        json: bool,
    },
    /// Print the replacement table for a text as JSON
    Replacements {
        /// Text and issue sources.
        #[command(flatten)]
        common: CommonArgs,
        /// Use the pull request title extension point.
        #[arg(long)]
        title: bool,
    },
    /// Link every occurrence of an issue name anywhere in the text
    Scan {
        /// Text and issue sources.
        #[command(flatten)]
        common: CommonArgs,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
    },
    /// Link space-separated words that equal an issue name
    Words {
        /// Text and issue sources.
        #[command(flatten)]
        common: CommonArgs,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
    },
}

/// Arguments shared by every subcommand.
#[derive(Args)]
struct CommonArgs {
    /// Read the text from a file.
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
    /// Add one issue as `NAME=HREF`; may be repeated.
    #[arg(long = "issue", value_name = "NAME=HREF")]
    issue: Vec<String>,
    /// JSON issue file (an array or a HAL resource).
    #[arg(long, value_name = "FILE")]
    issues: Option<PathBuf>,
    /// Text to process; read from stdin when omitted.
    text: Option<String>,
}

impl CommonArgs {
    /// Split into the input and issue sources the commands take.
    fn split(self) -> (Input, IssueArgs) {
        let input = Input {
            file: self.file,
            text: self.text,
        };
        let issue_args = IssueArgs {
            inline: self.issue,
            path: self.issues,
        };
        return (input, issue_args);
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    return match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}

/// Dispatch a parsed subcommand.
///
/// # Errors
///
/// Returns whatever error the subcommand produced.
fn run(command: Commands) -> Result<(), error::Error> {
    return match command {
        Commands::Markdown { comment, common, json } => {
            let (input, issue_args) = common.split();
            commands::markdown(&input, &issue_args, comment, json)
        },
        Commands::Replacements { common, title } => {
            let (input, issue_args) = common.split();
            commands::replacements(&input, &issue_args, title)
        },
        Commands::Scan { common, format } => {
            let (input, issue_args) = common.split();
            commands::scan(&input, &issue_args, format)
        },
        Commands::Words { common, format } => {
            let (input, issue_args) = common.split();
            commands::words(&input, &issue_args, format)
        },
    };
}

//! Crate-level error types for issuelink diagnostics.
use std::path::PathBuf;

/// Errors only come from the edges: reading issue sets, config files and
/// documents. Linking itself never fails. Each variant names the file,
/// argument, or reason for failure.
#[allow(clippy::error_impl_error, reason = "crate-level error type re-exported by the binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The config file exists but holds values that cannot be used.
    #[error("invalid config {}: {reason}", path.display())]
    ConfigInvalid {
        /// Path to the offending config file.
        path: PathBuf,
        /// Description of the invalid value.
        reason: String,
    },

    /// A `--issue` flag was not of the form `NAME=HREF`.
    #[error("invalid issue argument `{argument}`: expected NAME=HREF")]
    InvalidIssueArgument {
        /// The raw argument as given on the command line.
        argument: String,
    },

    /// The issue file named on the command line or in the config is missing.
    #[error("issue file not found: {}", path.display())]
    IssuesNotFound {
        /// Path to the missing issue file.
        path: PathBuf,
    },

    /// Underlying I/O error from the filesystem or stdin.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON (de)serialization failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// Tree-sitter failed to parse a markdown document.
    #[error("markdown parse failed: {reason}")]
    ParseFailed {
        /// Description of the parse failure.
        reason: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// Nothing is bound to the requested extension point.
    #[error("unknown extension point: `{name}`")]
    UnknownExtensionPoint {
        /// Extension point name that was looked up.
        name: String,
    },
}

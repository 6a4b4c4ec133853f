use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::{DEFAULT_TITLE_TEMPLATE, LinkStyle, NAME_PLACEHOLDER};

/// File name of the project configuration.
pub const CONFIG_FILE: &str = ".issuelink.toml";

/// Project configuration loaded from `.issuelink.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Issue file used when none is given on the command line.
    pub issues: Option<PathBuf>,
    /// Whether HTML anchors open in a new tab.
    pub new_tab: bool,
    /// Link title template; empty disables titles.
    pub title: String,
}

/// Raw TOML structure for `.issuelink.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct IssuelinkTomlConfig {
    /// Default issue file, relative to the config file.
    #[serde(default)]
    issues: Option<PathBuf>,
    /// Open HTML anchors in a new tab.
    #[serde(default = "default_new_tab")]
    new_tab: bool,
    /// Link title template.
    #[serde(default = "default_title")]
    title: String,
}

/// Serde default for `new_tab`.
const fn default_new_tab() -> bool {
    return true;
}

/// Serde default for `title`.
fn default_title() -> String {
    return DEFAULT_TITLE_TEMPLATE.to_string();
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            issues: None,
            new_tab: default_new_tab(),
            title: default_title(),
        };
    }
}

impl Config {
    /// Load config from `.issuelink.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed; never silently
    /// falls back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::TomlDe` if the TOML is malformed,
    /// or `Error::ConfigInvalid` if the title template lacks `{name}`.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no {CONFIG_FILE}, using defaults");
                return Ok(Self::default());
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let raw: IssuelinkTomlConfig = toml::from_str(&content)?;
        if !raw.title.is_empty() && !raw.title.contains(NAME_PLACEHOLDER) {
            return Err(Error::ConfigInvalid {
                path,
                reason: format!("`title` must contain {NAME_PLACEHOLDER} or be empty"),
            });
        }

        log::debug!("using config from {}", path.display());
        return Ok(Self {
            issues: raw.issues.map(|issues| return root.join(issues)),
            new_tab: raw.new_tab,
            title: raw.title,
        });
    }

    /// Link style described by this config.
    pub fn link_style(&self) -> LinkStyle {
        return LinkStyle::from_template(&self.title);
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;

    fn write_config(content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), content).unwrap();
        dir
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.link_style().title_for("#1").as_deref(), Some("Issue #1"));
    }

    #[test]
    fn reads_all_keys() {
        let dir = write_config("issues = \"issues.json\"\nnew_tab = false\ntitle = \"Ticket {name}\"\n");
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.issues, Some(dir.path().join("issues.json")));
        assert!(!config.new_tab);
        assert_eq!(config.link_style().title_for("#1").as_deref(), Some("Ticket #1"));
    }

    #[test]
    fn empty_title_disables_titles() {
        let dir = write_config("title = \"\"\n");
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.link_style(), LinkStyle::untitled());
    }

    #[test]
    fn title_without_placeholder_is_rejected() {
        let dir = write_config("title = \"Issue\"\n");
        assert!(matches!(Config::load(dir.path()), Err(Error::ConfigInvalid { .. })));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = write_config("title = \n");
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = write_config("colour = \"blue\"\n");
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }
}

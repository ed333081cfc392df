use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use depcheck_util::errors::DepcheckError;

/// Name of the optional project configuration file.
pub const CONFIG_FILE: &str = "depcheck.toml";

/// Project configuration loaded from `depcheck.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepcheckConfig {
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,

    #[serde(default = "default_selection")]
    pub selection: PathBuf,

    #[serde(default)]
    pub prompt: PromptConfig,
}

impl Default for DepcheckConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            selection: default_selection(),
            prompt: PromptConfig::default(),
        }
    }
}

/// Prompt behaviour from `[prompt]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    /// What to answer when stdin is not a terminal.
    #[serde(default, rename = "non-interactive")]
    pub non_interactive: NonInteractivePolicy,
}

/// How prompts are answered without a terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NonInteractivePolicy {
    /// Decline every confirmation and make no choice.
    #[default]
    Decline,
    /// Accept every confirmation and pick the first compatible entry.
    AcceptFirst,
}

fn default_catalog() -> PathBuf {
    PathBuf::from("catalog.toml")
}

fn default_selection() -> PathBuf {
    PathBuf::from("selection.toml")
}

impl DepcheckConfig {
    /// Load `depcheck.toml` from `dir`, or return defaults if it doesn't exist.
    ///
    /// Relative paths in the file are resolved against `dir`.
    pub fn load(dir: &Path) -> miette::Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let mut config = if path.is_file() {
            let content = std::fs::read_to_string(&path).map_err(|e| DepcheckError::Config {
                message: format!("Failed to read {}: {e}", path.display()),
            })?;
            Self::from_str(&content)?
        } else {
            Self::default()
        };
        config.catalog = dir.join(&config.catalog);
        config.selection = dir.join(&config.selection);
        Ok(config)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            DepcheckError::Config {
                message: format!("Failed to parse {CONFIG_FILE}: {e}"),
            }
            .into()
        })
    }
}

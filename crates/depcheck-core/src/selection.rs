use serde::{Deserialize, Serialize};
use std::path::Path;

use depcheck_util::errors::DepcheckError;

/// The current era, scenario and enabled modifications of a game setup.
///
/// An empty `era` or `scenario` means nothing is selected yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(default)]
    pub era: String,
    #[serde(default)]
    pub scenario: String,
    /// Enabled modifications, in activation order.
    #[serde(default)]
    pub modifications: Vec<String>,
}

impl SelectionState {
    pub fn new<S: Into<String>>(
        era: impl Into<String>,
        scenario: impl Into<String>,
        modifications: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            era: era.into(),
            scenario: scenario.into(),
            modifications: modifications.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_enabled(&self, modification: &str) -> bool {
        self.modifications.iter().any(|m| m == modification)
    }

    /// Load a saved selection from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DepcheckError::Selection {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse a selection from a TOML string.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            DepcheckError::Selection {
                message: format!("Failed to parse selection: {e}"),
            }
            .into()
        })
    }

    /// Serialize the selection to a pretty-printed TOML string.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Write the selection to `path`, replacing any previous content.
    pub fn write_to(&self, path: &Path) -> miette::Result<()> {
        let content = self.to_string_pretty().map_err(|e| DepcheckError::Selection {
            message: format!("Failed to serialize selection: {e}"),
        })?;
        std::fs::write(path, content).map_err(DepcheckError::Io)?;
        Ok(())
    }
}

//! Declarative catalog source: the TOML document the catalog is built from.
//!
//! ```toml
//! [[era]]
//! id = "Default"
//! name = "Default Era"
//! disallow_scenario = "2p_Caves"
//! force_modification = "plan_unit_advance"
//!
//! [[scenario]]
//! id = "2p_Caves"
//! allow_modification = ["plan_unit_advance", "fog_of_war"]
//!
//! [[modification]]
//! id = "plan_unit_advance"
//! ignore_incompatible_era = "Default"
//! ```
//!
//! Id lists are either comma-separated strings or arrays of strings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use depcheck_util::errors::DepcheckError;

use crate::catalog::Catalog;
use crate::component::{ComponentRecord, ComponentType, Restriction};

/// The parsed representation of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSource {
    #[serde(default)]
    pub era: Vec<SourceRecord>,

    #[serde(default, alias = "multiplayer")]
    pub scenario: Vec<SourceRecord>,

    #[serde(default)]
    pub modification: Vec<SourceRecord>,
}

/// A list of component ids, either `"a, b"` or `["a", "b"]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdList {
    Csv(String),
    List(Vec<String>),
}

impl IdList {
    /// The ids in declaration order, trimmed, with empty entries removed.
    pub fn ids(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            IdList::Csv(s) => s.split(',').collect(),
            IdList::List(v) => v.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn id_set(&self) -> BTreeSet<String> {
        self.ids().into_iter().collect()
    }
}

/// A single `[[era]]`, `[[scenario]]` or `[[modification]]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub allow_era: Option<IdList>,
    #[serde(default)]
    pub disallow_era: Option<IdList>,
    #[serde(default)]
    pub ignore_incompatible_era: Option<IdList>,

    #[serde(default)]
    pub allow_scenario: Option<IdList>,
    #[serde(default)]
    pub disallow_scenario: Option<IdList>,
    #[serde(default)]
    pub ignore_incompatible_scenario: Option<IdList>,

    #[serde(default)]
    pub allow_modification: Option<IdList>,
    #[serde(default)]
    pub disallow_modification: Option<IdList>,
    #[serde(default)]
    pub ignore_incompatible_modification: Option<IdList>,

    #[serde(default)]
    pub force_modification: Option<IdList>,
}

impl SourceRecord {
    fn allow(&self, kind: ComponentType) -> Option<&IdList> {
        match kind {
            ComponentType::Era => self.allow_era.as_ref(),
            ComponentType::Scenario => self.allow_scenario.as_ref(),
            ComponentType::Modification => self.allow_modification.as_ref(),
        }
    }

    fn disallow(&self, kind: ComponentType) -> Option<&IdList> {
        match kind {
            ComponentType::Era => self.disallow_era.as_ref(),
            ComponentType::Scenario => self.disallow_scenario.as_ref(),
            ComponentType::Modification => self.disallow_modification.as_ref(),
        }
    }

    fn ignore_incompatible(&self, kind: ComponentType) -> Option<&IdList> {
        match kind {
            ComponentType::Era => self.ignore_incompatible_era.as_ref(),
            ComponentType::Scenario => self.ignore_incompatible_scenario.as_ref(),
            ComponentType::Modification => self.ignore_incompatible_modification.as_ref(),
        }
    }

    /// Convert into a catalog record of type `kind`.
    ///
    /// Only the keys meaningful for `kind` are copied: eras describe scenarios
    /// and modifications, scenarios describe eras and modifications, and
    /// modifications describe all three types but never force anything.
    pub fn into_record(self, kind: ComponentType) -> ComponentRecord {
        let name = match &self.name {
            Some(n) if !n.trim().is_empty() => n.clone(),
            _ => self.id.clone(),
        };
        let mut record = ComponentRecord::new(kind, self.id.clone(), name);

        for other in described_types(kind) {
            let restriction = match (self.allow(*other), self.disallow(*other)) {
                (Some(allow), Some(_)) => {
                    tracing::warn!(
                        "{kind} '{}' has both allow_{other} and disallow_{other}; using allow_{other}",
                        self.id
                    );
                    Restriction::Allow(allow.id_set())
                }
                (Some(allow), None) => Restriction::Allow(allow.id_set()),
                (None, Some(disallow)) => Restriction::Disallow(disallow.id_set()),
                (None, None) => Restriction::Unrestricted,
            };
            if restriction != Restriction::Unrestricted {
                record.restrictions.insert(*other, restriction);
            }

            if let Some(ignored) = self.ignore_incompatible(*other) {
                record.ignore_incompatible.insert(*other, ignored.id_set());
            }
        }

        let skipped = ComponentType::ALL
            .iter()
            .filter(|t| !described_types(kind).contains(*t))
            .filter(|t| {
                self.allow(**t).is_some()
                    || self.disallow(**t).is_some()
                    || self.ignore_incompatible(**t).is_some()
            });
        for t in skipped {
            tracing::warn!("{kind} '{}': {t} restrictions are ignored", self.id);
        }

        if let Some(forced) = &self.force_modification {
            if kind == ComponentType::Modification {
                tracing::warn!(
                    "modification '{}': force_modification is ignored for modifications",
                    self.id
                );
            } else {
                record = record.with_forced(forced.ids());
            }
        }

        record
    }
}

fn described_types(kind: ComponentType) -> &'static [ComponentType] {
    match kind {
        ComponentType::Era => &[ComponentType::Scenario, ComponentType::Modification],
        ComponentType::Scenario => &[ComponentType::Era, ComponentType::Modification],
        ComponentType::Modification => &ComponentType::ALL,
    }
}

impl CatalogSource {
    /// Load and parse a catalog file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DepcheckError::Catalog {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse a catalog from a TOML string.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            DepcheckError::Catalog {
                message: format!("Failed to parse catalog: {e}"),
            }
            .into()
        })
    }

    /// Build the immutable [`Catalog`]. Eras come first, then scenarios, then
    /// modifications, each in declaration order.
    pub fn into_catalog(self) -> miette::Result<Catalog> {
        let records = self
            .era
            .into_iter()
            .map(|r| r.into_record(ComponentType::Era))
            .chain(
                self.scenario
                    .into_iter()
                    .map(|r| r.into_record(ComponentType::Scenario)),
            )
            .chain(
                self.modification
                    .into_iter()
                    .map(|r| r.into_record(ComponentType::Modification)),
            );
        Ok(Catalog::from_records(records)?)
    }
}

/// Read a catalog file and build the catalog in one step.
pub fn load_catalog(path: &Path) -> miette::Result<Catalog> {
    CatalogSource::from_path(path)?.into_catalog()
}

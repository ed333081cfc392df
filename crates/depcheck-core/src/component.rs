use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The three kinds of selectable components in a game setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Era,
    Scenario,
    Modification,
}

impl ComponentType {
    pub const ALL: [ComponentType; 3] = [
        ComponentType::Era,
        ComponentType::Scenario,
        ComponentType::Modification,
    ];

    /// The lowercase key used in catalog sources (`allow_<type>` and friends).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Era => "era",
            Self::Scenario => "scenario",
            Self::Modification => "modification",
        }
    }

    /// Parse a type name. Accepts the short `mod` and the legacy `multiplayer`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "era" => Some(Self::Era),
            "scenario" | "multiplayer" => Some(Self::Scenario),
            "modification" | "mod" => Some(Self::Modification),
            _ => None,
        }
    }

    /// Dense slot number, used to index per-type tables.
    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Era => 0,
            Self::Scenario => 1,
            Self::Modification => 2,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a record says about the components of one other type.
///
/// A whitelist and a blacklist for the same type are mutually exclusive,
/// which is why this is a single tagged value rather than two optional lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Restriction {
    #[default]
    Unrestricted,
    Allow(BTreeSet<String>),
    Disallow(BTreeSet<String>),
}

static UNRESTRICTED: Restriction = Restriction::Unrestricted;

/// A lightweight `(type, id)` reference to a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentRef {
    pub kind: ComponentType,
    pub id: String,
}

impl ComponentRef {
    pub fn new(kind: ComponentType, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn era(id: impl Into<String>) -> Self {
        Self::new(ComponentType::Era, id)
    }

    pub fn scenario(id: impl Into<String>) -> Self {
        Self::new(ComponentType::Scenario, id)
    }

    pub fn modification(id: impl Into<String>) -> Self {
        Self::new(ComponentType::Modification, id)
    }

    /// Parse `"type:id"`, e.g. `"era:Default"` or `"mod:plan_unit_advance"`.
    pub fn parse(s: &str) -> Option<Self> {
        let (kind, id) = s.split_once(':')?;
        let kind = ComponentType::parse(kind)?;
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        Some(Self::new(kind, id))
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Compatibility rules for a single era, scenario or modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRecord {
    pub kind: ComponentType,
    pub id: String,
    pub name: String,
    pub restrictions: BTreeMap<ComponentType, Restriction>,
    pub ignore_incompatible: BTreeMap<ComponentType, BTreeSet<String>>,
    /// Modifications this component requires. Always empty for modifications.
    pub forced_modifications: Vec<String>,
}

impl ComponentRecord {
    pub fn new(kind: ComponentType, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
            restrictions: BTreeMap::new(),
            ignore_incompatible: BTreeMap::new(),
            forced_modifications: Vec::new(),
        }
    }

    /// Whitelist `ids` of type `kind`, replacing any earlier restriction for it.
    pub fn with_allow<I, S>(mut self, kind: ComponentType, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = ids.into_iter().map(Into::into).collect();
        self.restrictions.insert(kind, Restriction::Allow(set));
        self
    }

    /// Blacklist `ids` of type `kind`, replacing any earlier restriction for it.
    pub fn with_disallow<I, S>(mut self, kind: ComponentType, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = ids.into_iter().map(Into::into).collect();
        self.restrictions.insert(kind, Restriction::Disallow(set));
        self
    }

    pub fn with_ignored<I, S>(mut self, kind: ComponentType, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_incompatible
            .entry(kind)
            .or_default()
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Force-enable modifications. Ignored for modification records.
    pub fn with_forced<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.kind == ComponentType::Modification {
            return self;
        }
        for id in ids {
            let id = id.into();
            if !self.forced_modifications.contains(&id) {
                self.forced_modifications.push(id);
            }
        }
        self
    }

    pub fn component_ref(&self) -> ComponentRef {
        ComponentRef::new(self.kind, self.id.clone())
    }

    /// The restriction this record places on components of type `kind`.
    pub fn restriction(&self, kind: ComponentType) -> &Restriction {
        self.restrictions.get(&kind).unwrap_or(&UNRESTRICTED)
    }

    /// Whether this record exempts `other` from every compatibility check.
    pub fn ignores(&self, other: &ComponentRef) -> bool {
        self.ignore_incompatible
            .get(&other.kind)
            .is_some_and(|ids| ids.contains(&other.id))
    }
}

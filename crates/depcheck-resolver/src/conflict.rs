//! Conflict detection between components and reporting of dropped modifications.

use std::fmt;

use depcheck_core::catalog::Catalog;
use depcheck_core::component::{ComponentRecord, ComponentRef, ComponentType, Restriction};

/// Whether `a` and `b` cannot be active at the same time.
///
/// Besides the rules the two records state about each other, this also
/// checks the modifications each of them forces: a component is only as
/// compatible as its forced modifications are. The result is symmetric in
/// `a` and `b`, and always false for identical or unknown components.
pub fn conflicts(catalog: &Catalog, a: &ComponentRef, b: &ComponentRef) -> bool {
    match (catalog.get(a), catalog.get(b)) {
        (Some(ra), Some(rb)) => records_conflict(catalog, ra, rb, false),
        _ => false,
    }
}

/// Like [`conflicts`], but only looks at the rules of `a` and `b` themselves.
pub fn conflicts_directly(catalog: &Catalog, a: &ComponentRef, b: &ComponentRef) -> bool {
    match (catalog.get(a), catalog.get(b)) {
        (Some(ra), Some(rb)) => records_conflict(catalog, ra, rb, true),
        _ => false,
    }
}

fn records_conflict(
    catalog: &Catalog,
    a: &ComponentRecord,
    b: &ComponentRecord,
    direct_only: bool,
) -> bool {
    if a.kind == b.kind && a.id == b.id {
        return false;
    }

    // An exemption from either side overrides every other rule.
    if exempts(a, b) || exempts(b, a) {
        return false;
    }

    if denies(a, b) || denies(b, a) {
        return true;
    }

    if direct_only {
        return false;
    }

    forced_records(catalog, a).any(|m| records_conflict(catalog, b, m, true))
        || forced_records(catalog, b).any(|m| records_conflict(catalog, a, m, true))
        || forced_records(catalog, a)
            .any(|m1| forced_records(catalog, b).any(|m2| records_conflict(catalog, m1, m2, true)))
}

fn exempts(record: &ComponentRecord, other: &ComponentRecord) -> bool {
    record
        .ignore_incompatible
        .get(&other.kind)
        .is_some_and(|ids| ids.contains(&other.id))
}

/// Whether `record`'s own rules rule out `other`.
fn denies(record: &ComponentRecord, other: &ComponentRecord) -> bool {
    match record.restriction(other.kind) {
        Restriction::Unrestricted => false,
        Restriction::Allow(ids) => !ids.contains(&other.id) && !forces(record, other),
        Restriction::Disallow(ids) => ids.contains(&other.id),
    }
}

pub(crate) fn forces(record: &ComponentRecord, other: &ComponentRecord) -> bool {
    other.kind == ComponentType::Modification
        && record.kind != ComponentType::Modification
        && record.forced_modifications.contains(&other.id)
}

/// Installed modification records forced by `record`. Missing ones are skipped.
fn forced_records<'a>(
    catalog: &'a Catalog,
    record: &'a ComponentRecord,
) -> impl Iterator<Item = &'a ComponentRecord> + 'a {
    let forced = if record.kind == ComponentType::Modification {
        &record.forced_modifications[..0]
    } else {
        &record.forced_modifications[..]
    };
    forced
        .iter()
        .filter_map(move |id| catalog.lookup(ComponentType::Modification, id))
}

/// Greedily keep modifications that conflict with none kept before them.
///
/// The result depends on input order and is not necessarily the largest
/// compatible subset. Repeated ids are kept once.
pub fn filter_compatible<S: AsRef<str>>(
    catalog: &Catalog,
    ids: &[S],
) -> (Vec<String>, IncompatibilityReport) {
    let mut accepted: Vec<String> = Vec::new();
    let mut report = IncompatibilityReport::new();

    for id in ids {
        let id = id.as_ref();
        if accepted.iter().any(|a| a == id) {
            continue;
        }
        let candidate = ComponentRef::modification(id);
        let clash = accepted
            .iter()
            .find(|a| conflicts(catalog, &candidate, &ComponentRef::modification(a.as_str())));
        match clash {
            Some(kept) => report.add(Incompatibility {
                dropped: id.to_string(),
                conflicts_with: kept.clone(),
            }),
            None => accepted.push(id.to_string()),
        }
    }

    (accepted, report)
}

/// A report of all modifications dropped while enabling a set of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncompatibilityReport {
    pub incompatibilities: Vec<Incompatibility>,
}

/// A modification that was dropped because an earlier one was kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incompatibility {
    pub dropped: String,
    pub conflicts_with: String,
}

impl IncompatibilityReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, incompatibility: Incompatibility) {
        self.incompatibilities.push(incompatibility);
    }

    pub fn is_empty(&self) -> bool {
        self.incompatibilities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.incompatibilities.len()
    }

    /// Ids of the dropped modifications, in input order.
    pub fn dropped(&self) -> Vec<&str> {
        self.incompatibilities
            .iter()
            .map(|i| i.dropped.as_str())
            .collect()
    }
}

impl fmt::Display for IncompatibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.incompatibilities.is_empty() {
            return write!(f, "No incompatible modifications.");
        }
        writeln!(f, "Incompatible modifications ({}):", self.incompatibilities.len())?;
        for i in &self.incompatibilities {
            writeln!(f, "  {i}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Incompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} conflicts with {}", self.dropped, self.conflicts_with)
    }
}

//! The compatibility catalog: every known era, scenario and modification.
//!
//! Records live in a single arena. Each type keeps its own catalog order as a
//! list of arena slots, and an id index per type makes `(type, id)` lookups
//! O(1) on the conflict-check path. Records are never mutated once inserted.

use std::collections::HashMap;

use depcheck_util::errors::DepcheckError;

use crate::component::{ComponentRecord, ComponentRef, ComponentType};

/// Stable arena slot of a record inside a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(usize);

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ComponentRecord>,
    order: [Vec<RecordId>; 3],
    index: [HashMap<String, RecordId>; 3],
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records, keeping their relative order per type.
    pub fn from_records<I>(records: I) -> Result<Self, DepcheckError>
    where
        I: IntoIterator<Item = ComponentRecord>,
    {
        let mut catalog = Self::new();
        for record in records {
            catalog.push(record)?;
        }
        tracing::debug!(
            eras = catalog.len(ComponentType::Era),
            scenarios = catalog.len(ComponentType::Scenario),
            modifications = catalog.len(ComponentType::Modification),
            "built catalog"
        );
        Ok(catalog)
    }

    /// Append a record at the end of its type's order.
    pub fn push(&mut self, record: ComponentRecord) -> Result<RecordId, DepcheckError> {
        let kind = record.kind;
        let position = self.order[kind.slot()].len();
        self.insert_at(record, position)
    }

    /// Insert `record` at `index` within the order of `kind`.
    ///
    /// Indices past the end append. The record's own kind must match `kind`,
    /// and its id must not already be present.
    pub fn insert_element(
        &mut self,
        kind: ComponentType,
        record: ComponentRecord,
        index: usize,
    ) -> Result<RecordId, DepcheckError> {
        if record.kind != kind {
            return Err(DepcheckError::Catalog {
                message: format!(
                    "cannot insert {} '{}' into the {kind} list",
                    record.kind, record.id
                ),
            });
        }
        self.insert_at(record, index)
    }

    fn insert_at(&mut self, record: ComponentRecord, index: usize) -> Result<RecordId, DepcheckError> {
        let slot = record.kind.slot();
        if self.index[slot].contains_key(&record.id) {
            return Err(DepcheckError::Catalog {
                message: format!("duplicate {} id '{}'", record.kind, record.id),
            });
        }

        let rid = RecordId(self.records.len());
        let order = &mut self.order[slot];
        order.insert(index.min(order.len()), rid);
        self.index[slot].insert(record.id.clone(), rid);
        self.records.push(record);
        Ok(rid)
    }

    pub fn lookup(&self, kind: ComponentType, id: &str) -> Option<&ComponentRecord> {
        self.index[kind.slot()]
            .get(id)
            .map(|rid| &self.records[rid.0])
    }

    pub fn get(&self, component: &ComponentRef) -> Option<&ComponentRecord> {
        self.lookup(component.kind, &component.id)
    }

    pub fn record(&self, rid: RecordId) -> &ComponentRecord {
        &self.records[rid.0]
    }

    pub fn contains(&self, component: &ComponentRef) -> bool {
        self.index[component.kind.slot()].contains_key(&component.id)
    }

    /// Records of `kind` in catalog order.
    pub fn records(&self, kind: ComponentType) -> impl Iterator<Item = &ComponentRecord> + '_ {
        self.order[kind.slot()]
            .iter()
            .map(move |rid| &self.records[rid.0])
    }

    /// Ids of `kind` in catalog order.
    pub fn ids(&self, kind: ComponentType) -> impl Iterator<Item = &str> + '_ {
        self.records(kind).map(|r| r.id.as_str())
    }

    /// Id at catalog position `index` within `kind`.
    pub fn id_at(&self, kind: ComponentType, index: usize) -> Option<&str> {
        self.order[kind.slot()]
            .get(index)
            .map(|rid| self.records[rid.0].id.as_str())
    }

    /// Catalog position of `id` within `kind`.
    pub fn position(&self, kind: ComponentType, id: &str) -> Option<usize> {
        let rid = self.index[kind.slot()].get(id)?;
        self.order[kind.slot()].iter().position(|r| r == rid)
    }

    /// Display name for a component, falling back to its id.
    pub fn name<'a>(&'a self, kind: ComponentType, id: &'a str) -> &'a str {
        self.lookup(kind, id).map_or(id, |r| r.name.as_str())
    }

    pub fn names<S: AsRef<str>>(&self, kind: ComponentType, ids: &[S]) -> Vec<String> {
        ids.iter()
            .map(|id| self.name(kind, id.as_ref()).to_string())
            .collect()
    }

    pub fn len(&self, kind: ComponentType) -> usize {
        self.order[kind.slot()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn era(id: &str) -> ComponentRecord {
        ComponentRecord::new(ComponentType::Era, id, format!("{id} name"))
    }

    #[test]
    fn lookup_by_type_and_id() {
        let catalog = Catalog::from_records([
            era("E1"),
            ComponentRecord::new(ComponentType::Scenario, "E1", "Same id, other type"),
        ])
        .unwrap();
        assert_eq!(catalog.lookup(ComponentType::Era, "E1").unwrap().name, "E1 name");
        assert_eq!(
            catalog.lookup(ComponentType::Scenario, "E1").unwrap().name,
            "Same id, other type"
        );
        assert!(catalog.lookup(ComponentType::Modification, "E1").is_none());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = Catalog::from_records([era("E1"), era("E1")]).unwrap_err();
        assert!(err.to_string().contains("duplicate era id 'E1'"));
    }

    #[test]
    fn insert_element_keeps_order() {
        let mut catalog = Catalog::from_records([era("E1"), era("E3")]).unwrap();
        catalog.insert_element(ComponentType::Era, era("E2"), 1).unwrap();
        catalog.insert_element(ComponentType::Era, era("E9"), 100).unwrap();
        let ids: Vec<_> = catalog.ids(ComponentType::Era).collect();
        assert_eq!(ids, vec!["E1", "E2", "E3", "E9"]);
        assert_eq!(catalog.position(ComponentType::Era, "E3"), Some(2));
        assert_eq!(catalog.id_at(ComponentType::Era, 1), Some("E2"));
    }

    #[test]
    fn insert_element_rejects_kind_mismatch() {
        let mut catalog = Catalog::new();
        let err = catalog
            .insert_element(ComponentType::Scenario, era("E1"), 0)
            .unwrap_err();
        assert!(matches!(err, DepcheckError::Catalog { .. }));
        assert!(catalog.is_empty());
    }

    #[test]
    fn name_falls_back_to_id() {
        let catalog = Catalog::from_records([era("E1")]).unwrap();
        assert_eq!(catalog.name(ComponentType::Era, "E1"), "E1 name");
        assert_eq!(catalog.name(ComponentType::Era, "E2"), "E2");
    }
}

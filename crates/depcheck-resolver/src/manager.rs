//! The dependency manager: owns the catalog and the current selection, and
//! keeps the selection consistent across era, scenario and modification
//! changes.
//!
//! Each `change_*` operation mutates the selection eagerly and may prompt the
//! user through an [`InteractiveResolver`]. The matching `try_*` wrapper takes
//! a snapshot first and restores it wholesale when the change fails, so a
//! failed change is never observable.
//!
//! Changing the era may force a new scenario and vice versa. This recursion is
//! bounded: the replacement is picked from components compatible with the
//! component that triggered it, so the nested change never needs to bounce
//! back a second time.

use depcheck_core::catalog::{Catalog, RecordId};
use depcheck_core::component::{ComponentRecord, ComponentRef, ComponentType};
use depcheck_core::selection::SelectionState;
use depcheck_util::errors::DepcheckError;

use crate::conflict::{self, IncompatibilityReport};
use crate::prompt::InteractiveResolver;
use crate::requirements;

/// Nested era/scenario changes allowed within one top-level change.
const MAX_CHANGE_DEPTH: usize = 2;

const INCOMPATIBLE_MODIFICATIONS: &str =
    "Not all of the chosen modifications are compatible. Some of them will be disabled.";

type ChangeResult = Result<(), DepcheckError>;

#[derive(Debug, Clone)]
pub struct DependencyManager {
    catalog: Catalog,
    selection: SelectionState,
    snapshot: Option<SelectionState>,
    incompatibilities: IncompatibilityReport,
    depth: usize,
}

impl DependencyManager {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_selection(catalog, SelectionState::default())
    }

    /// Start from an already validated selection, e.g. a saved game setup.
    pub fn with_selection(catalog: Catalog, selection: SelectionState) -> Self {
        Self {
            catalog,
            selection,
            snapshot: None,
            incompatibilities: IncompatibilityReport::new(),
            depth: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn into_selection(self) -> SelectionState {
        self.selection
    }

    pub fn era(&self) -> &str {
        &self.selection.era
    }

    pub fn scenario(&self) -> &str {
        &self.selection.scenario
    }

    pub fn modifications(&self) -> &[String] {
        &self.selection.modifications
    }

    /// Modifications dropped by the most recent modification change.
    pub fn last_incompatibilities(&self) -> &IncompatibilityReport {
        &self.incompatibilities
    }

    /// Catalog position of the current era.
    pub fn era_index(&self) -> Option<usize> {
        self.catalog.position(ComponentType::Era, &self.selection.era)
    }

    /// Catalog position of the current scenario.
    pub fn scenario_index(&self) -> Option<usize> {
        self.catalog
            .position(ComponentType::Scenario, &self.selection.scenario)
    }

    /// Add a record to the catalog between resolutions.
    pub fn insert_element(
        &mut self,
        kind: ComponentType,
        record: ComponentRecord,
        index: usize,
    ) -> Result<RecordId, DepcheckError> {
        self.catalog.insert_element(kind, record, index)
    }

    pub fn conflicts(&self, a: &ComponentRef, b: &ComponentRef) -> bool {
        conflict::conflicts(&self.catalog, a, b)
    }

    pub fn required(&self, component: &ComponentRef) -> Vec<String> {
        requirements::required(&self.catalog, component)
    }

    pub fn required_not_installed(&self, component: &ComponentRef) -> Vec<String> {
        requirements::required_not_installed(&self.catalog, component)
    }

    pub fn required_not_enabled(&self, component: &ComponentRef) -> Vec<String> {
        requirements::required_not_enabled(&self.catalog, &self.selection, component)
    }

    pub fn conflicting_enabled(&self, component: &ComponentRef) -> Vec<String> {
        requirements::conflicting_enabled(&self.catalog, &self.selection, component)
    }

    pub fn requires(&self, a: &ComponentRef, b: &ComponentRef) -> bool {
        requirements::requires(&self.catalog, a, b)
    }

    /// Select era `id`, rolling back every change if resolution fails.
    ///
    /// With `force` the era is assigned as-is, without validation or prompts.
    pub fn try_era(
        &mut self,
        id: &str,
        force: bool,
        ui: &mut dyn InteractiveResolver,
    ) -> ChangeResult {
        if force {
            tracing::debug!(id, "forcing era");
            self.selection.era = id.to_string();
            return Ok(());
        }
        self.transaction(ui, |m, ui| m.change_era(id, ui))
    }

    /// Select scenario `id`, rolling back every change if resolution fails.
    pub fn try_scenario(
        &mut self,
        id: &str,
        force: bool,
        ui: &mut dyn InteractiveResolver,
    ) -> ChangeResult {
        if force {
            tracing::debug!(id, "forcing scenario");
            self.selection.scenario = id.to_string();
            return Ok(());
        }
        self.transaction(ui, |m, ui| m.change_scenario(id, ui))
    }

    /// Enable exactly `ids`, rolling back every change if resolution fails.
    pub fn try_modifications<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        force: bool,
        ui: &mut dyn InteractiveResolver,
    ) -> ChangeResult {
        if force {
            tracing::debug!(count = ids.len(), "forcing modifications");
            self.selection.modifications = ids.iter().map(|s| s.as_ref().to_string()).collect();
            return Ok(());
        }
        self.transaction(ui, |m, ui| m.change_modifications(ids, ui))
    }

    pub fn try_era_by_index(
        &mut self,
        index: usize,
        force: bool,
        ui: &mut dyn InteractiveResolver,
    ) -> ChangeResult {
        let id = self.id_at(ComponentType::Era, index)?;
        self.try_era(&id, force, ui)
    }

    pub fn try_scenario_by_index(
        &mut self,
        index: usize,
        force: bool,
        ui: &mut dyn InteractiveResolver,
    ) -> ChangeResult {
        let id = self.id_at(ComponentType::Scenario, index)?;
        self.try_scenario(&id, force, ui)
    }

    fn id_at(&self, kind: ComponentType, index: usize) -> Result<String, DepcheckError> {
        self.catalog
            .id_at(kind, index)
            .map(str::to_string)
            .ok_or_else(|| DepcheckError::UnknownComponent {
                kind: kind.to_string(),
                id: format!("#{index}"),
            })
    }

    fn transaction<F>(&mut self, ui: &mut dyn InteractiveResolver, change: F) -> ChangeResult
    where
        F: FnOnce(&mut Self, &mut dyn InteractiveResolver) -> ChangeResult,
    {
        debug_assert!(self.snapshot.is_none(), "nested transactions are not supported");
        tracing::debug!("saving current state");
        self.snapshot = Some(self.selection.clone());

        let result = change(self, ui);

        if let Some(previous) = self.snapshot.take() {
            if let Err(e) = &result {
                tracing::debug!(error = %e, "restoring previous state");
                self.selection = previous;
            }
        }
        result
    }

    /// Make `id` the current era and reconcile modifications and scenario.
    ///
    /// Does not roll back on failure; see [`Self::try_era`].
    pub fn change_era(&mut self, id: &str, ui: &mut dyn InteractiveResolver) -> ChangeResult {
        self.change_component(ComponentType::Era, id, ui)
    }

    /// Make `id` the current scenario and reconcile modifications and era.
    ///
    /// Does not roll back on failure; see [`Self::try_scenario`].
    pub fn change_scenario(&mut self, id: &str, ui: &mut dyn InteractiveResolver) -> ChangeResult {
        self.change_component(ComponentType::Scenario, id, ui)
    }

    fn change_component(
        &mut self,
        kind: ComponentType,
        id: &str,
        ui: &mut dyn InteractiveResolver,
    ) -> ChangeResult {
        let target = ComponentRef::new(kind, id);
        if !self.catalog.contains(&target) {
            return Err(DepcheckError::UnknownComponent {
                kind: kind.to_string(),
                id: id.to_string(),
            });
        }

        let missing = self.required_not_installed(&target);
        if !missing.is_empty() {
            ui.notify_failure(&format!(
                "{} can't be activated. Some dependencies are missing: {}",
                title(kind),
                missing.join(", ")
            ));
            return Err(DepcheckError::MissingDependencies {
                kind: kind.to_string(),
                id: id.to_string(),
                missing,
            });
        }

        self.depth += 1;
        let result = self.activate(target, ui);
        self.depth -= 1;
        result
    }

    fn activate(&mut self, target: ComponentRef, ui: &mut dyn InteractiveResolver) -> ChangeResult {
        debug_assert!(
            self.depth <= MAX_CHANGE_DEPTH,
            "era/scenario reconciliation recursed {} levels deep",
            self.depth
        );
        tracing::debug!(component = %target, depth = self.depth, "activating");

        self.set_current(target.kind, target.id.clone());

        let required = self.required_not_enabled(&target);
        let conflicting = self.conflicting_enabled(&target);

        if !required.is_empty() {
            let names = self.catalog.names(ComponentType::Modification, &required);
            if !ui.confirm_enable(&names) {
                return Err(DepcheckError::Declined);
            }
        }

        if !conflicting.is_empty() {
            let names = self.catalog.names(ComponentType::Modification, &conflicting);
            if !ui.confirm_disable(&names) {
                return Err(DepcheckError::Declined);
            }
        }

        let retained: Vec<String> = self
            .selection
            .modifications
            .iter()
            .filter(|m| !conflicting.contains(m))
            .cloned()
            .collect();
        let mut modifications = required;
        modifications.extend(retained);
        self.selection.modifications = modifications;

        let other = counterpart(target.kind);
        let current = ComponentRef::new(other, self.current(other));
        if !self.conflicts(&target, &current) {
            return Ok(());
        }

        tracing::debug!(component = %target, conflicting = %current, "reconciling");
        let compatible: Vec<String> = self
            .catalog
            .ids(other)
            .filter(|id| !self.conflicts(&target, &ComponentRef::new(other, *id)))
            .map(str::to_string)
            .collect();
        let chosen = self.choose(other, &compatible, ui)?;
        self.change_component(other, &chosen, ui)
    }

    /// Enable exactly the compatible part of `ids`, then re-validate the era
    /// and the scenario against the result.
    ///
    /// Conflicting entries are dropped greedily in input order and reported
    /// once; this alone does not fail the change.
    pub fn change_modifications<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        ui: &mut dyn InteractiveResolver,
    ) -> ChangeResult {
        let (accepted, report) = conflict::filter_compatible(&self.catalog, ids);
        if !report.is_empty() {
            tracing::debug!(dropped = ?report.dropped(), "dropping incompatible modifications");
            ui.notify_failure(INCOMPATIBLE_MODIFICATIONS);
        }
        self.incompatibilities = report;
        self.selection.modifications = accepted;

        self.revalidate(ComponentType::Era, ui)?;
        self.revalidate(ComponentType::Scenario, ui)
    }

    /// Re-run the change for the current `kind`, or ask for a replacement if
    /// it conflicts with an enabled modification.
    fn revalidate(&mut self, kind: ComponentType, ui: &mut dyn InteractiveResolver) -> ChangeResult {
        let compatible: Vec<String> = self
            .catalog
            .ids(kind)
            .filter(|id| {
                let candidate = ComponentRef::new(kind, *id);
                self.selection
                    .modifications
                    .iter()
                    .all(|m| !self.conflicts(&candidate, &ComponentRef::modification(m.as_str())))
            })
            .map(str::to_string)
            .collect();

        let current = self.current(kind).to_string();
        if compatible.contains(&current) {
            return self.change_component(kind, &current, ui);
        }

        let chosen = self.choose(kind, &compatible, ui)?;
        self.change_component(kind, &chosen, ui)
    }

    /// Ask the user to pick one of `ids`. An empty list fails without asking.
    fn choose(
        &self,
        kind: ComponentType,
        ids: &[String],
        ui: &mut dyn InteractiveResolver,
    ) -> Result<String, DepcheckError> {
        if ids.is_empty() {
            ui.notify_failure(&format!("No compatible {kind}s found."));
            return Err(DepcheckError::NoCompatible {
                kind: kind.to_string(),
            });
        }

        let names = self.catalog.names(kind, ids);
        match ui.choose_one(kind, &names) {
            Some(index) if index < ids.len() => Ok(ids[index].clone()),
            Some(index) => {
                tracing::warn!(index, "choice out of range, treating as no choice");
                Err(DepcheckError::Declined)
            }
            None => Err(DepcheckError::Declined),
        }
    }

    fn current(&self, kind: ComponentType) -> &str {
        match kind {
            ComponentType::Era => &self.selection.era,
            ComponentType::Scenario => &self.selection.scenario,
            ComponentType::Modification => "",
        }
    }

    fn set_current(&mut self, kind: ComponentType, id: String) {
        match kind {
            ComponentType::Era => self.selection.era = id,
            ComponentType::Scenario => self.selection.scenario = id,
            ComponentType::Modification => {}
        }
    }
}

fn counterpart(kind: ComponentType) -> ComponentType {
    match kind {
        ComponentType::Era => ComponentType::Scenario,
        _ => ComponentType::Era,
    }
}

fn title(kind: ComponentType) -> &'static str {
    match kind {
        ComponentType::Era => "Era",
        ComponentType::Scenario => "Scenario",
        ComponentType::Modification => "Modification",
    }
}

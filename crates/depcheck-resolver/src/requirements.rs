//! Forced-modification lookups for eras and scenarios.
//!
//! Only eras and scenarios can force modifications, and forcing is a single
//! level deep: a forced modification never pulls in further modifications.

use depcheck_core::catalog::Catalog;
use depcheck_core::component::{ComponentRef, ComponentType};
use depcheck_core::selection::SelectionState;

use crate::conflict::{self, conflicts};

/// Modifications `component` forces, in declaration order.
pub fn required(catalog: &Catalog, component: &ComponentRef) -> Vec<String> {
    if component.kind == ComponentType::Modification {
        return Vec::new();
    }
    catalog
        .get(component)
        .map(|r| r.forced_modifications.clone())
        .unwrap_or_default()
}

/// Forced modifications that have no record in the catalog at all.
pub fn required_not_installed(catalog: &Catalog, component: &ComponentRef) -> Vec<String> {
    required(catalog, component)
        .into_iter()
        .filter(|id| catalog.lookup(ComponentType::Modification, id).is_none())
        .collect()
}

/// Forced modifications that are not currently enabled.
pub fn required_not_enabled(
    catalog: &Catalog,
    selection: &SelectionState,
    component: &ComponentRef,
) -> Vec<String> {
    required(catalog, component)
        .into_iter()
        .filter(|id| !selection.is_enabled(id))
        .collect()
}

/// Enabled modifications that conflict with `component`, in selection order.
pub fn conflicting_enabled(
    catalog: &Catalog,
    selection: &SelectionState,
    component: &ComponentRef,
) -> Vec<String> {
    selection
        .modifications
        .iter()
        .filter(|id| conflicts(catalog, &ComponentRef::modification(id.as_str()), component))
        .cloned()
        .collect()
}

/// Whether `a` forces the modification `b`.
pub fn requires(catalog: &Catalog, a: &ComponentRef, b: &ComponentRef) -> bool {
    match (catalog.get(a), catalog.get(b)) {
        (Some(ra), Some(rb)) => conflict::forces(ra, rb),
        _ => b.kind == ComponentType::Modification && required(catalog, a).contains(&b.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depcheck_core::component::ComponentRecord;
    use ComponentType::{Era, Modification, Scenario};

    fn sample() -> Catalog {
        Catalog::from_records([
            ComponentRecord::new(Era, "E1", "Era").with_forced(["M1", "M9"]),
            ComponentRecord::new(Scenario, "S1", "Scen").with_forced(["M2"]),
            ComponentRecord::new(Modification, "M1", "One"),
            ComponentRecord::new(Modification, "M2", "Two").with_disallow(Era, ["E1"]),
            ComponentRecord::new(Modification, "M3", "Three"),
        ])
        .unwrap()
    }

    #[test]
    fn required_lists() {
        let c = sample();
        assert_eq!(required(&c, &ComponentRef::era("E1")), vec!["M1", "M9"]);
        assert!(required(&c, &ComponentRef::modification("M1")).is_empty());
        assert!(required(&c, &ComponentRef::era("missing")).is_empty());
    }

    #[test]
    fn not_installed() {
        let c = sample();
        assert_eq!(required_not_installed(&c, &ComponentRef::era("E1")), vec!["M9"]);
        assert!(required_not_installed(&c, &ComponentRef::scenario("S1")).is_empty());
    }

    #[test]
    fn not_enabled() {
        let c = sample();
        let selection = SelectionState::new("", "", ["M1"]);
        assert_eq!(
            required_not_enabled(&c, &selection, &ComponentRef::era("E1")),
            vec!["M9"]
        );
    }

    #[test]
    fn conflicting_enabled_in_selection_order() {
        let c = sample();
        let selection = SelectionState::new("", "", ["M3", "M2", "M1"]);
        assert_eq!(
            conflicting_enabled(&c, &selection, &ComponentRef::era("E1")),
            vec!["M2"]
        );
    }

    #[test]
    fn requires_only_modifications() {
        let c = sample();
        let e1 = ComponentRef::era("E1");
        assert!(requires(&c, &e1, &ComponentRef::modification("M1")));
        assert!(requires(&c, &e1, &ComponentRef::modification("M9")));
        assert!(!requires(&c, &e1, &ComponentRef::modification("M3")));
        assert!(!requires(&c, &e1, &ComponentRef::scenario("S1")));
    }
}

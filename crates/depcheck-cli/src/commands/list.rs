use miette::Result;

use depcheck_core::component::{ComponentRef, ComponentType};
use depcheck_resolver::manager::DependencyManager;
use depcheck_util::errors::DepcheckError;

use crate::session::Session;

/// List one catalog section. `*` marks the active entries, `!` the ones that
/// conflict with the rest of the current selection.
pub fn exec(session: &Session, kind: &str) -> Result<()> {
    let kind = ComponentType::parse(kind).ok_or_else(|| DepcheckError::Generic {
        message: format!("Unknown component type '{kind}', expected era, scenario or mod"),
    })?;
    let m = &session.manager;

    if m.catalog().len(kind) == 0 {
        println!("No {kind}s in the catalog.");
        return Ok(());
    }

    let context = selection_refs(m, kind);
    for (i, record) in m.catalog().records(kind).enumerate() {
        let candidate = record.component_ref();
        let marker = if is_active(m, &candidate) {
            '*'
        } else if context.iter().any(|c| m.conflicts(&candidate, c)) {
            '!'
        } else {
            ' '
        };
        println!("{marker} {i:>3}  {:<24} {}", record.id, record.name);
    }
    Ok(())
}

fn is_active(m: &DependencyManager, component: &ComponentRef) -> bool {
    match component.kind {
        ComponentType::Era => m.era() == component.id,
        ComponentType::Scenario => m.scenario() == component.id,
        ComponentType::Modification => m.selection().is_enabled(&component.id),
    }
}

/// The selected components an entry of `kind` would have to coexist with.
/// The current era or scenario is left out when listing its own type.
fn selection_refs(m: &DependencyManager, kind: ComponentType) -> Vec<ComponentRef> {
    let mut refs = Vec::new();
    if kind != ComponentType::Era {
        refs.push(ComponentRef::era(m.era()));
    }
    if kind != ComponentType::Scenario {
        refs.push(ComponentRef::scenario(m.scenario()));
    }
    refs.extend(m.modifications().iter().map(|id| ComponentRef::modification(id.as_str())));
    refs
}

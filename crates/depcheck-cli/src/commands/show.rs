use miette::Result;
use serde::Serialize;

use depcheck_core::component::{ComponentRef, ComponentType};
use depcheck_resolver::manager::DependencyManager;
use depcheck_util::errors::DepcheckError;
use depcheck_util::progress::status_warn;

use crate::session::Session;

#[derive(Serialize)]
struct SelectionView {
    era: Entry,
    scenario: Entry,
    modifications: Vec<Entry>,
    /// Forced modifications that are not in the catalog.
    missing: Vec<String>,
    /// Forced modifications that are installed but not enabled.
    not_enabled: Vec<String>,
}

#[derive(Serialize)]
struct Entry {
    id: String,
    name: String,
}

impl SelectionView {
    fn new(m: &DependencyManager) -> Self {
        let entry = |kind: ComponentType, id: &str| Entry {
            id: id.to_string(),
            name: m.catalog().name(kind, id).to_string(),
        };

        let mut missing = Vec::new();
        let mut not_enabled = Vec::new();
        for current in [ComponentRef::era(m.era()), ComponentRef::scenario(m.scenario())] {
            let absent = m.required_not_installed(&current);
            not_enabled.extend(
                m.required_not_enabled(&current)
                    .into_iter()
                    .filter(|id| !absent.contains(id)),
            );
            missing.extend(absent);
        }

        Self {
            era: entry(ComponentType::Era, m.era()),
            scenario: entry(ComponentType::Scenario, m.scenario()),
            modifications: m
                .modifications()
                .iter()
                .map(|id| entry(ComponentType::Modification, id))
                .collect(),
            missing,
            not_enabled,
        }
    }
}

pub fn exec(session: &Session, json: bool) -> Result<()> {
    let view = SelectionView::new(&session.manager);

    if json {
        let out = serde_json::to_string_pretty(&view).map_err(|e| DepcheckError::Generic {
            message: format!("Failed to serialize selection: {e}"),
        })?;
        println!("{out}");
        return Ok(());
    }

    println!("Era:      {}", display(&view.era));
    println!("Scenario: {}", display(&view.scenario));
    if view.modifications.is_empty() {
        println!("Modifications: none");
    } else {
        println!("Modifications ({}):", view.modifications.len());
        for entry in &view.modifications {
            println!("  {}", display(entry));
        }
    }

    for id in &view.missing {
        status_warn("Missing", &format!("required modification '{id}' is not installed"));
    }
    for id in &view.not_enabled {
        status_warn("Disabled", &format!("required modification '{id}' is not enabled"));
    }
    Ok(())
}

fn display(entry: &Entry) -> String {
    if entry.id.is_empty() {
        "(none)".to_string()
    } else if entry.name == entry.id {
        entry.id.clone()
    } else {
        format!("{} ({})", entry.name, entry.id)
    }
}

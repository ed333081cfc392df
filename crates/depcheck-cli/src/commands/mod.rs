//! Command dispatch and handler modules.

mod check;
mod era;
mod list;
mod mods;
mod scenario;
mod show;

use miette::Result;

use depcheck_core::catalog::Catalog;
use depcheck_core::component::ComponentType;
use depcheck_util::progress::status;

use crate::cli::{Cli, Command};
use crate::session::Session;

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let mut session = Session::open(&cli)?;
    match cli.command {
        Command::Check { a, b, direct } => check::exec(&session, &a, &b, direct),
        Command::Show { json } => show::exec(&session, json),
        Command::Era { id, force } => era::exec(&mut session, &id, force),
        Command::Scenario { id, force } => scenario::exec(&mut session, &id, force),
        Command::Mods { ids, force } => mods::exec(&mut session, &ids, force),
        Command::List { kind } => list::exec(&session, &kind),
    }
}

/// Print the selection after a successful change.
fn print_selection(session: &Session) {
    let m = &session.manager;
    let catalog = m.catalog();
    status("Era", &label(catalog, ComponentType::Era, m.era()));
    status("Scenario", &label(catalog, ComponentType::Scenario, m.scenario()));
    let mods: Vec<String> = m
        .modifications()
        .iter()
        .map(|id| label(catalog, ComponentType::Modification, id))
        .collect();
    if mods.is_empty() {
        status("Mods", "(none)");
    } else {
        status("Mods", &mods.join(", "));
    }
}

/// `Name (id)`, or just the id if the catalog has no better name for it.
fn label(catalog: &Catalog, kind: ComponentType, id: &str) -> String {
    if id.is_empty() {
        return "(none)".to_string();
    }
    let name = catalog.name(kind, id);
    if name == id {
        id.to_string()
    } else {
        format!("{name} ({id})")
    }
}

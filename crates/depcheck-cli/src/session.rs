//! Loading the catalog and saved selection that every command works on.

use std::path::PathBuf;

use depcheck_core::config::{DepcheckConfig, NonInteractivePolicy};
use depcheck_core::selection::SelectionState;
use depcheck_core::source::load_catalog;
use depcheck_resolver::manager::DependencyManager;
use depcheck_resolver::prompt::{InteractiveResolver, PolicyResolver};
use depcheck_util::errors::{DepcheckError, DepcheckResult};

use crate::cli::Cli;
use crate::terminal::TerminalResolver;

pub struct Session {
    pub manager: DependencyManager,
    selection_path: PathBuf,
    policy: NonInteractivePolicy,
}

impl Session {
    /// Resolve paths from flags and `depcheck.toml`, then load the catalog and
    /// the saved selection, if there is one.
    pub fn open(cli: &Cli) -> DepcheckResult<Self> {
        let cwd = std::env::current_dir().map_err(DepcheckError::Io)?;
        let config = DepcheckConfig::load(&cwd)?;

        let catalog_path = cli.catalog.clone().unwrap_or(config.catalog);
        let selection_path = cli.selection.clone().unwrap_or(config.selection);
        let policy = if cli.yes {
            NonInteractivePolicy::AcceptFirst
        } else {
            config.prompt.non_interactive
        };

        if !catalog_path.is_file() {
            return Err(DepcheckError::Catalog {
                message: format!("Could not find catalog at {}", catalog_path.display()),
            }
            .into());
        }
        let mut manager = DependencyManager::new(load_catalog(&catalog_path)?);

        if selection_path.is_file() {
            let saved = SelectionState::from_path(&selection_path)?;
            restore(&mut manager, &saved)?;
            tracing::debug!(path = %selection_path.display(), "loaded selection");
        }

        Ok(Self {
            manager,
            selection_path,
            policy,
        })
    }

    /// Run a change against the selection and save it if the change succeeds.
    pub fn apply<F>(&mut self, change: F) -> DepcheckResult<()>
    where
        F: FnOnce(&mut DependencyManager, &mut dyn InteractiveResolver) -> Result<(), DepcheckError>,
    {
        let mut ui = TerminalResolver::new(self.policy);
        if let Err(e) = change(&mut self.manager, &mut ui) {
            return Err(ui.take_prompt_error().unwrap_or(e).into());
        }
        self.manager.selection().write_to(&self.selection_path)?;
        tracing::debug!(path = %self.selection_path.display(), "saved selection");
        Ok(())
    }
}

/// A saved selection was valid when it was written, so it is assigned as-is.
fn restore(manager: &mut DependencyManager, saved: &SelectionState) -> Result<(), DepcheckError> {
    let mut ui = PolicyResolver::default();
    manager.try_era(&saved.era, true, &mut ui)?;
    manager.try_scenario(&saved.scenario, true, &mut ui)?;
    manager.try_modifications(&saved.modifications, true, &mut ui)
}

//! CLI argument definitions for depcheck.
//!
//! Uses `clap` derive macros to define the full command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "depcheck",
    version,
    about = "Dependency checker for multiplayer game setups",
    long_about = "depcheck keeps an era, a scenario and a set of modifications mutually \
                  compatible, prompting before it enables or disables anything."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Catalog file (overrides depcheck.toml)
    #[arg(long, global = true, env = "DEPCHECK_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Selection file (overrides depcheck.toml)
    #[arg(long, global = true)]
    pub selection: Option<PathBuf>,

    /// Accept every confirmation and pick the first compatible entry
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether two components conflict
    Check {
        /// First component, e.g. era:default
        a: String,
        /// Second component, e.g. mod:fog_of_war
        b: String,
        /// Ignore modifications forced by either side
        #[arg(long)]
        direct: bool,
    },

    /// Show the current selection
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Select an era
    Era {
        /// Era id
        id: String,
        /// Assign without checking dependencies
        #[arg(long)]
        force: bool,
    },

    /// Select a scenario
    Scenario {
        /// Scenario id
        id: String,
        /// Assign without checking dependencies
        #[arg(long)]
        force: bool,
    },

    /// Enable exactly the given modifications
    Mods {
        /// Modification ids, in activation order
        ids: Vec<String>,
        /// Assign without checking dependencies
        #[arg(long)]
        force: bool,
    },

    /// List catalog entries of one type
    #[command(alias = "ls")]
    List {
        /// Component type: era, scenario or mod
        kind: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}

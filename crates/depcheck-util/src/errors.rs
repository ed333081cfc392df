use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all depcheck operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DepcheckError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed catalog source.
    #[error("Catalog error: {message}")]
    #[diagnostic(help("Check the catalog file for syntax errors and duplicate ids"))]
    Catalog { message: String },

    /// Unreadable or malformed selection file.
    #[error("Selection error: {message}")]
    Selection { message: String },

    /// Invalid user configuration (e.g. depcheck.toml).
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The requested component is not in the catalog.
    #[error("Unknown {kind} '{id}'")]
    UnknownComponent { kind: String, id: String },

    /// A component forces modifications that are not installed at all.
    #[error("{kind} '{id}' can't be activated, missing dependencies: {}", .missing.join(", "))]
    #[diagnostic(help("Install the missing modifications or pick another component"))]
    MissingDependencies {
        kind: String,
        id: String,
        missing: Vec<String>,
    },

    /// Reconciliation found no component of the given kind compatible with the rest.
    #[error("No compatible {kind}s found")]
    NoCompatible { kind: String },

    /// The user declined a confirmation or made no choice.
    #[error("Change declined")]
    Declined,

    /// The interactive prompt itself failed.
    #[error("Prompt error: {message}")]
    Prompt { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type DepcheckResult<T> = miette::Result<T>;

use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Rejected user input, one message per field
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Referenced game or tag does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Seed fixture could not be loaded
    #[error("Fixture error: {0}")]
    Fixture(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub(crate) fn fixture(msg: impl Into<String>) -> Self {
        Self::Fixture(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl From<tabletop_lib::ViewError> for CliError {
    fn from(e: tabletop_lib::ViewError) -> Self {
        match e {
            tabletop_lib::ViewError::Validation(errors) => Self::Validation(errors.to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

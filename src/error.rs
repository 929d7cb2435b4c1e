//! Error types for maintenance-desk
//!
//! All fallible operations in the crate return [`Result`], whose error type
//! carries enough context to render a user-facing message and a list of
//! suggestions from the CLI.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DeskError>;

/// Errors that can occur while operating the maintenance desk
#[derive(Error, Debug)]
pub enum DeskError {
    /// I/O failure while touching the project directory or an export file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No `.maintenance-desk` directory was found
    #[error("Project not initialized. Run 'maintenance-desk init' first")]
    ProjectNotInitialized,

    /// `init` was run on an already initialized project
    #[error("Project already initialized at {path}")]
    ProjectAlreadyInitialized { path: String },

    /// The requested ticket does not exist in the store
    #[error("Ticket not found: {id}")]
    TicketNotFound { id: String },

    /// Export was requested on an empty store
    #[error("No tickets to export.")]
    NoTicketsToExport,

    /// The user declined a destructive action
    #[error("Operation cancelled")]
    Cancelled,

    /// Bad user input (flags, field assignments, formats)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Text could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Data could not be serialized
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be loaded or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure while prompting the user
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Free-form error
    #[error("{0}")]
    Custom(String),
}

impl DeskError {
    /// Create a free-form error
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Message shown to the user on the error line
    pub fn user_message(&self) -> String {
        match self {
            Self::NoTicketsToExport => "No tickets to export.".to_string(),
            Self::Cancelled => "Cancelled, nothing was changed.".to_string(),
            _ => self.to_string(),
        }
    }

    /// Hints on how to recover from the error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectNotInitialized => vec![
                "Run 'maintenance-desk init' in the directory that should hold tickets".to_string(),
                "Or pass --project <PATH> to point at an existing desk".to_string(),
            ],
            Self::ProjectAlreadyInitialized { .. } => {
                vec!["Use 'maintenance-desk init --force' to rewrite the defaults".to_string()]
            },
            Self::TicketNotFound { .. } => {
                vec!["Run 'maintenance-desk list' to see existing ticket IDs".to_string()]
            },
            Self::NoTicketsToExport => {
                vec!["Create a ticket first with 'maintenance-desk new'".to_string()]
            },
            Self::Config(_) => vec![
                "Check .maintenance-desk/config.yaml for syntax errors".to_string(),
                "Environment overrides use the MDESK_ prefix".to_string(),
            ],
            Self::InvalidInput(_) => {
                vec!["Run the command with --help to see accepted values".to_string()]
            },
            _ => vec![],
        }
    }

    /// Whether the user can fix this without touching files by hand
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ProjectNotInitialized
                | Self::TicketNotFound { .. }
                | Self::NoTicketsToExport
                | Self::Cancelled
                | Self::InvalidInput(_)
        )
    }

    /// Whether the error originates from configuration
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<config::ConfigError> for DeskError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for DeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<dialoguer::Error> for DeskError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

//! Error types for rds-setup.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for rds-setup operations.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Configuration errors (invalid config file, missing identifiers, bad ARNs, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote execution errors (auth failed, network, malformed SQL, permission denied, etc.)
    #[error("Execution error: {0}")]
    Execution(String),

    /// SQL script errors (unreadable file, untokenizable text).
    #[error("Script error: {0}")]
    Script(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SetupError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a remote execution error with the given message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Creates a script error with the given message.
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Config(msg) | Self::Execution(msg) | Self::Script(msg) | Self::Internal(msg) => {
                msg
            }
        }
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Execution(_) => "Execution Error",
            Self::Script(_) => "Script Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using SetupError.
pub type Result<T> = std::result::Result<T, SetupError>;

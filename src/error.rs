//! Error types for argument processing.

use thiserror::Error;

use crate::config::{ConversionError, ProfileError};

/// Errors surfaced to the user for one command invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// A scalar could not be parsed under its declared grammar.
    #[error("argument {arg}: invalid value {source}")]
    InvalidArgument {
        arg: String,
        #[source]
        source: ConversionError,
    },

    /// Individually valid arguments were combined inconsistently.
    #[error("incorrect usage: {0}")]
    Usage(String),

    /// Raw command-line text was rejected by the parser.
    #[error(transparent)]
    Parse(#[from] clap::Error),

    /// A request record could not be assembled.
    #[error(transparent)]
    Model(#[from] sql_models::ModelError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The argument registrations for a command are inconsistent.
    #[error("Invalid registration for '{command}': {reason}")]
    Registration { command: String, reason: String },

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// A parsed argument could not be read back from the parser.
    #[error("Failed to read argument '{arg}': {reason}")]
    Matches { arg: String, reason: String },
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    pub fn registration(command: impl Into<String>, reason: impl Into<String>) -> Self {
        CliError::Registration {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

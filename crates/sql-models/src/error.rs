//! Error types for building request records.

use thiserror::Error;

/// Errors that can occur while assembling a record from collected properties.
///
/// Missing required properties are deliberately absent here: requiredness is
/// enforced on the command line before a record is ever built.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A property value had the wrong shape for the record field.
    #[error("Property '{property}' of {type_name}: expected {expected}, got {actual}")]
    TypeMismatch {
        type_name: &'static str,
        property: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A property was supplied that the record does not declare.
    #[error("{type_name} has no property '{property}'")]
    UnknownProperty {
        type_name: &'static str,
        property: String,
    },

    /// A nested record was of a different type than the field expects.
    #[error("Property '{property}' of {type_name}: expected a {expected} record, got {actual}")]
    WrongModel {
        type_name: &'static str,
        property: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A datetime property could not be parsed.
    #[error("Property '{property}': invalid datetime '{value}'. Expected YYYY-MM-DDTHH:MM:SS or RFC 3339")]
    InvalidDateTime { property: String, value: String },

    /// The built record could not be rendered as JSON.
    #[error("Failed to serialize {type_name}: {source}")]
    Serialize {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for record construction.
pub type Result<T> = std::result::Result<T, ModelError>;

//! Error types for schema validation and value generation.

use thiserror::Error;

/// Errors raised while validating a table or generating rows for it.
///
/// Every variant is terminal for the table being processed. Callers decide
/// whether to abort the whole run or skip the table.
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog returned no columns for the table
    #[error("Columns on table {table} is empty")]
    EmptySchema { table: String },

    /// A declared generator hint is outside the supported vocabulary, or was
    /// declared for a column that is not free text
    #[error("Column '{column}' cannot generate a \"{hint}\": {reason}")]
    UnsupportedGeneratorHint {
        column: String,
        hint: String,
        reason: &'static str,
    },

    /// A non-nullable column owns a foreign key we cannot satisfy
    #[error("Column '{column}' has a FK constraint named '{constraint}' that is not nullable")]
    UnsatisfiableForeignKey { column: String, constraint: String },

    /// An ARRAY column's element type has no generator mapping
    #[error("Unknown UDT to datatype mapping: {element_type}")]
    UnknownElementType { element_type: String },

    /// The declared datatype has no generator
    #[error("Datatype currently unsupported: {datatype}({element_type})")]
    UnsupportedDatatype {
        datatype: String,
        element_type: String,
    },

    /// JSON value serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an UnsupportedGeneratorHint error
    pub fn unsupported_hint(
        column: impl Into<String>,
        hint: impl Into<String>,
        reason: &'static str,
    ) -> Self {
        Error::UnsupportedGeneratorHint {
            column: column.into(),
            hint: hint.into(),
            reason,
        }
    }
}

/// Result type alias for generation operations
pub type Result<T> = std::result::Result<T, Error>;

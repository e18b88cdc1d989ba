//! Error types for the retail-signals library.

use thiserror::Error;

/// Result type alias for annotation operations.
pub type Result<T> = std::result::Result<T, AnnotateError>;

/// Errors that can occur while building frames or running annotations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotateError {
    /// A requested column does not exist in the frame.
    #[error("column not found: {0}")]
    MissingColumn(String),

    /// A column exists but has the wrong type for the operation.
    #[error("column '{name}' is not {expected}")]
    ColumnType { name: String, expected: &'static str },

    /// Invalid configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Column length does not match the rest of the frame.
    #[error("column '{name}' has {got} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Two columns share the same name.
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// Frames with different schemas where identical schemas are required.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

//! Error types for schema conversion.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Schema error at {path}: {message}")]
    SchemaError { path: String, message: String },

    #[error("Nesting depth exceeded at {path} (max: {max_depth})")]
    RecursionDepthExceeded { path: String, max_depth: usize },
}

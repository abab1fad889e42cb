//! Error types for the discogen generator.

use discogen_define::ShapeError;
use thiserror::Error;

/// Errors that can occur during code generation.
///
/// Every variant aborts the run: the generator never emits a partial or
/// best-guess declaration for a schema it could not translate.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to read the discovery document
    #[error("Failed to read discovery document '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the discovery document
    #[error("Failed to parse discovery document: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A schema's structure does not match its declared type
    #[error("Malformed schema: {0}")]
    Shape(#[from] ShapeError),

    /// The type mapper found a property shape it cannot express.
    #[error("Schema '{schema}': property '{property}' has an unmappable shape: {reason}")]
    UnmappableProperty {
        /// Enclosing schema id.
        schema: String,
        /// Property name as written in the document.
        property: String,
        /// What was wrong with the descriptor.
        reason: String,
    },

    /// A numeric or string `format` with no Rust equivalent.
    #[error("Schema '{schema}': property '{property}' has unknown format '{format}'")]
    UnknownFormat {
        schema: String,
        property: String,
        format: String,
    },

    /// Activity ids must have the form `<api>.<resource>.<method>`.
    #[error("Invalid activity name '{0}': expected '<api>.<resource>.<method>'")]
    InvalidActivityName(String),

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

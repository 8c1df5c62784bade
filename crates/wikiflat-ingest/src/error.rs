//! Error types for ingestion

use thiserror::Error;

/// Errors that abort an import run
#[derive(Error, Debug)]
pub enum IngestError {
    /// Reading the input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The record sink rejected a write
    #[error("Sink error: {0}")]
    Sink(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why one input value could not become an entity
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The line held valid JSON that is not an object
    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// The object has no string `id`
    #[error("Missing or invalid 'id'")]
    MissingId,
}

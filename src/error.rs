//! Error types for xsdform
//!
//! This module defines all error types used throughout the library.
//! Constraint violations found by the validator are deliberately *not*
//! represented here: they are collected into an ordered list of messages
//! and returned to the caller, never raised as errors.

use thiserror::Error;

/// Result type alias using xsdform Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xsdform operations
#[derive(Error, Debug)]
pub enum Error {
    /// Schema markup could not be parsed into a schema model
    #[error("schema parse error: {0}")]
    SchemaParse(String),

    /// A type reference could not be resolved consistently
    #[error("type resolution error: {0}")]
    TypeResolution(String),

    /// A declared type was located neither inline nor among named types
    #[error("type '{0}' not found in schema")]
    TypeNotFound(String),

    /// The instance root has no matching top-level element declaration
    #[error("root element '{0}' not found in schema")]
    RootNotFound(String),

    /// The content model is not a plain sequence
    #[error("unsupported content model: {0}")]
    UnsupportedContentModel(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// XML reading/writing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Byte store error
    #[error("store error: {0}")]
    Store(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

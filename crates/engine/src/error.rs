// ABOUTME: Error types for the audit engine.
// ABOUTME: Provides AuditError with Parse and Invalid variants for caller contract violations.

use std::fmt;
use thiserror::Error;

/// Errors raised when an input document cannot be audited.
///
/// Malformed values inside a well-formed document (durations, dates) never
/// surface here; they degrade to defaults inside the engine.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The bytes are not a JSON document.
    #[error("failed to parse input document: {0}")]
    Parse(String),

    /// The document parsed but a required key is missing or mistyped.
    #[error("invalid input document: {0}")]
    Invalid(String),
}

impl AuditError {
    /// Creates a Parse error from an underlying decoder error.
    pub fn parse(err: impl fmt::Display) -> Self {
        AuditError::Parse(err.to_string())
    }

    /// Creates an Invalid error with a custom message.
    pub fn invalid(msg: impl Into<String>) -> Self {
        AuditError::Invalid(msg.into())
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Data => AuditError::invalid(err.to_string()),
            Category::Io | Category::Syntax | Category::Eof => AuditError::parse(err),
        }
    }
}

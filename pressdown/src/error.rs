//! Error types for export conversion

use std::fmt;

/// Errors that can occur while converting an export document
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The export document is not well-formed XML (fatal, aborts the run)
    MalformedDocument(String),
    /// A required field is absent from an export record
    MissingField(String),
    /// Error while translating HTML content to Markdown
    Translation(String),
    /// Error reading the export document from disk
    Io(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::MalformedDocument(msg) => write!(f, "Malformed export document: {msg}"),
            ConvertError::MissingField(field) => write!(f, "Missing required field: {field}"),
            ConvertError::Translation(msg) => write!(f, "Translation error: {msg}"),
            ConvertError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

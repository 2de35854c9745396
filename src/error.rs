//! Error types for the Skyhash client
//!
//! Provides a unified error type for everything above the codec. The codec
//! itself reports [`ParseError`] values; connections wrap them here.

use thiserror::Error;

use crate::protocol::{ElementType, ParseError};

/// Result type alias using SkyError
pub type Result<T> = std::result::Result<T, SkyError>;

/// Unified error type for Skyhash client operations
#[derive(Debug, Error)]
pub enum SkyError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the stream while a response was outstanding
    #[error("Connection reset by peer")]
    ConnectionReset,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    // -------------------------------------------------------------------------
    // Value Mapping Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unexpected element: expected {expected}, found {found}")]
    UnexpectedElement {
        expected: &'static str,
        found: ElementType,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SkyError {
    /// The codec error behind this failure, if any
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            SkyError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SkyError {
    fn from(e: serde_json::Error) -> Self {
        SkyError::Serialization(e.to_string())
    }
}

impl From<bincode::Error> for SkyError {
    fn from(e: bincode::Error) -> Self {
        SkyError::Serialization(e.to_string())
    }
}

/*!
 * Error types for the trs2vtt application.
 *
 * This module contains custom error types for the conversion core and the
 * surrounding application, using the thiserror crate for ergonomic error
 * definitions.
 */

use thiserror::Error;

/// Errors that can occur while turning a TRS transcript into WebVTT
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The input is not a well-formed XML document
    #[error("Failed to parse transcript: {0}")]
    Parse(String),

    /// A required top-level section is absent
    #[error("Missing required section: {0}")]
    MissingSection(&'static str),

    /// A required attribute is absent from an element
    #[error("Element <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Tag name of the element
        element: &'static str,
        /// Name of the missing attribute
        attribute: &'static str,
    },

    /// A time code is not a non-negative number of seconds
    #[error("Invalid time code '{0}': expected a non-negative number of seconds")]
    Format(String),

    /// An event description outside the known set of noise codes
    #[error("Unknown event code: {0}")]
    UnknownEventCode(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the conversion itself
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

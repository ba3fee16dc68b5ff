//! Centralized error handling for the gallery
//!
//! Library-style errors are `thiserror` enums. Application code (startup,
//! config loading, the terminal front end) uses `anyhow` with context.

use thiserror::Error;

use crate::catalog::Style;

/// Message shown to the user whenever a generation fails. The real cause
/// only goes to the log.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "The artist is taking a break. Please try again shortly.";

/// Errors returned by an image generator.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The style has no prompt in the catalog
    #[error("Invalid art style selected: {0}")]
    InvalidStyle(String),

    /// The call succeeded but no content part carried inline image data
    #[error("No image data found in the response")]
    NoImageInResponse,

    /// Network or remote service failure, cause preserved
    #[error("Image generation request failed")]
    UpstreamFailure(#[source] UpstreamError),
}

impl From<UpstreamError> for GenerationError {
    fn from(err: UpstreamError) -> Self {
        GenerationError::UpstreamFailure(err)
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::UpstreamFailure(UpstreamError::Network(err))
    }
}

/// The underlying cause of an upstream failure.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport-level error (connect, timeout, TLS, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote service answered with a non-success status
    #[error("Server error ({status_code}): {message}")]
    Status { status_code: u16, message: String },

    /// Body could not be decoded as a generateContent response
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Prompt catalog problems, detected at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("missing prompt for style: {0}")]
    MissingPrompt(Style),

    #[error("Unknown art style: {0}")]
    UnknownStyle(String),
}

/// Result type alias for application-level operations
pub type GalleryResult<T> = anyhow::Result<T>;

/// Render an error and its whole `source()` chain on one line.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

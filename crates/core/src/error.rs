//! Error types for Copymill operations.
//!
//! This module defines the main error type [`CopymillError`] which represents
//! all possible errors that can occur during fetching, article scraping,
//! and copy generation.
//!
//! # Example
//!
//! ```rust
//! use copymill_core::{CopymillError, Result};
//!
//! fn check_source(text: &str) -> Result<()> {
//!     if text.is_empty() {
//!         return Err(CopymillError::NoContent);
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for content repurposing operations.
///
/// This enum represents all possible errors that can occur during HTTP
/// fetching, article scraping, and LLM-backed copy generation.
///
/// The generation API boundary distinguishes connectivity and authentication
/// failures from everything else so callers can surface each with its own
/// user-facing message.
#[derive(Error, Debug)]
pub enum CopymillError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems on the article fetch path.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP fetch exceeds the configured timeout budget.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is missing a scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-success HTTP status on a fetch.
    #[error("Request failed with status {status}")]
    BadStatus { status: u16 },

    /// HTML parsing errors.
    ///
    /// Returned when HTML cannot be parsed, often due to an invalid
    /// CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No article text could be scraped from the page.
    #[error("No article content could be extracted from the page")]
    NoContent,

    /// No output format selected for a content-paste generation.
    ///
    /// This is a validation failure, not a fault: the submission is
    /// rejected before any request is issued and the session stays
    /// re-submittable.
    #[error("Select at least one output format before submitting content")]
    EmptySelection,

    /// An API key is required but none was provided.
    #[error("An API key is required outside demo mode")]
    MissingApiKey,

    /// The generation API could not be reached.
    #[error("Connection error. Please check your internet connection")]
    ApiConnection,

    /// The generation API rejected the credential.
    #[error("Authentication failed. Please check your API key")]
    ApiAuth,

    /// Any other generation failure, carrying the original detail.
    #[error("Generation failed: {0}")]
    ApiFailure(String),

    /// File not found.
    ///
    /// Returned when attempting to read a file that doesn't exist.
    #[error("File not found: {0}")]
    FileNotFound(std::path::PathBuf),

    /// File write errors.
    ///
    /// Wraps standard I/O errors for export operations.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),
}

/// Result type alias for CopymillError.
///
/// This is a convenience alias for `std::result::Result<T, CopymillError>`.
pub type Result<T> = std::result::Result<T, CopymillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CopymillError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_timeout_error() {
        let err = CopymillError::Timeout { timeout: 10 };
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_bad_status_error() {
        let err = CopymillError::BadStatus { status: 404 };
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_api_error_messages() {
        assert!(CopymillError::ApiConnection.to_string().contains("internet connection"));
        assert!(CopymillError::ApiAuth.to_string().contains("API key"));
        assert!(
            CopymillError::ApiFailure("boom".to_string())
                .to_string()
                .contains("boom")
        );
    }
}

//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by the card HTTP collaborator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CardApiError {
    #[error("card api base url is invalid: {0}")]
    InvalidBaseUrl(String),
    #[error("card api request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("archive upload returned no storage path")]
    MissingUploadPath,
    /// Raised by non-HTTP gateways (tests, offline adapters).
    #[error("card api unavailable: {0}")]
    Unavailable(String),
}

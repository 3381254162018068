//! Error types for catalog lookups

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors reported by a [`TrackCatalog`](crate::TrackCatalog) implementation
///
/// A lookup failure must always surface as an error, never as an empty or
/// default result: downstream consumers (notably the request reclassifier)
/// distinguish "the catalog answered with no genres" from "the catalog
/// could not answer at all".
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The track or artist does not exist in the catalog
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication with the catalog failed or expired
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Quota exceeded (rate limiting)
    #[error("Rate limit exceeded, please try again later")]
    RateLimitExceeded,

    /// The catalog did not answer within the configured timeout
    #[error("Catalog request timed out")]
    Timeout,

    /// Transport-level failure (connection, TLS, DNS...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The catalog answered with a payload we could not interpret
    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),

    /// Any other catalog error
    #[error("Catalog error: {0}")]
    Other(String),
}

impl CatalogError {
    /// Returns true if the resource simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }

    /// Returns true if the error is an authentication problem
    pub fn is_auth_error(&self) -> bool {
        matches!(self, CatalogError::Unauthorized(_))
    }

    /// Returns true if the error is a rate limiting error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, CatalogError::RateLimitExceeded)
    }
}

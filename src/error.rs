// src/error.rs
// =============================================================================
// Error kinds for the search pipeline.
//
// None of these are fatal to the application. Each one describes what went
// wrong with a single user action (one fetch, one keystroke, one save) and
// the caller decides how to surface it.
//
// Rust concepts:
// - thiserror: derives std::error::Error + Display from attributes
// - Enums with data: each variant carries the detail message
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The request URL could not be built from the query
    #[error("malformed search query: {0}")]
    MalformedQuery(String),

    /// Transport failure or a non-success HTTP status
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// Response body was not the expected `{ "items": [...] }` shape
    #[error("could not decode search response: {0}")]
    DecodeFailure(String),

    /// The live filter text is not a valid pattern
    #[error("invalid filter pattern: {0}")]
    FilterPatternError(String),

    /// Preference storage could not be read or written
    #[error("preference store error: {0}")]
    Preferences(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            SearchError::DecodeFailure(error.to_string())
        } else {
            SearchError::NetworkFailure(error.to_string())
        }
    }
}

impl From<url::ParseError> for SearchError {
    fn from(error: url::ParseError) -> Self {
        SearchError::MalformedQuery(error.to_string())
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, SearchError>;

//! Error types for the authentication layer.

use thiserror::Error;

/// Failures surfaced by the session manager and identity provider client.
///
/// OAuth failures stay distinguishable so a UI can choose not to show an
/// error on cancellation.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Structured failure reported by the identity provider (bad
    /// credentials, rate limiting, unverified email, ...)
    #[error("{message}")]
    Provider {
        message: String,
        status: Option<u16>,
    },
    /// Transport-level failure talking to the provider
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// A provider endpoint URL could not be constructed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The user dismissed the browser flow
    #[error("Authentication was cancelled")]
    Cancelled,
    /// The browser flow did not complete within the configured timeout
    #[error("Authentication timed out")]
    TimedOut,
    /// The callback URL carried no tokens and no session was established
    #[error("Failed to get authentication tokens")]
    MissingTokens,
}

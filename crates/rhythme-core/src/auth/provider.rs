//! Identity provider and browser launcher seams.
//!
//! The session manager talks to the outside world exclusively through the
//! traits defined here, so the remote identity service and the system
//! browser can both be swapped out in tests.

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::error::AuthError;

/// The authenticated identity issued by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    /// Provider-assigned user id
    pub id: String,
    /// Email address, when the provider exposes one
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session: token pair plus the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Bearer token for API calls
    pub access_token: String,
    /// Token used to obtain fresh access tokens
    pub refresh_token: String,
    /// Seconds until the access token expires, when known
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// The user this session authenticates
    pub user: AuthUser,
}

/// Session-change notifications pushed by the provider.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A session was established or replaced
    SignedIn(Session),
    /// The session was invalidated
    SignedOut,
}

/// Third-party OAuth providers supported by the sign-in flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Github,
    Apple,
}

impl OAuthProvider {
    /// The provider slug used in authorization URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Github => "github",
            OAuthProvider::Apple => "apple",
        }
    }
}

impl FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "github" => Ok(OAuthProvider::Github),
            "apple" => Ok(OAuthProvider::Apple),
            _ => Err(format!("Invalid OAuth provider: {s}")),
        }
    }
}

/// Remote identity service consumed by the session manager.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the currently established session, if any.
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    /// Signs in with email and password. Success is observed through the
    /// event subscription, not the return value.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Creates a new account. The provider may require email verification
    /// before any session is issued.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Returns the authorization URL for a browser-redirect OAuth flow
    /// without opening a browser.
    async fn authorize_url(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<String, AuthError>;

    /// Explicitly establishes a session from a token pair extracted out of
    /// an OAuth callback URL.
    async fn set_session(&self, access_token: &str, refresh_token: &str) -> Result<(), AuthError>;

    /// Invalidates the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Subscribes to session-change events.
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
}

/// Outcome of a system browser authentication session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebAuthResult {
    /// The browser was redirected back to the app; `url` is the callback URL
    Success { url: String },
    /// The user dismissed the browser without completing the flow
    Cancelled,
}

/// System browser capable of running an OAuth redirect flow.
///
/// Implemented by the platform shell; the manager only needs the callback
/// URL (or a cancellation) back.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Opens `url` in an authentication browser session and resolves when
    /// the browser redirects to `redirect_uri` or the user dismisses it.
    async fn open_auth_session(
        &self,
        url: &str,
        redirect_uri: &str,
    ) -> Result<WebAuthResult, AuthError>;
}

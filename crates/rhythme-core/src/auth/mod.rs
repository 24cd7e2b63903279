//! Authentication session management.
//!
//! The [`SessionManager`] owns the current session/user state for the
//! application's lifetime and bridges to a remote identity provider. It is an
//! explicitly constructed service object — one instance per process, created
//! at startup and torn down on drop — not ambient global state. Dependents
//! observe state through a watch subscription.
//!
//! Sign-in and sign-out never mutate local state directly: the provider
//! pushes session-change events, and a background listener task folds them
//! into the observable [`AuthState`]. `is_loading` is true only while the
//! initial session fetch at startup is outstanding.
//!
//! ## OAuth browser-redirect flow
//!
//! [`SessionManager::sign_in_with_oauth`] runs the three-phase handshake:
//! build the application redirect URI, obtain an authorization URL from the
//! provider without auto-redirecting, then hand the URL to the injected
//! [`BrowserLauncher`] and establish a session from the tokens in the
//! callback URL. The original design waited on the browser indefinitely; an
//! optional timeout on that wait is added here as a deliberate improvement
//! (see [`SessionManager::with_oauth_timeout`]).

use std::{sync::Arc, time::Duration};

use log::{debug, warn};
use tokio::sync::{broadcast::error::RecvError, watch};

pub mod error;
pub mod gotrue;
pub mod oauth;
pub mod provider;

#[cfg(test)]
mod tests;

// Re-export the main types
pub use error::AuthError;
pub use gotrue::GoTrueClient;
pub use oauth::{extract_tokens, RedirectUri};
pub use provider::{
    AuthUser, BrowserLauncher, IdentityProvider, OAuthProvider, Session, SessionEvent,
    WebAuthResult,
};

/// Observable authentication state.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The signed-in user, if any
    pub user: Option<AuthUser>,
    /// The established session, if any
    pub session: Option<Session>,
    /// True only while the initial session fetch is outstanding
    pub is_loading: bool,
}

impl AuthState {
    fn loading() -> Self {
        Self {
            user: None,
            session: None,
            is_loading: true,
        }
    }

    fn resolved(session: Option<Session>) -> Self {
        Self {
            user: session.as_ref().map(|s| s.user.clone()),
            session,
            is_loading: false,
        }
    }

    /// Whether a session is currently established.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// Process-wide authentication session manager.
pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    state_rx: watch::Receiver<AuthState>,
    listener: tokio::task::JoinHandle<()>,
    oauth_timeout: Option<Duration>,
}

impl SessionManager {
    /// Starts the manager: state begins loading, resolves after the initial
    /// session fetch, and is then kept live from provider events until the
    /// manager is dropped.
    pub fn start(provider: Arc<dyn IdentityProvider>) -> Self {
        let (state_tx, state_rx) = watch::channel(AuthState::loading());

        let listener_provider = Arc::clone(&provider);
        let listener = tokio::spawn(async move {
            // Subscribe before the initial fetch so a session change racing
            // with startup is never missed.
            let mut events = listener_provider.subscribe();

            let initial = match listener_provider.get_session().await {
                Ok(session) => session,
                Err(e) => {
                    warn!("Initial session fetch failed, starting unauthenticated: {e}");
                    None
                }
            };
            let _ = state_tx.send(AuthState::resolved(initial));

            loop {
                match events.recv().await {
                    Ok(SessionEvent::SignedIn(session)) => {
                        debug!("Session established for user {}", session.user.id);
                        let _ = state_tx.send(AuthState::resolved(Some(session)));
                    }
                    Ok(SessionEvent::SignedOut) => {
                        debug!("Session invalidated");
                        let _ = state_tx.send(AuthState::resolved(None));
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Missed {skipped} session events, refetching session");
                        let session =
                            listener_provider.get_session().await.ok().flatten();
                        let _ = state_tx.send(AuthState::resolved(session));
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Self {
            provider,
            state_rx,
            listener,
            oauth_timeout: None,
        }
    }

    /// Bounds the wait on the system browser during OAuth sign-in.
    ///
    /// The flow involves a genuine external wait on user interaction; without
    /// a bound it can hang forever when the user backgrounds the app.
    pub fn with_oauth_timeout(mut self, timeout: Duration) -> Self {
        self.oauth_timeout = Some(timeout);
        self
    }

    /// A snapshot of the current authentication state.
    pub fn state(&self) -> AuthState {
        self.state_rx.borrow().clone()
    }

    /// Subscribes to authentication state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state_rx.clone()
    }

    /// Signs in with email and password.
    ///
    /// The observable state is not updated here; it changes when the
    /// provider's session event arrives.
    pub async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.provider.sign_in_with_password(email, password).await
    }

    /// Creates a new account. The provider may require email verification,
    /// in which case no session change occurs until the email is verified.
    pub async fn sign_up_with_email(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.provider.sign_up(email, password).await
    }

    /// Runs the browser-redirect OAuth flow end to end.
    ///
    /// On success a session is established with the tokens extracted from
    /// the callback URL (fragment first, then query string). When the
    /// callback carries no tokens the provider may already have established
    /// the session out of band; that is verified before reporting
    /// [`AuthError::MissingTokens`]. A dismissed browser yields
    /// [`AuthError::Cancelled`].
    pub async fn sign_in_with_oauth(
        &self,
        oauth_provider: OAuthProvider,
        browser: &dyn BrowserLauncher,
    ) -> Result<(), AuthError> {
        let redirect_uri = RedirectUri::app_default().to_string();
        let url = self
            .provider
            .authorize_url(oauth_provider, &redirect_uri)
            .await?;
        debug!("Opening OAuth authorization URL for {}", oauth_provider.as_str());

        let auth_session = browser.open_auth_session(&url, &redirect_uri);
        let result = match self.oauth_timeout {
            Some(timeout) => tokio::time::timeout(timeout, auth_session)
                .await
                .map_err(|_| AuthError::TimedOut)??,
            None => auth_session.await?,
        };

        let callback_url = match result {
            WebAuthResult::Success { url } => url,
            WebAuthResult::Cancelled => return Err(AuthError::Cancelled),
        };

        match extract_tokens(&callback_url) {
            Some((access_token, refresh_token)) => {
                self.provider
                    .set_session(&access_token, &refresh_token)
                    .await
            }
            None => {
                if self.provider.get_session().await?.is_some() {
                    Ok(())
                } else {
                    Err(AuthError::MissingTokens)
                }
            }
        }
    }

    /// Invalidates the session with the provider. The observable state
    /// changes when the sign-out event arrives.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

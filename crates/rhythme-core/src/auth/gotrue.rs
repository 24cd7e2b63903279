//! GoTrue-style identity provider client.
//!
//! Talks to a Supabase-compatible auth REST API. The established session is
//! held in memory; callers observe changes through the event subscription
//! rather than return values, matching the provider contract.

use async_trait::async_trait;
use log::warn;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::{broadcast, RwLock};

use super::{
    error::AuthError,
    provider::{AuthUser, IdentityProvider, OAuthProvider, Session, SessionEvent},
};

/// Capacity of the session event channel; events are tiny and listeners
/// drain them promptly.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Error body shapes returned by GoTrue endpoints. Which field carries the
/// human-readable message varies by endpoint and version.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

/// Client for a GoTrue-compatible identity service.
pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
}

impl GoTrueClient {
    /// Creates a client for the service at `base_url` (the project root,
    /// without the `/auth/v1` suffix) using the given anonymous API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            session: RwLock::new(None),
            events,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Stores a session and notifies subscribers.
    async fn install_session(&self, session: Session) {
        *self.session.write().await = Some(session.clone());
        let _ = self.events.send(SessionEvent::SignedIn(session));
    }

    /// Builds a structured provider error from a non-success response.
    async fn provider_error(response: reqwest::Response) -> AuthError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                if text.is_empty() {
                    format!("Identity provider returned status {status}")
                } else {
                    text
                }
            });
        AuthError::Provider {
            message,
            status: Some(status),
        }
    }
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.session.read().await.clone())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint("/token?grant_type=password"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let session: Session = response.json().await?;
        self.install_session(session).await;
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint("/signup"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        // When email confirmation is required the response carries only the
        // pending user and no session is issued until verification.
        let body: Value = response.json().await?;
        if body.get("access_token").is_some() {
            let session: Session =
                serde_json::from_value(body).map_err(|e| AuthError::Provider {
                    message: format!("Unexpected sign-up response: {e}"),
                    status: None,
                })?;
            self.install_session(session).await;
        }
        Ok(())
    }

    async fn authorize_url(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<String, AuthError> {
        let mut url = reqwest::Url::parse(&self.endpoint("/authorize"))
            .map_err(|e| AuthError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to);
        Ok(url.into())
    }

    async fn set_session(&self, access_token: &str, refresh_token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .get(self.endpoint("/user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let user: AuthUser = response.json().await?;
        self.install_session(Session {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            expires_in: None,
            user,
        })
        .await;
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let current = self.session.read().await.clone();
        if let Some(session) = current {
            // Best-effort revocation; the local session is dropped either way.
            let result = self
                .http
                .post(self.endpoint("/logout"))
                .header("apikey", &self.api_key)
                .bearer_auth(&session.access_token)
                .send()
                .await;
            match result {
                Ok(response) if !response.status().is_success() => {
                    warn!(
                        "Sign-out revocation returned status {}",
                        response.status()
                    );
                }
                Err(e) => warn!("Sign-out revocation failed: {e}"),
                Ok(_) => {}
            }
        }

        *self.session.write().await = None;
        let _ = self.events.send(SessionEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::*;

fn sample_session(access: &str) -> Session {
    Session {
        access_token: access.to_string(),
        refresh_token: "refresh".to_string(),
        expires_in: Some(3600),
        user: AuthUser {
            id: "user_1".to_string(),
            email: Some("user@example.com".to_string()),
        },
    }
}

/// In-memory identity provider recording the calls made against it.
struct FakeProvider {
    session: Mutex<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
    set_session_calls: Mutex<Vec<(String, String)>>,
}

impl FakeProvider {
    fn new(initial: Option<Session>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            session: Mutex::new(initial),
            events,
            set_session_calls: Mutex::new(Vec::new()),
        }
    }

    fn install(&self, session: Session) {
        *self.session.lock().unwrap() = Some(session.clone());
        let _ = self.events.send(SessionEvent::SignedIn(session));
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn sign_in_with_password(&self, email: &str, _password: &str) -> Result<(), AuthError> {
        if email == "unknown@example.com" {
            return Err(AuthError::Provider {
                message: "Invalid login credentials".to_string(),
                status: Some(400),
            });
        }
        self.install(sample_session("password-token"));
        Ok(())
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<(), AuthError> {
        // Email verification pending: no session until verified.
        Ok(())
    }

    async fn authorize_url(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<String, AuthError> {
        Ok(format!(
            "https://id.example.com/authorize?provider={}&redirect_to={redirect_to}",
            provider.as_str()
        ))
    }

    async fn set_session(&self, access_token: &str, refresh_token: &str) -> Result<(), AuthError> {
        self.set_session_calls
            .lock()
            .unwrap()
            .push((access_token.to_string(), refresh_token.to_string()));
        self.install(sample_session(access_token));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        *self.session.lock().unwrap() = None;
        let _ = self.events.send(SessionEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

/// Browser stub that resolves to a fixed result.
struct FakeBrowser {
    result: WebAuthResult,
}

#[async_trait]
impl BrowserLauncher for FakeBrowser {
    async fn open_auth_session(
        &self,
        _url: &str,
        _redirect_uri: &str,
    ) -> Result<WebAuthResult, AuthError> {
        Ok(self.result.clone())
    }
}

/// Browser stub that never resolves, for timeout coverage.
struct UnresponsiveBrowser;

#[async_trait]
impl BrowserLauncher for UnresponsiveBrowser {
    async fn open_auth_session(
        &self,
        _url: &str,
        _redirect_uri: &str,
    ) -> Result<WebAuthResult, AuthError> {
        std::future::pending().await
    }
}

/// Waits until the observable state satisfies a predicate.
async fn wait_for_state<F>(manager: &SessionManager, pred: F) -> AuthState
where
    F: Fn(&AuthState) -> bool,
{
    let mut rx = manager.subscribe();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let state = rx.borrow_and_update().clone();
            if pred(&state) {
                return state;
            }
            rx.changed().await.expect("state channel closed");
        }
    })
    .await
    .expect("timed out waiting for auth state")
}

#[tokio::test]
async fn test_initial_fetch_resolves_loading_state() {
    let provider = Arc::new(FakeProvider::new(Some(sample_session("existing"))));
    let manager = SessionManager::start(provider);

    let state = wait_for_state(&manager, |s| !s.is_loading).await;
    assert!(state.is_authenticated());
    assert_eq!(state.user.unwrap().id, "user_1");
}

#[tokio::test]
async fn test_initial_fetch_without_session_is_unauthenticated() {
    let provider = Arc::new(FakeProvider::new(None));
    let manager = SessionManager::start(provider);

    let state = wait_for_state(&manager, |s| !s.is_loading).await;
    assert!(!state.is_authenticated());
    assert!(state.user.is_none());
}

#[tokio::test]
async fn test_email_sign_in_updates_state_via_subscription() {
    let provider = Arc::new(FakeProvider::new(None));
    let manager = SessionManager::start(provider.clone());
    wait_for_state(&manager, |s| !s.is_loading).await;

    manager
        .sign_in_with_email("user@example.com", "hunter2")
        .await
        .expect("sign-in should succeed");

    let state = wait_for_state(&manager, AuthState::is_authenticated).await;
    assert_eq!(
        state.session.unwrap().access_token,
        "password-token"
    );
}

#[tokio::test]
async fn test_email_sign_in_failure_leaves_state_unchanged() {
    let provider = Arc::new(FakeProvider::new(None));
    let manager = SessionManager::start(provider);
    wait_for_state(&manager, |s| !s.is_loading).await;

    let result = manager
        .sign_in_with_email("unknown@example.com", "hunter2")
        .await;
    assert!(matches!(
        result,
        Err(AuthError::Provider { status: Some(400), .. })
    ));
    assert!(!manager.state().is_authenticated());
}

#[tokio::test]
async fn test_sign_out_updates_state_via_subscription() {
    let provider = Arc::new(FakeProvider::new(Some(sample_session("existing"))));
    let manager = SessionManager::start(provider);
    wait_for_state(&manager, AuthState::is_authenticated).await;

    manager.sign_out().await.expect("sign-out should succeed");
    let state = wait_for_state(&manager, |s| !s.is_authenticated()).await;
    assert!(state.user.is_none());
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_oauth_establishes_session_from_fragment_tokens() {
    let provider = Arc::new(FakeProvider::new(None));
    let manager = SessionManager::start(provider.clone());
    wait_for_state(&manager, |s| !s.is_loading).await;

    let browser = FakeBrowser {
        result: WebAuthResult::Success {
            url: "rhythme://auth/callback#access_token=AAA&refresh_token=BBB".to_string(),
        },
    };
    manager
        .sign_in_with_oauth(OAuthProvider::Github, &browser)
        .await
        .expect("OAuth flow should succeed");

    let calls = provider.set_session_calls.lock().unwrap().clone();
    assert_eq!(calls, vec![("AAA".to_string(), "BBB".to_string())]);
    wait_for_state(&manager, AuthState::is_authenticated).await;
}

#[tokio::test]
async fn test_oauth_falls_back_to_query_tokens() {
    let provider = Arc::new(FakeProvider::new(None));
    let manager = SessionManager::start(provider.clone());
    wait_for_state(&manager, |s| !s.is_loading).await;

    let browser = FakeBrowser {
        result: WebAuthResult::Success {
            url: "rhythme://auth/callback?access_token=AAA&refresh_token=BBB".to_string(),
        },
    };
    manager
        .sign_in_with_oauth(OAuthProvider::Google, &browser)
        .await
        .expect("OAuth flow should succeed");

    let calls = provider.set_session_calls.lock().unwrap().clone();
    assert_eq!(calls, vec![("AAA".to_string(), "BBB".to_string())]);
}

#[tokio::test]
async fn test_oauth_without_tokens_or_session_fails() {
    let provider = Arc::new(FakeProvider::new(None));
    let manager = SessionManager::start(provider);
    wait_for_state(&manager, |s| !s.is_loading).await;

    let browser = FakeBrowser {
        result: WebAuthResult::Success {
            url: "rhythme://auth/callback#state=xyz".to_string(),
        },
    };
    let result = manager
        .sign_in_with_oauth(OAuthProvider::Github, &browser)
        .await;
    assert!(matches!(result, Err(AuthError::MissingTokens)));
}

#[tokio::test]
async fn test_oauth_without_tokens_accepts_existing_session() {
    let provider = Arc::new(FakeProvider::new(Some(sample_session("preset"))));
    let manager = SessionManager::start(provider);
    wait_for_state(&manager, |s| !s.is_loading).await;

    let browser = FakeBrowser {
        result: WebAuthResult::Success {
            url: "rhythme://auth/callback".to_string(),
        },
    };
    manager
        .sign_in_with_oauth(OAuthProvider::Github, &browser)
        .await
        .expect("existing session should count as success");
}

#[tokio::test]
async fn test_oauth_cancellation_is_distinct() {
    let provider = Arc::new(FakeProvider::new(None));
    let manager = SessionManager::start(provider);
    wait_for_state(&manager, |s| !s.is_loading).await;

    let browser = FakeBrowser {
        result: WebAuthResult::Cancelled,
    };
    let result = manager
        .sign_in_with_oauth(OAuthProvider::Apple, &browser)
        .await;
    assert!(matches!(result, Err(AuthError::Cancelled)));
}

#[tokio::test]
async fn test_oauth_times_out_when_browser_never_returns() {
    let provider = Arc::new(FakeProvider::new(None));
    let manager =
        SessionManager::start(provider).with_oauth_timeout(Duration::from_millis(50));
    wait_for_state(&manager, |s| !s.is_loading).await;

    let result = manager
        .sign_in_with_oauth(OAuthProvider::Github, &UnresponsiveBrowser)
        .await;
    assert!(matches!(result, Err(AuthError::TimedOut)));
}

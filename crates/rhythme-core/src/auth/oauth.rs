//! OAuth callback plumbing: redirect URIs and token extraction.

/// Application callback URL for browser-redirect OAuth flows.
///
/// Rendered as `<scheme>://<path>`, e.g. `rhythme://auth/callback`, which the
/// platform shell registers as a deep link.
#[derive(Debug, Clone)]
pub struct RedirectUri {
    scheme: String,
    path: String,
}

impl RedirectUri {
    /// Builds a redirect URI from an application scheme and callback path.
    pub fn new(scheme: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            path: path.into(),
        }
    }

    /// The redirect URI registered by this application.
    pub fn app_default() -> Self {
        Self::new("rhythme", "auth/callback")
    }
}

impl std::fmt::Display for RedirectUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}", self.scheme, self.path)
    }
}

/// Extracts an `access_token`/`refresh_token` pair from an OAuth callback
/// URL.
///
/// Providers deliver tokens in either the fragment or the query string; the
/// fragment is checked first and the query string is consulted only when the
/// fragment yields nothing. Returns `None` when neither carries both tokens.
pub fn extract_tokens(callback_url: &str) -> Option<(String, String)> {
    if let Some((_, fragment)) = callback_url.split_once('#') {
        if let Some(pair) = tokens_from_pairs(fragment) {
            return Some(pair);
        }
    }

    if let Some((_, rest)) = callback_url.split_once('?') {
        let query = rest.split('#').next().unwrap_or(rest);
        if let Some(pair) = tokens_from_pairs(query) {
            return Some(pair);
        }
    }

    None
}

/// Pulls both tokens out of a `key=value&key=value` parameter list.
fn tokens_from_pairs(params: &str) -> Option<(String, String)> {
    let mut access_token = None;
    let mut refresh_token = None;

    for pair in params.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "access_token" => access_token = Some(value.to_string()),
            "refresh_token" => refresh_token = Some(value.to_string()),
            _ => {}
        }
    }

    Some((access_token?, refresh_token?))
}

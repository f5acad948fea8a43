//! Session gate.
//!
//! Flow Overview: read the `jwt` cookie, build a [`RequestContext`] from it, and
//! attach the context to the request before any route runs. The gate never
//! rejects a request and never inspects the token; handlers decide what an
//! anonymous request may do.

use axum::{
    extract::Request,
    http::{header::COOKIE, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

pub const SESSION_COOKIE_NAME: &str = "jwt";

/// Per-request authentication state attached by [`authenticate`].
///
/// Handlers take it as `Extension<RequestContext>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    // `Some` exactly when the session cookie was present.
    token: Option<String>,
}

impl RequestContext {
    #[must_use]
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    #[must_use]
    pub fn authenticated(token: String) -> Self {
        Self { token: Some(token) }
    }

    /// Classify a request by the presence of the session cookie.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        extract_session_token(headers).map_or_else(Self::anonymous, Self::authenticated)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Raw cookie value. Not verified.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Middleware that annotates every request with a [`RequestContext`] and then
/// hands it to the rest of the stack.
pub async fn authenticate(mut request: Request, next: Next) -> Response {
    let context = RequestContext::from_headers(request.headers());

    debug!(
        authenticated = context.is_authenticated(),
        "session cookie classified"
    );

    request.extensions_mut().insert(context);

    next.run(request).await
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    // HTTP/2 clients may split cookies across several headers.
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let Some((key, val)) = pair.split_once('=') else {
                continue;
            };
            if key.trim() != SESSION_COOKIE_NAME {
                continue;
            }
            let val = val.trim();
            let val = val
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(val);
            // An empty value is the same as no cookie.
            return (!val.is_empty()).then(|| val.to_string());
        }
    }
    None
}

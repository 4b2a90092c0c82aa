//! Session cookie handling

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

pub const SESSION_COOKIE: &str = "snipx_session";

/// The session token from the request's `Cookie` headers, if any
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// `Set-Cookie` value that stores `token` for `max_age_secs`
pub fn session_cookie(token: &str, max_age_secs: i64) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    ))
    .ok()
}

/// `Set-Cookie` value that removes the session cookie
pub fn cleared_session_cookie() -> HeaderValue {
    HeaderValue::from_static("snipx_session=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

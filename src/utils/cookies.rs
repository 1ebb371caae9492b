//! Cookie helpers for the browser flows

use axum::http::{HeaderMap, HeaderValue, header};

use crate::config::SessionConfig;

/// Read a cookie value from the request headers
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

fn build(name: &str, value: &str, max_age: Option<i64>, secure: bool) -> Option<HeaderValue> {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, value);
    if let Some(max_age) = max_age {
        cookie.push_str(&format!("; Max-Age={}", max_age));
    }
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

/// `Set-Cookie` value carrying the access token
pub fn session_cookie(session: &SessionConfig, token: &str, max_age: i64) -> Option<HeaderValue> {
    build(&session.cookie_name, token, Some(max_age), session.secure)
}

/// `Set-Cookie` value expiring a cookie immediately
pub fn expired_cookie(name: &str, secure: bool) -> Option<HeaderValue> {
    build(name, "", Some(0), secure)
}

/// `Set-Cookie` value for a browser-session cookie
pub fn transient_cookie(name: &str, value: &str, secure: bool) -> Option<HeaderValue> {
    build(name, value, None, secure)
}

//! Cross-origin handling.
//!
//! Which origins get an `access-control-allow-origin` header is decided in
//! exactly one place, [`OriginPolicy`]. The shipped policy reflects whatever
//! `Origin` the browser sent.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

pub const ALLOWED_METHODS: &str = "GET,HEAD,PUT,OPTIONS";
pub const PREFLIGHT_MAX_AGE_SECS: u32 = 86400;

/// Decides the allowed origin for a request `Origin`.
pub trait OriginPolicy: Send + Sync {
    /// `None` means the origin gets no allow header.
    fn allow_origin(&self, origin: &HeaderValue) -> Option<HeaderValue>;
}

/// Echo every origin back unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectOrigin;

impl OriginPolicy for ReflectOrigin {
    fn allow_origin(&self, origin: &HeaderValue) -> Option<HeaderValue> {
        Some(origin.clone())
    }
}

/// Allowed origin for the request in `headers`, if it carries one the policy accepts.
pub fn allowed_origin(headers: &HeaderMap, policy: &dyn OriginPolicy) -> Option<HeaderValue> {
    headers.get(ORIGIN).and_then(|origin| policy.allow_origin(origin))
}

/// Answer an OPTIONS request.
///
/// 200 with the allow headers when `Origin` plus a requested method or
/// requested headers are present, otherwise a bare 400.
pub fn preflight_response(headers: &HeaderMap, policy: &dyn OriginPolicy) -> Response {
    let requested_headers = headers.get(ACCESS_CONTROL_REQUEST_HEADERS);
    let is_preflight = requested_headers.is_some() || headers.contains_key(ACCESS_CONTROL_REQUEST_METHOD);

    let allowed = if is_preflight {
        allowed_origin(headers, policy)
    } else {
        None
    };

    let Some(allowed) = allowed else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut response = StatusCode::OK.into_response();
    let out = response.headers_mut();
    out.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allowed);
    out.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS));
    out.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        requested_headers
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("")),
    );
    out.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from(PREFLIGHT_MAX_AGE_SECS));
    response
}

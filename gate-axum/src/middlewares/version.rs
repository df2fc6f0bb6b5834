use axum::http::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

/// Response header carrying the deployed build's version string.
pub const SERVICE_VERSION: HeaderName = HeaderName::from_static("service-version");

/// Stamp `service-version: <version>` on every response, errors included.
pub fn service_version_layer(version: &str) -> SetResponseHeaderLayer<HeaderValue> {
    let value = HeaderValue::from_str(version).unwrap_or_else(|_| {
        tracing::warn!(version, "service version is not a valid header value");
        HeaderValue::from_static("unknown")
    });
    SetResponseHeaderLayer::overriding(SERVICE_VERSION, value)
}

use std::sync::Arc;

use axum::http::{header::HOST, HeaderMap, Uri};
use gate_blob::MediaAdapter;

use crate::cors::{OriginPolicy, ReflectOrigin};

/// How upload responses build their retrieval link.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub scheme: String,
    /// Fixed public host; when unset the request's `Host` is used
    pub host: Option<String>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            host: None,
        }
    }
}

impl LinkConfig {
    pub fn new<S: Into<String>>(scheme: S) -> Self {
        Self {
            scheme: scheme.into(),
            host: None,
        }
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Configured host, else `Host` header, else the URI authority.
    pub fn host_for(&self, headers: &HeaderMap, uri: &Uri) -> Option<String> {
        if let Some(host) = &self.host {
            return Some(host.clone());
        }

        headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .or_else(|| uri.authority().map(|a| a.to_string()))
    }
}

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct GateState {
    pub adapter: Arc<MediaAdapter>,
    pub origins: Arc<dyn OriginPolicy>,
    pub links: LinkConfig,
}

impl GateState {
    pub fn new(adapter: MediaAdapter) -> Self {
        Self {
            adapter: Arc::new(adapter),
            origins: Arc::new(ReflectOrigin),
            links: LinkConfig::default(),
        }
    }

    pub fn with_origin_policy<P: OriginPolicy + 'static>(mut self, policy: P) -> Self {
        self.origins = Arc::new(policy);
        self
    }

    pub fn with_links(mut self, links: LinkConfig) -> Self {
        self.links = links;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn configured_host_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("internal:3030"));
        let links = LinkConfig::new("https").with_host("media.example.com");

        let uri: Uri = "/".parse().unwrap();
        assert_eq!(links.host_for(&headers, &uri).as_deref(), Some("media.example.com"));
    }

    #[test]
    fn host_header_then_authority() {
        let links = LinkConfig::default();
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("cdn.example"));
        let uri: Uri = "/".parse().unwrap();
        assert_eq!(links.host_for(&headers, &uri).as_deref(), Some("cdn.example"));

        let absolute: Uri = "http://from-uri.example/".parse().unwrap();
        assert_eq!(links.host_for(&HeaderMap::new(), &absolute).as_deref(), Some("from-uri.example"));

        assert_eq!(links.host_for(&HeaderMap::new(), &uri), None);
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque blob identifier, used both as storage key and URL path segment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobId(pub String);

impl BlobId {
    /// Generate a new random blob ID: 32 lowercase hex characters, no separators.
    ///
    /// Backed by a v4 UUID drawn from the OS random source. No collision check
    /// is made against storage; the entropy makes that unnecessary.
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Accept an identifier taken from a request path.
    ///
    /// Returns `None` unless the token is one or more ASCII alphanumerics.
    pub fn parse(token: &str) -> Option<Self> {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some(Self(token.to_string()))
        } else {
            None
        }
    }

    /// Create from existing string
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request to store a blob
#[derive(Debug, Clone, Default)]
pub struct BlobPut {
    /// Declared content-type, verbatim from the request
    pub content_type: Option<String>,
    /// Declared body length, if the transport knows it up front
    pub size_hint: Option<u64>,
}

impl BlobPut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_size_hint(mut self, size: u64) -> Self {
        self.size_hint = Some(size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_ids_are_32_lowercase_hex() {
        let id = BlobId::new();
        assert_eq!(id.as_str().len(), 32);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn new_ids_do_not_repeat() {
        let ids: HashSet<BlobId> = (0..5000).map(|_| BlobId::new()).collect();
        assert_eq!(ids.len(), 5000);
    }

    #[test]
    fn parse_accepts_alphanumeric_tokens_only() {
        assert_eq!(BlobId::parse("abc123XYZ").unwrap().as_str(), "abc123XYZ");
        assert!(BlobId::parse("").is_none());
        assert!(BlobId::parse("abc-123").is_none());
        assert!(BlobId::parse("../etc").is_none());
    }

    #[test]
    fn generated_ids_parse_back() {
        let id = BlobId::new();
        assert_eq!(BlobId::parse(id.as_str()), Some(id));
    }
}

//! # Errors
//!
//! mediagate classifies every failure into a small, HTTP-shaped taxonomy:
//! - client input problems (bad content-type, bad extension, bad signature)
//! - missing blobs
//! - storage faults that the gateway cannot recover from
//!
//! A [`GateError`] can be carried through `anyhow::Error`, so lower layers
//! stay free to use `?` while the transport decides how to serialize.
//!
//! If you enable feature `serde`, you also get `to_json()` producing the
//! `{"error": "<message>"}` payload the gateway returns to clients.

use std::fmt;

use anyhow::Error as AnyError;

/// Error classes and their status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,   // 400
    NotFound,     // 404
    GeneralError, // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::GeneralError => 500,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::GeneralError => "GeneralError",
        }
    }

    /// True for the 4xx range, i.e. the caller can fix the request.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

/// A structured gateway error that can live inside `anyhow::Error`.
#[derive(Debug)]
pub struct GateError {
    pub kind: ErrorKind,
    pub message: String,
    pub source: Option<AnyError>,
}

impl GateError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Convert into `anyhow::Error`.
    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// First `GateError` anywhere in the chain of an `anyhow::Error`.
    pub fn from_anyhow(err: &AnyError) -> Option<&GateError> {
        err.chain().find_map(|e| e.downcast_ref::<GateError>())
    }

    /// Copy suitable for returning to clients. The inner `source` is dropped.
    pub fn sanitize_for_client(&self) -> GateError {
        GateError {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }

    // ---- Constructors ----

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn general_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::GeneralError, msg)
    }
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for GateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(feature = "serde")]
impl GateError {
    /// Client payload: `{"error": "<message>"}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_anyhow_finds_gate_error_under_context() {
        let err = GateError::not_found("not found")
            .into_anyhow()
            .context("while opening blob");
        let gate = GateError::from_anyhow(&err).unwrap();
        assert_eq!(gate.kind, ErrorKind::NotFound);
        assert_eq!(gate.code(), 404);
    }

    #[test]
    fn from_anyhow_ignores_foreign_errors() {
        assert!(GateError::from_anyhow(&anyhow::anyhow!("disk on fire")).is_none());
    }

    #[test]
    fn sanitize_drops_source() {
        let gate = GateError::general_error("storage failure").with_source(anyhow::anyhow!("secret"));
        let safe = gate.sanitize_for_client();
        assert!(safe.source.is_none());
        assert_eq!(safe.message, "storage failure");
    }

    #[test]
    fn display_names_kind_and_code() {
        let gate = GateError::bad_request("unknown extension");
        assert_eq!(gate.to_string(), "BadRequest (400): unknown extension");
    }

    #[test]
    fn client_error_range() {
        assert!(ErrorKind::BadRequest.is_client_error());
        assert!(ErrorKind::NotFound.is_client_error());
        assert!(!ErrorKind::GeneralError.is_client_error());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_payload_has_error_field_only() {
        let json = GateError::bad_request("unknown content-type").to_json();
        assert_eq!(json, serde_json::json!({"error": "unknown content-type"}));
    }
}

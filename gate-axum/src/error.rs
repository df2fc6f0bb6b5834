use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gate_blob::BlobError;
use gate_core::errors::GateError;

#[derive(Debug)]
pub struct GateAxumError(pub anyhow::Error);

impl From<anyhow::Error> for GateAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl From<GateError> for GateAxumError {
    fn from(e: GateError) -> Self {
        Self(e.into_anyhow())
    }
}

impl From<BlobError> for GateAxumError {
    fn from(e: BlobError) -> Self {
        gate_error_from_blob(e).into()
    }
}

/// Map the media taxonomy onto HTTP error classes.
///
/// Client input keeps its message; storage faults are reduced to a generic
/// message with the original kept as `source` for logs.
pub fn gate_error_from_blob(e: BlobError) -> GateError {
    if e.is_client_input() {
        return GateError::bad_request(e.to_string());
    }
    if e.is_storage_fault() {
        return GateError::general_error("storage failure").with_source(anyhow::Error::new(e));
    }
    GateError::not_found("not found")
}

impl IntoResponse for GateAxumError {
    fn into_response(self) -> Response {
        let gate = match GateError::from_anyhow(&self.0) {
            Some(gate) => gate.sanitize_for_client(),
            // Anything that is not a GateError is an internal failure; never echo it.
            None => GateError::general_error("internal error"),
        };

        if gate.kind.is_client_error() {
            tracing::debug!(status = gate.code(), message = %gate.message, "request rejected");
        } else {
            tracing::error!(status = gate.code(), error = ?self.0, "request failed");
        }

        let status = StatusCode::from_u16(gate.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(gate.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_core::ErrorKind;

    #[test]
    fn client_input_maps_to_bad_request() {
        let gate = gate_error_from_blob(BlobError::InvalidSignature { extension: "gif".into() });
        assert_eq!(gate.kind, ErrorKind::BadRequest);
        assert_eq!(gate.message, "invalid gif");

        let gate = gate_error_from_blob(BlobError::TooLarge { limit: 10 });
        assert_eq!(gate.kind, ErrorKind::BadRequest);
    }

    #[test]
    fn not_found_maps_to_404() {
        let gate = gate_error_from_blob(BlobError::not_found("abc"));
        assert_eq!(gate.code(), 404);
        assert_eq!(gate.message, "not found");
    }

    #[test]
    fn storage_faults_hide_details() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "bucket credentials expired");
        let gate = gate_error_from_blob(BlobError::backend(io));
        assert_eq!(gate.code(), 500);
        assert_eq!(gate.message, "storage failure");
        assert!(gate.source.is_some());

        let gate = gate_error_from_blob(BlobError::AlreadyExists { key: "abc".into() });
        assert_eq!(gate.code(), 500);
        assert_eq!(gate.message, "storage failure");
    }

    #[test]
    fn foreign_errors_become_500() {
        let res = GateAxumError(anyhow::anyhow!("boom")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

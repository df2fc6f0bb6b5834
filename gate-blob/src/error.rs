use thiserror::Error;

/// Result type for blob operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Errors that can occur during ingestion and retrieval
#[derive(Error, Debug)]
pub enum BlobError {
    /// Declared content-type is missing or not in the media registry
    #[error("unknown content-type")]
    UnknownContentType { content_type: Option<String> },

    /// URL extension is not in the media registry
    #[error("unknown extension")]
    UnknownExtension { extension: String },

    /// Body bytes do not carry a signature of the claimed format
    #[error("invalid {extension}")]
    InvalidSignature { extension: String },

    #[error("upload exceeds maximum size of {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("Blob not found: {id}")]
    NotFound { id: String },

    /// Refused overwrite of an already persisted key
    #[error("Blob already exists: {key}")]
    AlreadyExists { key: String },

    #[error("Storage backend error: {source}")]
    Backend {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl BlobError {
    /// Create a backend error from any error type
    pub fn backend<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend {
            source: Box::new(error),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Caller-correctable input problem (maps to a 400 at the transport).
    pub fn is_client_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownContentType { .. }
                | Self::UnknownExtension { .. }
                | Self::InvalidSignature { .. }
                | Self::TooLarge { .. }
        )
    }

    /// Failure at the storage boundary (maps to a 5xx at the transport).
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            Self::Backend { .. } | Self::AlreadyExists { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_match_wire_contract() {
        let unknown = BlobError::UnknownContentType { content_type: Some("text/plain".into()) };
        assert_eq!(unknown.to_string(), "unknown content-type");

        let ext = BlobError::UnknownExtension { extension: "txt".into() };
        assert_eq!(ext.to_string(), "unknown extension");

        let sig = BlobError::InvalidSignature { extension: "png".into() };
        assert_eq!(sig.to_string(), "invalid png");
    }

    #[test]
    fn classification() {
        assert!(BlobError::TooLarge { limit: 10 }.is_client_input());
        assert!(!BlobError::not_found("abc").is_client_input());
        assert!(!BlobError::not_found("abc").is_storage_fault());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert!(BlobError::backend(io).is_storage_fault());
        assert!(BlobError::AlreadyExists { key: "k".into() }.is_storage_fault());
    }
}

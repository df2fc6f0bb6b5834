use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error, info, warn};

use crate::{
    BlobConfig, BlobError, BlobId, BlobPut, BlobReceipt, BlobResult, BlobStore, GetResult,
    MediaRegistry, OpenedBlob, SignatureValidator,
};

/// Upload and retrieval orchestration over a [`BlobStore`].
///
/// Transport-agnostic: HTTP handlers, CLIs or background jobs drive the same
/// pipeline. The media tables are shared read-only, so one adapter serves any
/// number of concurrent requests.
pub struct MediaAdapter {
    store: Arc<dyn BlobStore>,
    registry: Arc<MediaRegistry>,
    signatures: Arc<SignatureValidator>,
    config: BlobConfig,
}

impl MediaAdapter {
    /// Create an adapter with the standard media tables
    pub fn new<S: BlobStore + 'static>(store: S, config: BlobConfig) -> Self {
        Self::with_tables(
            Arc::new(store),
            MediaRegistry::standard(),
            SignatureValidator::standard(),
            config,
        )
    }

    /// Create with custom tables
    pub fn with_tables(
        store: Arc<dyn BlobStore>,
        registry: MediaRegistry,
        signatures: SignatureValidator,
        config: BlobConfig,
    ) -> Self {
        Self {
            store,
            registry: Arc::new(registry),
            signatures: Arc::new(signatures),
            config,
        }
    }

    /// Checks that need no body: declared type and declared size.
    ///
    /// Returns the extension for the declared type. Transports call this
    /// before buffering so bad requests fail without reading the body.
    pub fn precheck(&self, put: &BlobPut) -> BlobResult<&str> {
        let extension = self.resolve_declared(put.content_type.as_deref())?;

        if let Some(size) = put.size_hint {
            self.check_size(size)?;
        }

        Ok(extension)
    }

    /// Validate and persist a fully buffered upload.
    ///
    /// Declared type → size → signature → fresh id → store. Nothing is
    /// written unless every check passes.
    pub async fn put(&self, put: BlobPut, body: Bytes) -> BlobResult<BlobReceipt> {
        let extension = self.precheck(&put)?.to_string();
        self.check_size(body.len() as u64)?;

        if !self.signatures.validate(&body, &extension) {
            warn!(extension = %extension, size = body.len(), "signature mismatch");
            return Err(BlobError::InvalidSignature { extension });
        }

        let id = BlobId::new();
        let size_bytes = body.len() as u64;

        if let Err(e) = self.store.put(id.as_str(), body).await {
            error!(id = %id, store = self.store.name(), error = %e, "failed to persist blob");
            return Err(e);
        }

        info!(id = %id, extension = %extension, size = size_bytes, "blob stored");
        Ok(BlobReceipt::new(id, extension, size_bytes))
    }

    /// Open a blob for reading by id and URL extension.
    ///
    /// The extension is checked before storage is touched; the content-type
    /// comes from the extension alone.
    pub async fn open(&self, id: &BlobId, extension: &str) -> BlobResult<OpenedBlob> {
        let content_type = self
            .registry
            .canonical_type_for(extension)
            .ok_or_else(|| BlobError::UnknownExtension {
                extension: extension.to_string(),
            })?
            .to_string();

        let result = self.store.get(id.as_str()).await.map_err(|e| {
            error!(id = %id, store = self.store.name(), error = %e, "failed to fetch blob");
            e
        })?;

        match result {
            GetResult::Found(bytes) => {
                debug!(id = %id, size = bytes.len(), "blob served");
                Ok(OpenedBlob {
                    id: id.clone(),
                    extension: extension.to_string(),
                    content_type,
                    bytes,
                })
            }
            GetResult::NotFound => Err(BlobError::not_found(id.as_str())),
        }
    }

    fn resolve_declared(&self, content_type: Option<&str>) -> BlobResult<&str> {
        let declared = content_type.unwrap_or_default();
        self.registry.extension_for(declared).ok_or_else(|| {
            debug!(content_type = ?content_type, "unknown content-type");
            BlobError::UnknownContentType {
                content_type: content_type.map(str::to_string),
            }
        })
    }

    fn check_size(&self, size: u64) -> BlobResult<()> {
        if size > self.config.max_blob_bytes {
            return Err(BlobError::TooLarge {
                limit: self.config.max_blob_bytes,
            });
        }
        Ok(())
    }

    /// Get configuration
    pub fn config(&self) -> &BlobConfig {
        &self.config
    }
}

/// Configuration for ingestion
#[derive(Debug, Clone)]
pub struct BlobConfig {
    /// Absolute max size allowed for a single upload (safety guard)
    pub max_blob_bytes: u64,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            max_blob_bytes: 32 * 1024 * 1024, // 32MB
        }
    }
}

impl BlobConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max blob size
    pub fn with_max_blob_bytes(mut self, bytes: u64) -> Self {
        self.max_blob_bytes = bytes;
        self
    }

    /// Max blob size as a buffer length, saturating on 32-bit targets.
    pub fn max_blob_len(&self) -> usize {
        usize::try_from(self.max_blob_bytes).unwrap_or(usize::MAX)
    }
}

use async_trait::async_trait;
use bytes::Bytes;

use crate::BlobResult;

/// Flat key-value storage for blob bytes - implemented by every backend.
///
/// Both operations are expected to be atomic per key. A missing key is not an
/// error: `get` reports it as [`GetResult::NotFound`] so callers can tell it
/// apart from a storage fault (`Err`).
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `bytes` under `key`
    async fn put(&self, key: &str, bytes: Bytes) -> BlobResult<()>;

    /// Fetch the bytes stored under `key`
    async fn get(&self, key: &str) -> BlobResult<GetResult>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

/// Outcome of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetResult {
    Found(Bytes),
    NotFound,
}

impl GetResult {
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            GetResult::Found(bytes) => Some(bytes),
            GetResult::NotFound => None,
        }
    }
}

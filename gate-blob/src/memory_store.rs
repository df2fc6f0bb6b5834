use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{BlobError, BlobResult, BlobStore, GetResult};

/// In-process blob store. Keys are write-once.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: Bytes) -> BlobResult<()> {
        let mut blobs = self.blobs.write().await;
        if blobs.contains_key(key) {
            return Err(BlobError::AlreadyExists { key: key.to_string() });
        }
        blobs.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> BlobResult<GetResult> {
        let blobs = self.blobs.read().await;
        Ok(blobs
            .get(key)
            .cloned()
            .map(GetResult::Found)
            .unwrap_or(GetResult::NotFound))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get() {
        let store = MemoryBlobStore::new();
        store.put("abc", Bytes::from_static(b"hello")).await.unwrap();

        assert_eq!(
            store.get("abc").await.unwrap(),
            GetResult::Found(Bytes::from_static(b"hello"))
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn missing_key_is_not_found_not_error() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get("nope").await.unwrap(), GetResult::NotFound);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn keys_are_write_once() {
        let store = MemoryBlobStore::new();
        store.put("abc", Bytes::from_static(b"first")).await.unwrap();

        let err = store.put("abc", Bytes::from_static(b"second")).await.unwrap_err();
        assert!(matches!(err, BlobError::AlreadyExists { .. }));

        let bytes = store.get("abc").await.unwrap().into_bytes().unwrap();
        assert_eq!(&bytes[..], b"first");
    }

    #[tokio::test]
    async fn clones_share_contents() {
        let store = MemoryBlobStore::new();
        let other = store.clone();
        store.put("k", Bytes::from_static(b"v")).await.unwrap();
        assert!(other.get("k").await.unwrap().into_bytes().is_some());
    }
}

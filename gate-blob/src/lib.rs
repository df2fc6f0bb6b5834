//! # gate-blob: media validation and blob storage for mediagate
//!
//! `gate-blob` owns everything between "here are some bytes and a declared
//! content-type" and "the bytes are stored under an opaque id":
//!
//! - **Media registry**: declared content-type → extension → canonical content-type
//! - **Signature validation**: leading magic bytes must match the claimed format
//! - **Identifiers**: 32-character lowercase hex tokens from a v4 UUID
//! - **Storage agnostic**: any flat key-value backend (memory, S3, custom)
//! - **Server agnostic**: no HTTP coupling
//!
//! ## Quick Start
//!
//! ```rust
//! use gate_blob::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> BlobResult<()> {
//! let adapter = MediaAdapter::new(MemoryBlobStore::new(), BlobConfig::default());
//!
//! let png = bytes::Bytes::from_static(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
//! let receipt = adapter
//!     .put(BlobPut::new().with_content_type("image/x-png"), png)
//!     .await?;
//!
//! let opened = adapter.open(&receipt.id, &receipt.extension).await?;
//! assert_eq!(opened.content_type, "image/png");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │   Transport (HTTP)   │  ← request parsing, responses
//! ├──────────────────────┤
//! │     MediaAdapter     │  ← registry + signatures + ids
//! ├──────────────────────┤
//! │      BlobStore       │  ← get/put by key
//! └──────────────────────┘
//! ```

pub mod adapter;
mod config;
mod error;
pub mod media;
mod memory_store;
mod receipt;
mod s3_store;
pub mod signature;
pub mod store;
mod types;

// Re-export main types for clean API
pub use adapter::MediaAdapter;
pub use config::BlobConfig;
pub use error::{BlobError, BlobResult};
pub use media::{MediaRegistry, MediaTypeEntry};
pub use memory_store::MemoryBlobStore;
pub use receipt::{BlobReceipt, OpenedBlob};
pub use s3_store::{S3BlobStore, S3Config};
pub use signature::{SignatureRule, SignatureValidator, SIGNATURE_WINDOW};
pub use store::{BlobStore, GetResult};
pub use types::{BlobId, BlobPut};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BlobConfig, BlobError, BlobId, BlobPut, BlobReceipt, BlobResult, BlobStore,
        MediaAdapter, MemoryBlobStore,
    };
}

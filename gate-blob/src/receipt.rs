use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::BlobId;

/// Receipt returned after successfully storing a blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobReceipt {
    pub id: BlobId,
    /// Extension resolved from the declared content-type
    pub extension: String,
    pub size_bytes: u64,
}

impl BlobReceipt {
    pub fn new(id: BlobId, extension: String, size_bytes: u64) -> Self {
        Self {
            id,
            extension,
            size_bytes,
        }
    }

    /// `<id>.<extension>`, the retrieval path segment
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.id, self.extension)
    }

    /// Public retrieval link: `<scheme>://<host>/<id>.<extension>`
    pub fn link(&self, scheme: &str, host: &str) -> String {
        format!("{}://{}/{}", scheme, host, self.file_name())
    }
}

/// Result of opening a blob for reading
#[derive(Debug, Clone)]
pub struct OpenedBlob {
    pub id: BlobId,
    pub extension: String,
    /// Canonical content-type for `extension`, never the type declared at upload
    pub content_type: String,
    pub bytes: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_shape() {
        let receipt = BlobReceipt::new(BlobId::from_string("abc123".into()), "png".into(), 10);
        assert_eq!(receipt.file_name(), "abc123.png");
        assert_eq!(receipt.link("https", "media.example.com"), "https://media.example.com/abc123.png");
    }

    #[test]
    fn receipt_serializes_id_as_plain_string() {
        let receipt = BlobReceipt::new(BlobId::from_string("abc".into()), "gif".into(), 3);
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["extension"], "gif");
        assert_eq!(json["size_bytes"], 3);
    }
}

use gate_blob::BlobId;

/// Typed captures of a retrieval path: `/<id>.<extension>`.
///
/// `<id>` is one or more ASCII alphanumerics; `<extension>` is everything
/// after the single dot and must be alphanumeric too. Whether the extension
/// is *known* is the media registry's call, not the parser's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobPath {
    pub id: BlobId,
    pub extension: String,
}

impl BlobPath {
    /// Parse a full URI path such as `/abc123.png`.
    pub fn parse(path: &str) -> Option<Self> {
        Self::from_segment(path.strip_prefix('/')?)
    }

    /// Parse a single path segment such as `abc123.png`.
    pub fn from_segment(segment: &str) -> Option<Self> {
        let (token, extension) = segment.split_once('.')?;
        if extension.is_empty() || !extension.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }

        Some(Self {
            id: BlobId::parse(token)?,
            extension: extension.to_string(),
        })
    }
}

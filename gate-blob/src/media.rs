//! Declared content-type ↔ extension ↔ canonical content-type mapping.
//!
//! The mapping is lossy on purpose: `image/x-png` and `image/png` both
//! resolve to `png`, and `png` is always served back as `image/png`.

/// One row of the media table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTypeEntry {
    /// Content-type as declared by uploaders
    pub declared_type: String,
    /// Three lowercase ASCII letters or digits
    pub extension: String,
    /// Content-type emitted on retrieval for `extension`
    pub canonical_type: String,
}

impl MediaTypeEntry {
    pub fn new(declared_type: &str, extension: &str, canonical_type: &str) -> Self {
        debug_assert!(
            extension.len() == 3 && extension.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()),
            "extension tokens are three lowercase ASCII letters or digits"
        );
        Self {
            declared_type: declared_type.to_string(),
            extension: extension.to_string(),
            canonical_type: canonical_type.to_string(),
        }
    }
}

/// Immutable lookup table, built once at startup and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct MediaRegistry {
    entries: Vec<MediaTypeEntry>,
    /// Retrieval-only extension spellings: (alias, extension)
    aliases: Vec<(String, String)>,
}

impl MediaRegistry {
    /// A registry with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The formats the gateway accepts out of the box.
    pub fn standard() -> Self {
        Self::empty()
            .with_entry(MediaTypeEntry::new("image/jpeg", "jpg", "image/jpeg"))
            .with_entry(MediaTypeEntry::new("image/gif", "gif", "image/gif"))
            .with_entry(MediaTypeEntry::new("image/x-png", "png", "image/png"))
            .with_entry(MediaTypeEntry::new("image/png", "png", "image/png"))
            .with_entry(MediaTypeEntry::new("video/mp4", "mp4", "video/mp4"))
            .with_entry(MediaTypeEntry::new("video/quicktime", "mov", "video/quicktime"))
            .with_alias("jpeg", "jpg")
    }

    /// Append an entry. Earlier entries win on lookup.
    pub fn with_entry(mut self, entry: MediaTypeEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Accept `alias` in retrieval URLs as another spelling of `extension`.
    pub fn with_alias(mut self, alias: &str, extension: &str) -> Self {
        self.aliases.push((alias.to_string(), extension.to_string()));
        self
    }

    /// Extension for a declared content-type. `None` means unknown content-type.
    pub fn extension_for(&self, declared_type: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.declared_type == declared_type)
            .map(|e| e.extension.as_str())
    }

    /// Canonical content-type for an extension (or alias). `None` means unknown extension.
    pub fn canonical_type_for(&self, extension: &str) -> Option<&str> {
        let extension = self.resolve_alias(extension);
        self.entries
            .iter()
            .find(|e| e.extension == extension)
            .map(|e| e.canonical_type.as_str())
    }

    /// Map an alias onto its extension; anything else passes through.
    pub fn resolve_alias<'a>(&'a self, extension: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(alias, _)| alias == extension)
            .map(|(_, ext)| ext.as_str())
            .unwrap_or(extension)
    }

    pub fn entries(&self) -> &[MediaTypeEntry] {
        &self.entries
    }
}

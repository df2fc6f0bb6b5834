//! Magic-byte checks: does a buffer start like the format it claims to be?

use std::collections::HashMap;

/// Only this many leading bytes are ever inspected.
pub const SIGNATURE_WINDOW: usize = 32;

/// A byte pattern expected at a fixed offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureRule {
    pub offset: usize,
    pub pattern: Vec<u8>,
}

impl SignatureRule {
    pub fn new(offset: usize, pattern: &[u8]) -> Self {
        Self {
            offset,
            pattern: pattern.to_vec(),
        }
    }

    /// Every pattern byte must be present at `offset + i`; running off the
    /// end of `window` is a mismatch.
    pub fn matches(&self, window: &[u8]) -> bool {
        self.pattern
            .iter()
            .enumerate()
            .all(|(i, expected)| window.get(self.offset + i) == Some(expected))
    }
}

const JPEG_MARKERS: [&[u8]; 4] = [
    &[0xFF, 0xD8, 0xFF, 0xDB],
    &[0xFF, 0xD8, 0xFF, 0xE0],
    &[0xFF, 0xD8, 0xFF, 0xE1],
    &[0xFF, 0xD8, 0xFF, 0xEE],
];

/// Per-extension rule table. A buffer passes when any rule for the
/// extension matches; extensions without rules always pass.
#[derive(Debug, Clone, Default)]
pub struct SignatureValidator {
    rules: HashMap<String, Vec<SignatureRule>>,
}

impl SignatureValidator {
    /// A validator with no rules; everything passes.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut validator = Self::empty();

        for ext in ["jpg", "jpeg"] {
            for marker in JPEG_MARKERS {
                validator = validator.with_rule(ext, SignatureRule::new(0, marker));
            }
        }

        validator
            .with_rule("gif", SignatureRule::new(0, b"GIF87a"))
            .with_rule("gif", SignatureRule::new(0, b"GIF89a"))
            .with_rule("png", SignatureRule::new(0, &[0x89, 0x50, 0x4E, 0x47]))
            .with_rule("mp4", SignatureRule::new(0, b"ftypisom"))
            .with_rule("mp4", SignatureRule::new(0, b"ftypMSNV"))
            .with_rule("mov", SignatureRule::new(4, b"ftypqt  "))
    }

    /// Append a rule for `extension`. Rules are evaluated in insertion order.
    pub fn with_rule(mut self, extension: &str, rule: SignatureRule) -> Self {
        self.rules.entry(extension.to_string()).or_default().push(rule);
        self
    }

    pub fn rules_for(&self, extension: &str) -> &[SignatureRule] {
        self.rules.get(extension).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check the leading bytes of `buffer` against the rules for `extension`.
    pub fn validate(&self, buffer: &[u8], extension: &str) -> bool {
        let rules = self.rules_for(extension);
        if rules.is_empty() {
            return true;
        }

        let window = &buffer[..buffer.len().min(SIGNATURE_WINDOW)];
        rules.iter().any(|rule| rule.matches(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(prefix: &[u8]) -> Vec<u8> {
        let mut buf = prefix.to_vec();
        buf.extend_from_slice(&[0u8; 64]);
        buf
    }

    #[test]
    fn jpeg_markers_pass_for_both_spellings() {
        let validator = SignatureValidator::standard();
        for marker in JPEG_MARKERS {
            assert!(validator.validate(&padded(marker), "jpg"));
            assert!(validator.validate(&padded(marker), "jpeg"));
        }
        assert!(!validator.validate(&padded(&[0xFF, 0xD8, 0xFF, 0x00]), "jpg"));
    }

    #[test]
    fn gif_both_versions() {
        let validator = SignatureValidator::standard();
        assert!(validator.validate(&padded(b"GIF87a"), "gif"));
        assert!(validator.validate(&padded(b"GIF89a"), "gif"));
        assert!(!validator.validate(&padded(b"GIF90a"), "gif"));
    }

    #[test]
    fn png_signature() {
        let validator = SignatureValidator::standard();
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validator.validate(&png, "png"));
        assert!(!validator.validate(b"GIF89a", "png"));
    }

    #[test]
    fn mp4_brand_only_at_start() {
        let validator = SignatureValidator::standard();
        assert!(validator.validate(&padded(b"ftypisom"), "mp4"));
        assert!(validator.validate(&padded(b"ftypMSNV"), "mp4"));
        assert!(!validator.validate(b"\x00\x00\x00\x18ftypisom\x00\x00\x02\x00", "mp4"));
        assert!(!validator.validate(&padded(b"\x00\x00\x00\x14ftypqt  "), "mp4"));
    }

    #[test]
    fn mov_brand_sits_at_offset_four() {
        let validator = SignatureValidator::standard();
        assert!(validator.validate(&padded(b"\x00\x00\x00\x14ftypqt  "), "mov"));
        assert!(!validator.validate(&padded(b"ftypqt  "), "mov"));
    }

    #[test]
    fn short_buffers_mismatch_instead_of_panicking() {
        let validator = SignatureValidator::standard();
        assert!(!validator.validate(&[], "png"));
        assert!(!validator.validate(&[0x89, 0x50], "png"));
        assert!(!validator.validate(b"\x00\x00\x00\x14ftyp", "mov"));
    }

    #[test]
    fn only_the_leading_window_is_inspected() {
        let validator = SignatureValidator::empty().with_rule("bin", SignatureRule::new(30, b"ABCD"));
        let mut buf = vec![0u8; 30];
        buf.extend_from_slice(b"ABCD");
        // Pattern would match, but bytes 32 and 33 are outside the window.
        assert!(!validator.validate(&buf, "bin"));
    }

    #[test]
    fn extensions_without_rules_pass() {
        let validator = SignatureValidator::standard();
        assert!(validator.validate(b"anything at all", "webp"));
        assert!(SignatureValidator::empty().validate(b"", "png"));
    }

    #[test]
    fn rules_keep_table_order() {
        let validator = SignatureValidator::standard();
        let rules = validator.rules_for("gif");
        assert_eq!(rules[0].pattern, b"GIF87a".to_vec());
        assert_eq!(rules[1].pattern, b"GIF89a".to_vec());
        assert!(validator.rules_for("txt").is_empty());
    }
}

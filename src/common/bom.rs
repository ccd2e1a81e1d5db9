//! Byte Order Mark (BOM) detection.
//!
//! A BOM fixes the encoding of the bytes that follow it and must never reach
//! the CSV tokenizer. Detection runs once per input stream and yields an
//! [`EncodingProbe`] that the decoder uses to strip the prefix.

/// Supported BOM encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomKind {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl BomKind {
    /// Returns the byte representation of the BOM.
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BomKind::Utf8 => &UTF8_BOM,
            BomKind::Utf16Le => &UTF16_LE_BOM,
            BomKind::Utf16Be => &UTF16_BE_BOM,
            BomKind::Utf32Le => &UTF32_LE_BOM,
            BomKind::Utf32Be => &UTF32_BE_BOM,
        }
    }

    /// Returns the length in bytes of the BOM.
    #[inline]
    #[allow(clippy::len_without_is_empty)] // No need to check for empty BOMs
    pub const fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Encoding label understood by the codec backends.
    pub const fn encoding_label(&self) -> &'static str {
        match self {
            BomKind::Utf8 => "utf-8",
            BomKind::Utf16Le => "utf-16le",
            BomKind::Utf16Be => "utf-16be",
            BomKind::Utf32Le => "utf-32le",
            BomKind::Utf32Be => "utf-32be",
        }
    }
}

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
/// UTF-32 little-endian BOM bytes.
pub const UTF32_LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
/// UTF-32 big-endian BOM bytes.
pub const UTF32_BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

/// Outcome of probing the head of an input stream for a BOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodingProbe {
    /// Encoding announced by the BOM, if any.
    pub detected: Option<BomKind>,
    /// Number of leading bytes occupied by the BOM (0, 2, 3 or 4).
    pub bom_len: usize,
}

impl EncodingProbe {
    /// Probe the first bytes of `bytes`.
    ///
    /// UTF-32LE shares its first two bytes with UTF-16LE, so the four-byte
    /// marks are tested first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        const ORDER: [BomKind; 5] = [
            BomKind::Utf32Be,
            BomKind::Utf32Le,
            BomKind::Utf8,
            BomKind::Utf16Be,
            BomKind::Utf16Le,
        ];

        ORDER
            .iter()
            .find(|kind| bytes.starts_with(kind.as_bytes()))
            .map(|&kind| EncodingProbe {
                detected: Some(kind),
                bom_len: kind.len(),
            })
            .unwrap_or_default()
    }

    /// Slice of `bytes` following the BOM.
    #[inline]
    pub fn strip<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        bytes.get(self.bom_len..).unwrap_or_default()
    }

    /// Effective encoding label: the BOM wins over the caller's fallback.
    pub fn effective_label<'a>(&self, fallback: Option<&'a str>) -> &'a str {
        match self.detected {
            Some(kind) => kind.encoding_label(),
            None => fallback.unwrap_or(DEFAULT_ENCODING),
        }
    }
}

/// Encoding assumed when neither a BOM nor a caller-supplied label is present.
pub const DEFAULT_ENCODING: &str = "utf-8";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_utf8() {
        let probe = EncodingProbe::from_bytes(b"\xEF\xBB\xBFa,b");
        assert_eq!(probe.detected, Some(BomKind::Utf8));
        assert_eq!(probe.bom_len, 3);
        assert_eq!(probe.strip(b"\xEF\xBB\xBFa,b"), b"a,b");
    }

    #[test]
    fn test_probe_utf16() {
        assert_eq!(
            EncodingProbe::from_bytes(b"\xFF\xFEa\x00").detected,
            Some(BomKind::Utf16Le)
        );
        assert_eq!(
            EncodingProbe::from_bytes(b"\xFE\xFF\x00a").detected,
            Some(BomKind::Utf16Be)
        );
    }

    #[test]
    fn test_probe_utf32_wins_over_utf16() {
        let probe = EncodingProbe::from_bytes(b"\xFF\xFE\x00\x00a\x00\x00\x00");
        assert_eq!(probe.detected, Some(BomKind::Utf32Le));
        assert_eq!(probe.bom_len, 4);
    }

    #[test]
    fn test_probe_none() {
        let probe = EncodingProbe::from_bytes(b"a,b,c");
        assert_eq!(probe.detected, None);
        assert_eq!(probe.bom_len, 0);
        assert_eq!(probe.effective_label(None), DEFAULT_ENCODING);
        assert_eq!(probe.effective_label(Some("windows-1252")), "windows-1252");
    }

    #[test]
    fn test_probe_short_input() {
        assert_eq!(EncodingProbe::from_bytes(b""), EncodingProbe::default());
        assert_eq!(EncodingProbe::from_bytes(b"\xEF").detected, None);
    }

    #[test]
    fn test_bom_overrides_fallback() {
        let probe = EncodingProbe::from_bytes(b"\xFE\xFF");
        assert_eq!(probe.effective_label(Some("windows-1252")), "utf-16be");
    }
}

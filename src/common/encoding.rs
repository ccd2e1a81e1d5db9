//! Character encoding normalization for text-based spreadsheet input.
//!
//! Input files arrive in whatever encoding the producing tool chose. This
//! module turns them into UTF-8 through an explicit, ordered list of codec
//! backends ([`EncodingCapabilities`]):
//!
//! 1. each configured backend is tried in order until one understands both
//!    the source and the target encoding;
//! 2. with no backend configured, UTF-16 input is decoded by hand and every
//!    other encoding passes through unconverted.
//!
//! The same policy drives UTF-8 sanitization, character counting and
//! substring extraction, which spreadsheet string limits depend on.

use crate::common::bom::EncodingProbe;
use crate::common::{Error, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Maximum number of characters a spreadsheet cell may hold.
pub const MAX_STRING_LENGTH: usize = 32_767;

/// UTF-16 code unit that legacy spreadsheet exports use for a line break.
const MANUAL_NEWLINE_UNIT: u16 = 0x0228;

/// A text codec implementation that can be enabled in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecBackend {
    /// `encoding_rs`: every WHATWG encoding (requires the `encoding` feature)
    EncodingRs,
    /// Standard library: UTF-8, UTF-16, UTF-32 and ISO-8859-1 only
    Std,
}

impl CodecBackend {
    /// Whether the backend was compiled into this build.
    pub const fn is_available(self) -> bool {
        match self {
            CodecBackend::EncodingRs => cfg!(feature = "encoding"),
            CodecBackend::Std => true,
        }
    }

    /// Decode `bytes` from `label`. `None` means the label is unknown here.
    fn decode(self, bytes: &[u8], label: &str) -> Option<String> {
        match self {
            #[cfg(feature = "encoding")]
            CodecBackend::EncodingRs => {
                let encoding = encoding_rs::Encoding::for_label(label.as_bytes())?;
                Some(encoding.decode_without_bom_handling(bytes).0.into_owned())
            },
            #[cfg(not(feature = "encoding"))]
            CodecBackend::EncodingRs => None,
            CodecBackend::Std => std_decode(bytes, UnicodeForm::from_label(label)?),
        }
    }

    /// Encode `text` into `label`. `None` means the label is unknown here.
    fn encode(self, text: &str, label: &str) -> Option<Vec<u8>> {
        // encoding_rs never produces UTF-16 output, so both backends share it.
        if let Some(form @ (UnicodeForm::Utf16Le | UnicodeForm::Utf16Be)) =
            UnicodeForm::from_label(label)
        {
            return std_encode(text, form);
        }

        match self {
            #[cfg(feature = "encoding")]
            CodecBackend::EncodingRs => {
                let encoding = encoding_rs::Encoding::for_label(label.as_bytes())?;
                Some(encoding.encode(text).0.into_owned())
            },
            #[cfg(not(feature = "encoding"))]
            CodecBackend::EncodingRs => None,
            CodecBackend::Std => std_encode(text, UnicodeForm::from_label(label)?),
        }
    }

    /// Decode UTF-8 with invalid sequences replaced by U+FFFD.
    fn decode_utf8_lossy(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            #[cfg(feature = "encoding")]
            CodecBackend::EncodingRs => encoding_rs::UTF_8.decode_without_bom_handling(bytes).0,
            #[cfg(not(feature = "encoding"))]
            CodecBackend::EncodingRs => String::from_utf8_lossy(bytes),
            CodecBackend::Std => String::from_utf8_lossy(bytes),
        }
    }
}

/// Ordered list of codec backends the normalizer may use.
///
/// Backends that are listed but not compiled in are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodingCapabilities {
    backends: Vec<CodecBackend>,
}

impl Default for EncodingCapabilities {
    /// Every compiled backend, `encoding_rs` first.
    fn default() -> Self {
        Self::new([CodecBackend::EncodingRs, CodecBackend::Std])
    }
}

impl EncodingCapabilities {
    /// Capabilities with the given backends in priority order.
    pub fn new(backends: impl IntoIterator<Item = CodecBackend>) -> Self {
        let mut list: Vec<CodecBackend> = Vec::new();
        for backend in backends {
            if !list.contains(&backend) {
                list.push(backend);
            }
        }
        Self { backends: list }
    }

    /// No codec at all: manual UTF-16 decoding and pass-through only.
    pub fn none() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    /// Backends that will actually be consulted, in order.
    pub fn backends(&self) -> impl Iterator<Item = CodecBackend> + '_ {
        self.backends
            .iter()
            .copied()
            .filter(|backend| backend.is_available())
    }

    /// Returns `true` if no usable backend is configured.
    pub fn is_empty(&self) -> bool {
        self.backends().next().is_none()
    }

    fn primary(&self) -> Option<CodecBackend> {
        self.backends().next()
    }
}

/// Encodings the standard library backend and the manual fallback handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnicodeForm {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
    Latin1,
}

impl UnicodeForm {
    fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "utf8" | "unicode11utf8" | "unicode20utf8" | "xunicode20utf8" => Some(Self::Utf8),
            // Unqualified UTF-16 is little-endian, matching WHATWG label resolution.
            "utf16" | "utf16le" | "ucs2" | "unicode" | "csunicode" => Some(Self::Utf16Le),
            "utf16be" | "unicodefffe" => Some(Self::Utf16Be),
            "utf32" | "utf32le" => Some(Self::Utf32Le),
            "utf32be" => Some(Self::Utf32Be),
            "iso88591" | "latin1" | "l1" | "iso885911987" => Some(Self::Latin1),
            _ => None,
        }
    }
}

/// Returns `true` if `label` names UTF-8.
pub fn is_utf8_label(label: &str) -> bool {
    UnicodeForm::from_label(label) == Some(UnicodeForm::Utf8)
}

fn std_decode(bytes: &[u8], form: UnicodeForm) -> Option<String> {
    let text = match form {
        UnicodeForm::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        UnicodeForm::Utf16Le | UnicodeForm::Utf16Be => {
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| {
                    let pair = [pair[0], pair[1]];
                    if form == UnicodeForm::Utf16Le {
                        u16::from_le_bytes(pair)
                    } else {
                        u16::from_be_bytes(pair)
                    }
                })
                .collect();
            String::from_utf16_lossy(&units)
        },
        UnicodeForm::Utf32Le | UnicodeForm::Utf32Be => bytes
            .chunks_exact(4)
            .map(|quad| {
                let quad = [quad[0], quad[1], quad[2], quad[3]];
                let scalar = if form == UnicodeForm::Utf32Le {
                    u32::from_le_bytes(quad)
                } else {
                    u32::from_be_bytes(quad)
                };
                char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER)
            })
            .collect(),
        UnicodeForm::Latin1 => bytes.iter().copied().map(char::from).collect(),
    };
    Some(text)
}

fn std_encode(text: &str, form: UnicodeForm) -> Option<Vec<u8>> {
    let bytes = match form {
        UnicodeForm::Utf8 => text.as_bytes().to_vec(),
        UnicodeForm::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        UnicodeForm::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        UnicodeForm::Utf32Le => text.chars().flat_map(|c| u32::from(c).to_le_bytes()).collect(),
        UnicodeForm::Utf32Be => text.chars().flat_map(|c| u32::from(c).to_be_bytes()).collect(),
        UnicodeForm::Latin1 => text
            .chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .collect(),
    };
    Some(bytes)
}

/// Decode UTF-16 without any codec: each code unit becomes one byte.
///
/// Code unit `0x0228` is emitted as a line feed. A trailing odd byte is
/// dropped.
pub fn manual_utf16_decode(bytes: &[u8], big_endian: bool) -> Vec<u8> {
    bytes
        .chunks_exact(2)
        .map(|pair| {
            let unit = if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            };
            if unit == MANUAL_NEWLINE_UNIT {
                b'\n'
            } else {
                unit.to_le_bytes()[0]
            }
        })
        .collect()
}

/// Turn bytes into a `String`, keeping valid UTF-8 sequences as they are.
///
/// Each byte of an invalid sequence maps to the char with the same value
/// (U+0000..U+00FF). Used after pass-through conversion, where nothing
/// guaranteed UTF-8.
pub fn into_utf8_string(bytes: Cow<'_, [u8]>) -> String {
    match String::from_utf8(bytes.into_owned()) {
        Ok(text) => text,
        Err(err) => {
            let bytes = err.into_bytes();
            let mut text = String::with_capacity(bytes.len());
            for chunk in bytes.utf8_chunks() {
                text.push_str(chunk.valid());
                text.extend(chunk.invalid().iter().copied().map(char::from));
            }
            text
        },
    }
}

/// Largest index `<= end` that does not fall inside a UTF-8 sequence.
fn utf8_boundary_before(bytes: &[u8], mut end: usize) -> usize {
    // A sequence is at most four bytes long.
    let floor = end.saturating_sub(3);
    while end > floor && end < bytes.len() && (bytes[end] & 0xC0) == 0x80 {
        end -= 1;
    }
    end
}

/// Replace `\r\n` and lone `\r` with `\n`.
pub fn normalize_newlines(value: &str) -> Cow<'_, str> {
    if memchr::memchr(b'\r', value.as_bytes()).is_none() {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.replace("\r\n", "\n").replace('\r', "\n"))
}

fn cow_str_into_bytes(text: Cow<'_, str>) -> Cow<'_, [u8]> {
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

/// Converts and cleans text according to an [`EncodingCapabilities`] policy.
///
/// # Examples
///
/// ```
/// use longan::common::encoding::EncodingNormalizer;
///
/// let normalizer = EncodingNormalizer::default();
/// let text = normalizer.decode_stream(b"\xEF\xBB\xBFa,b", None).unwrap();
/// assert_eq!(text, "a,b");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EncodingNormalizer {
    capabilities: EncodingCapabilities,
}

impl EncodingNormalizer {
    /// Create a normalizer using the given backend policy.
    pub fn new(capabilities: EncodingCapabilities) -> Self {
        Self { capabilities }
    }

    /// The backend policy in effect.
    pub fn capabilities(&self) -> &EncodingCapabilities {
        &self.capabilities
    }

    /// Convert `bytes` from encoding `from` to encoding `to`.
    ///
    /// Backends are tried in order; the first one that knows both labels
    /// performs the conversion. With no backend configured, UTF-16 sources
    /// are decoded manually and anything else is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] when backends are configured but none of
    /// them understands `from` or `to`.
    pub fn convert_encoding<'a>(&self, bytes: &'a [u8], to: &str, from: &str) -> Result<Cow<'a, [u8]>> {
        if self.capabilities.is_empty() {
            return Ok(self.convert_without_codec(bytes, from));
        }

        for backend in self.capabilities.backends() {
            let Some(text) = backend.decode(bytes, from) else {
                continue;
            };
            if let Some(encoded) = backend.encode(&text, to) {
                debug!("converted {} bytes from {from} to {to} with {backend:?}", bytes.len());
                return Ok(Cow::Owned(encoded));
            }
        }

        Err(Error::Encoding(format!(
            "no configured codec converts from '{from}' to '{to}'"
        )))
    }

    fn convert_without_codec<'a>(&self, bytes: &'a [u8], from: &str) -> Cow<'a, [u8]> {
        match UnicodeForm::from_label(from) {
            Some(UnicodeForm::Utf16Le) => Cow::Owned(manual_utf16_decode(bytes, false)),
            Some(UnicodeForm::Utf16Be) => Cow::Owned(manual_utf16_decode(bytes, true)),
            Some(UnicodeForm::Utf8) => Cow::Borrowed(bytes),
            _ => {
                warn!("no codec backend available to convert from {from}; passing bytes through");
                Cow::Borrowed(bytes)
            },
        }
    }

    /// Replace invalid UTF-8 sequences with U+FFFD.
    ///
    /// Without a codec backend the input is returned untouched.
    pub fn sanitize_utf8<'a>(&self, bytes: &'a [u8]) -> Cow<'a, [u8]> {
        match self.capabilities.primary() {
            Some(backend) => cow_str_into_bytes(backend.decode_utf8_lossy(bytes)),
            None => Cow::Borrowed(bytes),
        }
    }

    /// Number of characters in UTF-8 `bytes`.
    ///
    /// The codec-less fallback counts bytes that do not continue a sequence.
    pub fn count_characters(&self, bytes: &[u8]) -> usize {
        match self.capabilities.primary() {
            Some(backend) => backend.decode_utf8_lossy(bytes).chars().count(),
            None => bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count(),
        }
    }

    /// Up to `length` characters of UTF-8 `bytes`, starting at character `offset`.
    ///
    /// The codec-less fallback slices bytes instead of characters, ending
    /// early rather than splitting a multi-byte sequence.
    pub fn substring<'a>(&self, bytes: &'a [u8], offset: usize, length: usize) -> Cow<'a, [u8]> {
        match self.capabilities.primary() {
            Some(backend) => {
                let text = backend.decode_utf8_lossy(bytes);
                let piece: String = text.chars().skip(offset).take(length).collect();
                Cow::Owned(piece.into_bytes())
            },
            None => {
                let start = offset.min(bytes.len());
                let end = offset.saturating_add(length).min(bytes.len());
                let end = utf8_boundary_before(bytes, end).max(start);
                Cow::Borrowed(&bytes[start..end])
            },
        }
    }

    /// Enforce the spreadsheet string limit and `\n`-only line breaks.
    pub fn check_string(&self, value: &str) -> String {
        // A string never holds more characters than bytes.
        let capped = if value.len() > MAX_STRING_LENGTH
            && self.count_characters(value.as_bytes()) > MAX_STRING_LENGTH
        {
            into_utf8_string(self.substring(value.as_bytes(), 0, MAX_STRING_LENGTH))
        } else {
            value.to_string()
        };

        let normalized = match normalize_newlines(&capped) {
            Cow::Owned(normalized) => Some(normalized),
            Cow::Borrowed(_) => None,
        };
        normalized.unwrap_or(capped)
    }

    /// Decode a whole input stream to UTF-8.
    ///
    /// A BOM selects the source encoding and is stripped; otherwise
    /// `fallback_label` (or UTF-8 when absent) is assumed.
    pub fn decode_stream(&self, bytes: &[u8], fallback_label: Option<&str>) -> Result<String> {
        let probe = EncodingProbe::from_bytes(bytes);
        let body = probe.strip(bytes);
        let label = probe.effective_label(fallback_label);
        debug!(
            "decoding {} bytes as {label} (bom: {:?}, {} bytes)",
            body.len(),
            probe.detected,
            probe.bom_len
        );

        let utf8 = if is_utf8_label(label) {
            Cow::Borrowed(body)
        } else {
            self.convert_encoding(body, "utf-8", label)?
        };

        let sanitized = match self.sanitize_utf8(&utf8) {
            Cow::Owned(owned) => Some(owned),
            Cow::Borrowed(_) => None,
        };
        let clean = match sanitized {
            Some(owned) => Cow::Owned(owned),
            None => utf8,
        };
        Ok(into_utf8_string(clean))
    }
}

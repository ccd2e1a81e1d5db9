//! Plain-text (CSV-like) detection.
//!
//! Delimited text has no magic number, so detection is heuristic: a known
//! extension is trusted outright, otherwise a prefix of the file is sampled
//! and accepted when enough of it looks like text.
//!
//! Uniformly random bytes are printable about 38% of the time. Requiring
//! twice that keeps binary formats out while still accepting 8-bit encodings
//! full of diacritics.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected by [`looks_like_text`].
pub const SAMPLE_LEN: usize = 1000;

/// Minimum share of printable bytes for a sample to count as text.
pub const PRINTABLE_RATIO_THRESHOLD: f64 = 0.76;

/// Extensions accepted without content inspection (compared case-insensitively).
pub const TEXT_EXTENSIONS: &[&str] = &["csv", "tsv", "txt", "text"];

#[inline]
const fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E | b'\r' | b'\n' | b'\t')
}

/// Share of printable bytes in `sample`; `1.0` for an empty sample.
pub fn printable_ratio(sample: &[u8]) -> f64 {
    if sample.is_empty() {
        return 1.0;
    }
    let printable = sample.iter().filter(|&&b| is_printable(b)).count();
    printable as f64 / sample.len() as f64
}

/// Returns `true` if `sample` is plausibly delimited text.
///
/// An empty sample is text: an empty file loads as an empty sheet.
pub fn looks_like_text(sample: &[u8]) -> bool {
    printable_ratio(sample) >= PRINTABLE_RATIO_THRESHOLD
}

/// Returns `true` if the extension of `path` is one of [`TEXT_EXTENSIONS`].
pub fn has_text_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TEXT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// Decide whether the file at `path` can be read as CSV.
///
/// Never fails: a missing or unreadable file is simply not CSV.
pub fn is_text_file<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if !path.is_file() {
        return false;
    }
    if has_text_extension(path) {
        return true;
    }

    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut sample = Vec::with_capacity(SAMPLE_LEN);
    match file.take(SAMPLE_LEN as u64).read_to_end(&mut sample) {
        Ok(_) => looks_like_text(&sample),
        Err(err) => {
            log::debug!("cannot sample {}: {err}", path.display());
            false
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn temp_with(suffix: &str, contents: &[u8]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_printable_ratio() {
        assert_eq!(printable_ratio(b""), 1.0);
        assert_eq!(printable_ratio(b"a,b\r\n\t"), 1.0);
        assert_eq!(printable_ratio(b"ab\x00\x01"), 0.5);
    }

    #[test]
    fn test_threshold_boundary() {
        // 76 printable out of 100
        let mut sample = vec![b'a'; 76];
        sample.extend(std::iter::repeat_n(0u8, 24));
        assert!(looks_like_text(&sample));

        let mut sample = vec![b'a'; 75];
        sample.extend(std::iter::repeat_n(0u8, 25));
        assert!(!looks_like_text(&sample));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(!is_text_file(dir.path().join("missing.csv")));
        // a directory is not a file
        assert!(!is_text_file(dir.path()));
    }

    #[test]
    fn test_extension_wins_over_content() {
        let binary: Vec<u8> = (0..=255u8).cycle().take(2000).collect();
        let file = temp_with(".CSV", &binary);
        assert!(is_text_file(file.path()));
    }

    #[test]
    fn test_unknown_extension_text() {
        let file = temp_with(".dat", b"name;age\nJos\xE9;25\nAna;30\n");
        assert!(is_text_file(file.path()));
    }

    #[test]
    fn test_unknown_extension_empty() {
        let file = temp_with(".dat", b"");
        assert!(is_text_file(file.path()));
    }

    #[test]
    fn test_unknown_extension_binary() {
        let mut state = 0x2545_F491u32;
        let noise: Vec<u8> = (0..4096)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state.to_le_bytes()[0]
            })
            .collect();
        let file = temp_with(".bin", &noise);
        assert!(!is_text_file(file.path()));
    }

    #[test]
    fn test_only_prefix_is_sampled() {
        let mut contents = vec![b'x'; SAMPLE_LEN];
        contents.extend(std::iter::repeat_n(0u8, 10 * SAMPLE_LEN));
        let file = temp_with(".dat", &contents);
        assert!(is_text_file(file.path()));
    }
}

//! Logical line reader for delimited text.
//!
//! A CSV record may span several physical lines when an enclosed field
//! contains a line break. [`LineReader`] joins physical lines until the
//! enclosure characters seen so far are balanced.
//!
//! The balance check counts enclosure characters, skipping escaped ones:
//! a doubled enclosure (`""`, RFC 4180) and a backslash-escaped enclosure
//! (`\"`, as written by some spreadsheet tools). An odd count means a field
//! is still open and the next physical line belongs to the same record.
//!
//! Input with a genuinely unbalanced enclosure cannot be told apart from a
//! continuation: the rest of the input folds into one logical line.

use std::io::BufRead;

use log::{trace, warn};

use crate::common::Result;

/// One complete record, possibly assembled from several physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Record text; physical lines are joined with `\n`.
    pub text: String,
    /// Number of physical lines the record spans (at least 1).
    pub source_line_count: usize,
    /// 1-based physical line number where the record starts.
    pub start_line: usize,
}

/// Count enclosure characters in `line` that are not escaped.
///
/// # Examples
///
/// ```
/// use longan::sheet::text::lines::count_unescaped_enclosures;
///
/// assert_eq!(count_unescaped_enclosures(r#""a",b"#, b'"'), 2);
/// assert_eq!(count_unescaped_enclosures(r#""a""b""#, b'"'), 2);
/// assert_eq!(count_unescaped_enclosures(r#"a\"b"#, b'"'), 0);
/// ```
pub fn count_unescaped_enclosures(line: &str, enclosure: u8) -> usize {
    let bytes = line.as_bytes();
    let mut count = 0;
    // Index of the second half of a doubled enclosure.
    let mut paired = None;

    for pos in memchr::memchr_iter(enclosure, bytes) {
        if paired == Some(pos) {
            continue;
        }
        if pos > 0 && bytes[pos - 1] == b'\\' {
            continue;
        }
        if bytes.get(pos + 1) == Some(&enclosure) {
            paired = Some(pos + 1);
            continue;
        }
        count += 1;
    }
    count
}

/// Lazy, forward-only iterator over [`LogicalLine`]s.
///
/// Consumes the underlying reader; not restartable.
pub struct LineReader<R: BufRead> {
    reader: R,
    enclosure: u8,
    /// Physical lines consumed so far
    line_number: usize,
    buffer: String,
}

impl<R: BufRead> LineReader<R> {
    /// Create a line reader over decoded UTF-8 text
    pub fn new(reader: R, enclosure: u8) -> Self {
        LineReader {
            reader,
            enclosure,
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Number of physical lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read one physical line without its terminator.
    fn read_physical(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let mut line = std::mem::take(&mut self.buffer);
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Read the next logical line, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<LogicalLine>> {
        let Some(mut text) = self.read_physical()? else {
            return Ok(None);
        };
        let start_line = self.line_number;
        let mut source_line_count = 1;
        let mut open = count_unescaped_enclosures(&text, self.enclosure) % 2 == 1;

        while open {
            let Some(next) = self.read_physical()? else {
                warn!(
                    "unterminated enclosure starting at line {start_line}; \
                     {source_line_count} line(s) folded into one record"
                );
                break;
            };
            if count_unescaped_enclosures(&next, self.enclosure) % 2 == 1 {
                open = !open;
            }
            text.push('\n');
            text.push_str(&next);
            source_line_count += 1;
        }

        if source_line_count > 1 {
            trace!("record at line {start_line} spans {source_line_count} lines");
        }

        Ok(Some(LogicalLine {
            text,
            source_line_count,
            start_line,
        }))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines(input: &str) -> Vec<LogicalLine> {
        LineReader::new(Cursor::new(input.as_bytes()), b'"')
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    fn texts(input: &str) -> Vec<String> {
        lines(input).into_iter().map(|line| line.text).collect()
    }

    #[test]
    fn test_count_unescaped_enclosures() {
        assert_eq!(count_unescaped_enclosures("", b'"'), 0);
        assert_eq!(count_unescaped_enclosures(r#""line1"#, b'"'), 1);
        assert_eq!(count_unescaped_enclosures(r#"a,"",b"#, b'"'), 0);
        assert_eq!(count_unescaped_enclosures(r#""""a""""#, b'"'), 2);
        assert_eq!(count_unescaped_enclosures(r#""a"""#, b'"'), 1);
        assert_eq!(count_unescaped_enclosures(r#"x\","y""#, b'"'), 2);
        assert_eq!(count_unescaped_enclosures("'a','b'", b'\''), 4);
    }

    #[test]
    fn test_simple_lines() {
        assert_eq!(texts("a,b,c\n1,2,3\n"), ["a,b,c", "1,2,3"]);
        assert_eq!(texts("a,b\r\n1,2"), ["a,b", "1,2"]);
        assert!(texts("").is_empty());
    }

    #[test]
    fn test_blank_lines_are_records() {
        assert_eq!(texts("a\n\nb\n"), ["a", "", "b"]);
    }

    #[test]
    fn test_multiline_field() {
        let lines = lines("\"line1\nline2\",x\nnext\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "\"line1\nline2\",x");
        assert_eq!(lines[0].source_line_count, 2);
        assert_eq!(lines[0].start_line, 1);
        assert_eq!(lines[1].text, "next");
        assert_eq!(lines[1].start_line, 3);
    }

    #[test]
    fn test_multiline_with_blank_physical_line() {
        assert_eq!(texts("\"a\n\nb\",c\nd"), ["\"a\n\nb\",c", "d"]);
    }

    #[test]
    fn test_escaped_quotes_do_not_open() {
        assert_eq!(texts("a\\\"b,c\nd\n"), ["a\\\"b,c", "d"]);
        assert_eq!(texts("\"say \"\"hi\"\"\",x\ny\n"), ["\"say \"\"hi\"\"\",x", "y"]);
    }

    #[test]
    fn test_crlf_inside_multiline_field() {
        assert_eq!(texts("\"a\r\nb\"\r\nc\r\n"), ["\"a\nb\"", "c"]);
    }

    #[test]
    fn test_unbalanced_folds_rest_of_input() {
        let lines = lines("a,\"open\nb,c\nd,e\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "a,\"open\nb,c\nd,e");
        assert_eq!(lines[0].source_line_count, 3);
    }

    #[test]
    fn test_line_number_tracking() {
        let mut reader = LineReader::new(Cursor::new("\"a\nb\"\nc\n"), b'"');
        reader.next_line().unwrap();
        assert_eq!(reader.line_number(), 2);
        reader.next_line().unwrap();
        assert_eq!(reader.line_number(), 3);
        assert!(reader.next_line().unwrap().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let mut reader = LineReader::new(Cursor::new(&b"ok\n\xFF\n"[..]), b'"');
        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().unwrap().is_err());
    }
}

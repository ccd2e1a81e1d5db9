//! Field tokenizer for delimited text.

/// Where the tokenizer is within the current field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    /// Nothing consumed yet; an enclosure here opens a quoted field
    Start,
    /// Inside an unquoted field; enclosures are literal
    Unquoted,
    /// Inside an enclosure
    Quoted,
    /// After the closing enclosure; trailing characters are kept verbatim
    Closed,
}

/// Splits a logical line into fields.
///
/// Delimiters inside an enclosure do not split. Inside an enclosure a doubled
/// enclosure stands for one literal enclosure, and `\"` does not close the
/// field. Every field is then unescaped, turning `\"` into `"`.
///
/// # Examples
///
/// ```
/// use longan::sheet::text::CsvTokenizer;
///
/// let tokenizer = CsvTokenizer::new(b',', b'"');
/// assert_eq!(tokenizer.tokenize(r#"a,"b,c",d"#), ["a", "b,c", "d"]);
/// assert_eq!(tokenizer.tokenize(r#"a\"b,c"#), [r#"a"b"#, "c"]);
/// assert!(tokenizer.tokenize("").is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvTokenizer {
    delimiter: char,
    enclosure: char,
}

impl Default for CsvTokenizer {
    fn default() -> Self {
        Self::new(b',', b'"')
    }
}

impl CsvTokenizer {
    /// Create a tokenizer for ASCII `delimiter` and `enclosure`
    pub fn new(delimiter: u8, enclosure: u8) -> Self {
        CsvTokenizer {
            delimiter: char::from(delimiter),
            enclosure: char::from(enclosure),
        }
    }

    /// Split `line` into unescaped fields.
    ///
    /// An empty line yields no fields at all.
    pub fn tokenize(&self, line: &str) -> Vec<String> {
        if line.is_empty() {
            return Vec::new();
        }

        let mut fields = Vec::new();
        let mut field = String::new();
        let mut state = FieldState::Start;
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            match state {
                FieldState::Start | FieldState::Unquoted | FieldState::Closed
                    if c == self.delimiter =>
                {
                    fields.push(self.unescape(&field));
                    field.clear();
                    state = FieldState::Start;
                },
                FieldState::Start if c == self.enclosure => state = FieldState::Quoted,
                FieldState::Start | FieldState::Unquoted => {
                    field.push(c);
                    state = FieldState::Unquoted;
                },
                FieldState::Quoted if c == self.enclosure => {
                    if chars.peek() == Some(&self.enclosure) {
                        // Doubled enclosure: one literal
                        chars.next();
                        field.push(c);
                    } else {
                        state = FieldState::Closed;
                    }
                },
                FieldState::Quoted if c == '\\' && chars.peek() == Some(&self.enclosure) => {
                    // Kept escaped; unescape() resolves it
                    chars.next();
                    field.push(c);
                    field.push(self.enclosure);
                },
                FieldState::Quoted | FieldState::Closed => field.push(c),
            }
        }

        fields.push(self.unescape(&field));
        fields
    }

    /// Replace backslash-escaped enclosures with a bare enclosure.
    pub fn unescape(&self, field: &str) -> String {
        let escaped = ['\\', self.enclosure];
        let escaped: String = escaped.iter().collect();
        if field.contains(&escaped) {
            field.replace(&escaped, &self.enclosure.to_string())
        } else {
            field.to_string()
        }
    }
}

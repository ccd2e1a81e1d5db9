//! Configuration for reading delimited text.

use serde::{Deserialize, Serialize};

use crate::common::encoding::EncodingCapabilities;
use crate::common::{Error, Result};

/// Configuration for parsing CSV-like files
///
/// Every field has a default, so a configuration document only needs to
/// name what it changes:
///
/// ```
/// use longan::sheet::text::CsvConfig;
///
/// let config = CsvConfig::from_yaml_str("delimiter: ';'\ninput_encoding: windows-1252\n").unwrap();
/// assert_eq!(config.delimiter, ';');
/// assert_eq!(config.enclosure, '"');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Field delimiter character
    pub delimiter: char,
    /// Quote character for enclosed fields
    pub enclosure: char,
    /// Encoding assumed when the input has no BOM (`None` = UTF-8)
    pub input_encoding: Option<String>,
    /// Codec backends used to convert the input, in priority order
    pub codecs: EncodingCapabilities,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            enclosure: '"',
            input_encoding: None,
            codecs: EncodingCapabilities::default(),
        }
    }
}

impl CsvConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the enclosure (quote) character
    pub fn with_enclosure(mut self, enclosure: char) -> Self {
        self.enclosure = enclosure;
        self
    }

    /// Set the encoding used when no BOM is present
    pub fn with_input_encoding(mut self, label: impl Into<String>) -> Self {
        self.input_encoding = Some(label.into());
        self
    }

    /// Set the codec backend policy
    pub fn with_codecs(mut self, codecs: EncodingCapabilities) -> Self {
        self.codecs = codecs;
        self
    }

    /// Create TSV (tab-separated) configuration
    pub fn tsv() -> Self {
        Self::new().with_delimiter('\t')
    }

    /// Create semicolon-separated configuration
    pub fn semicolon() -> Self {
        Self::new().with_delimiter(';')
    }

    /// Delimiter and enclosure as bytes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFormat`] if either is not ASCII or both are equal.
    pub fn validate(&self) -> Result<(u8, u8)> {
        let ascii = |name: &str, c: char| {
            u8::try_from(c)
                .ok()
                .filter(u8::is_ascii)
                .ok_or_else(|| Error::InvalidFormat(format!("{name} {c:?} must be a single ASCII character")))
        };
        let delimiter = ascii("delimiter", self.delimiter)?;
        let enclosure = ascii("enclosure", self.enclosure)?;
        if delimiter == enclosure {
            return Err(Error::InvalidFormat(format!(
                "delimiter and enclosure are both {:?}",
                self.delimiter
            )));
        }
        Ok((delimiter, enclosure))
    }

    /// Parse a YAML configuration document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| Error::Config(format!("Failed to parse CSV configuration: {e}")))
    }

    /// Serialize to a YAML document.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize CSV configuration: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::encoding::CodecBackend;

    #[test]
    fn test_defaults() {
        let config = CsvConfig::default();
        assert_eq!(config.validate().unwrap(), (b',', b'"'));
        assert_eq!(config.input_encoding, None);
        assert_eq!(CsvConfig::tsv().delimiter, '\t');
    }

    #[test]
    fn test_validate_rejects_non_ascii() {
        assert!(matches!(
            CsvConfig::new().with_delimiter('§').validate(),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            CsvConfig::new().with_enclosure(',').validate(),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_yaml_codecs() {
        let config = CsvConfig::from_yaml_str("codecs: [std]\nenclosure: \"'\"\n").unwrap();
        assert_eq!(config.enclosure, '\'');
        assert_eq!(config.codecs, EncodingCapabilities::new([CodecBackend::Std]));
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = CsvConfig::semicolon().with_input_encoding("utf-16le");
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(CsvConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_yaml_invalid() {
        assert!(matches!(
            CsvConfig::from_yaml_str("delimiter: [1, 2]"),
            Err(Error::Config(_))
        ));
    }
}

use crate::contact::NameHint;
use serde::{Deserialize, Serialize};

/// Core trait implemented by the CSV and VCF extractors.
pub trait ContactExtractor {
    /// Turn one raw document into (name hint, email) pairs in document order.
    ///
    /// Malformed rows or entries are skipped; an error means the document as
    /// a whole could not be read.
    fn extract(&self, content: &[u8]) -> Result<Vec<RawExtraction>, ExtractionError>;

    /// Which input format this extractor understands.
    fn format(&self) -> DocumentFormat;
}

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    Csv,
    Vcf,
}

impl DocumentFormat {
    /// `.vcf` files are vCards, everything else is read as CSV.
    pub fn from_extension(extension: Option<&str>) -> Self {
        match extension {
            Some(ext) if ext.eq_ignore_ascii_case("vcf") => DocumentFormat::Vcf,
            _ => DocumentFormat::Csv,
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Csv => write!(f, "CSV"),
            DocumentFormat::Vcf => write!(f, "VCF"),
        }
    }
}

/// One email found in a document, with whatever name sat next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExtraction {
    pub candidate_email: String,
    pub name_hint: Option<NameHint>,
}

impl RawExtraction {
    pub fn new(candidate_email: impl Into<String>, name_hint: Option<NameHint>) -> Self {
        Self {
            candidate_email: candidate_email.into(),
            name_hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension(Some("vcf")), DocumentFormat::Vcf);
        assert_eq!(DocumentFormat::from_extension(Some("VCF")), DocumentFormat::Vcf);
        assert_eq!(DocumentFormat::from_extension(Some("csv")), DocumentFormat::Csv);
        assert_eq!(DocumentFormat::from_extension(Some("txt")), DocumentFormat::Csv);
        assert_eq!(DocumentFormat::from_extension(None), DocumentFormat::Csv);
    }
}

mod csv_parser;

pub use csv_parser::{detect_delimiter, looks_like_header, CsvDocument, CsvReader};

use crate::email_matcher::find_emails;
use shared_types::{ContactExtractor, DocumentFormat, ExtractionError, NameHint, RawExtraction};

const FIRST_NAME_HEADER: &str = "first name";
const LAST_NAME_HEADER: &str = "last name";

/// Positions of the name columns, resolved once per document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    pub first_name: Option<usize>,
    pub last_name: Option<usize>,
}

impl ColumnIndex {
    /// Only exact `First Name` / `Last Name` headers count (case and
    /// surrounding whitespace ignored). A lone `Name` column is not split.
    pub fn resolve(headers: Option<&[String]>) -> Self {
        let Some(headers) = headers else {
            return Self::default();
        };

        let find = |wanted: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(wanted))
        };

        Self {
            first_name: find(FIRST_NAME_HEADER),
            last_name: find(LAST_NAME_HEADER),
        }
    }

    pub fn name_hint(&self, row: &[String]) -> Option<NameHint> {
        if self.first_name.is_none() && self.last_name.is_none() {
            return None;
        }

        let cell = |index: Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let hint = NameHint::new(cell(self.first_name), cell(self.last_name));
        if hint.is_empty() {
            None
        } else {
            Some(hint)
        }
    }
}

/// Emits one [`RawExtraction`] per email found in any cell, in row order and
/// then column order. Every email in a row shares that row's name hint.
pub struct CsvExtractor {
    reader: CsvReader,
}

impl CsvExtractor {
    pub fn new() -> Self {
        Self {
            reader: CsvReader::new(),
        }
    }

    pub fn extract_rows(&self, document: &CsvDocument) -> Vec<RawExtraction> {
        let columns = ColumnIndex::resolve(document.headers.as_deref());
        let mut units = Vec::new();

        for row in &document.rows {
            let hint = columns.name_hint(row);
            for cell in row {
                for email in find_emails(cell) {
                    units.push(RawExtraction::new(email, hint.clone()));
                }
            }
        }

        units
    }
}

impl Default for CsvExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor for CsvExtractor {
    fn extract(&self, content: &[u8]) -> Result<Vec<RawExtraction>, ExtractionError> {
        let document = self.reader.read(content)?;
        let units = self.extract_rows(&document);

        tracing::debug!(
            "CSV document: {} row(s), {} email occurrence(s)",
            document.rows.len(),
            units.len()
        );

        Ok(units)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Csv
    }
}

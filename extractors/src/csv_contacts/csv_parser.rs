use crate::email_matcher::find_emails;
use csv::ReaderBuilder;
use shared_types::ExtractionError;

const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];
const BINARY_SNIFF_LEN: usize = 1024;
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A CSV document split into rows, with the header row separated out when
/// one was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvDocument {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl CsvDocument {
    pub fn new(headers: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }
}

/// Reads raw CSV bytes into a [`CsvDocument`], detecting the delimiter and
/// whether the first row is a header unless told explicitly.
pub struct CsvReader {
    delimiter: Option<u8>,
    has_headers: Option<bool>,
}

impl CsvReader {
    pub fn new() -> Self {
        Self {
            delimiter: None,
            has_headers: None,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = Some(has_headers);
        self
    }

    pub fn read(&self, content: &[u8]) -> Result<CsvDocument, ExtractionError> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

        let sniff_len = content.len().min(BINARY_SNIFF_LEN);
        if content[..sniff_len].contains(&0) {
            return Err(ExtractionError::ParseError(
                "content looks binary, not CSV text".to_string(),
            ));
        }

        let delimiter = self
            .delimiter
            .unwrap_or_else(|| detect_delimiter(&content[..sniff_len]));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(content);

        // Cells in legacy encodings are decoded lossily so their emails survive.
        let mut rows = Vec::new();
        for (index, result) in reader.byte_records().enumerate() {
            match result {
                Ok(record) => rows.push(
                    record
                        .iter()
                        .map(|cell| String::from_utf8_lossy(cell).into_owned())
                        .collect::<Vec<_>>(),
                ),
                Err(e) => {
                    tracing::warn!("Skipping unreadable CSV row {}: {}", index + 1, e);
                }
            }
        }

        let has_headers = match self.has_headers {
            Some(explicit) => explicit,
            None => rows.first().map(|row| looks_like_header(row)).unwrap_or(false),
        };

        let headers = if has_headers && !rows.is_empty() {
            Some(rows.remove(0))
        } else {
            None
        };

        Ok(CsvDocument::new(headers, rows))
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the delimiter that occurs most often on the first non-empty line.
/// Falls back to a comma, which leaves delimiter-free text as one cell per line.
pub fn detect_delimiter(content: &[u8]) -> u8 {
    let text = String::from_utf8_lossy(content);
    let Some(first_line) = text.lines().find(|line| !line.trim().is_empty()) else {
        return b',';
    };

    let mut best = (b',', 0usize);
    for delimiter in DELIMITERS {
        let count = first_line.bytes().filter(|b| *b == delimiter).count();
        if count > best.1 {
            best = (delimiter, count);
        }
    }
    best.0
}

/// A header row carries column names, not data: no email addresses, and at
/// least one cell mentioning a name or mail column.
pub fn looks_like_header(row: &[String]) -> bool {
    if row.iter().any(|cell| find_emails(cell).next().is_some()) {
        return false;
    }

    row.iter().any(|cell| {
        let cell = cell.trim().to_lowercase();
        cell.contains("name") || cell.contains("mail")
    })
}

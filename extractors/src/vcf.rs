//! vCard (VCF) contact extraction.
//!
//! Entries are delimited by `BEGIN:VCARD` / `END:VCARD`. Within an entry the
//! `N`, `FN` and every `EMAIL` property are read; the version tag does not
//! change how fields are parsed.

use crate::email_matcher::find_emails;
use shared_types::{ContactExtractor, DocumentFormat, ExtractionError, NameHint, RawExtraction};

const UTF8_BOM: &str = "\u{feff}";

pub struct VcfExtractor;

impl VcfExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_text(&self, content: &str) -> Vec<RawExtraction> {
        let mut units = Vec::new();

        for entry in split_entries(content) {
            let card = VCard::parse(&entry);
            let hint = card.name_hint();

            if card.emails.is_empty() {
                tracing::debug!("vCard without EMAIL skipped: {:?}", card.full_name);
                continue;
            }

            for value in &card.emails {
                for email in find_emails(value) {
                    units.push(RawExtraction::new(email, hint.clone()));
                }
            }
        }

        units
    }
}

impl Default for VcfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor for VcfExtractor {
    fn extract(&self, content: &[u8]) -> Result<Vec<RawExtraction>, ExtractionError> {
        // vCard 2.1 exports often carry CHARSET=ISO-8859-1 values.
        let text = String::from_utf8_lossy(content);
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text);

        Ok(self.extract_text(text))
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Vcf
    }
}

/// The properties of one vCard entry that matter for contacts.
#[derive(Debug, Default, PartialEq, Eq)]
struct VCard {
    full_name: Option<String>,
    structured_name: Option<String>,
    emails: Vec<String>,
}

impl VCard {
    fn parse(lines: &[String]) -> Self {
        let mut card = VCard::default();

        for line in lines {
            let Some((name, value)) = parse_property(line) else {
                continue;
            };

            match name.as_str() {
                "FN" if card.full_name.is_none() => card.full_name = Some(value.to_string()),
                "N" if card.structured_name.is_none() => {
                    card.structured_name = Some(value.to_string())
                }
                "EMAIL" => card.emails.push(value.to_string()),
                _ => {}
            }
        }

        card
    }

    /// `N` (family;given;...) wins when it has a family or given name,
    /// otherwise `FN` is split into first word and remainder.
    fn name_hint(&self) -> Option<NameHint> {
        if let Some(structured) = &self.structured_name {
            let parts = split_structured(structured);
            let last = parts.first().map(|s| s.trim()).unwrap_or("");
            let first = parts.get(1).map(|s| s.trim()).unwrap_or("");

            if !first.is_empty() || !last.is_empty() {
                return Some(NameHint::new(first, last));
            }
        }

        let full = unescape(self.full_name.as_deref()?);
        let full = full.trim();
        if full.is_empty() {
            return None;
        }

        match full.split_once(char::is_whitespace) {
            Some((first, rest)) => Some(NameHint::new(first, rest.trim())),
            None => Some(NameHint::new(full, "")),
        }
    }
}

/// Collects the unfolded lines of every complete `BEGIN:VCARD` … `END:VCARD`
/// envelope. Unterminated entries are dropped.
fn split_entries(content: &str) -> Vec<Vec<String>> {
    let mut entries = Vec::new();
    let mut current: Option<Vec<String>> = None;

    for raw_line in content.lines() {
        let line = raw_line.trim_end_matches('\r');
        let marker = line.trim();

        if marker.eq_ignore_ascii_case("BEGIN:VCARD") {
            if current.is_some() {
                tracing::warn!("Dropping vCard entry without END:VCARD");
            }
            current = Some(Vec::new());
            continue;
        }

        if marker.eq_ignore_ascii_case("END:VCARD") {
            if let Some(lines) = current.take() {
                entries.push(lines);
            }
            continue;
        }

        let Some(lines) = current.as_mut() else {
            continue;
        };

        // Folded continuation lines start with a single space or tab.
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(previous) = lines.last_mut() {
                previous.push_str(&line[1..]);
                continue;
            }
        }

        lines.push(line.to_string());
    }

    if current.is_some() {
        tracing::warn!("Dropping vCard entry without END:VCARD at end of document");
    }

    entries
}

/// Splits `item1.EMAIL;TYPE=work:x@y.com` into (`EMAIL`, `x@y.com`).
fn parse_property(line: &str) -> Option<(String, &str)> {
    let (head, value) = line.split_once(':')?;
    let name = head.split(';').next()?.trim();
    let name = name.rsplit('.').next().unwrap_or(name);

    if name.is_empty() {
        return None;
    }

    Some((name.to_ascii_uppercase(), value.trim()))
}

/// Splits a structured value on unescaped `;`, unescaping each component.
fn split_structured(value: &str) -> Vec<String> {
    let mut parts = vec![String::new()];
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    push_escaped(parts.last_mut(), escaped);
                }
            }
            ';' => parts.push(String::new()),
            _ => {
                if let Some(part) = parts.last_mut() {
                    part.push(c);
                }
            }
        }
    }

    parts
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                push_escaped(Some(&mut out), escaped);
            }
        } else {
            out.push(c);
        }
    }

    out
}

fn push_escaped(target: Option<&mut String>, escaped: char) {
    if let Some(target) = target {
        match escaped {
            'n' | 'N' => target.push(' '),
            other => target.push(other),
        }
    }
}

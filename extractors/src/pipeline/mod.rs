//! Extraction → assembly → deduplication → classification → sorting.
//!
//! A [`Pipeline`] holds the stateless stages; the only mutable state is the
//! [`ContactAccumulator`] the caller passes in, so documents processed into
//! the same accumulator are merged one at a time.

mod assembler;
mod dedup;
mod sorter;

pub use assembler::assemble;
pub use dedup::{deduplicate, ContactAccumulator, NamePolicy};
pub use sorter::{sort_by_email, SiftResult};

use crate::csv_contacts::CsvExtractor;
use crate::suspicion::SuspicionClassifier;
use crate::vcf::VcfExtractor;
use shared_types::{ContactExtractor, ContactRecord, DocumentFormat, ExtractionError};

/// Counts for one ingested document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// Email occurrences found, duplicates included.
    pub extracted: usize,
    /// Records that were new to the accumulator.
    pub added: usize,
}

pub struct Pipeline {
    csv: CsvExtractor,
    vcf: VcfExtractor,
    classifier: Option<SuspicionClassifier>,
}

impl Pipeline {
    /// `classifier: None` disables filtering: every record is valid.
    pub fn new(classifier: Option<SuspicionClassifier>) -> Self {
        Self {
            csv: CsvExtractor::new(),
            vcf: VcfExtractor::new(),
            classifier,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(Some(SuspicionClassifier::with_defaults()))
    }

    fn extractor(&self, format: DocumentFormat) -> &dyn ContactExtractor {
        match format {
            DocumentFormat::Csv => &self.csv,
            DocumentFormat::Vcf => &self.vcf,
        }
    }

    /// Records of one document in document order, duplicates included.
    pub fn extract_records(
        &self,
        format: DocumentFormat,
        content: &[u8],
    ) -> Result<Vec<ContactRecord>, ExtractionError> {
        let units = self.extractor(format).extract(content)?;
        Ok(units.into_iter().map(assemble).collect())
    }

    /// Extracts one document and merges it into `accumulator`. On error the
    /// accumulator is left untouched.
    pub fn ingest(
        &self,
        format: DocumentFormat,
        content: &[u8],
        accumulator: &mut ContactAccumulator,
    ) -> Result<DocumentStats, ExtractionError> {
        let records = self.extract_records(format, content)?;
        let extracted = records.len();
        let added = accumulator.extend(records);

        tracing::debug!(
            "{} document: {} email(s) found, {} new",
            format,
            extracted,
            added
        );

        Ok(DocumentStats { extracted, added })
    }

    /// Classifies every unique record and returns both sets sorted by email.
    pub fn finish(&self, accumulator: ContactAccumulator) -> SiftResult {
        let mut result = SiftResult::default();

        for record in accumulator.into_records() {
            match &self.classifier {
                Some(classifier) => {
                    let verdict = classifier.classify(record);
                    if verdict.is_suspicious() {
                        result.suspicious.push(verdict.record);
                    } else {
                        result.valid.push(verdict.record);
                    }
                }
                None => result.valid.push(record),
            }
        }

        result.sorted()
    }

    /// Runs one document end to end with its own accumulator.
    pub fn process(
        &self,
        format: DocumentFormat,
        content: &[u8],
        policy: NamePolicy,
    ) -> Result<SiftResult, ExtractionError> {
        let mut accumulator = ContactAccumulator::new(policy);
        self.ingest(format, content, &mut accumulator)?;
        Ok(self.finish(accumulator))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

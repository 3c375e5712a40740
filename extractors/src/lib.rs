//! Extractors Crate
//!
//! Turns CSV and vCard contact exports into deduplicated, classified contact
//! records.
//!
//! # Architecture
//!
//! - **Types**: records, verdicts and the `ContactExtractor` trait live in
//!   the `shared-types` crate
//! - **Implementations**: the matchers, extractors and pipeline stages live
//!   here
//!
//! # Available Extractors
//!
//! - `CsvExtractor`: emails from every cell, names from `First Name` /
//!   `Last Name` columns
//! - `VcfExtractor`: emails from `EMAIL` properties, names from `N` or `FN`
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{NamePolicy, Pipeline};
//! use shared_types::DocumentFormat;
//!
//! let pipeline = Pipeline::with_defaults();
//! let result = pipeline.process(DocumentFormat::Csv, &content, NamePolicy::FirstWins)?;
//! ```

pub mod csv_contacts;
pub mod email_matcher;
pub mod pipeline;
pub mod suspicion;
pub mod vcf;

// Re-export commonly used types
pub use csv_contacts::{ColumnIndex, CsvDocument, CsvExtractor, CsvReader};
pub use email_matcher::{find_emails, is_email};
pub use pipeline::{
    assemble, deduplicate, sort_by_email, ContactAccumulator, DocumentStats, NamePolicy, Pipeline,
    SiftResult,
};
pub use suspicion::{SuspicionClassifier, SuspicionThresholds};
pub use vcf::VcfExtractor;

// Re-export the extractor trait from shared-types for convenience
pub use shared_types::ContactExtractor;

//! Shared data model for the contact-sift workspace.
//!
//! Everything that crosses a crate boundary lives here: the canonical
//! [`ContactRecord`], the intermediate [`RawExtraction`] produced by the
//! format extractors, the classifier's [`Verdict`], and the
//! [`ContactExtractor`] trait that both extractors implement.

pub mod contact;
pub mod extraction;
pub mod verdict;

pub use contact::{ContactRecord, NameHint};
pub use extraction::{ContactExtractor, DocumentFormat, ExtractionError, RawExtraction};
pub use verdict::{RuleId, Verdict};

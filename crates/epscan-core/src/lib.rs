//! Core library for extracting Earnings Per Share from financial filings.
//!
//! This crate provides:
//! - Document loading and HTML text normalization
//! - EPS label matching over a fixed catalog of label grammars
//! - Figure and sign recovery after a matched label
//! - Priority resolution when several label categories match
//! - Result tables and accuracy checking against a reference table

pub mod document;
pub mod eps;
pub mod error;
pub mod models;
pub mod report;

pub use document::{AutoNormalizer, Document, DocumentKind, HtmlNormalizer, TextNormalizer};
pub use eps::{extract_eps, EpsExtractor, EpsParser, ExtractionResult, PatternEpsParser};
pub use error::{DocumentError, EpsError, ReportError, Result};
pub use models::config::EpscanConfig;
pub use models::eps::{Candidate, Category, EpsRecord, LabelMatch};
pub use report::{compare, read_results, write_results, AccuracyReport};

use std::path::Path;

/// Load a document from disk and extract its EPS with the given configuration.
///
/// A result without `eps` means the document was readable but carries no
/// recognizable EPS label with a figure; unreadable documents are errors.
pub fn extract_file(path: &Path, config: &EpscanConfig) -> Result<ExtractionResult> {
    let document = Document::from_path(path)?;
    let normalizer = AutoNormalizer::from_config(&config.document);
    let parser = PatternEpsParser::from_config(&config.extraction);

    Ok(parser.extract(&document, &normalizer)?)
}

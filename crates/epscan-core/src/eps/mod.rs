//! EPS extraction.

mod parser;
pub mod rules;

pub use parser::{extract_eps, EpsParser, ExtractionResult, PatternEpsParser};

use rust_decimal::Decimal;

use crate::document::{Document, TextNormalizer};
use crate::error::DocumentError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Trait for document-level EPS extractors.
pub trait EpsExtractor {
    /// Extract EPS from a document using the given normalizer.
    fn extract(
        &self,
        document: &Document,
        normalizer: &dyn TextNormalizer,
    ) -> Result<ExtractionResult>;

    /// Extract EPS from already normalized text.
    fn extract_from_text(&self, text: &str) -> Option<Decimal>;
}

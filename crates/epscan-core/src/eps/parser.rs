//! Pattern-based EPS parser combining label matching, value recovery and
//! priority resolution.

use std::collections::BTreeMap;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::document::{Document, TextNormalizer};
use crate::models::config::ExtractionConfig;
use crate::models::eps::{Candidate, Category, LabelMatch};

use super::rules::{extract_value, find_matches, select, DEFAULT_LOOKAHEAD_CHARS};
use super::{EpsExtractor, Result};

/// Result of EPS extraction for one text.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Resolved EPS value; `None` when no category produced one.
    pub eps: Option<Decimal>,
    /// Category that supplied `eps`.
    pub category: Option<Category>,
    /// First label of each category found, in catalog order.
    pub matches: Vec<LabelMatch>,
    /// Values recovered after those labels, in catalog order.
    pub candidates: Vec<Candidate>,
    /// Length of the normalized text in bytes.
    pub text_length: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    /// Whether an EPS value was found.
    pub fn is_found(&self) -> bool {
        self.eps.is_some()
    }
}

/// Trait for EPS parsing.
pub trait EpsParser {
    /// Parse EPS from normalized text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// EPS parser driven by the label grammar catalog.
#[derive(Debug, Clone)]
pub struct PatternEpsParser {
    /// Characters after a label searched for its figure.
    lookahead_chars: usize,
}

impl PatternEpsParser {
    /// Create a parser with the default lookahead window.
    pub fn new() -> Self {
        Self {
            lookahead_chars: DEFAULT_LOOKAHEAD_CHARS,
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_lookahead_chars(config.lookahead_chars)
    }

    /// Set the lookahead window size.
    pub fn with_lookahead_chars(mut self, chars: usize) -> Self {
        self.lookahead_chars = chars;
        self
    }

    /// Lookahead window size.
    pub fn lookahead_chars(&self) -> usize {
        self.lookahead_chars
    }
}

impl Default for PatternEpsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EpsParser for PatternEpsParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        let matches = find_matches(text);
        let mut candidates = BTreeMap::new();

        for (category, m) in &matches {
            match extract_value(text, m, self.lookahead_chars) {
                Some(candidate) => {
                    debug!(
                        "{} label {:?} -> {} ({})",
                        category, m.label, candidate.value, candidate.source
                    );
                    candidates.insert(*category, candidate);
                }
                None => {
                    debug!(
                        "{} label {:?} has no figure within {} characters",
                        category, m.label, self.lookahead_chars
                    );
                }
            }
        }

        let selected = select(&candidates);
        let eps = selected.map(|c| c.value);
        let category = selected.map(|c| c.category);

        match (eps, category) {
            (Some(value), Some(category)) => debug!("resolved EPS {} from {}", value, category),
            _ => debug!("no EPS figure in {} characters of text", text.len()),
        }

        ExtractionResult {
            eps,
            category,
            matches: matches.into_values().collect(),
            candidates: candidates.into_values().collect(),
            text_length: text.len(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl EpsExtractor for PatternEpsParser {
    fn extract(
        &self,
        document: &Document,
        normalizer: &dyn TextNormalizer,
    ) -> Result<ExtractionResult> {
        let text = normalizer.normalize(document)?;
        let result = self.parse(&text);

        info!(
            "{}: EPS {}",
            document.id,
            result
                .eps
                .map(|v| v.to_string())
                .unwrap_or_else(|| "not found".to_string())
        );

        Ok(result)
    }

    fn extract_from_text(&self, text: &str) -> Option<Decimal> {
        self.parse(text).eps
    }
}

/// Extract EPS from normalized text with the default parser.
pub fn extract_eps(text: &str) -> Option<Decimal> {
    PatternEpsParser::new().extract_from_text(text)
}

//! Rule-based EPS label matching, value recovery and resolution.

pub mod labels;
pub mod patterns;
pub mod priority;
pub mod value;

pub use labels::{find_label, find_matches, CategoryRule};
pub use priority::{resolve, select, PRIORITY_ORDER};
pub use value::{extract_value, lookahead_window, DEFAULT_LOOKAHEAD_CHARS};

use crate::models::eps::{Category, LabelMatch};

/// Trait for label matchers.
pub trait LabelRule {
    /// Category this rule recognizes.
    fn category(&self) -> Category;

    /// Find the first (leftmost) label in text.
    fn find(&self, text: &str) -> Option<LabelMatch>;
}

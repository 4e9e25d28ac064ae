//! EPS extraction data models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label grammar category.
///
/// Declaration order is the catalog order used when scanning a document.
/// Resolution uses a separate priority order, see
/// [`PRIORITY_ORDER`](crate::eps::rules::priority::PRIORITY_ORDER).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// "Basic earnings per share", "Net income per share - Basic".
    Basic,
    /// "Diluted earnings per share", "Earnings per share ... Diluted".
    Diluted,
    /// Labels that declare a loss: "(Loss) earnings per share", "Loss per share".
    Loss,
    /// "Per share data: Net income - Basic".
    PerShareFirst,
}

impl Category {
    /// Every category in catalog order.
    pub const ALL: [Category; 4] = [
        Category::Basic,
        Category::Diluted,
        Category::Loss,
        Category::PerShareFirst,
    ];

    /// Name used in logs and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Basic => "basic",
            Category::Diluted => "diluted",
            Category::Loss => "loss",
            Category::PerShareFirst => "per_share_first",
        }
    }

    /// Parse a category name (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Some(Category::Basic),
            "diluted" => Some(Category::Diluted),
            "loss" => Some(Category::Loss),
            "per_share_first" => Some(Category::PerShareFirst),
            _ => None,
        }
    }

    /// Whether the label itself declares a negative figure.
    pub fn declares_loss(&self) -> bool {
        matches!(self, Category::Loss)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a category's label grammar matched in normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMatch {
    /// Category whose grammar matched.
    pub category: Category,
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
    /// The matched label text.
    pub label: String,
}

impl LabelMatch {
    pub fn new(category: Category, start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            category,
            start,
            end,
            label: label.into(),
        }
    }
}

/// A signed value recovered after one category's label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Category that produced the value.
    pub category: Category,
    /// Signed EPS value.
    pub value: Decimal,
    /// Whether the numeral was written in accounting parentheses.
    pub parenthesized: bool,
    /// The numeral as it appeared in the text.
    pub source: String,
}

/// One row of the result table: a document and its EPS, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpsRecord {
    /// Document file name.
    pub filename: String,
    /// Extracted EPS; `None` is written as a blank cell.
    #[serde(rename = "EPS")]
    pub eps: Option<Decimal>,
}

impl EpsRecord {
    pub fn new(filename: impl Into<String>, eps: Option<Decimal>) -> Self {
        Self {
            filename: filename.into(),
            eps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!(Category::from_str("basic"), Some(Category::Basic));
        assert_eq!(Category::from_str(" Per_Share_First "), Some(Category::PerShareFirst));
        assert_eq!(Category::from_str("adjusted"), None);
    }

    #[test]
    fn test_category_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_only_loss_declares_loss() {
        let declaring: Vec<_> = Category::ALL
            .iter()
            .filter(|c| c.declares_loss())
            .collect();
        assert_eq!(declaring, vec![&Category::Loss]);
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::PerShareFirst).unwrap();
        assert_eq!(json, "\"per_share_first\"");
    }
}

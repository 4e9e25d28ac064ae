//! Label matching: first grammar hit per category.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::trace;

use super::patterns::{BASIC_LEADING, BASIC_TRAILING, DILUTED, LOSS, PER_SHARE_FIRST};
use super::LabelRule;
use crate::models::eps::{Category, LabelMatch};

/// Prefix that disqualifies a leading `basic` label.
const NON_GAAP: &str = "non-gaap";

/// Matches one category's label grammar.
pub struct CategoryRule {
    category: Category,
}

impl CategoryRule {
    pub fn new(category: Category) -> Self {
        Self { category }
    }
}

impl LabelRule for CategoryRule {
    fn category(&self) -> Category {
        self.category
    }

    fn find(&self, text: &str) -> Option<LabelMatch> {
        let (start, end) = match self.category {
            Category::Basic => find_basic(text),
            Category::Diluted => first_span(&DILUTED, text),
            Category::Loss => first_span(&LOSS, text),
            Category::PerShareFirst => first_span(&PER_SHARE_FIRST, text),
        }?;

        Some(LabelMatch::new(self.category, start, end, &text[start..end]))
    }
}

/// Find the first label of one category.
pub fn find_label(category: Category, text: &str) -> Option<LabelMatch> {
    CategoryRule::new(category).find(text)
}

/// Find the first label of every category that occurs in `text`.
///
/// Categories are searched independently; several may match the same region.
pub fn find_matches(text: &str) -> BTreeMap<Category, LabelMatch> {
    let mut matches = BTreeMap::new();

    for category in Category::ALL {
        if let Some(m) = find_label(category, text) {
            trace!("{} label at {}..{}: {:?}", category, m.start, m.end, m.label);
            matches.insert(category, m);
        }
    }

    matches
}

fn first_span(pattern: &Regex, text: &str) -> Option<(usize, usize)> {
    pattern.find(text).map(|m| (m.start(), m.end()))
}

/// Leftmost `basic` label across both orderings. On a tie the leading
/// ordering wins, as it would as the first alternative of one pattern.
fn find_basic(text: &str) -> Option<(usize, usize)> {
    let leading = find_basic_leading(text);
    let trailing = first_span(&BASIC_TRAILING, text);

    match (leading, trailing) {
        (Some(l), Some(t)) if t.0 < l.0 => Some(t),
        (Some(l), _) => Some(l),
        (None, t) => t,
    }
}

fn find_basic_leading(text: &str) -> Option<(usize, usize)> {
    let mut from = 0;

    while from <= text.len() {
        let m = BASIC_LEADING.find_at(text, from)?;
        if !preceded_by_non_gaap(text, m.start()) {
            return Some((m.start(), m.end()));
        }

        trace!("skipping non-GAAP basic label at {}", m.start());
        from = next_char_boundary(text, m.start());
    }

    None
}

/// Whether `text[..pos]` ends with "non-GAAP" followed by one whitespace
/// character, compared case-insensitively.
fn preceded_by_non_gaap(text: &str, pos: usize) -> bool {
    let mut before = text[..pos].chars();
    match before.next_back() {
        Some(c) if c.is_whitespace() => {}
        _ => return false,
    }

    let rest = before.as_str();
    rest.len() >= NON_GAAP.len()
        && rest.is_char_boundary(rest.len() - NON_GAAP.len())
        && rest[rest.len() - NON_GAAP.len()..].eq_ignore_ascii_case(NON_GAAP)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| pos + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_basic_leading() {
        let m = find_label(Category::Basic, "Total Basic earnings per share $1.23").unwrap();
        assert_eq!(m.label, "Basic earnings per share");
        assert_eq!(m.start, 6);
    }

    #[test]
    fn test_basic_includes_dollar_prefix() {
        let m = find_label(Category::Basic, "$0.50 Basic net income per share").unwrap();
        assert_eq!(m.label, "$0.50 Basic net income per share");
    }

    #[test]
    fn test_non_gaap_excluded() {
        assert!(find_label(Category::Basic, "Non-GAAP basic earnings per share 1.10").is_none());
        assert!(find_label(Category::Basic, "non-gaap\tBasic earnings per share 1.10").is_none());
    }

    #[test]
    fn test_non_gaap_skips_to_next_occurrence() {
        let text = "Non-GAAP basic earnings per share 1.10. GAAP: Basic earnings per share 0.90";
        let m = find_label(Category::Basic, text).unwrap();
        assert_eq!(&text[m.start..m.end], "Basic earnings per share");
        assert!(m.start > 40);
    }

    #[test]
    fn test_non_gaap_requires_adjacent_whitespace() {
        // Two spaces: the lookbehind only covers one whitespace character
        assert!(find_label(Category::Basic, "non-GAAP  Basic earnings per share").is_some());
        assert!(find_label(Category::Basic, "non-GAAP: Basic earnings per share").is_some());
    }

    #[test]
    fn test_non_gaap_does_not_block_trailing_ordering() {
        let m = find_label(Category::Basic, "non-GAAP Earnings per share: Basic").unwrap();
        assert_eq!(m.label, "Earnings per share: Basic");
    }

    #[test]
    fn test_basic_leftmost_ordering_wins() {
        let text = "Net income per share - Basic 1.00 ... Basic earnings per share 2.00";
        let m = find_label(Category::Basic, text).unwrap();
        assert_eq!(m.start, 0);
        assert_eq!(m.label, "Net income per share - Basic");
    }

    #[test]
    fn test_find_matches_is_independent_per_category() {
        let text = "Basic earnings per share 1.00\nDiluted earnings per share 0.95";
        let matches = find_matches(text);

        assert!(matches.contains_key(&Category::Basic));
        assert!(matches.contains_key(&Category::Diluted));
        assert!(!matches.contains_key(&Category::Loss));
        assert_eq!(matches[&Category::Diluted].label, "Diluted earnings per share");
    }

    #[test]
    fn test_find_matches_empty_text() {
        assert!(find_matches("").is_empty());
        assert!(find_matches("Revenue grew 12% year over year.").is_empty());
    }

    #[test]
    fn test_multibyte_text_before_label() {
        let text = "Résumé — non-GAAP Basic earnings per share 1.00; Basic earnings per share 0.80";
        let m = find_label(Category::Basic, text).unwrap();
        assert!(text[m.end..].starts_with(" 0.80"));
    }
}

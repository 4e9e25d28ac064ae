//! Figure recovery after a matched label.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use super::patterns::NUMERAL;
use crate::models::eps::{Candidate, LabelMatch};

/// Characters after a label searched for its figure.
pub const DEFAULT_LOOKAHEAD_CHARS: usize = 100;

/// Text from the end of a match through the next `chars` characters,
/// clipped at the end of `text`.
pub fn lookahead_window<'a>(text: &'a str, m: &LabelMatch, chars: usize) -> &'a str {
    let tail = &text[m.end..];
    let end = tail
        .char_indices()
        .nth(chars)
        .map_or(tail.len(), |(i, _)| i);
    &tail[..end]
}

/// Recover the signed figure following a label.
///
/// The first `d.dd` numeral in the window that fits a `Decimal` wins. It is
/// negative when written as `(d.dd)` or when the label declares a loss.
pub fn extract_value(text: &str, m: &LabelMatch, lookahead_chars: usize) -> Option<Candidate> {
    let window = lookahead_window(text, m, lookahead_chars);

    let (caps, magnitude) = NUMERAL.captures_iter(window).find_map(|caps| {
        let parsed = Decimal::from_str(&caps[2]);
        match parsed {
            Ok(value) => Some((caps, value)),
            Err(e) => {
                debug!("{} figure {:?} not parsable: {}", m.category, &caps[2], e);
                None
            }
        }
    })?;

    let parenthesized = caps.get(1).is_some() && caps.get(3).is_some();
    let value = if parenthesized || m.category.declares_loss() {
        -magnitude
    } else {
        magnitude
    };

    Some(Candidate {
        category: m.category,
        value,
        parenthesized,
        source: caps[0].trim_end().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eps::rules::labels::find_label;
    use crate::models::eps::Category;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn value_after(category: Category, text: &str) -> Option<Decimal> {
        let m = find_label(category, text)?;
        extract_value(text, &m, DEFAULT_LOOKAHEAD_CHARS).map(|c| c.value)
    }

    #[test]
    fn test_plain_figure_is_positive() {
        assert_eq!(value_after(Category::Basic, "Basic earnings per share 1.23"), Some(dec("1.23")));
    }

    #[test]
    fn test_parenthesized_figure_is_negative() {
        let text = "Basic earnings per share (1.23)";
        let m = find_label(Category::Basic, text).unwrap();
        let candidate = extract_value(text, &m, DEFAULT_LOOKAHEAD_CHARS).unwrap();

        assert_eq!(candidate.value, dec("-1.23"));
        assert!(candidate.parenthesized);
        assert_eq!(candidate.source, "(1.23)");
    }

    #[test]
    fn test_loss_label_negates_plain_figure() {
        assert_eq!(value_after(Category::Loss, "Net loss per share 1.23"), Some(dec("-1.23")));
    }

    #[test]
    fn test_loss_label_does_not_double_negate() {
        assert_eq!(value_after(Category::Loss, "Net loss per share (1.23)"), Some(dec("-1.23")));
    }

    #[test]
    fn test_unbalanced_parenthesis_keeps_sign() {
        assert_eq!(value_after(Category::Basic, "Basic earnings per share (1.23 "), Some(dec("1.23")));
        assert_eq!(value_after(Category::Basic, "Basic earnings per share 1.23)"), Some(dec("1.23")));
    }

    #[test]
    fn test_integer_is_not_a_figure() {
        assert_eq!(value_after(Category::Basic, "Basic earnings per share (note 4) 2024"), None);
        assert_eq!(value_after(Category::Basic, "Basic earnings per share 3 and 0.75"), Some(dec("0.75")));
    }

    #[test]
    fn test_non_ascii_digits_are_not_a_figure() {
        assert_eq!(
            value_after(Category::Basic, "Basic earnings per share \u{661}.\u{662}5"),
            None
        );
        assert_eq!(
            value_after(Category::Basic, "Basic earnings per share \u{661}.\u{662}5 or 1.25"),
            Some(dec("1.25"))
        );
    }

    #[test]
    fn test_oversized_numeral_skipped_for_next_figure() {
        let text = format!("Basic earnings per share {}.5 then (0.42)", "9".repeat(30));
        let m = find_label(Category::Basic, &text).unwrap();
        let candidate = extract_value(&text, &m, DEFAULT_LOOKAHEAD_CHARS).unwrap();

        assert_eq!(candidate.value, dec("-0.42"));
        assert_eq!(candidate.source, "(0.42)");
    }

    #[test]
    fn test_numeral_fitting_window_is_found() {
        let label = "Basic earnings per share";
        let text = format!("{}{}1.23", label, " ".repeat(96));
        assert_eq!(value_after(Category::Basic, &text), Some(dec("1.23")));
    }

    #[test]
    fn test_numeral_beyond_window_is_ignored() {
        let label = "Basic earnings per share";
        let text = format!("{}{}1.23", label, " ".repeat(101));
        assert_eq!(value_after(Category::Basic, &text), None);
    }

    #[test]
    fn test_numeral_cut_by_window_edge() {
        let label = "Basic earnings per share";
        let text = format!("{}{}12.345", label, " ".repeat(96));
        assert_eq!(value_after(Category::Basic, &text), Some(dec("12.3")));
    }

    #[test]
    fn test_window_counts_characters_not_bytes() {
        let text = format!("Basic earnings per share{}0.42", "€".repeat(96));
        assert_eq!(value_after(Category::Basic, &text), Some(dec("0.42")));
    }

    #[test]
    fn test_window_clipped_at_end_of_text() {
        let text = "Basic earnings per share";
        let m = find_label(Category::Basic, text).unwrap();
        assert_eq!(lookahead_window(text, &m, 100), "");
        assert!(extract_value(text, &m, 100).is_none());
    }
}

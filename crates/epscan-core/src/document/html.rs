//! HTML text normalization using scraper.

use scraper::{ElementRef, Html};
use tracing::debug;

use super::{Document, Result, TextNormalizer};

/// Elements whose text is never rendered.
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "template"];

/// Extracts the visible text of an HTML document.
///
/// Text nodes are concatenated in document order with no separators added,
/// so labels split across inline tags (`<b>Basic</b> earnings`) read as one
/// phrase. Character references are decoded by the parser.
#[derive(Debug, Clone)]
pub struct HtmlNormalizer {
    skip_script_and_style: bool,
}

impl HtmlNormalizer {
    pub fn new() -> Self {
        Self {
            skip_script_and_style: true,
        }
    }

    /// Set whether text inside `<script>`, `<style>` and `<template>` is dropped.
    pub fn with_skip_script_and_style(mut self, skip: bool) -> Self {
        self.skip_script_and_style = skip;
        self
    }

    /// Visible text of raw HTML.
    pub fn text_of(&self, html: &str) -> String {
        let parsed = Html::parse_document(html);
        if !parsed.errors.is_empty() {
            debug!("HTML parsed with {} recoverable errors", parsed.errors.len());
        }

        let mut text = String::with_capacity(html.len() / 2);
        self.collect_text(parsed.root_element(), &mut text);
        text
    }

    fn collect_text(&self, element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                out.push_str(text);
            } else if let Some(child_element) = ElementRef::wrap(child) {
                if self.skip_script_and_style
                    && HIDDEN_ELEMENTS.contains(&child_element.value().name())
                {
                    continue;
                }
                self.collect_text(child_element, out);
            }
        }
    }
}

impl Default for HtmlNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer for HtmlNormalizer {
    fn normalize(&self, document: &Document) -> Result<String> {
        let text = self.text_of(&document.content);
        debug!(
            "{}: {} bytes of markup, {} bytes of text",
            document.id,
            document.content.len(),
            text.len()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentKind;

    #[test]
    fn test_inline_tags_are_joined() {
        let text = HtmlNormalizer::new()
            .text_of("<html><body><b>Basic</b> earnings per <i>share</i> $1.23</body></html>");
        assert_eq!(text, "Basic earnings per share $1.23");
    }

    #[test]
    fn test_entities_are_decoded() {
        let text = HtmlNormalizer::new()
            .text_of("<p>Net income per share&nbsp;&#8212;&nbsp;Basic&#160;(0.45)</p>");
        assert_eq!(text, "Net income per share\u{a0}—\u{a0}Basic\u{a0}(0.45)");
    }

    #[test]
    fn test_table_cells_keep_source_whitespace() {
        let html = "<table><tr>\n<td>Diluted earnings per share</td>\n<td>2.10</td>\n</tr></table>";
        let text = HtmlNormalizer::new().text_of(html);
        assert!(text.contains("Diluted earnings per share"));
        assert!(text.contains("2.10"));
    }

    #[test]
    fn test_script_and_style_skipped() {
        let html = "<head><style>.eps { color: red }</style><script>var eps = 9.99;</script></head>\
                    <body>Loss per share 0.12</body>";
        assert_eq!(HtmlNormalizer::new().text_of(html), "Loss per share 0.12");

        let kept = HtmlNormalizer::new()
            .with_skip_script_and_style(false)
            .text_of(html);
        assert!(kept.contains("9.99"));
    }

    #[test]
    fn test_markup_without_text_is_empty_text() {
        let document = Document::new(
            "empty.htm",
            DocumentKind::Html,
            "<html><body><img src=x></body></html>",
        );
        assert_eq!(HtmlNormalizer::new().normalize(&document).unwrap(), "");
    }
}

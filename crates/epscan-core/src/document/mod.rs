//! Document loading and text normalization.

mod html;

pub use html::HtmlNormalizer;

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::debug;

use crate::error::DocumentError;
use crate::models::config::DocumentConfig;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Kind of markup a document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// HTML filing (`.htm`, `.html`).
    Html,
    /// Already plain text.
    PlainText,
}

impl DocumentKind {
    /// Determine the kind from a file extension.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_lowercase().as_str() {
            "htm" | "html" | "xhtml" => Ok(DocumentKind::Html),
            "txt" | "text" => Ok(DocumentKind::PlainText),
            other => Err(DocumentError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Determine the kind from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(extension)
    }
}

/// A disclosure document: identifier plus raw content.
#[derive(Debug, Clone)]
pub struct Document {
    /// Identifier reported in results (the file name).
    pub id: String,
    /// Source path, when loaded from disk.
    pub path: Option<PathBuf>,
    /// Markup kind.
    pub kind: DocumentKind,
    /// Raw content.
    pub content: String,
}

impl Document {
    /// Create a document from in-memory content.
    pub fn new(id: impl Into<String>, kind: DocumentKind, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: None,
            kind,
            content: content.into(),
        }
    }

    /// Load a document from disk.
    ///
    /// Bytes are decoded as UTF-8 (honouring a BOM), falling back to
    /// Windows-1252 when they are not valid UTF-8.
    pub fn from_path(path: &Path) -> Result<Self> {
        let kind = DocumentKind::from_path(path)?;
        let bytes = fs::read(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (decoded, encoding, had_errors) = UTF_8.decode(&bytes);
        let content = if had_errors {
            debug!("{} is not valid UTF-8, decoding as windows-1252", path.display());
            WINDOWS_1252.decode(&bytes).0.into_owned()
        } else {
            debug!("{} decoded as {}", path.display(), encoding.name());
            decoded.into_owned()
        };

        let id = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            id,
            path: Some(path.to_path_buf()),
            kind,
            content,
        })
    }
}

/// Trait for turning a document into its visible text.
pub trait TextNormalizer {
    /// Linearize the document's visible text.
    fn normalize(&self, document: &Document) -> Result<String>;
}

/// Passes plain-text documents through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextNormalizer;

impl TextNormalizer for PlainTextNormalizer {
    fn normalize(&self, document: &Document) -> Result<String> {
        Ok(document.content.clone())
    }
}

/// Picks the normalizer matching each document's kind.
#[derive(Debug, Clone, Default)]
pub struct AutoNormalizer {
    html: HtmlNormalizer,
}

impl AutoNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from document configuration.
    pub fn from_config(config: &DocumentConfig) -> Self {
        Self {
            html: HtmlNormalizer::new().with_skip_script_and_style(config.skip_script_and_style),
        }
    }
}

impl TextNormalizer for AutoNormalizer {
    fn normalize(&self, document: &Document) -> Result<String> {
        match document.kind {
            DocumentKind::Html => self.html.normalize(document),
            DocumentKind::PlainText => PlainTextNormalizer.normalize(document),
        }
    }
}

/// Normalize a document with the normalizer matching its kind.
pub fn normalize(document: &Document, config: &DocumentConfig) -> Result<String> {
    AutoNormalizer::from_config(config).normalize(document)
}

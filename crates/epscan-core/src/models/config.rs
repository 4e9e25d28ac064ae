//! Configuration structures for the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main configuration for the epscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EpscanConfig {
    /// Label matching and value recovery configuration.
    pub extraction: ExtractionConfig,

    /// Document loading configuration.
    pub document: DocumentConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,

    /// Accuracy check configuration.
    pub check: CheckConfig,
}

/// EPS extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of characters after a matched label searched for the figure.
    pub lookahead_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            lookahead_chars: crate::eps::rules::value::DEFAULT_LOOKAHEAD_CHARS,
        }
    }
}

/// Document loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// File extensions picked up when scanning a directory.
    pub extensions: Vec<String>,

    /// Drop text inside `<script>`, `<style>` and `<template>` elements.
    pub skip_script_and_style: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["htm".to_string(), "html".to_string(), "txt".to_string()],
            skip_script_and_style: true,
        }
    }
}

impl DocumentConfig {
    /// Whether a file extension is one of the configured document types.
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of documents processed concurrently.
    pub jobs: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { jobs: 4 }
    }
}

/// Accuracy check configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Largest absolute difference still counted as a match (exclusive).
    pub tolerance: Decimal,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            tolerance: crate::report::DEFAULT_TOLERANCE,
        }
    }
}

impl EpscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check values that would make the pipeline misbehave.
    pub fn validate(&self) -> crate::Result<()> {
        if self.extraction.lookahead_chars == 0 {
            return Err(crate::EpsError::Config(
                "extraction.lookahead_chars must be greater than zero".to_string(),
            ));
        }
        if self.document.extensions.is_empty() {
            return Err(crate::EpsError::Config(
                "document.extensions must name at least one extension".to_string(),
            ));
        }
        if self.batch.jobs == 0 {
            return Err(crate::EpsError::Config(
                "batch.jobs must be greater than zero".to_string(),
            ));
        }
        if self.check.tolerance.is_sign_negative() {
            return Err(crate::EpsError::Config(
                "check.tolerance must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EpscanConfig::default();
        assert_eq!(config.extraction.lookahead_chars, 100);
        assert_eq!(config.batch.jobs, 4);
        assert_eq!(config.check.tolerance, Decimal::new(1, 3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EpscanConfig =
            serde_json::from_str(r#"{"batch": {"jobs": 8}}"#).unwrap();
        assert_eq!(config.batch.jobs, 8);
        assert_eq!(config.extraction.lookahead_chars, 100);
        assert!(config.document.accepts_extension("HTM"));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut config = EpscanConfig::default();
        config.extraction.lookahead_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_no_extensions() {
        let mut config = EpscanConfig::default();
        config.document.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = EpscanConfig::default();
        config.batch.jobs = 2;
        config.save(&path).unwrap();

        let loaded = EpscanConfig::from_file(&path).unwrap();
        assert_eq!(loaded.batch.jobs, 2);
        assert_eq!(loaded.check.tolerance, config.check.tolerance);
    }
}

//! Configuration structures for receipt extraction.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ReciboError, Result};
use crate::receipt::BankProfileDef;

/// Main configuration for recibo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReciboConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Caller-side review policy.
    pub review: ReviewConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Additional or overriding bank profiles.
    ///
    /// A definition whose code matches a built-in profile replaces it in
    /// place; new codes are checked before the built-in catalogue.
    pub custom_banks: Vec<BankProfileDef>,

    /// Longest OCR text (in characters) a caller should hand to the engine.
    /// Zero disables the cap.
    pub max_input_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            custom_banks: Vec::new(),
            max_input_chars: 64 * 1024,
        }
    }
}

/// Review policy applied by callers to an extraction result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Minimum number of detected fields for a receipt to be auto-accepted.
    pub min_fields: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self { min_fields: 4 }
    }
}

impl ReciboConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<()> {
        if self.review.min_fields > crate::models::receipt::FieldKind::ALL.len() {
            return Err(ReciboError::Config(format!(
                "review.min_fields must be at most {}, got {}",
                crate::models::receipt::FieldKind::ALL.len(),
                self.review.min_fields
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ReciboConfig::default();
        assert!(config.extraction.custom_banks.is_empty());
        assert_eq!(config.extraction.max_input_chars, 65536);
        assert_eq!(config.review.min_fields, 4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ReciboConfig =
            serde_json::from_str(r#"{"review": {"min_fields": 3}}"#).unwrap();
        assert_eq!(config.review.min_fields, 3);
        assert_eq!(config.extraction.max_input_chars, 65536);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ReciboConfig::default();
        config.extraction.custom_banks.push(BankProfileDef {
            code: "INBURSA".to_string(),
            keywords: vec!["inbursa".to_string()],
            ..Default::default()
        });
        config.save(&path).unwrap();

        let loaded = ReciboConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.custom_banks.len(), 1);
        assert_eq!(loaded.extraction.custom_banks[0].code, "INBURSA");
    }

    #[test]
    fn test_rejects_impossible_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"review": {"min_fields": 7}}"#).unwrap();

        let err = ReciboConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ReciboError::Config(_)));
    }
}

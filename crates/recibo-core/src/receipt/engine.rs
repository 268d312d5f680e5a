//! Field extraction engine combining bank detection and rule extractors.

use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::receipt::ExtractionResult;

use super::detector::BankDetector;
use super::profiles::{BankProfile, ProfileTable};
use super::rules::{
    AccountExtractor, AmountParser, BeneficiaryExtractor, DateParser, FieldExtractor,
    ReferenceExtractor,
};
use super::ReceiptParser;

/// Extracts receipt fields from OCR text.
///
/// Build one engine and share it (by reference or `Arc`); it holds no mutable
/// state, so concurrent calls need no synchronization.
#[derive(Debug, Clone)]
pub struct FieldExtractionEngine {
    table: ProfileTable,
}

impl FieldExtractionEngine {
    /// Create an engine over a profile table.
    pub fn new(table: ProfileTable) -> Self {
        Self { table }
    }

    /// Create an engine over the built-in profiles.
    pub fn builtin() -> Self {
        Self::new(ProfileTable::builtin())
    }

    /// Create an engine over the built-in profiles plus configured ones.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let table = ProfileTable::with_custom(&config.custom_banks)?;
        Ok(Self::new(table))
    }

    pub fn table(&self) -> &ProfileTable {
        &self.table
    }

    /// Profile selected for `text`.
    pub fn detect(&self, text: &str) -> &BankProfile {
        BankDetector::new(&self.table).detect(text)
    }

    /// Extract all fields from `text`.
    ///
    /// Each field is extracted independently; a miss on one never affects the
    /// others. Returns an empty result for text with no recognizable content.
    pub fn extract_fields(&self, text: &str) -> ExtractionResult {
        let text = text.trim();
        let profile = self.detect(text);

        let result = ExtractionResult::builder()
            .bank((!profile.is_generic()).then(|| profile.code()))
            .amount(self.run(&AmountParser, text, profile))
            .date(self.run(&DateParser, text, profile))
            .reference(self.run(&ReferenceExtractor, text, profile))
            .account(self.run(&AccountExtractor, text, profile))
            .beneficiary(self.run(&BeneficiaryExtractor, text, profile))
            .build();

        info!(
            "Extracted {}/6 fields from {} characters (profile {})",
            result.detected_count(),
            text.chars().count(),
            profile.code()
        );

        result
    }

    fn run<E: FieldExtractor>(
        &self,
        extractor: &E,
        text: &str,
        profile: &BankProfile,
    ) -> Option<E::Output> {
        let value = extractor.extract(text, self.table.chain(profile, E::FIELD));
        if value.is_none() {
            debug!(field = E::FIELD.as_str(), "Field not found");
        }
        value
    }
}

impl Default for FieldExtractionEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReceiptParser for FieldExtractionEngine {
    fn extract_fields(&self, text: &str) -> ExtractionResult {
        FieldExtractionEngine::extract_fields(self, text)
    }
}

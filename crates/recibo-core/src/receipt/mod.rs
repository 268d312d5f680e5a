//! Receipt field extraction module.

mod detector;
mod engine;
pub mod profiles;
pub mod rules;

pub use detector::BankDetector;
pub use engine::FieldExtractionEngine;
pub use profiles::{
    BankProfile, BankProfileDef, LabelChain, LabelField, LabelPattern, ProfileTable, GENERIC_CODE,
};

use crate::models::receipt::ExtractionResult;

/// Trait for receipt parsers.
pub trait ReceiptParser {
    /// Extract whatever fields can be found in OCR text.
    ///
    /// Never fails: fields that cannot be located are left absent.
    fn extract_fields(&self, text: &str) -> ExtractionResult;
}

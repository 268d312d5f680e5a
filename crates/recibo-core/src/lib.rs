//! Core library for bank-transfer receipt field extraction.
//!
//! This crate provides:
//! - A declarative table of bank profiles (detection keywords and field labels)
//! - Bank detection over raw OCR text
//! - Field extraction (amount, date, reference, account, beneficiary)
//! - A typed, partial extraction result

pub mod error;
pub mod models;
pub mod receipt;

pub use error::{ProfileError, ReciboError, Result};
pub use models::config::{ExtractionConfig, ReciboConfig, ReviewConfig};
pub use models::receipt::{ExtractionResult, FieldKind};
pub use receipt::{
    BankDetector, BankProfile, BankProfileDef, FieldExtractionEngine, ProfileTable, ReceiptParser,
};

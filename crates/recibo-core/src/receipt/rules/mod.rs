//! Rule-based field extractors for bank-transfer receipts.

pub mod amounts;
pub mod dates;
pub mod lines;
pub mod patterns;

pub use amounts::{format_amount, parse_amount_token, AmountParser};
pub use dates::{month_from_abbrev, month_from_name, parse_date_fragment, DateFormat, DateParser};
pub use lines::{capture_labeled_line, AccountExtractor, BeneficiaryExtractor, ReferenceExtractor};

use super::profiles::{LabelChain, LabelField};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// The label set this extractor reads from a profile.
    const FIELD: LabelField;

    /// Extract the field from text, trying `labels` in order.
    fn extract(&self, text: &str, labels: LabelChain<'_>) -> Option<Self::Output>;
}

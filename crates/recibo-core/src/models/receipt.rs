//! Extraction result for a single bank-transfer receipt.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fields a receipt can yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bank,
    Amount,
    Reference,
    Date,
    Account,
    Beneficiary,
}

impl FieldKind {
    /// Every field kind, in result order.
    pub const ALL: [FieldKind; 6] = [
        FieldKind::Bank,
        FieldKind::Amount,
        FieldKind::Reference,
        FieldKind::Date,
        FieldKind::Account,
        FieldKind::Beneficiary,
    ];

    /// Stable lowercase name, matching the serialized key.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Bank => "bank",
            FieldKind::Amount => "amount",
            FieldKind::Reference => "reference",
            FieldKind::Date => "date",
            FieldKind::Account => "account",
            FieldKind::Beneficiary => "beneficiary",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial set of fields extracted from one receipt.
///
/// Every slot is optional. An absent slot means the field was not found in
/// the input; it is not an error. Slots are private so a result can only be
/// assembled through [`ExtractionResult::builder`] (deserialization included),
/// which enforces:
/// - `amount` is non-negative with exactly two fractional digits,
/// - textual slots are non-empty after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExtractionResultData")]
pub struct ExtractionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    bank: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    beneficiary: Option<String>,
}

impl ExtractionResult {
    /// Start assembling a result.
    pub fn builder() -> ExtractionResultBuilder {
        ExtractionResultBuilder::default()
    }

    /// Detected bank code (absent for the generic profile).
    pub fn bank(&self) -> Option<&str> {
        self.bank.as_deref()
    }

    /// Transferred amount.
    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    /// Operation reference (tracking key, folio, etc.).
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Transfer date and time (midnight when the receipt carries no time).
    pub fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }

    /// Remitter account, possibly masked.
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Beneficiary name.
    pub fn beneficiary(&self) -> Option<&str> {
        self.beneficiary.as_deref()
    }

    /// Whether the given field was found.
    pub fn has(&self, kind: FieldKind) -> bool {
        match kind {
            FieldKind::Bank => self.bank.is_some(),
            FieldKind::Amount => self.amount.is_some(),
            FieldKind::Reference => self.reference.is_some(),
            FieldKind::Date => self.date.is_some(),
            FieldKind::Account => self.account.is_some(),
            FieldKind::Beneficiary => self.beneficiary.is_some(),
        }
    }

    /// Fields present in this result.
    pub fn detected_fields(&self) -> Vec<FieldKind> {
        FieldKind::ALL.into_iter().filter(|k| self.has(*k)).collect()
    }

    /// Fields absent from this result.
    pub fn missing_fields(&self) -> Vec<FieldKind> {
        FieldKind::ALL.into_iter().filter(|k| !self.has(*k)).collect()
    }

    /// Number of populated slots.
    pub fn detected_count(&self) -> usize {
        FieldKind::ALL.iter().filter(|k| self.has(**k)).count()
    }

    /// True when nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.detected_count() == 0
    }
}

/// Builder for [`ExtractionResult`].
///
/// Values that would break the result invariants are dropped, leaving the
/// slot absent.
#[derive(Debug, Default)]
pub struct ExtractionResultBuilder {
    inner: ExtractionResult,
}

impl ExtractionResultBuilder {
    pub fn bank(mut self, bank: Option<impl Into<String>>) -> Self {
        self.inner.bank = bank.and_then(non_blank);
        self
    }

    pub fn amount(mut self, amount: Option<Decimal>) -> Self {
        self.inner.amount = amount.and_then(normalize_amount);
        self
    }

    pub fn reference(mut self, reference: Option<impl Into<String>>) -> Self {
        self.inner.reference = reference.and_then(non_blank);
        self
    }

    pub fn date(mut self, date: Option<NaiveDateTime>) -> Self {
        self.inner.date = date;
        self
    }

    pub fn account(mut self, account: Option<impl Into<String>>) -> Self {
        self.inner.account = account.and_then(non_blank);
        self
    }

    pub fn beneficiary(mut self, beneficiary: Option<impl Into<String>>) -> Self {
        self.inner.beneficiary = beneficiary.and_then(non_blank);
        self
    }

    pub fn build(self) -> ExtractionResult {
        self.inner
    }
}

fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Force exactly two fractional digits.
///
/// Negative amounts, amounts with significant digits past the cents and
/// amounts too large to carry two fractional digits are rejected.
fn normalize_amount(amount: Decimal) -> Option<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return None;
    }
    let mut amount = amount.normalize();
    if amount.scale() > 2 {
        return None;
    }
    amount.rescale(2);
    (amount.scale() == 2).then_some(amount)
}

/// Wire form of [`ExtractionResult`]; deserialized values go through the
/// builder and are rejected if any slot breaks its invariant.
#[derive(Deserialize)]
struct ExtractionResultData {
    #[serde(default)]
    bank: Option<String>,
    #[serde(default)]
    amount: Option<Decimal>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    date: Option<NaiveDateTime>,
    #[serde(default)]
    account: Option<String>,
    #[serde(default)]
    beneficiary: Option<String>,
}

impl TryFrom<ExtractionResultData> for ExtractionResult {
    type Error = String;

    fn try_from(data: ExtractionResultData) -> Result<Self, Self::Error> {
        let result = ExtractionResult::builder()
            .bank(data.bank.clone())
            .amount(data.amount)
            .reference(data.reference.clone())
            .date(data.date)
            .account(data.account.clone())
            .beneficiary(data.beneficiary.clone())
            .build();

        let given = [
            (FieldKind::Bank, data.bank.is_some()),
            (FieldKind::Amount, data.amount.is_some()),
            (FieldKind::Reference, data.reference.is_some()),
            (FieldKind::Date, data.date.is_some()),
            (FieldKind::Account, data.account.is_some()),
            (FieldKind::Beneficiary, data.beneficiary.is_some()),
        ];
        match given.iter().find(|(kind, present)| *present && !result.has(*kind)) {
            Some((FieldKind::Amount, _)) => Err(
                "amount must be non-negative with at most two fractional digits".to_string(),
            ),
            Some((kind, _)) => Err(format!("{} must not be blank", kind)),
            None => Ok(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_result() {
        let result = ExtractionResult::default();
        assert!(result.is_empty());
        assert_eq!(result.detected_count(), 0);
        assert_eq!(result.missing_fields(), FieldKind::ALL.to_vec());
    }

    #[test]
    fn test_builder_trims_and_drops_blank_text() {
        let result = ExtractionResult::builder()
            .reference(Some("  ABC123  "))
            .beneficiary(Some("   "))
            .account(None::<String>)
            .build();

        assert_eq!(result.reference(), Some("ABC123"));
        assert_eq!(result.beneficiary(), None);
        assert_eq!(result.detected_fields(), vec![FieldKind::Reference]);
    }

    #[test]
    fn test_amount_has_two_fraction_digits() {
        let result = ExtractionResult::builder().amount(Some(dec("1250"))).build();
        let amount = result.amount().unwrap();
        assert_eq!(amount.scale(), 2);
        assert_eq!(amount.to_string(), "1250.00");
    }

    #[test]
    fn test_amount_precision_is_never_lost() {
        let result = ExtractionResult::builder().amount(Some(dec("1.005"))).build();
        assert_eq!(result.amount(), None);

        let result = ExtractionResult::builder().amount(Some(dec("1.500"))).build();
        assert_eq!(result.amount(), Some(dec("1.50")));
        assert_eq!(result.amount().unwrap().scale(), 2);

        // 27 integer digits cannot also hold two fractional digits.
        let huge = Decimal::from_str(&"9".repeat(27)).unwrap();
        let result = ExtractionResult::builder().amount(Some(huge)).build();
        assert_eq!(result.amount(), None);
    }

    #[test]
    fn test_deserialization_enforces_invariants() {
        let ok: ExtractionResult =
            serde_json::from_str(r#"{"amount": "1.5", "reference": " ABC "}"#).unwrap();
        assert_eq!(ok.amount().unwrap().to_string(), "1.50");
        assert_eq!(ok.reference(), Some("ABC"));

        for json in [
            r#"{"amount": "-5.00"}"#,
            r#"{"amount": "1.005"}"#,
            r#"{"beneficiary": "   "}"#,
            r#"{"bank": ""}"#,
        ] {
            assert!(
                serde_json::from_str::<ExtractionResult>(json).is_err(),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_negative_amount_is_dropped() {
        let result = ExtractionResult::builder().amount(Some(dec("-5.00"))).build();
        assert_eq!(result.amount(), None);
    }

    #[test]
    fn test_serialization_omits_absent_slots() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 18)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let result = ExtractionResult::builder()
            .bank(Some("BBVA"))
            .amount(Some(dec("67.28")))
            .date(Some(date))
            .build();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "bank": "BBVA",
                "amount": "67.28",
                "date": "2025-08-18T00:00:00",
            })
        );

        let back: ExtractionResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_field_kind_names() {
        let names: Vec<_> = FieldKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            vec!["bank", "amount", "reference", "date", "account", "beneficiary"]
        );
    }
}

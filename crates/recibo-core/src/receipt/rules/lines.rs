//! Label-anchored line capture: reference, account and beneficiary.

use tracing::debug;

use super::FieldExtractor;
use crate::receipt::profiles::{LabelChain, LabelField};

/// Capture the rest of the line after the first label occurrence that has a
/// non-empty value. Labels are tried in order.
pub fn capture_labeled_line(text: &str, labels: LabelChain<'_>) -> Option<String> {
    labels.iter().find_map(|label| {
        label.line_remainders(text).find_map(|rest| {
            let value = rest.trim().trim_start_matches(':').trim();
            if value.is_empty() {
                None
            } else {
                debug!(label = label.as_str(), value, "Labeled line");
                Some(value.to_string())
            }
        })
    })
}

/// Operation reference (tracking key, folio, numeric reference).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceExtractor;

impl FieldExtractor for ReferenceExtractor {
    type Output = String;

    const FIELD: LabelField = LabelField::Reference;

    fn extract(&self, text: &str, labels: LabelChain<'_>) -> Option<String> {
        capture_labeled_line(text, labels)
    }
}

/// Remitter account, kept as printed (usually masked).
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountExtractor;

impl FieldExtractor for AccountExtractor {
    type Output = String;

    const FIELD: LabelField = LabelField::Account;

    fn extract(&self, text: &str, labels: LabelChain<'_>) -> Option<String> {
        capture_labeled_line(text, labels)
    }
}

/// Beneficiary name, original casing preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeneficiaryExtractor;

impl FieldExtractor for BeneficiaryExtractor {
    type Output = String;

    const FIELD: LabelField = LabelField::Beneficiary;

    fn extract(&self, text: &str, labels: LabelChain<'_>) -> Option<String> {
        capture_labeled_line(text, labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::profiles::ProfileTable;
    use pretty_assertions::assert_eq;

    fn extract<E: FieldExtractor>(extractor: E, bank: &str, text: &str) -> Option<E::Output> {
        let table = ProfileTable::builtin();
        let profile = table.get(bank).unwrap();
        extractor.extract(text, table.chain(profile, E::FIELD))
    }

    #[test]
    fn test_bank_label_before_generic() {
        let text = "Referencia: 1808250\nClave de rastreo: MBAN010025081800655903904";
        assert_eq!(
            extract(ReferenceExtractor, "BBVA", text).as_deref(),
            Some("MBAN010025081800655903904")
        );
        assert_eq!(
            extract(ReferenceExtractor, "GENERIC", text).as_deref(),
            Some("1808250")
        );
    }

    #[test]
    fn test_generic_reference_labels() {
        assert_eq!(
            extract(ReferenceExtractor, "SANTANDER", "FOLIO: 998877").as_deref(),
            Some("998877")
        );
        assert_eq!(
            extract(ReferenceExtractor, "SANTANDER", "Ref. AB-12").as_deref(),
            Some("AB-12")
        );
    }

    #[test]
    fn test_empty_value_moves_to_next_occurrence() {
        let text = "REFERENCIA:\nREFERENCIA: 4455";
        assert_eq!(
            extract(ReferenceExtractor, "GENERIC", text).as_deref(),
            Some("4455")
        );
    }

    #[test]
    fn test_value_stops_at_line_end() {
        let text = "Beneficiario: Ana López\r\nCuenta destino ****1234";
        assert_eq!(
            extract(BeneficiaryExtractor, "GENERIC", text).as_deref(),
            Some("Ana López")
        );
    }

    #[test]
    fn test_masked_account_is_kept_verbatim() {
        assert_eq!(
            extract(AccountExtractor, "BBVA", "Cuenta de retiro: -3773").as_deref(),
            Some("-3773")
        );
        assert_eq!(
            extract(AccountExtractor, "NU", "Cuenta origen ***0606").as_deref(),
            Some("***0606")
        );
    }

    #[test]
    fn test_missing_label() {
        assert_eq!(extract(AccountExtractor, "GENERIC", "Sin datos"), None);
    }
}

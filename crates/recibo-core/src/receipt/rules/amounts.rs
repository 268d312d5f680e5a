//! Amount extraction for bank-transfer receipts.

use regex::Captures;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, trace};

use super::patterns::{CURRENCY_TOKEN, LABELED_AMOUNT};
use super::FieldExtractor;
use crate::receipt::profiles::{LabelChain, LabelField};

/// Amount field extractor.
///
/// Label-anchored tokens win; otherwise the first currency token in reading
/// order is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmountParser;

impl AmountParser {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for AmountParser {
    type Output = Decimal;

    const FIELD: LabelField = LabelField::Amount;

    fn extract(&self, text: &str, labels: LabelChain<'_>) -> Option<Decimal> {
        for label in labels.iter() {
            for rest in label.line_remainders(text) {
                let Some(token) = LABELED_AMOUNT
                    .captures(rest)
                    .and_then(|caps| complete_token(rest, &caps))
                else {
                    continue;
                };
                match parse_amount_token(token) {
                    Some(amount) => {
                        debug!(label = label.as_str(), %amount, "Labeled amount");
                        return Some(amount);
                    }
                    None => trace!(token, "Skipping malformed amount"),
                }
            }
        }

        CURRENCY_TOKEN
            .captures_iter(text)
            .filter_map(|caps| complete_token(text, &caps))
            .find_map(parse_amount_token)
            .inspect(|amount| debug!(%amount, "Unlabeled amount"))
    }
}

/// The `amount` group, unless the number carries on past it (`18.08.2025`,
/// `1.00,5`).
fn complete_token<'t>(haystack: &'t str, caps: &Captures<'t>) -> Option<&'t str> {
    let token = caps.name("amount")?;
    let mut after = haystack[token.end()..].chars();
    let continues = matches!(after.next(), Some('.' | ','))
        && after.next().is_some_and(|c| c.is_ascii_digit());
    if continues {
        trace!(token = token.as_str(), "Skipping partial number");
        None
    } else {
        Some(token.as_str())
    }
}

/// Most digits a `Decimal` holds without rounding.
const MAX_AMOUNT_DIGITS: usize = 28;

/// Parse a currency token such as `$1,250.00` into an exact decimal with two
/// fractional digits. Tokens too long to represent exactly are rejected.
pub fn parse_amount_token(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let digits = cleaned.chars().filter(char::is_ascii_digit).count();
    if digits == 0 || digits > MAX_AMOUNT_DIGITS || cleaned.matches('.').count() > 1 {
        return None;
    }

    let mut amount = Decimal::from_str(&cleaned).ok()?;
    amount.rescale(2);
    (amount.scale() == 2).then_some(amount)
}

/// Format an amount as `$1,250.00`.
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return s;
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, formatted, decimal_part)
}

//! Bank profiles: detection keywords and field labels per bank.
//!
//! Profiles are plain data. Adding a bank means adding an entry to
//! [`BUILTIN_PROFILES`] (or a [`BankProfileDef`] in configuration), never a
//! new code path.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProfileError;

/// Code of the fallback profile used when no bank is recognized.
pub const GENERIC_CODE: &str = "GENERIC";

/// Fields located through labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelField {
    Amount,
    Date,
    Reference,
    Account,
    Beneficiary,
}

impl LabelField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelField::Amount => "amount",
            LabelField::Date => "date",
            LabelField::Reference => "reference",
            LabelField::Account => "account",
            LabelField::Beneficiary => "beneficiary",
        }
    }
}

impl fmt::Display for LabelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializable bank profile definition.
///
/// Labels are regular expression fragments, matched case-insensitively.
/// The value of a label is whatever follows it on the same line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankProfileDef {
    /// Canonical bank code, e.g. `BBVA`.
    pub code: String,
    /// Substrings that identify the bank (case-insensitive).
    pub keywords: Vec<String>,
    pub amount_labels: Vec<String>,
    pub date_labels: Vec<String>,
    pub reference_labels: Vec<String>,
    pub account_labels: Vec<String>,
    pub beneficiary_labels: Vec<String>,
}

/// A compiled label regex.
#[derive(Debug, Clone)]
pub struct LabelPattern {
    regex: Regex,
    source: String,
}

impl LabelPattern {
    /// Compile a label fragment; matching is case-insensitive.
    pub fn new(fragment: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(&format!("(?i){}", fragment))?,
            source: fragment.to_string(),
        })
    }

    /// The fragment this label was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Text following each occurrence of the label, up to the end of its line.
    pub fn line_remainders<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.regex.find_iter(text).map(move |m| {
            let rest = &text[m.end()..];
            let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
            &rest[..end]
        })
    }
}

/// A compiled, immutable bank profile.
#[derive(Debug, Clone)]
pub struct BankProfile {
    code: String,
    keywords: Vec<String>,
    amount: Vec<LabelPattern>,
    date: Vec<LabelPattern>,
    reference: Vec<LabelPattern>,
    account: Vec<LabelPattern>,
    beneficiary: Vec<LabelPattern>,
}

impl BankProfile {
    /// Compile a definition, validating code, keywords and label regexes.
    pub fn compile(def: &BankProfileDef) -> Result<Self, ProfileError> {
        let code = def.code.trim().to_uppercase();
        if code.is_empty() {
            return Err(ProfileError::EmptyCode);
        }
        if code == GENERIC_CODE {
            return Err(ProfileError::ReservedCode(code));
        }

        let keywords: Vec<String> = def
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(ProfileError::NoKeywords(code));
        }

        Ok(Self {
            amount: compile_labels(&code, LabelField::Amount, &def.amount_labels)?,
            date: compile_labels(&code, LabelField::Date, &def.date_labels)?,
            reference: compile_labels(&code, LabelField::Reference, &def.reference_labels)?,
            account: compile_labels(&code, LabelField::Account, &def.account_labels)?,
            beneficiary: compile_labels(&code, LabelField::Beneficiary, &def.beneficiary_labels)?,
            code,
            keywords,
        })
    }

    fn generic() -> Result<Self, ProfileError> {
        let code = GENERIC_CODE;
        Ok(Self {
            code: code.to_string(),
            keywords: Vec::new(),
            amount: compile_labels(code, LabelField::Amount, GENERIC_LABELS.amount)?,
            date: compile_labels(code, LabelField::Date, GENERIC_LABELS.date)?,
            reference: compile_labels(code, LabelField::Reference, GENERIC_LABELS.reference)?,
            account: compile_labels(code, LabelField::Account, GENERIC_LABELS.account)?,
            beneficiary: compile_labels(code, LabelField::Beneficiary, GENERIC_LABELS.beneficiary)?,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_generic(&self) -> bool {
        self.code == GENERIC_CODE
    }

    /// Lowercased detection keywords.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Ordered labels for one field.
    pub fn labels(&self, field: LabelField) -> &[LabelPattern] {
        match field {
            LabelField::Amount => &self.amount,
            LabelField::Date => &self.date,
            LabelField::Reference => &self.reference,
            LabelField::Account => &self.account,
            LabelField::Beneficiary => &self.beneficiary,
        }
    }

    /// Check keywords against text that is already lowercased.
    pub(crate) fn matches_lowercase(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

fn compile_labels<S: AsRef<str>>(
    bank: &str,
    field: LabelField,
    fragments: &[S],
) -> Result<Vec<LabelPattern>, ProfileError> {
    fragments
        .iter()
        .map(|fragment| {
            let fragment = fragment.as_ref();
            LabelPattern::new(fragment).map_err(|source| ProfileError::InvalidPattern {
                bank: bank.to_string(),
                field: field.as_str(),
                pattern: fragment.to_string(),
                source,
            })
        })
        .collect()
}

/// Profile-specific labels followed by the generic ones.
#[derive(Debug, Clone, Copy)]
pub struct LabelChain<'a> {
    primary: &'a [LabelPattern],
    fallback: &'a [LabelPattern],
}

impl<'a> LabelChain<'a> {
    pub fn new(primary: &'a [LabelPattern], fallback: &'a [LabelPattern]) -> Self {
        Self { primary, fallback }
    }

    pub fn iter(self) -> impl Iterator<Item = &'a LabelPattern> {
        self.primary.iter().chain(self.fallback.iter())
    }
}

/// Ordered catalogue of bank profiles plus the generic fallback.
#[derive(Debug, Clone)]
pub struct ProfileTable {
    profiles: Vec<BankProfile>,
    generic: BankProfile,
}

impl ProfileTable {
    /// The built-in catalogue.
    pub fn builtin() -> Self {
        Self::try_builtin().expect("built-in bank profiles must compile")
    }

    fn try_builtin() -> Result<Self, ProfileError> {
        let profiles = BUILTIN_PROFILES
            .iter()
            .map(|p| BankProfile::compile(&p.to_def()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            profiles,
            generic: BankProfile::generic()?,
        })
    }

    /// Built-in catalogue merged with custom definitions.
    ///
    /// A custom profile whose code matches a built-in one replaces it at the
    /// same priority. Other custom profiles are checked before all built-ins,
    /// in the order given.
    pub fn with_custom(defs: &[BankProfileDef]) -> Result<Self, ProfileError> {
        let mut table = Self::try_builtin()?;
        let mut seen = HashSet::new();
        let mut prepended = Vec::new();

        for def in defs {
            let profile = BankProfile::compile(def)?;
            if !seen.insert(profile.code.clone()) {
                return Err(ProfileError::Duplicate(profile.code));
            }

            match table.profiles.iter_mut().find(|p| p.code == profile.code) {
                Some(slot) => {
                    debug!("Custom profile {} overrides built-in", profile.code);
                    *slot = profile;
                }
                None => {
                    debug!("Registering custom profile {}", profile.code);
                    prepended.push(profile);
                }
            }
        }

        prepended.append(&mut table.profiles);
        table.profiles = prepended;
        Ok(table)
    }

    /// Bank profiles in detection priority order (generic excluded).
    pub fn profiles(&self) -> &[BankProfile] {
        &self.profiles
    }

    pub fn generic(&self) -> &BankProfile {
        &self.generic
    }

    /// Look up a profile by code, including `GENERIC`.
    pub fn get(&self, code: &str) -> Option<&BankProfile> {
        if code.eq_ignore_ascii_case(GENERIC_CODE) {
            return Some(&self.generic);
        }
        self.profiles
            .iter()
            .find(|p| p.code.eq_ignore_ascii_case(code))
    }

    /// Labels for `field`: the profile's own, then the generic list.
    pub fn chain<'a>(&'a self, profile: &'a BankProfile, field: LabelField) -> LabelChain<'a> {
        let fallback: &[LabelPattern] = if profile.is_generic() {
            &[]
        } else {
            self.generic.labels(field)
        };
        LabelChain::new(profile.labels(field), fallback)
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self::builtin()
    }
}

struct BuiltinProfile {
    code: &'static str,
    keywords: &'static [&'static str],
    amount: &'static [&'static str],
    date: &'static [&'static str],
    reference: &'static [&'static str],
    account: &'static [&'static str],
    beneficiary: &'static [&'static str],
}

impl BuiltinProfile {
    fn to_def(&self) -> BankProfileDef {
        let owned = |labels: &[&str]| -> Vec<String> { labels.iter().map(|s| s.to_string()).collect() };
        BankProfileDef {
            code: self.code.to_string(),
            keywords: owned(self.keywords),
            amount_labels: owned(self.amount),
            date_labels: owned(self.date),
            reference_labels: owned(self.reference),
            account_labels: owned(self.account),
            beneficiary_labels: owned(self.beneficiary),
        }
    }
}

struct GenericLabels {
    amount: &'static [&'static str],
    date: &'static [&'static str],
    reference: &'static [&'static str],
    account: &'static [&'static str],
    beneficiary: &'static [&'static str],
}

/// Labels shared by every profile, tried after the profile's own.
const GENERIC_LABELS: GenericLabels = GenericLabels {
    amount: &[
        r"\bimporte(?:\s+transferido|\s+total)?",
        r"\bmonto(?:\s+transferido|\s+total)?",
        r"\bcantidad",
        r"\btotal",
    ],
    date: &[r"\bfecha(?:\s+de\s+(?:operaci[oó]n|aplicaci[oó]n|transferencia|pago))?"],
    reference: &[
        r"\breferencia(?:\s+num[eé]rica)?",
        r"\bref\b\.?",
        r"\bfolio(?:\s+de\s+operaci[oó]n)?",
        r"\bclave\s+de\s+rastreo",
    ],
    account: &[
        r"\bcuenta\s+(?:de\s+)?(?:origen|retiro|cargo)",
        r"\bdesde\s+(?:la\s+)?cuenta",
        r"\bn(?:o\.?|[uú]mero)\s+de\s+cuenta",
        r"\bcuenta\s*:",
    ],
    beneficiary: &[
        r"\bnombre\s+del\s+beneficiario",
        r"(?m)^[^\S\n]*beneficiario",
        r"\bdestinatario",
    ],
};

/// Built-in banks in detection priority order.
///
/// `NU` is last: its keyword is a two-letter substring that occurs in many
/// Spanish words.
const BUILTIN_PROFILES: &[BuiltinProfile] = &[
    BuiltinProfile {
        code: "BBVA",
        keywords: &["bbva", "bancomer"],
        amount: &[r"\bimporte(?:\s+transferido)?"],
        date: &[r"\bfecha\s+de\s+operaci[oó]n"],
        reference: &[r"\bclave\s+de\s+rastreo"],
        account: &[r"\bcuenta\s+de\s+retiro", r"\bdesde\s+(?:la\s+)?cuenta"],
        beneficiary: &[r"(?m)^[^\S\n]*(?:nombre\s+del\s+)?beneficiario"],
    },
    BuiltinProfile {
        code: "SANTANDER",
        keywords: &["santander"],
        amount: &[],
        date: &[],
        reference: &[],
        account: &[],
        beneficiary: &[],
    },
    BuiltinProfile {
        code: "BANORTE",
        keywords: &["banorte"],
        amount: &[r"\bimporte"],
        date: &[r"\bfecha\s+de\s+aplicaci[oó]n"],
        reference: &[r"\bclave\s+de\s+rastreo", r"\bn[uú]mero\s+de\s+referencia"],
        account: &[r"\bcuenta\s+(?:de\s+)?cargo"],
        beneficiary: &[r"\bnombre\s+del\s+beneficiario"],
    },
    BuiltinProfile {
        code: "BANAMEX",
        keywords: &["citibanamex", "banamex"],
        amount: &[r"\bimporte"],
        date: &[r"\bfecha\s+de\s+operaci[oó]n"],
        reference: &[r"\bclave\s+de\s+rastreo", r"\bautorizaci[oó]n"],
        account: &[r"\bcuenta\s+(?:de\s+)?origen"],
        beneficiary: &[r"\bbeneficiario"],
    },
    BuiltinProfile {
        code: "HSBC",
        keywords: &["hsbc"],
        amount: &[],
        date: &[],
        reference: &[],
        account: &[],
        beneficiary: &[],
    },
    BuiltinProfile {
        code: "SCOTIABANK",
        keywords: &["scotiabank", "scotia"],
        amount: &[],
        date: &[],
        reference: &[],
        account: &[],
        beneficiary: &[],
    },
    BuiltinProfile {
        code: "AZTECA",
        keywords: &["banco azteca"],
        amount: &[],
        date: &[],
        reference: &[],
        account: &[],
        beneficiary: &[],
    },
    BuiltinProfile {
        code: "NU",
        keywords: &["nu"],
        amount: &[r"\bmonto", r"\bcantidad"],
        date: &[r"\bfecha(?:\s+y\s+hora)?"],
        reference: &[r"\bclave\s+de\s+rastreo", r"\bfolio"],
        account: &[r"\bcuenta\s+(?:de\s+)?origen", r"(?m)^[^\S\n]*desde"],
        beneficiary: &[r"(?m)^[^\S\n]*para\b", r"\bdestinatario"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_table_compiles() {
        let table = ProfileTable::builtin();
        let codes: Vec<_> = table.profiles().iter().map(|p| p.code()).collect();
        assert_eq!(
            codes,
            vec!["BBVA", "SANTANDER", "BANORTE", "BANAMEX", "HSBC", "SCOTIABANK", "AZTECA", "NU"]
        );
        assert!(table.generic().is_generic());
        assert!(table.generic().keywords().is_empty());
    }

    #[test]
    fn test_line_remainders() {
        let label = LabelPattern::new(r"\bclave\s+de\s+rastreo").unwrap();
        let text = "CLAVE DE RASTREO: ABC123\r\nOtra linea\nclave de rastreo XYZ";
        let found: Vec<_> = label.line_remainders(text).collect();
        assert_eq!(found, vec![": ABC123", " XYZ"]);
    }

    #[test]
    fn test_chain_appends_generic_labels() {
        let table = ProfileTable::builtin();
        let bbva = table.get("bbva").unwrap();
        let chain = table.chain(bbva, LabelField::Reference);
        let sources: Vec<_> = chain.iter().map(|l| l.as_str()).collect();

        assert_eq!(sources[0], r"\bclave\s+de\s+rastreo");
        assert_eq!(sources.len(), 1 + table.generic().labels(LabelField::Reference).len());
    }

    #[test]
    fn test_generic_chain_has_no_duplicates() {
        let table = ProfileTable::builtin();
        let chain = table.chain(table.generic(), LabelField::Amount);
        assert_eq!(chain.iter().count(), table.generic().labels(LabelField::Amount).len());
    }

    #[test]
    fn test_custom_profile_is_checked_first() {
        let def = BankProfileDef {
            code: "inbursa".to_string(),
            keywords: vec!["Inbursa".to_string()],
            reference_labels: vec![r"\bn[uú]mero\s+de\s+operaci[oó]n".to_string()],
            ..Default::default()
        };
        let table = ProfileTable::with_custom(&[def]).unwrap();

        assert_eq!(table.profiles()[0].code(), "INBURSA");
        assert_eq!(table.profiles()[0].keywords(), ["inbursa"]);
        assert_eq!(table.profiles().len(), 9);
    }

    #[test]
    fn test_custom_profile_overrides_builtin_in_place() {
        let def = BankProfileDef {
            code: "NU".to_string(),
            keywords: vec!["nu mexico".to_string()],
            ..Default::default()
        };
        let table = ProfileTable::with_custom(&[def]).unwrap();

        let last = table.profiles().last().unwrap();
        assert_eq!(last.code(), "NU");
        assert_eq!(last.keywords(), ["nu mexico"]);
        assert!(last.labels(LabelField::Amount).is_empty());
    }

    #[test]
    fn test_invalid_definitions() {
        let missing_keywords = BankProfileDef {
            code: "X".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            BankProfile::compile(&missing_keywords),
            Err(ProfileError::NoKeywords(_))
        ));

        let reserved = BankProfileDef {
            code: "generic".to_string(),
            keywords: vec!["x".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            BankProfile::compile(&reserved),
            Err(ProfileError::ReservedCode(_))
        ));

        let bad_regex = BankProfileDef {
            code: "X".to_string(),
            keywords: vec!["x".to_string()],
            amount_labels: vec!["(unclosed".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            BankProfile::compile(&bad_regex),
            Err(ProfileError::InvalidPattern { field: "amount", .. })
        ));

        let dup = BankProfileDef {
            code: "X".to_string(),
            keywords: vec!["x".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            ProfileTable::with_custom(&[dup.clone(), dup]),
            Err(ProfileError::Duplicate(_))
        ));
    }
}

//! Date extraction for bank-transfer receipts.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use tracing::debug;

use super::patterns::{DATE_NUMERIC, DATE_SPANISH_ABBREV, DATE_SPANISH_LONG};
use super::FieldExtractor;
use crate::receipt::profiles::{LabelChain, LabelField};

/// Spanish months: full name, three-letter abbreviation, number.
const SPANISH_MONTHS: [(&str, &str, u32); 12] = [
    ("enero", "ene", 1),
    ("febrero", "feb", 2),
    ("marzo", "mar", 3),
    ("abril", "abr", 4),
    ("mayo", "may", 5),
    ("junio", "jun", 6),
    ("julio", "jul", 7),
    ("agosto", "ago", 8),
    ("septiembre", "sep", 9),
    ("octubre", "oct", 10),
    ("noviembre", "nov", 11),
    ("diciembre", "dic", 12),
];

/// Supported date layouts, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `18/08/2025`, optionally followed by a time.
    Numeric,
    /// `18 agosto 2025`, `18 de agosto de 2025`.
    SpanishLong,
    /// `18 AGO 2025`, `18-ago-2025`.
    SpanishAbbrev,
}

impl DateFormat {
    pub const ORDER: [DateFormat; 3] = [
        DateFormat::Numeric,
        DateFormat::SpanishLong,
        DateFormat::SpanishAbbrev,
    ];

    fn pattern(&self) -> &'static Regex {
        match self {
            DateFormat::Numeric => &DATE_NUMERIC,
            DateFormat::SpanishLong => &DATE_SPANISH_LONG,
            DateFormat::SpanishAbbrev => &DATE_SPANISH_ABBREV,
        }
    }

    /// First valid date of this format in `text`.
    pub fn find_first(&self, text: &str) -> Option<NaiveDateTime> {
        self.pattern()
            .captures_iter(text)
            .find_map(|caps| self.from_captures(&caps))
    }

    fn from_captures(&self, caps: &Captures<'_>) -> Option<NaiveDateTime> {
        let day: u32 = caps["day"].parse().ok()?;
        let month = match self {
            DateFormat::Numeric => caps["month"].parse().ok()?,
            DateFormat::SpanishLong => month_from_name(&caps["month"])?,
            DateFormat::SpanishAbbrev => month_from_abbrev(&caps["month"])?,
        };
        let year: i32 = caps["year"].parse().ok()?;

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(date.and_time(time_from_captures(caps)))
    }
}

/// Date field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateParser;

impl DateParser {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for DateParser {
    type Output = NaiveDateTime;

    const FIELD: LabelField = LabelField::Date;

    fn extract(&self, text: &str, labels: LabelChain<'_>) -> Option<NaiveDateTime> {
        for label in labels.iter() {
            for rest in label.line_remainders(text) {
                if let Some(date) = parse_date_fragment(rest) {
                    debug!(label = label.as_str(), %date, "Labeled date");
                    return Some(date);
                }
            }
        }

        parse_date_fragment(text).inspect(|date| debug!(%date, "Unlabeled date"))
    }
}

/// Find a date in `text`, trying each [`DateFormat`] in order.
pub fn parse_date_fragment(text: &str) -> Option<NaiveDateTime> {
    DateFormat::ORDER
        .iter()
        .find_map(|format| format.find_first(text))
}

/// Month number for a full Spanish month name (accents ignored).
pub fn month_from_name(name: &str) -> Option<u32> {
    let name = fold_accents(name);
    if name == "setiembre" {
        return Some(9);
    }
    SPANISH_MONTHS
        .iter()
        .find(|(full, _, _)| *full == name)
        .map(|(_, _, n)| *n)
}

/// Month number for a Spanish month abbreviation (accents ignored).
pub fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    let abbrev = fold_accents(abbrev);
    if abbrev == "set" || abbrev == "sept" {
        return Some(9);
    }
    SPANISH_MONTHS
        .iter()
        .find(|(_, short, _)| *short == abbrev)
        .map(|(_, _, n)| *n)
}

fn fold_accents(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' => 'a',
            'é' | 'è' => 'e',
            'í' | 'ì' => 'i',
            'ó' | 'ò' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

/// Time of day from the optional time groups; midnight when absent or invalid.
fn time_from_captures(caps: &Captures<'_>) -> NaiveTime {
    let Some(hour) = caps.name("hour").and_then(|m| m.as_str().parse::<u32>().ok()) else {
        return NaiveTime::MIN;
    };
    let minute: u32 = caps
        .name("minute")
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let second: u32 = caps
        .name("second")
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);

    let hour = match caps.name("meridiem").map(|m| m.as_str().to_ascii_lowercase()) {
        Some(m) if m == "p" && (1..12).contains(&hour) => hour + 12,
        Some(m) if m == "a" && hour == 12 => 0,
        _ => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, second).unwrap_or(NaiveTime::MIN)
}

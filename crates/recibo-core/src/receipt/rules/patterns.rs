//! Common regex patterns for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Optional time after a date on the same line: `14:32`, `14:32:10`,
/// `, 2:32 p.m.`, `a las 14:32`.
const TIME_SUFFIX: &str = r"(?:[^\S\n]*(?:,|-|a[^\S\n]+las)?[^\S\n]*(?P<hour>\d{1,2}):(?P<minute>\d{2})(?::(?P<second>\d{2}))?(?:[^\S\n]*(?P<meridiem>[ap])\.?[^\S\n]?m\b\.?)?)?";

lazy_static! {
    // Currency token: optional $, digits with optional thousands commas,
    // decimal point, exactly two digits. Must not continue a longer number.
    pub static ref CURRENCY_TOKEN: Regex = Regex::new(
        r"(?:^|[^\d,.])\$?[^\S\n]*(?P<amount>(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2})\b"
    ).unwrap();

    // Currency token immediately after a label (applied to the rest of the line).
    pub static ref LABELED_AMOUNT: Regex = Regex::new(
        r"(?i)^[^\S\n]*:?[^\S\n]*(?:MXN|M\.?N\.?)?[^\S\n]*\$?[^\S\n]*(?P<amount>(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2})\b"
    ).unwrap();

    // dd/mm/yyyy or dd-mm-yyyy
    pub static ref DATE_NUMERIC: Regex = Regex::new(&format!(
        r"(?i)\b(?P<day>\d{{1,2}})[/\-](?P<month>\d{{1,2}})[/\-](?P<year>\d{{4}})\b{}",
        TIME_SUFFIX
    )).unwrap();

    // 18 agosto 2025, 18 de agosto de 2025
    pub static ref DATE_SPANISH_LONG: Regex = Regex::new(&format!(
        r"(?i)\b(?P<day>\d{{1,2}})[^\S\n]+(?:de[^\S\n]+)?(?P<month>\p{{L}}+)[^\S\n]+(?:del?[^\S\n]+)?(?P<year>\d{{4}})\b{}",
        TIME_SUFFIX
    )).unwrap();

    // 18 AGO 2025, 18-ago-2025, 18/AGO./2025
    pub static ref DATE_SPANISH_ABBREV: Regex = Regex::new(&format!(
        r"(?i)\b(?P<day>\d{{1,2}})(?:[^\S\n]+|[/\-])(?P<month>\p{{L}}{{3,4}})\.?(?:[^\S\n]+|[/\-])(?P<year>\d{{4}})\b{}",
        TIME_SUFFIX
    )).unwrap();
}

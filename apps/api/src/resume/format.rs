#![allow(dead_code)]
//! Locale-independent date and list formatting shared by the validator-side
//! helpers and the renderers.

use crate::resume::model::DateStyle;

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const PRESENT: &str = "Present";

/// Splits `YYYY-MM` or `YYYY-MM-DD` into `(year, month_index)`. The day, when
/// present, is only checked for shape.
fn parse_year_month(raw: &str) -> Option<(u32, usize)> {
    let bytes = raw.as_bytes();
    let shape_ok = match bytes.len() {
        7 => bytes[4] == b'-',
        10 => bytes[4] == b'-' && bytes[7] == b'-' && all_digits(&raw[8..10]),
        _ => false,
    };
    if !shape_ok || !all_digits(&raw[0..4]) || !all_digits(&raw[5..7]) {
        return None;
    }

    let year: u32 = raw[0..4].parse().ok()?;
    let month: usize = raw[5..7].parse().ok()?;
    let month_index = month.checked_sub(1)?;
    (month_index < SHORT_MONTHS.len()).then_some((year, month_index))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `"2024-06"` / `"2024-06-15"` → `"Jun 2024"`. Anything else is echoed back
/// unchanged, including the empty string and out-of-range months.
pub fn format_date_token(value: &str) -> String {
    match parse_year_month(value.trim()) {
        Some((year, month_index)) => format!("{} {}", SHORT_MONTHS[month_index], year),
        None => value.to_string(),
    }
}

/// Single date field, e.g. a certification or publication date.
pub fn format_single_date(value: &str) -> String {
    format_date_token(value)
}

/// `"<start> - <end>"`, `"<start> - Present"`, `"<end>"` or `""`.
pub fn format_date_range(start: &str, end: &str) -> String {
    let start = format_date_token(start);
    let end = format_date_token(end);

    match (is_blank(&start), is_blank(&end)) {
        (true, true) => String::new(),
        (true, false) => end,
        (false, true) => format!("{start} - {PRESENT}"),
        (false, false) => format!("{start} - {end}"),
    }
}

pub fn format_date_range_by_style(start: &str, end: &str, style: DateStyle) -> String {
    match style {
        DateStyle::Range => format_date_range(start, end),
        DateStyle::Compact => {
            let start = format_date_token(start);
            let end = format_date_token(end);
            if is_blank(&start) && is_blank(&end) {
                return String::new();
            }
            if is_blank(&start) {
                return end;
            }
            let end = if is_blank(&end) { PRESENT.to_string() } else { end };
            format!("{start}\u{2013}{end}")
        }
    }
}

/// `"Rust, Go ,, SQL"` → `["Rust", "Go", "SQL"]`.
pub fn parse_comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn to_comma_list(items: &[String]) -> String {
    items.join(", ")
}

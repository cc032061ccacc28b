//! Conversions between API values and what form inputs and table cells show.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Format of `<input type="date">` and of dates on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format of `<input type="datetime-local">`.
pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

/// Parse a `yyyy-MM-dd` string. Calendar dates carry no time zone, so the
/// value round-trips unchanged.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Render an instant for a datetime-local input in the viewer's offset.
pub fn format_datetime_input(value: DateTime<Utc>, offset: FixedOffset) -> String {
    value.with_timezone(&offset).format(DATETIME_INPUT_FORMAT).to_string()
}

/// Interpret a datetime-local input value in the viewer's offset.
pub fn parse_datetime_input(value: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let naive = NaiveDateTime::parse_from_str(value, DATETIME_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// "Jan 31, 2024"
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn display_optional_date(date: Option<NaiveDate>) -> String {
    date.map(display_date).unwrap_or_else(|| "—".to_string())
}

/// "Jan 31, 2024 14:05" in the viewer's offset.
pub fn display_datetime(value: DateTime<Utc>, offset: FixedOffset) -> String {
    value.with_timezone(&offset).format("%b %-d, %Y %H:%M").to_string()
}

/// Two decimals with thousands separators: `1234567.5` → `"1,234,567.50"`.
pub fn format_money(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

pub fn format_optional_money(amount: Option<f64>) -> String {
    amount.map(format_money).unwrap_or_else(|| "—".to_string())
}

/// Number for a text input: no trailing zeros beyond what is needed.
pub fn format_number_input(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

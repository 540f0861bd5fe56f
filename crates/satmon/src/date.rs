//! Reference date parsing for `--date`.

use crate::error::{Result, SatmonError};
use chrono::{Days, Local, NaiveDate};

const DATE_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `--date` value relative to `today`.
///
/// Accepts `YYYY/MM/DD` (or `YYYY-MM-DD`), a day offset such as `+1` or
/// `-3`, and the words `today`, `yesterday` and `tomorrow`.
pub fn parse_reference_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let value = input.trim();
    let invalid = || SatmonError::InvalidDate(input.to_string());

    match value.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => return offset(today, -1).ok_or_else(invalid),
        "tomorrow" => return offset(today, 1).ok_or_else(invalid),
        _ => {}
    }

    if let Ok(days) = value.parse::<i64>() {
        return offset(today, days).ok_or_else(invalid);
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .ok_or_else(invalid)
}

fn offset(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let step = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    }
}

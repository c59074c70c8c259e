use chrono::{DateTime, NaiveDate};

/// Accepts a plain calendar date (`YYYY-MM-DD`) or an RFC 3339 timestamp,
/// in which case the date part in the timestamp's own offset is kept.
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    let trimmed = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    Ok(DateTime::parse_from_rfc3339(trimmed)?.date_naive())
}

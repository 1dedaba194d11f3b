use chrono::{Datelike, Duration, NaiveDate};

/// Format a date as `DD/MM/YYYY`, the wire format the search endpoint expects.
pub fn format_dmy(date: NaiveDate) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        date.day(),
        date.month(),
        date.year()
    )
}

/// Parse a `DD/MM/YYYY` string, rejecting impossible calendar dates
/// (e.g. 31/02/2023). Single-digit day/month are accepted.
pub fn parse_dmy(input: &str) -> Option<NaiveDate> {
    let mut parts = input.split('/');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Inclusive `[today - (n-1), today]` range as `DD/MM/YYYY` strings, so that
/// `n = 1` means "today only".
pub fn last_n_days_range(today: NaiveDate, n: u32) -> (String, String) {
    let start = today - Duration::days(n.saturating_sub(1) as i64);
    (format_dmy(start), format_dmy(today))
}

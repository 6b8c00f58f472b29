//! Date helpers for answer events and statistics export.

use chrono::{DateTime, Local, NaiveDate};

/// Format used for stored days and CSV export.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Local calendar day of a timestamp.
///
/// Answer events are grouped by the day the user saw on their clock, not by UTC.
pub fn local_day(at: DateTime<Local>) -> NaiveDate {
    at.date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_local_day_uses_local_calendar() {
        let late = Local.with_ymd_and_hms(2024, 3, 9, 23, 30, 0).unwrap();
        assert_eq!(local_day(late), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn test_parse_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(date), "2024-03-09");
        assert_eq!(parse_date("2024-03-09"), Some(date));
        assert_eq!(parse_date("09/03/2024"), None);
    }
}

//! Release date formatting

use chrono::{DateTime, SecondsFormat, Utc};

/// Convert an epoch-millisecond release date, ignoring the unresolved sentinel
pub fn release_time(date: i64) -> Option<DateTime<Utc>> {
    if date < 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(date)
}

/// Human readable date, e.g. `February 1, 2021`
pub fn display_date(time: &DateTime<Utc>) -> String {
    time.format("%B %-d, %Y").to_string()
}

/// Machine readable date for `datetime` attributes
pub fn iso_date(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_date() {
        assert!(release_time(-1).is_none());
    }

    #[test]
    fn test_formats() {
        let time = release_time(1_612_137_600_000).unwrap();
        assert_eq!(display_date(&time), "February 1, 2021");
        assert_eq!(iso_date(&time), "2021-02-01T00:00:00.000Z");
    }

    #[test]
    fn test_epoch() {
        let time = release_time(0).unwrap();
        assert_eq!(display_date(&time), "January 1, 1970");
    }
}

//! Parsing of typed (numeric and date) filter values.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Width of the window on either side of a bare datetime (`first_seen:2018-01-01T10:00:00`).
const DATETIME_WINDOW_MINUTES: i64 = 5;

/// A parsed absolute date or datetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AbsoluteTime {
    /// A calendar day, at midnight UTC.
    Date(DateTime<Utc>),
    /// A point in time.
    DateTime(DateTime<Utc>),
}

impl AbsoluteTime {
    pub(crate) fn instant(self) -> DateTime<Utc> {
        match self {
            AbsoluteTime::Date(dt) | AbsoluteTime::DateTime(dt) => dt,
        }
    }

    /// Returns the half-open `[start, end)` range a bare value stands for.
    pub(crate) fn range(self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match self {
            AbsoluteTime::Date(start) => Some((start, start.checked_add_signed(Duration::days(1))?)),
            AbsoluteTime::DateTime(dt) => {
                let window = Duration::minutes(DATETIME_WINDOW_MINUTES);
                Some((dt.checked_sub_signed(window)?, dt.checked_add_signed(window)?))
            }
        }
    }
}

/// Direction of a relative time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RelativeDirection {
    /// `-24h`: newer than, within the last 24 hours.
    Within,
    /// `+24h`: older than 24 hours.
    OlderThan,
}

/// Parses `YYYY-MM-DD`, RFC 3339, or `YYYY-MM-DDTHH:MM:SS[.f]` (UTC assumed).
pub(crate) fn parse_absolute_time(value: &str) -> Option<AbsoluteTime> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(AbsoluteTime::Date(Utc.from_utc_datetime(&midnight)));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(AbsoluteTime::DateTime(dt.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| AbsoluteTime::DateTime(Utc.from_utc_datetime(&naive)))
}

/// Parses `-<n><unit>` / `+<n><unit>` with unit `w`, `d`, `h` or `m`.
///
/// Returns `None` for anything else, including amounts too large to represent.
pub(crate) fn parse_relative_time(value: &str) -> Option<(RelativeDirection, Duration)> {
    let mut chars = value.chars();
    let direction = match chars.next()? {
        '-' => RelativeDirection::Within,
        '+' => RelativeDirection::OlderThan,
        _ => return None,
    };

    let rest = chars.as_str();
    let unit = rest.chars().last()?;
    let amount = &rest[..rest.len() - unit.len_utf8()];
    if amount.is_empty() || !amount.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let amount: i64 = amount.parse().ok()?;

    let duration = match unit {
        'w' => Duration::try_weeks(amount)?,
        'd' => Duration::try_days(amount)?,
        'h' => Duration::try_hours(amount)?,
        'm' => Duration::try_minutes(amount)?,
        _ => return None,
    };
    Some((direction, duration))
}

/// Parses a base-10 integer, allowing a leading sign.
pub(crate) fn parse_integer(value: &str) -> Option<i64> {
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let parsed = parse_absolute_time("2018-01-01").unwrap();
        assert_eq!(
            parsed,
            AbsoluteTime::Date(Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_naive_datetime() {
        let parsed = parse_absolute_time("2018-01-01T10:30:00").unwrap();
        assert_eq!(
            parsed.instant(),
            Utc.with_ymd_and_hms(2018, 1, 1, 10, 30, 0).unwrap()
        );
        assert!(matches!(parsed, AbsoluteTime::DateTime(_)));
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let parsed = parse_absolute_time("2018-01-01T12:00:00+02:00").unwrap();
        assert_eq!(
            parsed.instant(),
            Utc.with_ymd_and_hms(2018, 1, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_invalid_dates() {
        assert_eq!(parse_absolute_time("2018-13-01"), None);
        assert_eq!(parse_absolute_time("yesterday"), None);
        assert_eq!(parse_absolute_time("123"), None);
    }

    #[test]
    fn test_date_range_covers_one_day() {
        let (start, end) = parse_absolute_time("2018-02-28").unwrap().range().unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2018, 2, 28, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2018, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_datetime_range_is_ten_minute_window() {
        let (start, end) = parse_absolute_time("2018-01-01T10:00:00")
            .unwrap()
            .range()
            .unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2018, 1, 1, 9, 55, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2018, 1, 1, 10, 5, 0).unwrap());
    }

    #[test]
    fn test_parse_relative_time() {
        assert_eq!(
            parse_relative_time("-24h"),
            Some((RelativeDirection::Within, Duration::hours(24)))
        );
        assert_eq!(
            parse_relative_time("+2w"),
            Some((RelativeDirection::OlderThan, Duration::weeks(2)))
        );
        assert_eq!(
            parse_relative_time("-30m"),
            Some((RelativeDirection::Within, Duration::minutes(30)))
        );
    }

    #[test]
    fn test_parse_relative_time_rejects_malformed() {
        assert_eq!(parse_relative_time("24h"), None);
        assert_eq!(parse_relative_time("-h"), None);
        assert_eq!(parse_relative_time("-24y"), None);
        assert_eq!(parse_relative_time("-2-4h"), None);
        assert_eq!(parse_relative_time("-"), None);
        assert_eq!(parse_relative_time(""), None);
    }

    #[test]
    fn test_parse_relative_time_rejects_overflow() {
        assert_eq!(parse_relative_time("-99999999999999999w"), None);
        assert_eq!(parse_relative_time("-999999999999999999999d"), None);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("-3"), Some(-3));
        assert_eq!(parse_integer("4.2"), None);
        assert_eq!(parse_integer("abc"), None);
    }
}

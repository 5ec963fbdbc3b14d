//! Time instants and periods found in EO metadata.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Parse an ISO 8601 instant as it appears in `gml:beginPosition` /
/// `gml:endPosition`.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let s = s.trim();

    // Try full datetime with timezone
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Try without timezone (assume UTC), with and without fractional seconds
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    // Try date only
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    Err(TimeParseError::InvalidFormat(s.to_string()))
}

/// A begin/end pair. Either bound is `None` when absent or unparseable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    pub begin: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimePeriod {
    pub fn new(begin: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { begin, end }
    }

    /// Build a period from the raw position strings, dropping bounds that
    /// cannot be parsed.
    pub fn from_positions(begin: &str, end: &str) -> Self {
        Self {
            begin: parse_instant(begin).ok(),
            end: parse_instant(end).ok(),
        }
    }

    pub fn contains(&self, dt: &DateTime<Utc>) -> bool {
        self.begin.map_or(true, |b| dt >= &b) && self.end.map_or(true, |e| dt <= &e)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_instant("2006-08-16T09:09:29Z").unwrap();
        assert_eq!(dt.year(), 2006);
        assert_eq!(dt.month(), 8);
        assert_eq!(dt.day(), 16);
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.second(), 29);
    }

    #[test]
    fn test_parse_naive_and_date_only() {
        let naive = parse_instant("2006-08-16T09:09:29.5").unwrap();
        assert_eq!(naive.minute(), 9);

        let date = parse_instant("2006-08-16").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2006, 8, 16, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_period_drops_invalid_bounds() {
        let period = TimePeriod::from_positions("2006-08-01T00:00:00Z", "not a date");
        assert!(period.begin.is_some());
        assert!(period.end.is_none());

        let inside = Utc.with_ymd_and_hms(2007, 1, 1, 0, 0, 0).unwrap();
        assert!(period.contains(&inside));
    }
}

// Raw record domain model
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// One transactional event handed over by the upstream fetch, still carrying
/// its raw timestamp string. A record whose timestamp cannot be parsed is
/// skipped during aggregation, never an error.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub timestamp: String,
    pub amount: Option<f64>,
}

impl RawRecord {
    pub fn new(timestamp: String, amount: Option<f64>) -> Self {
        Self { timestamp, amount }
    }

    /// Calendar day this record falls on, in the given reference offset.
    ///
    /// Offset-carrying timestamps (RFC 3339) are converted into `tz`; naive
    /// timestamps are taken as already being in it. Returns `None` for
    /// anything unparsable.
    pub fn bucket_date(&self, tz: FixedOffset) -> Option<NaiveDate> {
        let raw = self.timestamp.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&tz).date_naive());
        }

        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(naive.date());
            }
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

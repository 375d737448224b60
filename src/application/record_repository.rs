// Repository trait for upstream record access
use crate::domain::record::RawRecord;
use async_trait::async_trait;
use chrono::{DateTime, Days, Utc};

/// Inclusive instant range the dashboard is being rendered for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The dashboard's default filter: the last seven calendar days ending now.
    pub fn last_week() -> Self {
        let end = Utc::now();
        let start = end
            .checked_sub_days(Days::new(6))
            .unwrap_or(end)
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or(end);
        Self { start, end }
    }
}

/// What to fetch for one panel: the upstream resource plus the field names
/// the adapter reads the timestamp and (for sum panels) the amount from.
#[derive(Debug, Clone)]
pub struct RecordRequest {
    pub resource: String,
    pub timestamp_field: String,
    pub amount_field: Option<String>,
    pub range: DateRange,
}

#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Fetch the raw records for one panel over a date range. Rows the
    /// adapter cannot make sense of are skipped, not surfaced as errors.
    async fn fetch_records(&self, request: &RecordRequest) -> anyhow::Result<Vec<RawRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_week_spans_seven_calendar_days() {
        let range = DateRange::last_week();
        assert!(range.start < range.end);

        let days = range
            .end
            .date_naive()
            .signed_duration_since(range.start.date_naive())
            .num_days();
        assert_eq!(days, 6);
    }
}

// Series aggregation - group raw records into one point per calendar day
use crate::domain::record::RawRecord;
use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Padding applied above the series maximum so the tallest bar never touches
/// the top of the chart.
const AXIS_PADDING: f64 = 1.2;

/// How records contribute to their bucket: revenue panels sum amounts,
/// order/customer panels count rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateMode {
    Sum,
    Count,
}

/// One bucketed sample: a calendar day and its accumulated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Group records by calendar day in the given reference offset.
///
/// Records with unparsable timestamps are dropped; the caller gets one point
/// per distinct day actually present in the input (no zero-filled gaps),
/// strictly ascending by date. Empty or entirely-invalid input yields an
/// empty series. The grouping is deterministic regardless of input order.
pub fn aggregate(records: &[RawRecord], mode: AggregateMode, tz: FixedOffset) -> Vec<AggregatePoint> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for record in records {
        let Some(date) = record.bucket_date(tz) else {
            continue;
        };
        let contribution = match mode {
            AggregateMode::Sum => record.amount.unwrap_or(0.0),
            AggregateMode::Count => 1.0,
        };
        *buckets.entry(date).or_insert(0.0) += contribution;
    }

    buckets
        .into_iter()
        .map(|(date, value)| AggregatePoint { date, value })
        .collect()
}

/// Padded upper bound for the value axis: `ceil(max * 1.2)`, or `0.0` for an
/// empty series. Always at least the series maximum.
pub fn axis_bound(series: &[AggregatePoint]) -> f64 {
    let max = series.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return 0.0;
    }
    (max * AXIS_PADDING).ceil()
}

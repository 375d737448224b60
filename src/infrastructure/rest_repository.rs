// REST repository implementation for the upstream logistics API
use crate::application::record_repository::{DateRange, RecordRepository, RecordRequest};
use crate::domain::record::RawRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct RestRepository {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl RestRepository {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    fn build_resource_url(&self, resource: &str, range: &DateRange) -> String {
        format!(
            "{}/{}?start={}&end={}",
            self.base_url,
            resource.trim_matches('/'),
            urlencoding::encode(&range.start.to_rfc3339()),
            urlencoding::encode(&range.end.to_rfc3339()),
        )
    }

    async fn execute_fetch(&self, url: &str) -> Result<Value> {
        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to upstream API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Upstream request failed with status {}: {}", status, body);
        }

        response
            .json::<Value>()
            .await
            .context("Failed to parse upstream response")
    }
}

#[async_trait]
impl RecordRepository for RestRepository {
    async fn fetch_records(&self, request: &RecordRequest) -> Result<Vec<RawRecord>> {
        let url = self.build_resource_url(&request.resource, &request.range);
        let payload = self.execute_fetch(&url).await?;

        let records = adapt_rows(
            &payload,
            &request.timestamp_field,
            request.amount_field.as_deref(),
        );
        Ok(records)
    }
}

/// Turn a loosely-typed upstream payload into raw records.
///
/// Accepts either a bare JSON array or a `{"data": [...]}` envelope. A row
/// without a string timestamp field is skipped; an amount that is neither a
/// number nor a numeric string is coerced to zero.
fn adapt_rows(payload: &Value, timestamp_field: &str, amount_field: Option<&str>) -> Vec<RawRecord> {
    let rows = match payload.as_array().or_else(|| {
        payload
            .get("data")
            .and_then(|data| data.as_array())
    }) {
        Some(rows) => rows,
        None => return Vec::new(),
    };

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for row in rows {
        let Some(timestamp) = row.get(timestamp_field).and_then(|v| v.as_str()) else {
            skipped += 1;
            continue;
        };

        let amount = amount_field
            .and_then(|field| row.get(field))
            .map(coerce_amount);

        records.push(RawRecord::new(timestamp.to_string(), amount));
    }

    if skipped > 0 {
        tracing::debug!("skipped {} of {} upstream rows", skipped, rows.len());
    }

    records
}

fn coerce_amount(value: &Value) -> f64 {
    if let Some(n) = value.as_f64() {
        return n;
    }
    value
        .as_str()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_resource_url_encodes_range() {
        let repo = RestRepository::new("http://localhost:3000/".to_string(), None);
        let range = DateRange::new(
            "2024-01-01T00:00:00Z".parse().unwrap(),
            "2024-01-07T23:59:59Z".parse().unwrap(),
        );

        let url = repo.build_resource_url("payments", &range);
        assert_eq!(
            url,
            "http://localhost:3000/payments?start=2024-01-01T00%3A00%3A00%2B00%3A00&end=2024-01-07T23%3A59%3A59%2B00%3A00"
        );
    }

    #[test]
    fn test_adapt_rows_bare_array_with_amounts() {
        let payload = json!([
            { "created_at": "2024-01-01T08:00:00Z", "amount": 100.5 },
            { "created_at": "2024-01-02T09:00:00Z", "amount": "30" },
        ]);

        let records = adapt_rows(&payload, "created_at", Some("amount"));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, Some(100.5));
        assert_eq!(records[1].amount, Some(30.0));
    }

    #[test]
    fn test_adapt_rows_data_envelope() {
        let payload = json!({
            "data": [{ "created_at": "2024-01-01T08:00:00Z" }],
            "total": 1,
        });

        let records = adapt_rows(&payload, "created_at", None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, "2024-01-01T08:00:00Z");
        assert_eq!(records[0].amount, None);
    }

    #[test]
    fn test_adapt_rows_skips_rows_without_timestamp() {
        let payload = json!([
            { "amount": 10 },
            { "created_at": 1704096000 },
            { "created_at": "2024-01-01T08:00:00Z", "amount": 10 },
        ]);

        let records = adapt_rows(&payload, "created_at", Some("amount"));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_adapt_rows_coerces_bad_amount_to_zero() {
        let payload = json!([
            { "created_at": "2024-01-01T08:00:00Z", "amount": "n/a" },
            { "created_at": "2024-01-01T09:00:00Z", "amount": null },
        ]);

        let records = adapt_rows(&payload, "created_at", Some("amount"));
        assert_eq!(records[0].amount, Some(0.0));
        assert_eq!(records[1].amount, Some(0.0));
    }

    #[test]
    fn test_adapt_rows_non_array_payload_is_empty() {
        let records = adapt_rows(&json!({"error": "oops"}), "created_at", None);
        assert!(records.is_empty());
    }
}

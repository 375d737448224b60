// Chart service - Use case for building chart panels and the dashboard
use crate::application::record_repository::{DateRange, RecordRepository, RecordRequest};
use crate::domain::dashboard::{Chart, Dashboard};
use crate::domain::series::{AggregateMode, aggregate, axis_bound};
use crate::infrastructure::config::{PanelConfig, PanelsConfig};
use chrono::FixedOffset;
use futures::future::join_all;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("unknown chart panel: {0}")]
    UnknownPanel(String),
    #[error("upstream fetch for panel {panel} failed")]
    Upstream {
        panel: String,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Clone)]
pub struct ChartService {
    repository: Arc<dyn RecordRepository>,
    panels: PanelsConfig,
    reference_tz: FixedOffset,
}

impl ChartService {
    pub fn new(
        repository: Arc<dyn RecordRepository>,
        panels: PanelsConfig,
        reference_tz: FixedOffset,
    ) -> Self {
        Self {
            repository,
            panels,
            reference_tz,
        }
    }

    pub fn list_panels(&self) -> &[PanelConfig] {
        &self.panels.panels
    }

    /// Build one chart panel: fetch, bucket by day, derive the axis bound.
    pub async fn chart(&self, panel_id: &str, range: DateRange) -> Result<Chart, ChartError> {
        let panel = self
            .panels
            .find(panel_id)
            .ok_or_else(|| ChartError::UnknownPanel(panel_id.to_string()))?;

        self.build_chart(panel, range).await
    }

    /// Build every configured panel concurrently. A panel whose upstream
    /// fetch fails is logged and omitted rather than failing the dashboard.
    pub async fn dashboard(&self, range: DateRange) -> Dashboard {
        let builds = self
            .panels
            .panels
            .iter()
            .map(|panel| self.build_chart(panel, range));

        let mut charts = Vec::with_capacity(self.panels.panels.len());
        for result in join_all(builds).await {
            match result {
                Ok(chart) => charts.push(chart),
                Err(e) => tracing::error!("skipping panel: {e:#}"),
            }
        }

        let title = format!(
            "Operations {} to {}",
            range.start.date_naive(),
            range.end.date_naive()
        );
        Dashboard::new(title, charts)
    }

    async fn build_chart(&self, panel: &PanelConfig, range: DateRange) -> Result<Chart, ChartError> {
        let request = RecordRequest {
            resource: panel.resource.clone(),
            timestamp_field: panel.timestamp_field.clone(),
            amount_field: panel.amount_field.clone(),
            range,
        };

        let records = self
            .repository
            .fetch_records(&request)
            .await
            .map_err(|source| ChartError::Upstream {
                panel: panel.id.clone(),
                source,
            })?;

        let mode = match panel.mode.as_str() {
            "sum" => AggregateMode::Sum,
            _ => AggregateMode::Count,
        };

        let series = aggregate(&records, mode, self.reference_tz);
        let y_max = axis_bound(&series);

        Ok(Chart::new(
            panel.id.clone(),
            panel.title.clone(),
            panel.unit.clone(),
            series,
            y_max,
        ))
    }
}

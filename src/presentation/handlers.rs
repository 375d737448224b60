// HTTP request handlers
use crate::application::chart_service::ChartError;
use crate::application::record_repository::DateRange;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl RangeQuery {
    /// Fill in whichever bound the client left out from the default
    /// last-seven-days window.
    fn resolve(&self) -> DateRange {
        let default = DateRange::last_week();
        DateRange::new(
            self.start.unwrap_or(default.start),
            self.end.unwrap_or(default.end),
        )
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the configured chart panels
pub async fn list_panels(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.chart_service.list_panels().to_vec())
}

/// Build one chart panel over the requested date range
pub async fn get_chart(
    Path(id): Path<String>,
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ChartError> {
    let chart = state.chart_service.chart(&id, query.resolve()).await?;
    Ok(Json(chart))
}

/// Build every panel for the dashboard page in one response
pub async fn get_dashboard(
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    Json(state.chart_service.dashboard(query.resolve()).await)
}

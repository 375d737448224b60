// HTTP status mapping for use-case errors
use crate::application::chart_service::ChartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        let status = match &self {
            ChartError::UnknownPanel(_) => StatusCode::NOT_FOUND,
            ChartError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        };
        if status == StatusCode::BAD_GATEWAY {
            tracing::error!("chart request failed: {self:#}");
        }
        (status, self.to_string()).into_response()
    }
}

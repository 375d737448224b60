// Dashboard domain model
use crate::domain::series::AggregatePoint;
use serde::Serialize;

/// One fully-built chart panel as the SPA consumes it: the ordered series
/// plus the totals and the padded axis bound used to scale the value axis.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub data: Vec<AggregatePoint>,
    pub total: f64,
    pub y_max: f64,
}

impl Chart {
    pub fn new(
        id: String,
        title: String,
        unit: Option<String>,
        data: Vec<AggregatePoint>,
        y_max: f64,
    ) -> Self {
        let total = data.iter().map(|p| p.value).sum();
        Self {
            id,
            title,
            unit,
            data,
            total,
            y_max,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub charts: Vec<Chart>,
}

impl Dashboard {
    pub fn new(title: String, charts: Vec<Chart>) -> Self {
        Self { title, charts }
    }
}

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub aggregation: AggregationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AggregationSettings {
    /// Offset of the calendar-day bucketing reference, in minutes east of
    /// UTC. Every record in a call is bucketed against this one offset.
    #[serde(default)]
    pub timezone_offset_minutes: i32,
}

impl AggregationSettings {
    pub fn reference_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.timezone_offset_minutes * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PanelsConfig {
    #[serde(default)]
    pub panels: Vec<PanelConfig>,
}

impl PanelsConfig {
    pub fn find(&self, id: &str) -> Option<&PanelConfig> {
        self.panels.iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PanelConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub unit: Option<String>,
    /// Upstream resource path the records come from, e.g. "payments".
    pub resource: String,
    /// "sum" or "count"; anything else falls back to count.
    pub mode: String,
    #[serde(default = "default_timestamp_field")]
    pub timestamp_field: String,
    #[serde(default)]
    pub amount_field: Option<String>,
}

fn default_timestamp_field() -> String {
    "created_at".to_string()
}

pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/service"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_panels_config() -> anyhow::Result<PanelsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/panels"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
pub fn panels_from_toml(raw: &str) -> anyhow::Result<PanelsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(raw, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_defaults() {
        let panels = panels_from_toml(
            r#"
            [[panels]]
            id = "daily-orders"
            title = "Daily Orders"
            resource = "orders"
            mode = "count"
        "#,
        )
        .unwrap();

        let panel = panels.find("daily-orders").unwrap();
        assert_eq!(panel.timestamp_field, "created_at");
        assert_eq!(panel.amount_field, None);
        assert_eq!(panel.unit, None);
        assert!(panels.find("daily-revenue").is_none());
    }

    #[test]
    fn test_reference_offset() {
        let utc = AggregationSettings::default();
        assert_eq!(utc.reference_offset().local_minus_utc(), 0);

        let ist = AggregationSettings {
            timezone_offset_minutes: 330,
        };
        assert_eq!(ist.reference_offset().local_minus_utc(), 330 * 60);
    }
}

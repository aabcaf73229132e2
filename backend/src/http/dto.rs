//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Most payload types are re-exported from the routes module since they
//! already derive Serialize/Deserialize.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Alerts
    Alert, AlertKind, Severity,
    // Export
    ExportSnapshot,
    // Fusion
    FusedMatrix,
    // Labels
    LabelCounts,
    // Maps
    MapLegend, OverlayLegend,
    // Sensors
    SensorRecord, SensorSummary,
    // Statistics
    StatisticsRow, StatisticsTable,
};
use crate::api::{DataSource, ImageShape};
use crate::services::pipeline::FieldSnapshot;

/// Largest accepted width or height for a rendered layer.
pub const MAX_RENDER_SIDE: usize = 4096;

/// Request body for replacing the active dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Which generator profile to use
    pub source: DataSource,
    /// Seed for a reproducible dataset (falls back to the configured seed, then random)
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Metadata of the active dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub generation: u64,
    pub seed: u64,
    pub source: DataSource,
    pub data_source: String,
    pub image_shape: ImageShape,
    pub total_pixels: usize,
    pub checksum: String,
    pub created_at: DateTime<Utc>,
    pub alert_count: usize,
    pub sensor_days: usize,
}

impl From<&FieldSnapshot> for DatasetSummary {
    fn from(snapshot: &FieldSnapshot) -> Self {
        Self {
            generation: snapshot.generation,
            seed: snapshot.seed,
            source: snapshot.source,
            data_source: snapshot.source.label().to_string(),
            image_shape: snapshot.shape(),
            total_pixels: snapshot.total_pixels(),
            checksum: snapshot.checksum.clone(),
            created_at: snapshot.created_at,
            alert_count: snapshot.alerts.len(),
            sensor_days: snapshot.sensors.len(),
        }
    }
}

/// Statistics table plus per-index rows with status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub statistics: StatisticsTable,
    pub rows: Vec<StatisticsRow>,
}

/// Label counts with the ratios the overlays are drawn from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelsResponse {
    pub label_counts: LabelCounts,
    pub stress_ratio: f64,
    pub low_risk_ratio: f64,
    pub medium_cumulative_ratio: f64,
    pub high_risk_percent: f64,
}

/// Sensor series of the active dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorsResponse {
    pub records: Vec<SensorRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SensorSummary>,
}

/// Legends for every map and overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendsResponse {
    pub maps: Vec<MapLegend>,
    pub overlays: Vec<OverlayLegend>,
}

/// Query parameters for the fused feature table.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeaturesQuery {
    /// Day to align sensor readings to (`YYYY-MM-DD`); latest record when absent
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query parameters for raster endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderQuery {
    /// Output width in pixels (defaults from `[render]`)
    #[serde(default)]
    pub width: Option<usize>,
    /// Output height in pixels (defaults from `[render]`)
    #[serde(default)]
    pub height: Option<usize>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Generation of the active dataset, `0` before the first load
    pub generation: u64,
}

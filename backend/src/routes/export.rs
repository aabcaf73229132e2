use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{Alert, LabelCounts, StatisticsTable};
use crate::models::{ImageShape, SensorRecord};
use crate::services::pipeline::FieldSnapshot;
use crate::store::StoreResult;

// =========================================================
// Export document + routes
// =========================================================

/// Downloadable JSON summary of the active dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub timestamp: DateTime<Utc>,
    pub data_source: String,
    pub image_shape: ImageShape,
    pub total_pixels: usize,
    pub statistics: StatisticsTable,
    pub label_counts: LabelCounts,
    pub alerts: Vec<Alert>,
    /// Leading records of the sensor series.
    pub sensor_data: Vec<SensorRecord>,
}

impl ExportSnapshot {
    pub fn from_snapshot(
        snapshot: &FieldSnapshot,
        timestamp: DateTime<Utc>,
        sensor_sample: usize,
    ) -> Self {
        Self {
            timestamp,
            data_source: snapshot.source.label().to_string(),
            image_shape: snapshot.shape(),
            total_pixels: snapshot.total_pixels(),
            statistics: snapshot.statistics,
            label_counts: snapshot.label_counts,
            alerts: snapshot.alerts.clone(),
            sensor_data: snapshot.sensors.sample(sensor_sample),
        }
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Route paths for exports.
pub const GET_EXPORT: &str = "/datasets/current/export";
pub const GET_REPORT: &str = "/datasets/current/report";
pub const GET_IMAGE_REPORT: &str = "/datasets/current/report/images";

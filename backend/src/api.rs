//! Public API surface for the crop monitoring backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::alerts::Alert;
pub use crate::routes::alerts::AlertKind;
pub use crate::routes::alerts::Severity;
pub use crate::routes::export::ExportSnapshot;
pub use crate::routes::features::FusedMatrix;
pub use crate::routes::labels::LabelCounts;
pub use crate::routes::labels::DEFAULT_LOW_RISK_RATIO;
pub use crate::routes::labels::DEFAULT_MEDIUM_CUMULATIVE_RATIO;
pub use crate::routes::maps::LegendEntry;
pub use crate::routes::maps::MapId;
pub use crate::routes::maps::MapLegend;
pub use crate::routes::maps::OverlayId;
pub use crate::routes::maps::OverlayLegend;
pub use crate::routes::maps::RasterImage;
pub use crate::routes::maps::Rgb;
pub use crate::routes::maps::Rgba;
pub use crate::routes::maps::{
    HEALTHY_WASH, HIGH_RISK_WASH, LOW_RISK_WASH, MEDIUM_RISK_WASH, PLACEHOLDER_GRAY,
    STRESSED_WASH,
};
pub use crate::routes::statistics::IndexStatistics;
pub use crate::routes::statistics::IndexStatus;
pub use crate::routes::statistics::StatisticsRow;
pub use crate::routes::statistics::StatisticsTable;

pub use crate::models::{
    ChannelSummary, FieldDataset, ImageShape, IndexKind, SensorRecord, SensorSeries,
    SensorSummary,
};
pub use crate::services::pipeline::DataSource;

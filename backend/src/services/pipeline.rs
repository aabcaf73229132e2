//! Explicit composition of the monitoring pipeline.
//!
//! `generate -> statistics -> labels -> alerts -> checksum` produces one
//! immutable [`FieldSnapshot`]; rendering reads a snapshot and never mutates it.
//! Every random draw comes from a `StdRng` derived from the snapshot seed, so a
//! seed fully determines the labels, the alerts and every rendered layer.

use chrono::{DateTime, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::{
    Alert, FusedMatrix, LabelCounts, LegendEntry, MapId, MapLegend, OverlayId, OverlayLegend, RasterImage,
    StatisticsTable, HEALTHY_WASH, HIGH_RISK_WASH, LOW_RISK_WASH, MEDIUM_RISK_WASH,
    STRESSED_WASH,
};
use crate::config::AppConfig;
use crate::models::{FieldDataset, ImageShape, SensorSeries, SensorSummary};
use crate::services::distributions::{generate_dataset, DatasetProfile};
use crate::services::indices::{extract_indices, SpectralCube};
use crate::services::sensors::{synthesize, SensorProfile};
use crate::services::{alerts, fusion, labeling, raster};
use crate::store::{dataset_checksum, StoreResult};

// Independent RNG streams derived from one seed.
const DATA_STREAM: u64 = 0;
const LABEL_STREAM: u64 = 1;
const STRESS_STREAM: u64 = 2;
const RISK_STREAM: u64 = 3;

fn stream(seed: u64, stream: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Where the active dataset came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Demo,
    Upload,
}

impl DataSource {
    /// Name shown in exports and reports.
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Demo => "Demo Data",
            DataSource::Upload => "Uploaded Files",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything derived from one dataset, published as a single unit.
#[derive(Debug, Clone)]
pub struct FieldSnapshot {
    /// Assigned by the store on publish; `0` until then.
    pub generation: u64,
    pub seed: u64,
    pub source: DataSource,
    pub dataset: FieldDataset,
    pub sensors: SensorSeries,
    pub sensor_summary: Option<SensorSummary>,
    pub statistics: StatisticsTable,
    pub label_counts: LabelCounts,
    pub alerts: Vec<Alert>,
    pub checksum: String,
    pub created_at: DateTime<Utc>,
}

impl FieldSnapshot {
    pub fn shape(&self) -> ImageShape {
        self.dataset.shape()
    }

    pub fn total_pixels(&self) -> usize {
        self.dataset.total_pixels()
    }
}

/// Run every derivation stage over `dataset` and assemble the snapshot.
///
/// Nothing is published here; the caller hands the finished snapshot to the
/// store, so no reader ever sees a partially derived bundle.
pub fn refresh(
    dataset: FieldDataset,
    sensors: SensorSeries,
    source: DataSource,
    config: &AppConfig,
    seed: u64,
) -> FieldSnapshot {
    let statistics = StatisticsTable::from_dataset(&dataset);
    log::debug!("Statistics computed for {} pixels", dataset.total_pixels());

    let label_counts = labeling::classify(&dataset, &config.alerts, &mut stream(seed, LABEL_STREAM));
    let alerts = alerts::evaluate(
        &statistics,
        &label_counts,
        dataset.total_pixels(),
        &config.alerts,
    );
    let checksum = dataset_checksum(&dataset);
    let sensor_summary = SensorSummary::from_series(&sensors);

    FieldSnapshot {
        generation: 0,
        seed,
        source,
        dataset,
        sensors,
        sensor_summary,
        statistics,
        label_counts,
        alerts,
        checksum,
        created_at: Utc::now(),
    }
}

fn load_profile(
    source: DataSource,
    profile: &DatasetProfile,
    sensors: &SensorProfile,
    config: &AppConfig,
    seed: u64,
    today: NaiveDate,
) -> StoreResult<FieldSnapshot> {
    log::info!("Loading {} (seed {}, shape {})", source, seed, profile.shape);
    let mut rng = stream(seed, DATA_STREAM);
    let dataset = generate_dataset(profile, &mut rng)?;
    let series = synthesize(sensors, today, &mut rng);
    Ok(refresh(dataset, series, source, config, seed))
}

/// Synthesize the demo field sized by `[image]` and run the pipeline.
pub fn load_demo(config: &AppConfig, seed: u64, today: NaiveDate) -> StoreResult<FieldSnapshot> {
    let image = &config.image;
    let profile = DatasetProfile::demo().with_shape(ImageShape::new(
        image.default_width,
        image.default_height,
        image.default_bands,
    ));
    let sensors = SensorProfile::demo().with_days(config.generator.demo_sensor_days);
    load_profile(DataSource::Demo, &profile, &sensors, config, seed, today)
}

/// Simulate an uploaded capture and run the pipeline.
///
/// The data is fabricated from the upload profile; no file content is read.
pub fn load_upload(config: &AppConfig, seed: u64, today: NaiveDate) -> StoreResult<FieldSnapshot> {
    let sensors = SensorProfile::upload().with_days(config.generator.upload_sensor_days);
    load_profile(
        DataSource::Upload,
        &DatasetProfile::upload(),
        &sensors,
        config,
        seed,
        today,
    )
}

/// Derive indices from an in-memory spectral cube and run the pipeline.
pub fn load_cube(
    mut cube: SpectralCube,
    config: &AppConfig,
    seed: u64,
    today: NaiveDate,
) -> StoreResult<FieldSnapshot> {
    if config.image.normalize {
        cube.normalize_bands();
    }
    let dataset = extract_indices(&cube, config.image.band_selection())?;
    let sensors = SensorProfile::upload().with_days(config.generator.upload_sensor_days);
    let series = synthesize(&sensors, today, &mut stream(seed, DATA_STREAM));
    Ok(refresh(dataset, series, DataSource::Upload, config, seed))
}

/// Render one index map of `snapshot`.
pub fn render_map(snapshot: &FieldSnapshot, map: MapId, width: usize, height: usize) -> RasterImage {
    let kind = map.index();
    raster::render_scalar_map(
        snapshot.dataset.values(kind),
        snapshot.statistics.get(kind),
        width,
        height,
        map.ramp(),
    )
}

/// Render one overlay of `snapshot`; the same snapshot always yields the same pixels.
pub fn render_overlay(
    snapshot: &FieldSnapshot,
    overlay: OverlayId,
    width: usize,
    height: usize,
) -> RasterImage {
    match overlay {
        OverlayId::Stress => {
            let ratio = snapshot.label_counts.stress_ratio(snapshot.total_pixels());
            let mut rng = stream(snapshot.seed, STRESS_STREAM);
            raster::render_stress_overlay(width, height, ratio, &mut rng)
        }
        OverlayId::PestRisk => {
            let (low, medium_cumulative) = snapshot.label_counts.risk_ratios();
            let mut rng = stream(snapshot.seed, RISK_STREAM);
            raster::render_risk_overlay(width, height, low, medium_cumulative, &mut rng)
        }
    }
}

/// Per-pixel index values fused with the standardized sensor record nearest
/// to `date` (the latest record when `date` is `None`).
///
/// `None` when the snapshot carries no sensor records.
pub fn fused_features(snapshot: &FieldSnapshot, date: Option<NaiveDate>) -> Option<FusedMatrix> {
    let scaled = fusion::standardize(&snapshot.sensors);
    let record = match date {
        Some(date) => scaled.nearest(date),
        None => scaled.latest(),
    }?;
    Some(fusion::fuse_record(&snapshot.dataset, record))
}

pub fn map_legend(snapshot: &FieldSnapshot, map: MapId) -> MapLegend {
    let stats = snapshot.statistics.get(map.index());
    MapLegend {
        map,
        min: stats.min,
        max: stats.max,
        mean: stats.mean,
        stops: map.ramp().iter().map(|c| c.hex()).collect(),
    }
}

pub fn overlay_legend(snapshot: &FieldSnapshot, overlay: OverlayId) -> OverlayLegend {
    let counts = &snapshot.label_counts;
    let entry = |label: &str, color, part: usize, total: usize| LegendEntry {
        label: label.to_string(),
        color,
        percent: Some(alerts::percent(part, total)),
    };

    match overlay {
        OverlayId::Stress => {
            let total = snapshot.total_pixels();
            OverlayLegend {
                overlay,
                title: "Crop Stress".to_string(),
                entries: vec![
                    entry("Stressed", STRESSED_WASH, counts.stressed, total),
                    entry("Healthy", HEALTHY_WASH, counts.healthy, total),
                ],
            }
        }
        OverlayId::PestRisk => {
            let total = counts.total_risk();
            OverlayLegend {
                overlay,
                title: "Pest Risk".to_string(),
                entries: vec![
                    entry("Low Risk", LOW_RISK_WASH, counts.low_risk, total),
                    entry("Medium Risk", MEDIUM_RISK_WASH, counts.medium_risk, total),
                    entry("High Risk", HIGH_RISK_WASH, counts.high_risk, total),
                ],
            }
        }
    }
}

//! Sensor preparation and per-pixel feature fusion.
//!
//! Sensor readings are forward-filled and standardized per channel, then one
//! record's channel vector is appended to every pixel's index values.

use crate::api::FusedMatrix;
use crate::models::{FieldDataset, IndexKind, SensorChannel, SensorRecord, SensorSeries};

/// Forward-fill non-finite readings, then z-score every channel.
///
/// Standardization uses the population standard deviation; a constant
/// channel scales by `1.0` and so becomes all zeros. Gaps before the first
/// finite reading of a channel are left for the scaler and end up at `0.0`,
/// the channel mean.
pub fn standardize(series: &SensorSeries) -> SensorSeries {
    let mut records = series.records().to_vec();

    for channel in SensorChannel::ALL {
        let mut last: Option<f64> = None;
        for record in records.iter_mut() {
            let value = channel.value_mut(record);
            if value.is_finite() {
                last = Some(*value);
            } else if let Some(previous) = last {
                *value = previous;
            }
        }

        let finite: Vec<f64> = records
            .iter()
            .map(|r| channel.value(r))
            .filter(|v| v.is_finite())
            .collect();
        if finite.is_empty() {
            log::warn!("{} has no finite readings; standardized to 0.0", channel.key());
        }
        let (mean, scale) = mean_and_scale(&finite);

        for record in records.iter_mut() {
            let value = channel.value_mut(record);
            *value = if value.is_finite() {
                (*value - mean) / scale
            } else {
                0.0
            };
        }
    }

    SensorSeries::new(records)
}

fn mean_and_scale(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 1.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let std = variance.sqrt();
    (mean, if std > 0.0 { std } else { 1.0 })
}

/// Append `sensor` to every pixel's `[NDVI, GNDVI, SAVI, SoilIndex]` row.
///
/// Sensor columns are named `sensor_0`, `sensor_1`, ... A missing index
/// layer reads as `0.0`.
pub fn fuse_features(dataset: &FieldDataset, sensor: &[f64]) -> FusedMatrix {
    let names: Vec<String> = (0..sensor.len()).map(|i| format!("sensor_{}", i)).collect();
    fuse(dataset, sensor, names)
}

/// Same as [`fuse_features`] with the record's channels as named columns.
pub fn fuse_record(dataset: &FieldDataset, record: &SensorRecord) -> FusedMatrix {
    let names = SensorChannel::ALL
        .iter()
        .map(|c| c.key().to_string())
        .collect();
    fuse(dataset, &record.features(), names)
}

fn fuse(dataset: &FieldDataset, sensor: &[f64], sensor_columns: Vec<String>) -> FusedMatrix {
    let rows = dataset.total_pixels();
    let mut columns: Vec<String> = IndexKind::ALL.iter().map(|k| k.name().to_string()).collect();
    columns.extend(sensor_columns);

    let mut data = Vec::with_capacity(rows * columns.len());
    for i in 0..rows {
        data.extend(IndexKind::ALL.iter().map(|&kind| dataset.value_or_zero(kind, i)));
        data.extend_from_slice(sensor);
    }

    log::debug!("Fused {} pixels x {} columns", rows, columns.len());
    FusedMatrix {
        columns,
        rows,
        data,
    }
}

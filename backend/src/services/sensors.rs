//! Synthetic daily sensor series.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::models::{SensorRecord, SensorSeries};

/// Day count and uniform channel ranges for a synthesized series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorProfile {
    pub days: usize,
    pub soil_moisture: Range<f64>,
    pub air_temp: Range<f64>,
    pub humidity: Range<f64>,
    pub leaf_wetness: Range<f64>,
}

impl SensorProfile {
    pub fn demo() -> Self {
        Self {
            days: 30,
            soil_moisture: 24.2..77.2,
            air_temp: 20.4..33.3,
            humidity: 45.8..77.2,
            leaf_wetness: 0.9..8.1,
        }
    }

    pub fn upload() -> Self {
        Self {
            days: 20,
            soil_moisture: 30.0..80.0,
            air_temp: 18.0..38.0,
            humidity: 40.0..80.0,
            leaf_wetness: 0.0..9.0,
        }
    }

    pub fn with_days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, range: &Range<f64>) -> f64 {
    range.start + rng.gen::<f64>() * (range.end - range.start)
}

/// One record per day ending on `end_date` inclusive, oldest first.
pub fn synthesize<R: Rng + ?Sized>(
    profile: &SensorProfile,
    end_date: NaiveDate,
    rng: &mut R,
) -> SensorSeries {
    let records = (0..profile.days)
        .map(|i| {
            let days_back = (profile.days - i - 1) as i64;
            SensorRecord {
                timestamp: end_date - Duration::days(days_back),
                soil_moisture: uniform(rng, &profile.soil_moisture),
                air_temp: uniform(rng, &profile.air_temp),
                humidity: uniform(rng, &profile.humidity),
                leaf_wetness: uniform(rng, &profile.leaf_wetness),
            }
        })
        .collect();

    SensorSeries::new(records)
}

use rand::Rng;

use crate::api::LabelCounts;
use crate::config::AlertThresholds;
use crate::models::{FieldDataset, IndexKind};

/// Upper bounds (exclusive) of the uniform draw for the low and medium tiers.
const LOW_RISK_CUTOFF: f64 = 0.3;
const MEDIUM_RISK_CUTOFF: f64 = 0.7;

/// Label every pixel for crop stress and pest risk.
///
/// A pixel is stressed when its NDVI is below `ndvi_low` or its soil index is
/// above `soil_high`; missing layers read as `0.0`. The risk tier comes from
/// one uniform draw per pixel and is independent of every vegetation and
/// sensor value.
pub fn classify<R: Rng + ?Sized>(
    dataset: &FieldDataset,
    thresholds: &AlertThresholds,
    rng: &mut R,
) -> LabelCounts {
    let total = dataset.total_pixels();
    let mut counts = LabelCounts::default();

    for i in 0..total {
        let ndvi = dataset.value_or_zero(IndexKind::Ndvi, i);
        let soil = dataset.value_or_zero(IndexKind::SoilIndex, i);
        if ndvi < thresholds.ndvi_low || soil > thresholds.soil_high {
            counts.stressed += 1;
        }

        let risk: f64 = rng.gen();
        if risk < LOW_RISK_CUTOFF {
            counts.low_risk += 1;
        } else if risk < MEDIUM_RISK_CUTOFF {
            counts.medium_risk += 1;
        } else {
            counts.high_risk += 1;
        }
    }
    counts.healthy = total - counts.stressed;

    log::debug!(
        "Labeled {} pixels: {} stressed, risk {}/{}/{}",
        total,
        counts.stressed,
        counts.low_risk,
        counts.medium_risk,
        counts.high_risk
    );
    counts
}

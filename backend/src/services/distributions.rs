//! Bounded random distributions used to synthesize per-pixel datasets.
//!
//! All draws go through a caller-supplied [`rand::Rng`], so a seeded
//! generator reproduces a dataset exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{DatasetResult, FieldDataset, ImageShape, IndexKind};

/// One standard-normal draw using the Box-Muller transform.
///
/// Both uniforms must lie strictly inside (0, 1); a zero draw is rejected and
/// redrawn so the logarithm stays finite.
pub fn normal_sample<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let mut u = 0.0;
    while u == 0.0 {
        u = rng.gen::<f64>();
    }
    let mut v = 0.0;
    while v == 0.0 {
        v = rng.gen::<f64>();
    }
    (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos()
}

/// Clamp into `[min, max]` without panicking on degenerate bounds.
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// `n` normal draws with the given mean and deviation, clamped to `[min, max]`.
///
/// Clamping piles probability mass onto the rails; that is expected.
pub fn bounded_normal<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    mean: f64,
    std: f64,
    min: f64,
    max: f64,
) -> Vec<f64> {
    (0..n)
        .map(|_| clamp(normal_sample(rng) * std + mean, min, max))
        .collect()
}

/// `n` right-skewed draws `exp(z * 0.5 + ln(mean))`, clamped to `[min, max]`.
///
/// The exponent scale is fixed at 0.5; `std` is accepted for signature parity
/// with [`bounded_normal`] but does not influence the spread.
pub fn bounded_log_normal<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    mean: f64,
    _std: f64,
    min: f64,
    max: f64,
) -> Vec<f64> {
    let log_mean = mean.ln();
    (0..n)
        .map(|_| clamp((normal_sample(rng) * 0.5 + log_mean).exp(), min, max))
        .collect()
}

/// Shape of a bounded distribution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionModel {
    Normal,
    LogNormal,
}

/// Parameters for one synthesized index layer.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundedDistribution {
    pub model: DistributionModel,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl BoundedDistribution {
    pub const fn normal(mean: f64, std: f64, min: f64, max: f64) -> Self {
        Self {
            model: DistributionModel::Normal,
            mean,
            std,
            min,
            max,
        }
    }

    pub const fn log_normal(mean: f64, std: f64, min: f64, max: f64) -> Self {
        Self {
            model: DistributionModel::LogNormal,
            mean,
            std,
            min,
            max,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        match self.model {
            DistributionModel::Normal => {
                bounded_normal(rng, n, self.mean, self.std, self.min, self.max)
            }
            DistributionModel::LogNormal => {
                bounded_log_normal(rng, n, self.mean, self.std, self.min, self.max)
            }
        }
    }
}

/// Image shape plus per-index distributions for one data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub shape: ImageShape,
    pub ndvi: BoundedDistribution,
    pub gndvi: BoundedDistribution,
    pub savi: BoundedDistribution,
    pub soil_index: BoundedDistribution,
}

impl DatasetProfile {
    /// Demo field: 100x100 pixels, 100 bands.
    pub fn demo() -> Self {
        Self {
            shape: ImageShape::new(100, 100, 100),
            ndvi: BoundedDistribution::normal(0.189, 0.312, -0.927, 1.000),
            gndvi: BoundedDistribution::normal(0.106, 0.298, -0.927, 0.953),
            savi: BoundedDistribution::normal(0.172, 0.284, -0.792, 0.993),
            soil_index: BoundedDistribution::log_normal(1.475, 1.892, 0.000, 23.002),
        }
    }

    /// Simulated upload: 120x150 pixels, 224 bands, slightly healthier field.
    pub fn upload() -> Self {
        Self {
            shape: ImageShape::new(120, 150, 224),
            ndvi: BoundedDistribution::normal(0.245, 0.298, -0.852, 0.987),
            gndvi: BoundedDistribution::normal(0.134, 0.276, -0.798, 0.921),
            savi: BoundedDistribution::normal(0.198, 0.267, -0.654, 0.934),
            soil_index: BoundedDistribution::log_normal(1.234, 1.567, 0.000, 18.543),
        }
    }

    pub fn with_shape(mut self, shape: ImageShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn distribution(&self, kind: IndexKind) -> &BoundedDistribution {
        match kind {
            IndexKind::Ndvi => &self.ndvi,
            IndexKind::Gndvi => &self.gndvi,
            IndexKind::Savi => &self.savi,
            IndexKind::SoilIndex => &self.soil_index,
        }
    }
}

/// Synthesize a full dataset from a profile.
pub fn generate_dataset<R: Rng + ?Sized>(
    profile: &DatasetProfile,
    rng: &mut R,
) -> DatasetResult<FieldDataset> {
    let n = profile.shape.total_pixels();
    log::debug!("Generating {} pixels for shape {}", n, profile.shape);

    let ndvi = profile.ndvi.sample(rng, n);
    let gndvi = profile.gndvi.sample(rng, n);
    let savi = profile.savi.sample(rng, n);
    let soil_index = profile.soil_index.sample(rng, n);

    FieldDataset::new(profile.shape, ndvi, gndvi, savi, soil_index)
}

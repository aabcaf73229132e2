use serde::{Deserialize, Serialize};

// =========================================================
// Label types + route
// =========================================================

/// Pixel counts per stress class and per pest-risk tier.
///
/// `healthy + stressed` and `low_risk + medium_risk + high_risk` each equal
/// the dataset's total pixel count.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCounts {
    pub stressed: usize,
    pub healthy: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
}

/// Risk ratios used when no risk counts exist.
pub const DEFAULT_LOW_RISK_RATIO: f64 = 0.4;
pub const DEFAULT_MEDIUM_CUMULATIVE_RATIO: f64 = 0.7;

impl LabelCounts {
    pub fn total_risk(&self) -> usize {
        self.low_risk + self.medium_risk + self.high_risk
    }

    /// Fraction of `total_pixels` that is stressed; `0.0` for an empty field.
    pub fn stress_ratio(&self, total_pixels: usize) -> f64 {
        ratio(self.stressed, total_pixels).unwrap_or(0.0)
    }

    /// `(low, low + medium)` fractions of all risk-labeled pixels.
    pub fn risk_ratios(&self) -> (f64, f64) {
        let total = self.total_risk();
        (
            ratio(self.low_risk, total).unwrap_or(DEFAULT_LOW_RISK_RATIO),
            ratio(self.low_risk + self.medium_risk, total)
                .unwrap_or(DEFAULT_MEDIUM_CUMULATIVE_RATIO),
        )
    }

    pub fn high_risk_percent(&self) -> f64 {
        ratio(self.high_risk, self.total_risk()).unwrap_or(0.0) * 100.0
    }

    pub fn low_risk_percent(&self) -> f64 {
        ratio(self.low_risk, self.total_risk()).unwrap_or(0.0) * 100.0
    }
}

/// `part / total`, or `None` when `total` is zero.
pub(crate) fn ratio(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 / total as f64)
    }
}

/// Route path for label counts.
pub const GET_LABELS: &str = "/datasets/current/labels";

use crate::api::{Alert, AlertKind, LabelCounts, Severity, StatisticsTable};
use crate::config::AlertThresholds;

/// `part / total * 100`, or `0.0` for an empty field.
pub(crate) fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Evaluate the alert rules in priority order and return a fresh list.
///
/// 1. Mean NDVI below `ndvi_low` raises a warning quoting the stressed share.
/// 2. Mean soil index above `soil_high` raises an error.
/// 3. When neither fired, a single success alert quotes the healthy share.
pub fn evaluate(
    stats: &StatisticsTable,
    counts: &LabelCounts,
    total_pixels: usize,
    thresholds: &AlertThresholds,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if stats.ndvi.mean < thresholds.ndvi_low {
        alerts.push(Alert {
            kind: AlertKind::Warning,
            message: format!(
                "Low NDVI detected in {:.1}% of field areas — possible crop stress",
                percent(counts.stressed, total_pixels)
            ),
            severity: Severity::Medium,
            action: "Consider irrigation or fertilization".to_string(),
        });
    }

    if stats.soil_index.mean > thresholds.soil_high {
        alerts.push(Alert {
            kind: AlertKind::Error,
            message: "High soil index detected — monitor soil conditions".to_string(),
            severity: Severity::High,
            action: "Soil analysis recommended".to_string(),
        });
    }

    if alerts.is_empty() {
        alerts.push(Alert {
            kind: AlertKind::Success,
            message: format!(
                "Field conditions are generally healthy with {:.1}% showing good indicators",
                percent(counts.healthy, total_pixels)
            ),
            severity: Severity::Low,
            action: "Continue regular monitoring".to_string(),
        });
    }

    log::debug!("Evaluated {} alert(s)", alerts.len());
    alerts
}

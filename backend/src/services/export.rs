//! Plain-text reports built from an export document.

use std::fmt::Write;

use crate::api::{ExportSnapshot, MapId};
use crate::models::IndexKind;
use crate::services::alerts::percent;

/// Format an integer with `,` thousands separators.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Full field report: summary counts, index statistics and alerts.
pub fn text_report(export: &ExportSnapshot) -> String {
    let counts = &export.label_counts;
    let total = export.total_pixels;
    let mut report = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(report, "AI-POWERED CROP MONITORING REPORT");
    let _ = writeln!(report, "{}\n", "=".repeat(38));
    let _ = writeln!(
        report,
        "Generated: {}",
        export.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(report, "Data Source: {}\n", export.data_source);

    let _ = writeln!(report, "EXECUTIVE SUMMARY:");
    let _ = writeln!(
        report,
        "• Total field area analyzed: {} pixels",
        group_thousands(total)
    );
    let _ = writeln!(
        report,
        "• Healthy areas: {} ({:.1}%)",
        group_thousands(counts.healthy),
        percent(counts.healthy, total)
    );
    let _ = writeln!(
        report,
        "• Stressed areas: {} ({:.1}%)\n",
        group_thousands(counts.stressed),
        percent(counts.stressed, total)
    );

    let _ = writeln!(report, "VEGETATION INDICES:");
    for kind in IndexKind::ALL {
        let stats = export.statistics.get(kind);
        let _ = writeln!(
            report,
            "• {}: Mean={:.3}, Range=[{:.3}, {:.3}]",
            kind, stats.mean, stats.min, stats.max
        );
    }

    let _ = writeln!(report, "\nALERTS:");
    for alert in &export.alerts {
        let _ = writeln!(
            report,
            "• [{}] {}",
            alert.severity.to_string().to_uppercase(),
            alert.message
        );
        let _ = writeln!(report, "  Action: {}", alert.action);
    }

    report
}

/// Per-map mean and range summary accompanying rendered images.
pub fn image_report(export: &ExportSnapshot) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "CROP MONITORING VISUAL ANALYSIS");
    let _ = writeln!(report, "{}\n", "=".repeat(34));
    let _ = writeln!(report, "Data Source: {}\n", export.data_source);

    let _ = writeln!(report, "VEGETATION INDEX MAPS:");
    for map in MapId::ALL {
        let stats = export.statistics.get(map.index());
        let _ = writeln!(
            report,
            "• {} Map: Mean={:.3}, Range=[{:.3}, {:.3}]",
            map.title(),
            stats.mean,
            stats.min,
            stats.max
        );
    }
    report.push('\n');

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Alert, AlertKind, IndexStatistics, LabelCounts, Severity, StatisticsTable};
    use crate::models::ImageShape;
    use chrono::{TimeZone, Utc};

    fn export() -> ExportSnapshot {
        let mut statistics = StatisticsTable::default();
        statistics.ndvi = IndexStatistics {
            mean: 0.18912,
            std: 0.3,
            min: -0.927,
            max: 1.0,
        };
        statistics.soil_index = IndexStatistics {
            mean: 1.5,
            std: 0.9,
            min: 0.0,
            max: 23.0024,
        };

        ExportSnapshot {
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap(),
            data_source: "Demo Data".to_string(),
            image_shape: ImageShape::new(100, 100, 100),
            total_pixels: 10_000,
            statistics,
            label_counts: LabelCounts {
                stressed: 6_250,
                healthy: 3_750,
                high_risk: 3_000,
                medium_risk: 4_000,
                low_risk: 3_000,
            },
            alerts: vec![Alert {
                kind: AlertKind::Warning,
                message: "Low NDVI detected".to_string(),
                severity: Severity::Medium,
                action: "Consider irrigation or fertilization".to_string(),
            }],
            sensor_data: vec![],
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(18_000), "18,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_text_report_sections() {
        let report = text_report(&export());

        assert!(report.starts_with("AI-POWERED CROP MONITORING REPORT\n===="));
        assert!(report.contains("Generated: 2024-06-01 12:30:00 UTC\n"));
        assert!(report.contains("Data Source: Demo Data\n"));
        assert!(report.contains("• Total field area analyzed: 10,000 pixels\n"));
        assert!(report.contains("• Healthy areas: 3,750 (37.5%)\n"));
        assert!(report.contains("• Stressed areas: 6,250 (62.5%)\n"));
        assert!(report.contains("• NDVI: Mean=0.189, Range=[-0.927, 1.000]\n"));
        assert!(report.contains("• SoilIndex: Mean=1.500, Range=[0.000, 23.002]\n"));
        assert!(report.contains("• [MEDIUM] Low NDVI detected\n  Action: Consider irrigation"));
    }

    #[test]
    fn test_text_report_empty_field() {
        let mut export = export();
        export.total_pixels = 0;
        export.label_counts = LabelCounts::default();
        export.alerts.clear();

        let report = text_report(&export);
        assert!(report.contains("• Healthy areas: 0 (0.0%)\n"));
        assert!(report.ends_with("ALERTS:\n"));
    }

    #[test]
    fn test_image_report_lists_every_map() {
        let report = image_report(&export());
        assert!(report.starts_with("CROP MONITORING VISUAL ANALYSIS\n"));
        assert!(report.contains("• NDVI Map: Mean=0.189"));
        assert!(report.contains("• GNDVI Map: Mean=0.000"));
        assert!(report.contains("• SAVI Map:"));
        assert!(report.contains("• Soil Index Map: Mean=1.500, Range=[0.000, 23.002]"));
    }
}

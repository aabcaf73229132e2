use serde::{Deserialize, Serialize};
use std::fmt;

// =========================================================
// Alert types + route
// =========================================================

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Error,
    Success,
}

impl AlertKind {
    /// Heading shown above the alert message.
    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::Warning => "Warning",
            AlertKind::Error => "Critical Alert",
            AlertKind::Success => "Good News",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => f.write_str("low"),
            Severity::Medium => f.write_str("medium"),
            Severity::High => f.write_str("high"),
        }
    }
}

/// A rule-based field alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
    pub action: String,
}

/// Route path for the alert list.
pub const GET_ALERTS: &str = "/datasets/current/alerts";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_json_shape() {
        let alert = Alert {
            kind: AlertKind::Error,
            message: "m".to_string(),
            severity: Severity::High,
            action: "a".to_string(),
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["severity"], "high");
    }

    #[test]
    fn test_severity_ordering_and_display() {
        assert!(Severity::High > Severity::Medium);
        assert_eq!(Severity::Medium.to_string().to_uppercase(), "MEDIUM");
    }
}

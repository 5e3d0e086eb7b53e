//! Display-ready rows derived from the report, shared by every renderer

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::tier::{format_ms, SpeedTier};
use crate::report::{ProbeResult, Report};

/// Leading HTTP verb some producers repeat in the endpoint string
static METHOD_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(GET|POST|PUT|DELETE)\s+").unwrap());

pub fn strip_method_prefix(endpoint: &str) -> &str {
    match METHOD_PREFIX.find(endpoint) {
        Some(m) => &endpoint[m.end()..],
        None => endpoint,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEntry {
    pub severity: Severity,
    pub message: String,
}

impl AlertEntry {
    pub fn title(&self) -> &'static str {
        match self.severity {
            Severity::High => "Critical failure",
            Severity::Medium => "Warning",
        }
    }
}

/// Critical failures first, then warnings, each in report order
pub fn alerts(report: &Report) -> Vec<AlertEntry> {
    let critical = report.critical_failures.iter().map(|m| AlertEntry {
        severity: Severity::High,
        message: m.clone(),
    });
    let warnings = report.warnings.iter().map(|m| AlertEntry {
        severity: Severity::Medium,
        message: m.clone(),
    });
    critical.chain(warnings).collect()
}

/// One results table row, unescaped
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub success: bool,
    pub status: &'static str,
    pub method: String,
    pub endpoint: String,
    pub test_strategy: String,
    pub response_time: String,
    pub speed: SpeedTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultRow {
    pub fn status_class(&self) -> &'static str {
        if self.success {
            "success"
        } else {
            "failure"
        }
    }

    /// Lowercased method restricted to `[a-z0-9]`, safe inside a class name
    pub fn method_class(&self) -> String {
        self.method
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect()
    }
}

impl From<&ProbeResult> for ResultRow {
    fn from(result: &ProbeResult) -> Self {
        Self {
            success: result.is_success,
            status: if result.is_success { "Success" } else { "Failed" },
            method: result.method.clone(),
            endpoint: strip_method_prefix(&result.endpoint).to_string(),
            test_strategy: result.strategy().to_string(),
            response_time: format_ms(result.response_time_ms),
            speed: SpeedTier::from_ms(result.response_time_ms),
            error: result.error().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Summary;

    fn report(critical: &[&str], warnings: &[&str]) -> Report {
        Report {
            environment: "prod".to_string(),
            summary: Summary {
                total_apis: 0,
                success_count: 0,
                failure_count: 0,
                avg_response_time_ms: 0.0,
                health_score: 100.0,
            },
            critical_failures: critical.iter().map(|s| s.to_string()).collect(),
            warnings: warnings.iter().map(|s| s.to_string()).collect(),
            detailed_results: vec![],
            test_date: String::new(),
        }
    }

    #[test]
    fn test_alerts_critical_first_in_order() {
        let report = report(&["db down"], &["slow login", "deprecated field"]);
        let entries = alerts(&report);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].severity, Severity::High);
        assert_eq!(entries[0].message, "db down");
        assert_eq!(entries[1].severity, Severity::Medium);
        assert_eq!(entries[1].message, "slow login");
        assert_eq!(entries[2].message, "deprecated field");
    }

    #[test]
    fn test_strip_method_prefix() {
        assert_eq!(strip_method_prefix("GET /api/users"), "/api/users");
        assert_eq!(strip_method_prefix("DELETE\t/api/users/1"), "/api/users/1");
        assert_eq!(strip_method_prefix("/api/users"), "/api/users");
        assert_eq!(strip_method_prefix("PATCH /api/users"), "PATCH /api/users");
        assert_eq!(strip_method_prefix("GETTER /x"), "GETTER /x");
    }

    #[test]
    fn test_row_from_probe() {
        let probe = ProbeResult {
            method: "POST".to_string(),
            endpoint: "POST /orders".to_string(),
            is_success: false,
            response_time_ms: 2450.6,
            test_strategy: None,
            expected_status: Some(201),
            actual_status: Some(500),
            error_message: Some("HTTP 500".to_string()),
            validation_errors: vec![],
        };
        let row = ResultRow::from(&probe);

        assert_eq!(row.status, "Failed");
        assert_eq!(row.status_class(), "failure");
        assert_eq!(row.method_class(), "post");
        assert_eq!(row.endpoint, "/orders");
        assert_eq!(row.test_strategy, "full_call");
        assert_eq!(row.response_time, "2451ms");
        assert_eq!(row.speed, SpeedTier::Slow);
        assert_eq!(row.error.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn test_method_class_drops_markup() {
        let probe = ProbeResult {
            method: "GET\"><script>".to_string(),
            endpoint: "/".to_string(),
            is_success: true,
            response_time_ms: 1.0,
            test_strategy: Some("liveness_probe".to_string()),
            expected_status: None,
            actual_status: None,
            error_message: None,
            validation_errors: vec![],
        };
        assert_eq!(ResultRow::from(&probe).method_class(), "getscript");
    }
}

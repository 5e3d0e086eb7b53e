//! JSON snapshot of the values the dashboard displays

use serde::Serialize;

use super::RenderOptions;
use crate::dashboard::animation::format_percent;
use crate::dashboard::tier::{format_ms, ring_offset};
use crate::dashboard::{alerts, AlertEntry, DashboardState, Filter, ResultRow, ScoreTier};
use crate::utils::datetime::format_test_date;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub environment: String,
    pub last_update: String,
    pub score: ScoreSnapshot,
    pub stats: StatsSnapshot,
    pub alerts: Vec<AlertEntry>,
    pub filter: Filter,
    pub results: Vec<ResultRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    pub value: f64,
    pub label: String,
    pub tier: ScoreTier,
    pub ring_offset: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total: u32,
    pub success: u32,
    pub failure: u32,
    pub avg_response_time: String,
}

impl DashboardSnapshot {
    pub fn build(state: &DashboardState, options: &RenderOptions) -> Self {
        let report = &state.report;
        let summary = &report.summary;
        let score = summary.health_score;

        Self {
            environment: report.environment.clone(),
            last_update: format_test_date(&report.test_date, &options.date_style),
            score: ScoreSnapshot {
                value: score,
                label: format_percent(score),
                tier: ScoreTier::from_score(score),
                ring_offset: ring_offset(score),
            },
            stats: StatsSnapshot {
                total: summary.total_apis,
                success: summary.success_count,
                failure: summary.failure_count,
                avg_response_time: format_ms(summary.avg_response_time_ms),
            },
            alerts: alerts(report),
            filter: state.filter,
            results: state
                .visible_results()
                .into_iter()
                .map(ResultRow::from)
                .collect(),
        }
    }
}

/// Render the dashboard as a pretty-printed JSON string
pub fn render_json(state: &DashboardState, options: &RenderOptions) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DashboardSnapshot::build(state, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ProbeResult, Report, Summary};
    use serde_json::Value;

    fn report() -> Report {
        let probe = |endpoint: &str, ok: bool, ms: f64| ProbeResult {
            method: "GET".to_string(),
            endpoint: endpoint.to_string(),
            is_success: ok,
            response_time_ms: ms,
            test_strategy: Some("liveness_probe".to_string()),
            expected_status: None,
            actual_status: None,
            error_message: None,
            validation_errors: vec![],
        };
        Report {
            environment: "uat".to_string(),
            summary: Summary {
                total_apis: 2,
                success_count: 1,
                failure_count: 1,
                avg_response_time_ms: 1250.4,
                health_score: 50.0,
            },
            critical_failures: vec!["GET /b: HTTP 503".to_string()],
            warnings: vec![],
            detailed_results: vec![probe("GET /a", true, 300.0), probe("/b", false, 2200.0)],
            test_date: "not a date".to_string(),
        }
    }

    #[test]
    fn test_snapshot_fields() {
        let state = DashboardState::new(report()).with_filter(Filter::Failure);
        let json = render_json(&state, &RenderOptions::default()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["score"]["tier"], "danger");
        assert_eq!(value["score"]["label"], "50.0%");
        assert_eq!(value["stats"]["avgResponseTime"], "1250ms");
        assert_eq!(value["alerts"][0]["severity"], "high");
        assert_eq!(value["filter"], "failure");
        assert_eq!(value["lastUpdate"], "not a date");

        let results = value["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["endpoint"], "/b");
        assert_eq!(results[0]["speed"], "slow");
        assert_eq!(results[0]["testStrategy"], "liveness_probe");
    }
}

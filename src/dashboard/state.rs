use super::filter::{filter_results, Filter};
use crate::report::{ProbeResult, Report, ReportError};

/// The loaded report and the active filter
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub report: Report,
    pub filter: Filter,
}

impl DashboardState {
    pub fn new(report: Report) -> Self {
        Self {
            report,
            filter: Filter::All,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Switch filters. Returns false when it was already active.
    pub fn select_filter(&mut self, filter: Filter) -> bool {
        let changed = self.filter != filter;
        self.filter = filter;
        changed
    }

    pub fn visible_results(&self) -> Vec<&ProbeResult> {
        filter_results(&self.report.detailed_results, self.filter)
    }
}

/// Which of the three views is showing
#[derive(Debug)]
pub enum ViewPhase {
    Loading,
    Error(ReportError),
    Content(DashboardState),
}

impl ViewPhase {
    pub fn from_load(result: Result<Report, ReportError>) -> Self {
        match result {
            Ok(report) => ViewPhase::Content(DashboardState::new(report)),
            Err(err) => ViewPhase::Error(err),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewPhase::Loading => "loading",
            ViewPhase::Error(_) => "error",
            ViewPhase::Content(_) => "content",
        }
    }

    pub fn state(&self) -> Option<&DashboardState> {
        match self {
            ViewPhase::Content(state) => Some(state),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Summary;

    fn report() -> Report {
        let results = (0..5)
            .map(|i| ProbeResult {
                method: "GET".to_string(),
                endpoint: format!("/r/{}", i),
                is_success: i < 3,
                response_time_ms: 250.0,
                test_strategy: None,
                expected_status: Some(200),
                actual_status: Some(if i < 3 { 200 } else { 500 }),
                error_message: None,
                validation_errors: vec![],
            })
            .collect();
        Report {
            environment: "qa".to_string(),
            summary: Summary {
                total_apis: 5,
                success_count: 3,
                failure_count: 2,
                avg_response_time_ms: 250.0,
                health_score: 60.0,
            },
            critical_failures: vec![],
            warnings: vec![],
            detailed_results: results,
            test_date: "2025-01-05T10:20:30".to_string(),
        }
    }

    #[test]
    fn test_select_filter() {
        let mut state = DashboardState::new(report());
        assert_eq!(state.visible_results().len(), 5);

        assert!(state.select_filter(Filter::Failure));
        assert!(!state.select_filter(Filter::Failure));
        let rows = state.visible_results();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.is_success));
    }

    #[test]
    fn test_phase_from_load() {
        let phase = ViewPhase::from_load(Ok(report()));
        assert_eq!(phase.name(), "content");
        assert!(phase.state().is_some());

        let err = ReportError::Status {
            url: "http://localhost/test-result.json".to_string(),
            status: 404,
        };
        let phase = ViewPhase::from_load(Err(err));
        assert_eq!(phase.name(), "error");
        assert!(phase.state().is_none());
    }
}

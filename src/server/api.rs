//! HTTP endpoints for the dashboard
//!
//! The page itself plus the fragment and status endpoints its script calls.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::dashboard::filter::UnknownFilter;
use crate::dashboard::{filter_results, Filter, ViewPhase};
use crate::render::html::{render_page, render_results};
use crate::render::RenderOptions;

/// Shared state for API handlers
pub struct AppState {
    /// Written once by the load task
    pub phase: RwLock<ViewPhase>,
    pub options: RenderOptions,
}

impl AppState {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            phase: RwLock::new(ViewPhase::Loading),
            options,
        }
    }
}

#[derive(Deserialize)]
pub struct FilterQuery {
    pub filter: Option<String>,
}

impl FilterQuery {
    fn parse(&self) -> Result<Filter, Response> {
        match self.filter.as_deref() {
            None => Ok(Filter::All),
            Some(raw) => raw
                .parse()
                .map_err(|e: UnknownFilter| {
                    (StatusCode::BAD_REQUEST, e.to_string()).into_response()
                }),
        }
    }
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub phase: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Build the dashboard router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/status", get(get_status))
        .route("/api/results", get(get_results))
        .route("/api/report", get(get_report))
        .with_state(state)
}

/// GET / - Full page for the current phase
async fn serve_index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let filter = match query.parse() {
        Ok(filter) => filter,
        Err(response) => return response,
    };

    let phase = state.phase.read().await;
    let html = match &*phase {
        ViewPhase::Content(dashboard) if dashboard.filter != filter => {
            let filtered = ViewPhase::Content(dashboard.clone().with_filter(filter));
            render_page(&filtered, &state.options)
        }
        other => render_page(other, &state.options),
    };

    Html(html).into_response()
}

/// GET /api/status - Which view is current
async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let phase = state.phase.read().await;
    let reason = match &*phase {
        ViewPhase::Error(err) => Some(err.reason()),
        _ => None,
    };

    Json(StatusResponse {
        phase: phase.name(),
        reason,
    })
}

/// GET /api/results?filter= - Results table body only
async fn get_results(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let filter = match query.parse() {
        Ok(filter) => filter,
        Err(response) => return response,
    };

    let phase = state.phase.read().await;
    match phase.state() {
        Some(dashboard) => {
            let rows = filter_results(&dashboard.report.detailed_results, filter);
            log::debug!("Rendering {} rows for filter {}", rows.len(), filter);
            Html(render_results(&rows)).into_response()
        }
        None => not_loaded(&phase),
    }
}

/// GET /api/report - The loaded report
async fn get_report(State(state): State<Arc<AppState>>) -> Response {
    let phase = state.phase.read().await;
    match phase.state() {
        Some(dashboard) => Json(&dashboard.report).into_response(),
        None => not_loaded(&phase),
    }
}

fn not_loaded(phase: &ViewPhase) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        format!("report not available ({})", phase.name()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardState;
    use crate::report::{ProbeResult, Report, ReportError, Summary};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn report() -> Report {
        let results = [true, false, true, true, false]
            .iter()
            .enumerate()
            .map(|(i, ok)| ProbeResult {
                method: "GET".to_string(),
                endpoint: format!("GET /api/item/{}", i),
                is_success: *ok,
                response_time_ms: 100.0 * i as f64,
                test_strategy: None,
                expected_status: Some(200),
                actual_status: Some(if *ok { 200 } else { 500 }),
                error_message: None,
                validation_errors: vec![],
            })
            .collect();

        Report {
            environment: "sit".to_string(),
            summary: Summary {
                total_apis: 5,
                success_count: 3,
                failure_count: 2,
                avg_response_time_ms: 200.0,
                health_score: 60.0,
            },
            critical_failures: vec![],
            warnings: vec![],
            detailed_results: results,
            test_date: "2025-01-05T10:20:30".to_string(),
        }
    }

    fn app(phase: ViewPhase) -> Router {
        let state = AppState {
            phase: RwLock::new(phase),
            options: RenderOptions::default().live(),
        };
        router(Arc::new(state))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn loaded() -> ViewPhase {
        ViewPhase::Content(DashboardState::new(report()))
    }

    #[tokio::test]
    async fn test_failure_fragment_has_two_failed_rows() {
        let (status, body) = get(app(loaded()), "/api/results?filter=failure").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("<tr").count(), 2);
        assert_eq!(body.matches("status-badge--failure").count(), 2);
        assert!(!body.contains("<html"));
    }

    #[tokio::test]
    async fn test_default_fragment_is_all() {
        let (_, body) = get(app(loaded()), "/api/results").await;
        assert_eq!(body.matches("<tr").count(), 5);
    }

    #[tokio::test]
    async fn test_unknown_filter_is_bad_request() {
        let (status, _) = get(app(loaded()), "/api/results?filter=slow").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_index_honours_filter() {
        let (status, body) = get(app(loaded()), "/?filter=success").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<button class="filter-btn active" data-filter="success">"#));
        assert!(!body.contains("status-badge status-badge--failure"));
        assert!(body.contains("status-badge status-badge--success"));
    }

    #[tokio::test]
    async fn test_loading_phase() {
        let (status, body) = get(app(ViewPhase::Loading), "/api/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"phase":"loading"}"#);

        let (status, _) = get(app(ViewPhase::Loading), "/api/results").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_error_phase_page() {
        let err = ReportError::Status {
            url: "http://ci/test-result.json".to_string(),
            status: 404,
        };
        let (_, body) = get(app(ViewPhase::Error(err)), "/").await;
        assert!(body.contains(r#"id="error" class="state state--error" style="display: flex""#));
        assert!(body.contains(r#"id="content" class="container" style="display: none""#));
        assert!(body.contains(r#"id="loading" class="state state--loading" style="display: none""#));
    }

    #[tokio::test]
    async fn test_report_endpoint() {
        let (status, body) = get(app(loaded()), "/api/report").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["environment"], "sit");
        assert_eq!(value["detailedResults"].as_array().unwrap().len(), 5);
    }
}

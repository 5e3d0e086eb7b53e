use super::RenderOptions;
use crate::dashboard::animation::{format_percent, Tween};
use crate::dashboard::tier::{format_ms, ring_circumference, ring_offset, RING_RADIUS};
use crate::dashboard::{
    alerts, AlertEntry, DashboardState, Filter, ResultRow, ScoreTier, Severity, ViewPhase,
};
use crate::report::{ProbeResult, Summary};
use crate::utils::datetime::format_test_date;

const STYLE: &str = include_str!("ui/style.css");
const SCRIPT: &str = include_str!("ui/dashboard.js");

/// Pre-rendered sections of the content view
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub environment: String,
    pub score_ring: String,
    pub stats: String,
    pub alerts: String,
    pub filters: String,
    pub results: String,
    pub last_update: String,
    /// One results body per filter, for pages without a server behind them
    pub templates: String,
}

impl DashboardView {
    pub fn build(state: &DashboardState, options: &RenderOptions) -> Self {
        let report = &state.report;
        Self {
            environment: render_environment(&report.environment),
            score_ring: render_score_ring(report.summary.health_score, options),
            stats: render_stats(&report.summary),
            alerts: render_alerts(&alerts(report)),
            filters: render_filter_controls(state.filter),
            results: render_results(&state.visible_results()),
            last_update: html_escape(&format_test_date(&report.test_date, &options.date_style)),
            templates: if options.live {
                String::new()
            } else {
                render_result_templates(&report.detailed_results)
            },
        }
    }

    /// Activate `filter`, re-rendering only the controls and the results body
    pub fn select_filter(&mut self, state: &mut DashboardState, filter: Filter) {
        if state.select_filter(filter) {
            self.filters = render_filter_controls(filter);
            self.results = render_results(&state.visible_results());
        }
    }
}

/// Full page for whichever phase is current. Exactly one phase container is visible.
pub fn render_page(phase: &ViewPhase, options: &RenderOptions) -> String {
    let (error_reason, content) = match phase {
        ViewPhase::Loading => (String::new(), String::new()),
        ViewPhase::Error(err) => (html_escape(&err.reason()), String::new()),
        ViewPhase::Content(state) => (
            String::new(),
            render_content(&DashboardView::build(state, options)),
        ),
    };
    let visible = phase.name();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>API Health Dashboard</title>
    <style>{STYLE}</style>
</head>
<body data-phase="{visible}" data-mode="{mode}">
    <div id="loading" class="state state--loading" style="{loading_style}">
        <div class="spinner"></div>
        <p>Loading test results...</p>
    </div>
    <div id="error" class="state state--error" style="{error_style}">
        <div class="state__icon">⚠️</div>
        <h2>Unable to load test results</h2>
        <p class="state__reason">{error_reason}</p>
    </div>
    <div id="content" class="container" style="{content_style}">
{content}
    </div>
    <script>{SCRIPT}</script>
</body>
</html>"#,
        mode = if options.live { "live" } else { "static" },
        loading_style = display(visible == "loading", "flex"),
        error_style = display(visible == "error", "flex"),
        content_style = display(visible == "content", "block"),
    )
}

fn display(visible: bool, shown: &str) -> String {
    format!("display: {}", if visible { shown } else { "none" })
}

fn render_content(view: &DashboardView) -> String {
    format!(
        r#"        <header>
            <div>
                <div class="eyebrow">API Health Check</div>
                <h1>Health Dashboard</h1>
            </div>
            <span id="environment" class="environment">{environment}</span>
        </header>

        <section class="overview">
            {score_ring}
            <div class="stats">
                {stats}
            </div>
        </section>

        <section id="alerts-section" class="alerts">
            {alerts}
        </section>

        <section class="results">
            <div class="results__header">
                <h2>Test Results</h2>
                <div class="filters">
                    {filters}
                </div>
            </div>
            <table class="results-table">
                <thead>
                    <tr>
                        <th>Status</th>
                        <th>Method</th>
                        <th>Endpoint</th>
                        <th>Strategy</th>
                        <th>Response Time</th>
                    </tr>
                </thead>
                <tbody id="results-body">
                    {results}
                </tbody>
            </table>
            {templates}
        </section>

        <footer class="meta">
            <span>Last update: <span id="last-update">{last_update}</span></span>
        </footer>"#,
        environment = view.environment,
        score_ring = view.score_ring,
        stats = view.stats,
        alerts = view.alerts,
        filters = view.filters,
        results = view.results,
        templates = view.templates,
        last_update = view.last_update,
    )
}

pub fn render_environment(environment: &str) -> String {
    format!("🌐 {}", html_escape(environment))
}

/// Ring stroke plus the percentage label and its animation frames
pub fn render_score_ring(score: f64, options: &RenderOptions) -> String {
    let tier = ScoreTier::from_score(score);
    let ring_class = match tier.css_class() {
        Some(class) => format!("score-ring__progress {}", class),
        None => "score-ring__progress".to_string(),
    };

    let frames: Vec<String> = Tween::new(0.0, score, options.counter_duration)
        .frames(options.frame_interval)
        .into_iter()
        .map(format_percent)
        .collect();
    let frames_json = serde_json::to_string(&frames).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"<div class="score-card">
                <svg class="score-ring" viewBox="0 0 200 200">
                    <circle class="score-ring__track" cx="100" cy="100" r="{radius}"></circle>
                    <circle id="score-ring" class="{ring_class}" cx="100" cy="100" r="{radius}" style="--ring-circumference: {circumference:.2}; --ring-offset: {offset:.2}; --ring-delay: {delay}ms"></circle>
                </svg>
                <div id="score-percentage" class="score-percentage" data-interval="{interval}" data-frames="{frames}">{label}</div>
                <div class="score-card__label">Health Score</div>
            </div>"#,
        radius = RING_RADIUS,
        circumference = ring_circumference(),
        offset = ring_offset(score),
        delay = options.ring_delay_ms,
        interval = options.frame_interval.as_millis(),
        frames = html_escape(&frames_json),
        label = format_percent(score),
    )
}

pub fn render_stats(summary: &Summary) -> String {
    let stat = |id: &str, class: &str, value: String, label: &str| {
        format!(
            r#"<div class="stat {class}">
                    <div id="{id}" class="stat-value">{value}</div>
                    <div class="stat-label">{label}</div>
                </div>"#
        )
    };

    [
        stat("stat-total", "total", summary.total_apis.to_string(), "Total APIs"),
        stat("stat-success", "passed", summary.success_count.to_string(), "Success"),
        stat("stat-failure", "failed", summary.failure_count.to_string(), "Failed"),
        stat(
            "stat-avgtime",
            "time",
            format_ms(summary.avg_response_time_ms),
            "Avg Response",
        ),
    ]
    .join("\n                ")
}

pub fn render_alerts(entries: &[AlertEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let (class, icon) = match entry.severity {
                Severity::High => ("danger", "🚨"),
                Severity::Medium => ("warning", "⚠️"),
            };
            alert_html(class, icon, entry.title(), &html_escape(&entry.message))
        })
        .collect()
}

fn alert_html(class: &str, icon: &str, title: &str, message: &str) -> String {
    format!(
        r#"
            <div class="alert alert--{class}">
                <span class="alert__icon">{icon}</span>
                <div class="alert__content">
                    <div class="alert__title">{title}</div>
                    <div class="alert__message">{message}</div>
                </div>
            </div>"#
    )
}

pub fn render_filter_controls(active: Filter) -> String {
    Filter::CONTROLS
        .iter()
        .map(|filter| {
            let class = if *filter == active {
                "filter-btn active"
            } else {
                "filter-btn"
            };
            format!(
                r#"<button class="{class}" data-filter="{}">{}</button>"#,
                filter.as_str(),
                filter.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n                    ")
}

/// Table body rows. Every text field is escaped.
pub fn render_results(results: &[&ProbeResult]) -> String {
    results
        .iter()
        .map(|result| render_row(&ResultRow::from(*result)))
        .collect()
}

fn render_row(row: &ResultRow) -> String {
    let title = row
        .error
        .as_deref()
        .map(|e| format!(r#" title="{}""#, html_escape(e)))
        .unwrap_or_default();

    format!(
        r#"
                    <tr{title}>
                        <td>
                            <span class="status-badge status-badge--{status_class}">
                                <span class="status-badge__dot"></span>
                                {status}
                            </span>
                        </td>
                        <td>
                            <span class="method-badge method-badge--{method_class}">{method}</span>
                        </td>
                        <td class="endpoint">{endpoint}</td>
                        <td>{strategy}</td>
                        <td>
                            <span class="response-time response-time--{speed}">{time}</span>
                        </td>
                    </tr>"#,
        status_class = row.status_class(),
        status = row.status,
        method_class = row.method_class(),
        method = html_escape(&row.method),
        endpoint = html_escape(&row.endpoint),
        strategy = html_escape(&row.test_strategy),
        speed = row.speed.css_class(),
        time = row.response_time,
    )
}

fn render_result_templates(results: &[ProbeResult]) -> String {
    Filter::CONTROLS
        .iter()
        .map(|filter| {
            let rows = crate::dashboard::filter_results(results, *filter);
            format!(
                r#"<template id="results-{}">{}</template>"#,
                filter.as_str(),
                render_results(&rows)
            )
        })
        .collect()
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

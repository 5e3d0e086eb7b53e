//! Terminal rendering

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

use super::RenderOptions;
use crate::dashboard::animation::{format_percent, Tween};
use crate::dashboard::tier::format_ms;
use crate::dashboard::{alerts, DashboardState, ResultRow, ScoreTier, Severity, SpeedTier};
use crate::utils::datetime::format_test_date;

fn paint_score(label: String, tier: ScoreTier) -> ColoredString {
    match tier {
        ScoreTier::Danger => label.red().bold(),
        ScoreTier::Warning => label.yellow().bold(),
        ScoreTier::Neutral => label.green().bold(),
    }
}

fn paint_speed(label: &str, tier: SpeedTier) -> ColoredString {
    match tier {
        SpeedTier::Fast => label.green(),
        SpeedTier::Normal => label.yellow(),
        SpeedTier::Slow => label.red(),
    }
}

/// Render the whole dashboard as terminal text
pub fn render_text(state: &DashboardState, options: &RenderOptions) -> String {
    let report = &state.report;
    let summary = &report.summary;
    let mut out = String::new();

    out.push_str(&format!(
        "{}  🌐 {}\n",
        "API Health Dashboard".bold(),
        report.environment.cyan()
    ));
    out.push_str(&format!(
        "Last update: {}\n\n",
        format_test_date(&report.test_date, &options.date_style)
    ));

    let tier = ScoreTier::from_score(summary.health_score);
    out.push_str(&format!(
        "Health score: {}\n",
        paint_score(format_percent(summary.health_score), tier)
    ));
    out.push_str(&format!(
        "Total: {}  Success: {}  Failed: {}  Avg: {}\n",
        summary.total_apis,
        summary.success_count.to_string().green(),
        summary.failure_count.to_string().red(),
        format_ms(summary.avg_response_time_ms)
    ));

    let entries = alerts(report);
    if !entries.is_empty() {
        out.push_str(&format!("\n{}\n", "Alerts:".bold()));
    }
    for entry in &entries {
        let line = match entry.severity {
            Severity::High => format!("  🚨 {}: {}\n", entry.title().red().bold(), entry.message),
            Severity::Medium => format!("  ⚠️  {}: {}\n", entry.title().yellow(), entry.message),
        };
        out.push_str(&line);
    }

    let rows: Vec<ResultRow> = state
        .visible_results()
        .into_iter()
        .map(ResultRow::from)
        .collect();
    out.push_str(&format!(
        "\n{} (filter: {}, {} of {})\n",
        "Results".bold(),
        state.filter,
        rows.len(),
        report.detailed_results.len()
    ));

    let endpoint_width = rows
        .iter()
        .map(|r| r.endpoint.chars().count())
        .max()
        .unwrap_or(0);
    let strategy_width = rows
        .iter()
        .map(|r| r.test_strategy.chars().count())
        .max()
        .unwrap_or(0);

    for row in &rows {
        let status = if row.success {
            format!("✓ {:<7}", row.status).green()
        } else {
            format!("✗ {:<7}", row.status).red()
        };
        out.push_str(&format!(
            "  {} {:<6} {:<ew$}  {:<sw$}  {}\n",
            status,
            row.method,
            row.endpoint,
            row.test_strategy,
            paint_speed(&row.response_time, row.speed),
            ew = endpoint_width,
            sw = strategy_width,
        ));
        if let Some(error) = &row.error {
            out.push_str(&format!("      ↳ {}\n", error.dimmed()));
        }
    }

    out
}

/// Count the score label up from zero on a progress bar, one tick per frame
pub async fn animate_score(score: f64, options: &RenderOptions) {
    let tween = Tween::new(0.0, score, options.counter_duration);
    let tier = ScoreTier::from_score(score);

    let bar = ProgressBar::new(1000);
    bar.set_style(
        ProgressStyle::with_template("Health score {bar:40.cyan/blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );

    let started = Instant::now();
    let mut ticker = tokio::time::interval(options.frame_interval.max(std::time::Duration::from_millis(1)));
    loop {
        ticker.tick().await;
        let elapsed = started.elapsed();
        let value = tween.value_at(elapsed);

        bar.set_position((value.clamp(0.0, 100.0) * 10.0) as u64);
        bar.set_message(paint_score(format_percent(value), tier).to_string());

        if tween.is_finished(elapsed) {
            break;
        }
    }
    bar.finish();
}

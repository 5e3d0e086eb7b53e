use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ReportError;
use super::types::Report;

/// Where the report document lives
#[derive(Debug, Clone, PartialEq)]
pub enum ReportSource {
    File(PathBuf),
    Url(String),
}

impl ReportSource {
    /// `http://` and `https://` become URLs, everything else is a path
    pub fn parse(input: &str) -> Self {
        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ReportSource::Url(input.to_string())
        } else {
            ReportSource::File(PathBuf::from(input))
        }
    }

    /// Fetch and parse the report. Called once per view; no retry.
    pub async fn load(&self, timeout: Option<Duration>) -> Result<Report, ReportError> {
        let body = match self {
            ReportSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ReportError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
            ReportSource::Url(url) => fetch(url, timeout).await?,
        };

        let report: Report = serde_json::from_str(&body)?;

        if !report.totals_consistent() {
            log::warn!(
                "summary.totalApis is {} but report lists {} results",
                report.summary.total_apis,
                report.detailed_results.len()
            );
        }
        log::debug!(
            "Loaded report for {} with {} results",
            report.environment,
            report.detailed_results.len()
        );

        Ok(report)
    }
}

impl fmt::Display for ReportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportSource::File(path) => write!(f, "{}", path.display()),
            ReportSource::Url(url) => write!(f, "{}", url),
        }
    }
}

async fn fetch(url: &str, timeout: Option<Duration>) -> Result<String, ReportError> {
    let transport = |source| ReportError::Transport {
        url: url.to_string(),
        source,
    };

    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(transport)?;

    let response = client.get(url).send().await.map_err(transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ReportError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(transport)
}

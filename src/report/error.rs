use std::path::PathBuf;
use thiserror::Error;

/// Why a report could not be loaded.
///
/// Every variant ends in the same place: the dashboard's error view.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("HTTP error! status: {status} ({url})")]
    Status { url: String, status: u16 },

    #[error("failed to fetch report from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read report {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed report: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ReportError {
    /// Short reason shown on the error view
    pub fn reason(&self) -> String {
        match self {
            ReportError::Status { status, .. } => format!("HTTP {}", status),
            ReportError::Transport { .. } => "network error".to_string(),
            ReportError::Io { .. } => "report file not readable".to_string(),
            ReportError::Parse(_) => "report is malformed".to_string(),
        }
    }
}

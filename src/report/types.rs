use serde::{Deserialize, Deserializer, Serialize};

/// One health-check run, as written by the report producer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub environment: String,
    pub summary: Summary,
    pub critical_failures: Vec<String>,
    pub warnings: Vec<String>,
    pub detailed_results: Vec<ProbeResult>,
    pub test_date: String,
}

/// Aggregate counts for the run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_apis: u32,
    pub success_count: u32,
    pub failure_count: u32,
    pub avg_response_time_ms: f64,
    /// 0-100. The producer writes either `85.0` or `"85.0%"`.
    #[serde(deserialize_with = "deserialize_score")]
    pub health_score: f64,
}

/// Outcome of probing a single endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub method: String,
    pub endpoint: String,
    pub is_success: bool,
    pub response_time_ms: f64,
    #[serde(default)]
    pub test_strategy: Option<String>,
    #[serde(default)]
    pub expected_status: Option<u16>,
    #[serde(default)]
    pub actual_status: Option<u16>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub validation_errors: Vec<String>,
}

impl ProbeResult {
    /// Strategy label, `full_call` when the producer left it out
    pub fn strategy(&self) -> &str {
        match self.test_strategy.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => "full_call",
        }
    }

    /// Error message if one was recorded and is non-empty
    pub fn error(&self) -> Option<&str> {
        self.error_message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

impl Report {
    /// Whether the summary total agrees with the number of detailed results
    pub fn totals_consistent(&self) -> bool {
        self.summary.total_apis as usize == self.detailed_results.len()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(f64),
    Text(String),
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawScore::deserialize(deserializer)? {
        RawScore::Number(n) => Ok(n),
        RawScore::Text(s) => parse_score(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid health score: {:?}", s))),
    }
}

/// Parse `"85.0%"`, `" 85 "` or `"85.0"` into a score
pub fn parse_score(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

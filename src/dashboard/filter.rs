use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::report::ProbeResult;

/// Which results the table shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Success,
    Failure,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown filter: {0:?} (expected all, success or failure)")]
pub struct UnknownFilter(pub String);

impl Filter {
    /// Controls in display order
    pub const CONTROLS: [Filter; 3] = [Filter::All, Filter::Success, Filter::Failure];

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Success => "success",
            Filter::Failure => "failure",
        }
    }

    /// Button caption
    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Success => "Success",
            Filter::Failure => "Failed",
        }
    }

    pub fn matches(&self, result: &ProbeResult) -> bool {
        match self {
            Filter::All => true,
            Filter::Success => result.is_success,
            Filter::Failure => !result.is_success,
        }
    }
}

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "success" => Ok(Filter::Success),
            "failure" => Ok(Filter::Failure),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keep the results the filter selects, in input order
pub fn filter_results<'a, I>(results: I, filter: Filter) -> Vec<&'a ProbeResult>
where
    I: IntoIterator<Item = &'a ProbeResult>,
{
    results.into_iter().filter(|r| filter.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(endpoint: &str, ok: bool) -> ProbeResult {
        ProbeResult {
            method: "GET".to_string(),
            endpoint: endpoint.to_string(),
            is_success: ok,
            response_time_ms: 100.0,
            test_strategy: None,
            expected_status: None,
            actual_status: None,
            error_message: None,
            validation_errors: vec![],
        }
    }

    fn sample() -> Vec<ProbeResult> {
        vec![
            probe("/a", true),
            probe("/b", false),
            probe("/c", true),
            probe("/d", false),
            probe("/e", true),
        ]
    }

    #[test]
    fn test_all_is_identity() {
        let results = sample();
        let all = filter_results(&results, Filter::All);
        assert_eq!(all.len(), results.len());
        assert!(all.iter().zip(&results).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let results = sample();
        for filter in Filter::CONTROLS {
            let once = filter_results(&results, filter);
            let twice = filter_results(once.iter().copied(), filter);
            assert_eq!(once, twice, "filter {} not idempotent", filter);
        }
    }

    #[test]
    fn test_partitions_are_complementary() {
        let results = sample();
        let ok = filter_results(&results, Filter::Success);
        let failed = filter_results(&results, Filter::Failure);

        assert!(ok.iter().all(|r| r.is_success));
        assert!(failed.iter().all(|r| !r.is_success));
        assert_eq!(ok.len() + failed.len(), results.len());
        assert_eq!(ok.len(), 3);
        assert_eq!(failed.len(), 2);
    }

    #[test]
    fn test_preserves_order() {
        let results = sample();
        let failed: Vec<&str> = filter_results(&results, Filter::Failure)
            .iter()
            .map(|r| r.endpoint.as_str())
            .collect();
        assert_eq!(failed, vec!["/b", "/d"]);
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!("failure".parse::<Filter>(), Ok(Filter::Failure));
        assert_eq!("all".parse::<Filter>(), Ok(Filter::All));
        assert!("FAILURE".parse::<Filter>().is_err());
        assert!("".parse::<Filter>().is_err());
    }

    #[test]
    fn test_serializes_as_query_value() {
        for filter in Filter::CONTROLS {
            assert_eq!(serde_json::to_value(filter).unwrap(), filter.as_str());
        }
    }
}

// Shared result types crossing the CLI/JSON boundary
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input guard errors. Generators refuse to run on empty seeds rather than
/// emit partial results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("seed keyword must not be empty")]
    EmptyKeyword,
    #[error("domain must not be empty")]
    EmptyDomain,
    #[error("url must not be empty")]
    EmptyUrl,
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("required field `{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("field `{field}` should be {max} characters or less")]
    FieldTooLong { field: &'static str, max: usize },
}

/// Severity buckets for analysis findings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueBuckets {
    pub critical: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub improvements: Vec<Issue>,
    pub passed: Vec<Issue>,
}

impl IssueBuckets {
    pub fn total(&self) -> usize {
        self.critical.len() + self.warnings.len() + self.improvements.len() + self.passed.len()
    }
}

/// A single analysis finding. `recommendation` is only populated by checks
/// that have a concrete fix to suggest (the URL audit pools carry one, the
/// content checks do not).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Issue {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            recommendation: None,
        }
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// Search-volume trend direction for a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// rel-attribute class of a backlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Dofollow,
    Nofollow,
    Ugc,
    Sponsored,
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkType::Dofollow => write!(f, "dofollow"),
            LinkType::Nofollow => write!(f, "nofollow"),
            LinkType::Ugc => write!(f, "ugc"),
            LinkType::Sponsored => write!(f, "sponsored"),
        }
    }
}

/// Round to two decimal places, the precision every exported score uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_serializes_without_empty_recommendation() {
        let json = serde_json::to_string(&Issue::new("t", "d")).unwrap();
        assert!(!json.contains("recommendation"));

        let json = serde_json::to_string(&Issue::new("t", "d").with_recommendation("fix")).unwrap();
        assert!(json.contains("\"recommendation\":\"fix\""));
    }

    #[test]
    fn trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Up).unwrap(), "\"up\"");
        assert_eq!(
            serde_json::to_string(&LinkType::Sponsored).unwrap(),
            "\"sponsored\""
        );
    }

    #[test]
    fn round2_behaves() {
        assert_eq!(round2(3.351), 3.35);
        assert_eq!(round2(0.5 + 57.0 / 20.0), 3.35);
    }
}

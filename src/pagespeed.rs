// PageSpeed Insights collaborator: fetch, cache, and reshape lighthouse data
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cache::TtlCache;

const API_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Responses are cached for an hour per (url, strategy) pair.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Mobile,
    Desktop,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Mobile => write!(f, "mobile"),
            Strategy::Desktop => write!(f, "desktop"),
        }
    }
}

/// Raw API response, trimmed to the fields we consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagespeedResult {
    #[serde(rename = "lighthouseResult")]
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LighthouseResult {
    pub categories: Categories,
    pub audits: HashMap<String, Audit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Categories {
    pub performance: Option<Category>,
    pub accessibility: Option<Category>,
    #[serde(rename = "best-practices")]
    pub best_practices: Option<Category>,
    pub seo: Option<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audit {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub score: Option<f64>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

/// What a page-speed query can come back with. Rate limiting is its own
/// variant so the caller can show a retry hint instead of a generic failure;
/// other failures carry only a message and are expected to be recovered from
/// by falling back to mock scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PagespeedOutcome {
    Ok { result: PagespeedResult },
    RateLimited { message: String },
    Error { message: String },
}

/// Category scores scaled to 0-100 plus the headline timing metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub performance: u32,
    pub accessibility: u32,
    pub best_practices: u32,
    pub seo: u32,
    pub first_contentful_paint: String,
    pub largest_contentful_paint: String,
    pub time_to_interactive: String,
    pub total_blocking_time: String,
    pub cumulative_layout_shift: String,
    pub speed_index: String,
    pub opportunities: Vec<Opportunity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub title: String,
    pub description: String,
    pub score: f64,
}

/// Client for the PageSpeed endpoint with an injected response cache.
pub struct PagespeedClient {
    http: reqwest::Client,
    cache: TtlCache<PagespeedResult>,
    api_key: Option<String>,
}

impl PagespeedClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_ttl(api_key, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(api_key: Option<String>, ttl: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache: TtlCache::new(ttl),
            api_key,
        }
    }

    /// Query the endpoint for `url` under the given strategy.
    ///
    /// Network and HTTP failures are folded into the outcome rather than
    /// returned as `Err`; callers decide whether to fall back to mock data.
    pub async fn analyze(&self, url: &str, strategy: Strategy) -> PagespeedOutcome {
        let formatted_url = format_url(url);
        let cache_key = format!("{formatted_url}-{strategy}");

        if let Some(cached) = self.cache.get(&cache_key) {
            debug!(url = %formatted_url, "using cached page-speed result");
            return PagespeedOutcome::Ok { result: cached };
        }

        let mut query: Vec<(&str, String)> = vec![
            ("url", formatted_url.clone()),
            ("strategy", strategy.to_string()),
            ("category", "performance".into()),
            ("category", "accessibility".into()),
            ("category", "best-practices".into()),
            ("category", "seo".into()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("key", key.clone()));
        }

        let response = match self.http.get(API_ENDPOINT).query(&query).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(url = %formatted_url, error = %err, "page-speed request failed");
                return PagespeedOutcome::Error {
                    message: err.to_string(),
                };
            }
        };

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("page-speed API rate limit exceeded");
            return PagespeedOutcome::RateLimited {
                message: "Rate limit exceeded. Please try again later.".to_string(),
            };
        }

        if !response.status().is_success() {
            return PagespeedOutcome::Error {
                message: format!("PageSpeed API error: {}", response.status()),
            };
        }

        match response.json::<PagespeedResult>().await {
            Ok(result) => {
                self.cache.set(cache_key, result.clone());
                PagespeedOutcome::Ok { result }
            }
            Err(err) => PagespeedOutcome::Error {
                message: err.to_string(),
            },
        }
    }
}

/// Bare domains get an https scheme prepended before querying.
pub fn format_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Reshape a raw result into report-ready metrics. `None` when the response
/// carried no lighthouse payload at all.
pub fn extract_performance_metrics(result: &PagespeedResult) -> Option<PerformanceMetrics> {
    let lighthouse = result.lighthouse_result.as_ref()?;
    let categories = &lighthouse.categories;
    let audits = &lighthouse.audits;

    let display = |id: &str| -> String {
        audits
            .get(id)
            .and_then(|a| a.display_value.clone())
            .unwrap_or_else(|| "N/A".to_string())
    };

    let mut opportunities: Vec<&Audit> = audits
        .values()
        .filter(|audit| {
            audit
                .score
                .is_some_and(|score| score < 0.9 && audit.id != "total-blocking-time")
        })
        .collect();
    opportunities.sort_by(|a, b| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Some(PerformanceMetrics {
        performance: scale_score(&categories.performance),
        accessibility: scale_score(&categories.accessibility),
        best_practices: scale_score(&categories.best_practices),
        seo: scale_score(&categories.seo),
        first_contentful_paint: display("first-contentful-paint"),
        largest_contentful_paint: display("largest-contentful-paint"),
        time_to_interactive: display("interactive"),
        total_blocking_time: display("total-blocking-time"),
        cumulative_layout_shift: display("cumulative-layout-shift"),
        speed_index: display("speed-index"),
        opportunities: opportunities
            .into_iter()
            .take(5)
            .map(|audit| Opportunity {
                title: audit.title.clone(),
                description: audit.description.clone(),
                score: audit.score.unwrap_or(0.0),
            })
            .collect(),
    })
}

fn scale_score(category: &Option<Category>) -> u32 {
    let score = category.as_ref().and_then(|c| c.score).unwrap_or(0.0);
    (score * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audit(id: &str, score: Option<f64>, display: Option<&str>) -> Audit {
        Audit {
            id: id.to_string(),
            title: format!("{id} title"),
            description: format!("{id} description"),
            score,
            display_value: display.map(str::to_string),
        }
    }

    fn lighthouse(audits: Vec<Audit>) -> PagespeedResult {
        PagespeedResult {
            lighthouse_result: Some(LighthouseResult {
                categories: Categories {
                    performance: Some(Category { score: Some(0.925) }),
                    accessibility: Some(Category { score: Some(0.5) }),
                    best_practices: Some(Category { score: None }),
                    seo: None,
                },
                audits: audits.into_iter().map(|a| (a.id.clone(), a)).collect(),
            }),
        }
    }

    #[test]
    fn url_formatting_adds_scheme_once() {
        assert_eq!(format_url("example.com"), "https://example.com");
        assert_eq!(format_url("https://example.com"), "https://example.com");
        assert_eq!(format_url("http://example.com"), "http://example.com");
    }

    #[test]
    fn missing_lighthouse_payload_yields_none() {
        let result = PagespeedResult {
            lighthouse_result: None,
        };
        assert!(extract_performance_metrics(&result).is_none());
    }

    #[test]
    fn scores_scale_to_percent_with_zero_fallback() {
        let metrics = extract_performance_metrics(&lighthouse(vec![])).unwrap();
        assert_eq!(metrics.performance, 93);
        assert_eq!(metrics.accessibility, 50);
        assert_eq!(metrics.best_practices, 0);
        assert_eq!(metrics.seo, 0);
    }

    #[test]
    fn named_metrics_fall_back_to_na() {
        let metrics = extract_performance_metrics(&lighthouse(vec![audit(
            "first-contentful-paint",
            Some(0.95),
            Some("1.2 s"),
        )]))
        .unwrap();
        assert_eq!(metrics.first_contentful_paint, "1.2 s");
        assert_eq!(metrics.largest_contentful_paint, "N/A");
        assert_eq!(metrics.speed_index, "N/A");
    }

    #[test]
    fn opportunities_filter_sort_and_cap() {
        let metrics = extract_performance_metrics(&lighthouse(vec![
            audit("render-blocking-resources", Some(0.3), None),
            audit("unused-css-rules", Some(0.6), None),
            audit("uses-webp-images", Some(0.1), None),
            audit("good-audit", Some(0.95), None),
            audit("informative", None, None),
            // Excluded by id even though its score qualifies.
            audit("total-blocking-time", Some(0.2), Some("150 ms")),
            audit("a", Some(0.5), None),
            audit("b", Some(0.7), None),
            audit("c", Some(0.8), None),
        ]))
        .unwrap();

        assert_eq!(metrics.opportunities.len(), 5);
        assert_eq!(metrics.opportunities[0].title, "uses-webp-images title");
        for pair in metrics.opportunities.windows(2) {
            assert!(pair[0].score <= pair[1].score);
        }
        assert!(metrics
            .opportunities
            .iter()
            .all(|o| o.title != "total-blocking-time title"));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = PagespeedOutcome::RateLimited {
            message: "slow down".to_string(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"status\":\"ratelimited\""));
    }
}

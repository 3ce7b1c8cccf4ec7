// Site audit: live page-speed data when the API cooperates, mock filler when
// it does not
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::{InputError, Issue, IssueBuckets};
use crate::pagespeed::{
    extract_performance_metrics, format_url, PagespeedClient, PagespeedOutcome,
    PerformanceMetrics, Strategy,
};

type PooledIssue = (&'static str, &'static str, Option<&'static str>);

const CRITICAL_POOL: [PooledIssue; 5] = [
    (
        "Missing meta description",
        "Meta descriptions help search engines understand your page content and appear in search results.",
        Some("Add a unique, descriptive meta description between 120-158 characters."),
    ),
    (
        "Slow page load time",
        "Page speed is a ranking factor for search engines and affects user experience.",
        Some("Optimize images, minify CSS/JS, and consider a CDN to improve load times."),
    ),
    (
        "No SSL certificate",
        "HTTPS is a ranking signal and builds user trust.",
        Some("Install an SSL certificate to enable HTTPS."),
    ),
    (
        "Blocked by robots.txt",
        "Search engines cannot index your site if blocked by robots.txt.",
        Some("Update your robots.txt to allow search engines to crawl your site."),
    ),
    (
        "Duplicate content issues",
        "Duplicate content confuses search engines about which page to rank.",
        Some("Use canonical tags to indicate the preferred version of duplicate pages."),
    ),
];

const WARNING_POOL: [PooledIssue; 7] = [
    (
        "Images missing alt text",
        "Alt text helps search engines understand image content and improves accessibility.",
        Some("Add descriptive alt text to all images."),
    ),
    (
        "Low text-to-HTML ratio",
        "Pages with too little text may be seen as thin content by search engines.",
        Some("Add more relevant, quality content to your pages."),
    ),
    (
        "Missing H1 tag",
        "H1 tags help search engines understand your page's main topic.",
        Some("Add a single, descriptive H1 tag to each page."),
    ),
    (
        "Duplicate title tags",
        "Unique title tags help search engines differentiate between pages.",
        Some("Create unique, descriptive title tags for each page."),
    ),
    (
        "Poor mobile optimization",
        "Mobile-friendliness is a ranking factor for search engines.",
        Some("Ensure your site is responsive and displays correctly on mobile devices."),
    ),
    (
        "Missing structured data",
        "Structured data helps search engines understand your content and can enable rich results.",
        Some("Implement relevant schema markup for your content type."),
    ),
    (
        "Slow server response time",
        "Server response time affects page load speed and user experience.",
        Some("Optimize server configuration and consider upgrading hosting if necessary."),
    ),
];

const IMPROVEMENT_POOL: [PooledIssue; 8] = [
    (
        "Meta title too long",
        "Meta titles should be concise to display properly in search results.",
        Some("Keep meta titles under 60 characters."),
    ),
    (
        "URL structure could be improved",
        "Clean, descriptive URLs help users and search engines understand page content.",
        Some("Use short, descriptive URLs with keywords."),
    ),
    (
        "Low word count",
        "Pages with more comprehensive content often rank better for relevant queries.",
        Some("Aim for at least 300 words of quality content per page."),
    ),
    (
        "Missing favicon",
        "Favicons improve brand recognition and user experience.",
        Some("Add a favicon to your site."),
    ),
    (
        "No social meta tags",
        "Social meta tags control how your content appears when shared on social media.",
        Some("Add Open Graph and Twitter Card meta tags."),
    ),
    (
        "Missing language attribute",
        "The HTML lang attribute helps search engines and screen readers.",
        Some("Add the lang attribute to your HTML tag."),
    ),
    (
        "No image sitemaps",
        "Image sitemaps help search engines discover and index your images.",
        Some("Create and submit an image sitemap."),
    ),
    (
        "Missing breadcrumbs",
        "Breadcrumbs help users navigate and improve SEO.",
        Some("Implement breadcrumb navigation with structured data markup."),
    ),
];

const PASSED_POOL: [PooledIssue; 12] = [
    (
        "Proper use of heading tags",
        "Your page uses heading tags in the correct hierarchical order.",
        None,
    ),
    (
        "Good keyword density",
        "Your content has a natural keyword distribution without keyword stuffing.",
        None,
    ),
    (
        "Optimized images",
        "Images are properly compressed and sized for web use.",
        None,
    ),
    (
        "Valid robots.txt",
        "Your robots.txt file is properly formatted and accessible.",
        None,
    ),
    (
        "XML sitemap exists",
        "An XML sitemap is available to help search engines crawl your site.",
        None,
    ),
    (
        "No broken links",
        "All links on your page are working correctly.",
        None,
    ),
    (
        "Good internal linking",
        "Your page has a good structure of internal links.",
        None,
    ),
    (
        "Canonical tags implemented",
        "Canonical tags are properly implemented to prevent duplicate content issues.",
        None,
    ),
    (
        "Mobile viewport set",
        "Your page has a proper viewport meta tag for mobile devices.",
        None,
    ),
    (
        "No render-blocking resources",
        "Your page doesn't have resources that block rendering.",
        None,
    ),
    (
        "HTTPS implemented",
        "Your site uses secure HTTPS protocol.",
        None,
    ),
    (
        "No intrusive interstitials",
        "Your site doesn't use intrusive popups that could harm mobile usability.",
        None,
    ),
];

const KEYWORD_POOL: [&str; 8] = [
    "seo tools",
    "website optimization",
    "digital marketing",
    "search engine ranking",
    "content marketing",
    "web analytics",
    "online presence",
    "meta tags",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditScores {
    pub overall: u32,
    pub performance: u32,
    pub seo: u32,
    pub accessibility: u32,
    pub best_practices: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordEstimate {
    pub keyword: String,
    pub relevance: u32,
    pub competition: u32,
    pub volume: u32,
}

/// Headline timings for the report; mock fallback has no blocking-time figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub load_time: String,
    pub first_contentful_paint: String,
    pub largest_contentful_paint: String,
    pub time_to_interactive: String,
    pub cumulative_layout_shift: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_blocking_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub scores: AuditScores,
    pub issues: IssueBuckets,
    pub recommendations: Vec<Recommendation>,
    pub keywords: Vec<KeywordEstimate>,
    pub performance: PerformanceSummary,
    /// Raw per-strategy metrics when the live API answered; absent for the
    /// mock fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lighthouse: Option<LighthouseSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LighthouseSummary {
    pub mobile: PerformanceMetrics,
    pub desktop: PerformanceMetrics,
}

/// Audit a URL: fetch mobile and desktop lighthouse runs, average their
/// category scores, and fill the rest of the report from the issue pools.
/// API failure is not fatal; the report degrades to fully mock data.
pub async fn audit_url(client: &PagespeedClient, url: &str) -> Result<AuditReport, InputError> {
    if url.trim().is_empty() {
        return Err(InputError::EmptyUrl);
    }
    let formatted = format_url(url.trim());
    reqwest::Url::parse(&formatted).map_err(|_| InputError::InvalidUrl(url.to_string()))?;

    let lighthouse = fetch_lighthouse(client, &formatted).await;
    if lighthouse.is_some() {
        info!(url = %formatted, "audit using live page-speed data");
    } else {
        warn!(url = %formatted, "page-speed data unavailable, using mock scores");
    }

    Ok(build_report(formatted, lighthouse, Utc::now()))
}

async fn fetch_lighthouse(client: &PagespeedClient, url: &str) -> Option<LighthouseSummary> {
    let mobile = match client.analyze(url, Strategy::Mobile).await {
        PagespeedOutcome::Ok { result } => extract_performance_metrics(&result)?,
        _ => return None,
    };
    let desktop = match client.analyze(url, Strategy::Desktop).await {
        PagespeedOutcome::Ok { result } => extract_performance_metrics(&result)?,
        _ => return None,
    };
    Some(LighthouseSummary { mobile, desktop })
}

/// Assemble the report from whatever lighthouse data is available.
pub fn build_report(
    url: String,
    lighthouse: Option<LighthouseSummary>,
    timestamp: DateTime<Utc>,
) -> AuditReport {
    let mut rng = rand::thread_rng();

    let scores = match &lighthouse {
        Some(data) => {
            let performance = average(data.mobile.performance, data.desktop.performance);
            let seo = average(data.mobile.seo, data.desktop.seo);
            let accessibility = average(data.mobile.accessibility, data.desktop.accessibility);
            let best_practices = average(data.mobile.best_practices, data.desktop.best_practices);
            AuditScores {
                overall: weighted_overall(performance, seo, accessibility, best_practices),
                performance,
                seo,
                accessibility,
                best_practices,
            }
        }
        None => AuditScores {
            overall: generate_score(&mut rng, 60, 100, Bias::Neutral),
            performance: generate_score(&mut rng, 50, 100, Bias::Low),
            seo: generate_score(&mut rng, 60, 100, Bias::Neutral),
            accessibility: generate_score(&mut rng, 55, 100, Bias::Low),
            best_practices: generate_score(&mut rng, 65, 100, Bias::High),
        },
    };

    let critical_count = generate_score(&mut rng, 0, 3, Bias::Low) as usize;
    let warning_count = generate_score(&mut rng, 2, 7, Bias::Neutral) as usize;
    let improvement_count = generate_score(&mut rng, 3, 8, Bias::High) as usize;
    let passed_count = generate_score(&mut rng, 5, 12, Bias::High) as usize;
    let issues = IssueBuckets {
        critical: sample_issues(&mut rng, &CRITICAL_POOL, critical_count),
        warnings: sample_issues(&mut rng, &WARNING_POOL, warning_count),
        improvements: sample_issues(&mut rng, &IMPROVEMENT_POOL, improvement_count),
        passed: sample_issues(&mut rng, &PASSED_POOL, passed_count),
    };

    let recommendations = build_recommendations(&issues, lighthouse.as_ref());
    let keywords = estimate_keywords(&mut rng);
    let performance = match &lighthouse {
        Some(data) => PerformanceSummary {
            load_time: data.mobile.speed_index.clone(),
            first_contentful_paint: data.mobile.first_contentful_paint.clone(),
            largest_contentful_paint: data.mobile.largest_contentful_paint.clone(),
            time_to_interactive: data.mobile.time_to_interactive.clone(),
            cumulative_layout_shift: data.mobile.cumulative_layout_shift.clone(),
            total_blocking_time: Some(data.mobile.total_blocking_time.clone()),
        },
        None => PerformanceSummary {
            load_time: format!("{:.2}s", rng.gen_range(1.0..6.0)),
            first_contentful_paint: format!("{:.2}s", rng.gen_range(0.5..2.5)),
            largest_contentful_paint: format!("{:.2}s", rng.gen_range(1.0..4.0)),
            time_to_interactive: format!("{:.2}s", rng.gen_range(1.5..5.5)),
            cumulative_layout_shift: format!("{:.2}", rng.gen_range(0.0..0.5)),
            total_blocking_time: None,
        },
    };

    AuditReport {
        url,
        timestamp,
        scores,
        issues,
        recommendations,
        keywords,
        performance,
        lighthouse,
    }
}

#[derive(Clone, Copy)]
enum Bias {
    High,
    Low,
    Neutral,
}

/// Uniform draw skewed towards one end of [min, max]. The exponents mirror
/// how real audit scores cluster: best-practices usually pass, raw
/// performance usually disappoints.
fn generate_score(rng: &mut impl Rng, min: u32, max: u32, bias: Bias) -> u32 {
    let mut random: f64 = rng.gen();
    random = match bias {
        Bias::High => random.powf(0.7),
        Bias::Low => random.powf(1.3),
        Bias::Neutral => random,
    };
    (random * (max - min + 1) as f64) as u32 + min
}

fn average(a: u32, b: u32) -> u32 {
    ((a + b) as f64 / 2.0).round() as u32
}

fn weighted_overall(performance: u32, seo: u32, accessibility: u32, best_practices: u32) -> u32 {
    (performance as f64 * 0.25
        + seo as f64 * 0.35
        + accessibility as f64 * 0.2
        + best_practices as f64 * 0.2)
        .round() as u32
}

/// `count` distinct entries from a pool, order randomized.
fn sample_issues(rng: &mut impl Rng, pool: &[PooledIssue], count: usize) -> Vec<Issue> {
    pool.choose_multiple(rng, count.min(pool.len()))
        .map(|(title, description, recommendation)| {
            let issue = Issue::new(*title, *description);
            match recommendation {
                Some(fix) => issue.with_recommendation(*fix),
                None => issue,
            }
        })
        .collect()
}

/// Ordered action list: mobile lighthouse opportunities first, then the
/// sampled issues, all sorted high to low priority. The sort is stable so
/// entries keep their source order within a priority band.
fn build_recommendations(
    issues: &IssueBuckets,
    lighthouse: Option<&LighthouseSummary>,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = Vec::new();

    if let Some(data) = lighthouse {
        for opportunity in &data.mobile.opportunities {
            recommendations.push(Recommendation {
                priority: if opportunity.score < 0.5 {
                    Priority::High
                } else {
                    Priority::Medium
                },
                title: opportunity.title.clone(),
                description: opportunity.description.clone(),
            });
        }
    }

    let mapped = [
        (&issues.critical, Priority::High),
        (&issues.warnings, Priority::Medium),
        (&issues.improvements, Priority::Low),
    ];
    for (bucket, priority) in mapped {
        for issue in bucket.iter() {
            recommendations.push(Recommendation {
                priority,
                title: issue.title.clone(),
                description: issue
                    .recommendation
                    .clone()
                    .unwrap_or_else(|| issue.description.clone()),
            });
        }
    }

    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

/// Rough per-keyword estimates. Intentionally non-deterministic demo filler,
/// only the ranges are contractual.
fn estimate_keywords(rng: &mut impl Rng) -> Vec<KeywordEstimate> {
    KEYWORD_POOL
        .iter()
        .map(|keyword| KeywordEstimate {
            keyword: keyword.to_string(),
            relevance: rng.gen_range(1..=100),
            competition: rng.gen_range(1..=100),
            volume: rng.gen_range(100..=10_099),
        })
        .collect()
}

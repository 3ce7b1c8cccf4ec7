// Backlink profile generation: aggregate counts plus individual link records,
// all derived from the domain's seed hash
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::hash::seed_hash;
use crate::models::{InputError, LinkType};

const LINKING_DOMAINS: [&str; 10] = [
    "example.com",
    "blog.com",
    "news.org",
    "reference.net",
    "directory.io",
    "review.co",
    "forum.org",
    "social.net",
    "partner.com",
    "industry.org",
];

const PATH_SEGMENTS: [&str; 6] = ["blog", "article", "news", "review", "post", "page"];

const TITLE_TEMPLATES: [&str; 5] = [
    "The Complete Guide to",
    "Why You Should Use",
    "How to Get Started with",
    "Review of",
    "Top Tips for",
];

/// Individual inbound link record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backlink {
    pub url: String,
    pub title: String,
    pub domain: String,
    pub authority: u32,
    pub anchor: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorCount {
    pub text: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkingDomain {
    pub domain: String,
    pub links: usize,
    pub authority: u32,
}

/// Full backlink profile for a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklinkProfile {
    pub domain: String,
    pub total_backlinks: u32,
    pub unique_domains: u32,
    pub dofollow_links: u32,
    pub nofollow_links: u32,
    pub domain_authority: u32,
    pub top_anchors: Vec<AnchorCount>,
    pub top_linking_domains: Vec<LinkingDomain>,
    pub backlinks: Vec<Backlink>,
}

impl BacklinkProfile {
    pub fn authority_label(&self) -> &'static str {
        authority_label(self.domain_authority)
    }

    /// total links / referring domains, one decimal of precision in reports.
    pub fn link_to_domain_ratio(&self) -> f64 {
        self.total_backlinks as f64 / self.unique_domains as f64
    }

    pub fn dofollow_percent(&self) -> u32 {
        ((self.dofollow_links as f64 / self.total_backlinks as f64) * 100.0).round() as u32
    }
}

pub fn authority_label(authority: u32) -> &'static str {
    if authority < 30 {
        "Low"
    } else if authority < 60 {
        "Medium"
    } else {
        "High"
    }
}

/// Generate the backlink profile for `domain`.
///
/// `now` anchors the first-seen/last-seen date window; callers pass
/// `Utc::now()` outside tests. For a fixed `(domain, now)` the output is
/// identical on every call.
pub fn generate_backlink_data(
    domain: &str,
    now: DateTime<Utc>,
) -> Result<BacklinkProfile, InputError> {
    if domain.trim().is_empty() {
        return Err(InputError::EmptyDomain);
    }

    let h = seed_hash(domain);
    let total_backlinks = 50 + h % 950;
    let unique_domains = 10 + h % (total_backlinks / 2);
    let dofollow_links = (total_backlinks as f64 * (0.6 + (h % 30) as f64 / 100.0)).floor() as u32;
    let nofollow_links = total_backlinks - dofollow_links;
    let domain_authority = 20 + h % 60;

    let anchor_pool: [String; 10] = [
        domain.to_string(),
        format!("{domain} review"),
        format!("best {domain}"),
        format!("{domain} alternative"),
        "click here".to_string(),
        "read more".to_string(),
        "website".to_string(),
        "learn more".to_string(),
        "official site".to_string(),
        "visit now".to_string(),
    ];

    let first_seen_at = now - Duration::days((h % 365) as i64);
    let span_ms = (now - first_seen_at).num_milliseconds();

    let record_count = total_backlinks.min(50);
    let mut backlinks = Vec::with_capacity(record_count as usize);
    for i in 0..record_count as u64 {
        let hi = h as u64 + i;
        let link_domain = LINKING_DOMAINS[(hi % LINKING_DOMAINS.len() as u64) as usize];
        let path = PATH_SEGMENTS[(hi % PATH_SEGMENTS.len() as u64) as usize];
        let id = hi % 1000 + 1;
        let anchor = anchor_pool[(hi % anchor_pool.len() as u64) as usize].clone();
        let title_prefix = TITLE_TEMPLATES[(hi % TITLE_TEMPLATES.len() as u64) as usize];

        // 70% dofollow, 20% nofollow, the last residue split between ugc and
        // sponsored by parity.
        let link_type = match hi % 10 {
            0..=6 => LinkType::Dofollow,
            7 | 8 => LinkType::Nofollow,
            _ if hi % 2 == 0 => LinkType::Ugc,
            _ => LinkType::Sponsored,
        };

        // last_seen always lands inside [first_seen, now].
        let last_seen_at = if span_ms > 0 {
            first_seen_at + Duration::milliseconds(hi as i64 % span_ms)
        } else {
            first_seen_at
        };

        backlinks.push(Backlink {
            url: format!("https://{link_domain}/{path}/{id}"),
            title: format!("{title_prefix} {domain}"),
            domain: link_domain.to_string(),
            authority: 10 + (hi % 80) as u32,
            anchor,
            link_type,
            first_seen: first_seen_at.date_naive(),
            last_seen: last_seen_at.date_naive(),
        });
    }

    debug!(
        domain,
        total_backlinks,
        records = backlinks.len(),
        "generated backlink profile"
    );

    Ok(BacklinkProfile {
        domain: domain.to_string(),
        total_backlinks,
        unique_domains,
        dofollow_links,
        nofollow_links,
        domain_authority,
        top_anchors: top_anchors(&backlinks),
        top_linking_domains: top_linking_domains(&backlinks),
        backlinks,
    })
}

/// Frequency count over anchor texts, first-seen order for ties, top 5.
fn top_anchors(backlinks: &[Backlink]) -> Vec<AnchorCount> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for link in backlinks {
        if !counts.contains_key(link.anchor.as_str()) {
            order.push(link.anchor.clone());
        }
        *counts.entry(link.anchor.as_str()).or_insert(0) += 1;
    }

    let mut anchors: Vec<AnchorCount> = order
        .into_iter()
        .map(|text| {
            let count = counts[text.as_str()];
            AnchorCount { text, count }
        })
        .collect();
    anchors.sort_by(|a, b| b.count.cmp(&a.count));
    anchors.truncate(5);
    anchors
}

/// Links-per-domain counts; each domain keeps the authority of its first
/// record. Top 5 by link count.
fn top_linking_domains(backlinks: &[Backlink]) -> Vec<LinkingDomain> {
    let mut order: Vec<(String, u32)> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for link in backlinks {
        if !counts.contains_key(link.domain.as_str()) {
            order.push((link.domain.clone(), link.authority));
        }
        *counts.entry(link.domain.as_str()).or_insert(0) += 1;
    }

    let mut domains: Vec<LinkingDomain> = order
        .into_iter()
        .map(|(domain, authority)| {
            let links = counts[domain.as_str()];
            LinkingDomain {
                domain,
                links,
                authority,
            }
        })
        .collect();
    domains.sort_by(|a, b| b.links.cmp(&a.links));
    domains.truncate(5);
    domains
}

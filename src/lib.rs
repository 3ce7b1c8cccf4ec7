pub mod audit;
pub mod backlinks;
pub mod cache;
pub mod content;
pub mod hash;
pub mod keywords;
pub mod markup;
pub mod models;
pub mod pagespeed;
pub mod report;

pub use audit::{audit_url, AuditReport};
pub use backlinks::{generate_backlink_data, BacklinkProfile};
pub use cache::TtlCache;
pub use content::{analyze_content, ContentAnalysis};
pub use hash::seed_hash;
pub use keywords::{generate_keyword_data, KeywordResult};
pub use markup::{build_meta_tags, build_robots_txt, build_sitemap};
pub use models::{InputError, Issue, IssueBuckets};
pub use pagespeed::{extract_performance_metrics, PagespeedClient, PagespeedOutcome, Strategy};

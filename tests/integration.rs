use chrono::{TimeZone, Utc};
use siteforge::backlinks::generate_backlink_data;
use siteforge::content::analyze_content;
use siteforge::keywords::generate_keyword_data;
use siteforge::markup::{build_meta_tags, build_robots_txt, build_sitemap, AgentRule, MetaTagForm, SitemapUrl};
use siteforge::models::InputError;
use siteforge::report;
use siteforge::seed_hash;

#[test]
fn hash_is_pinned_across_releases() {
    assert_eq!(seed_hash("example.com"), 1_944_013_059);
    assert_eq!(seed_hash("seo"), 113_757);
}

#[test]
fn keyword_research_end_to_end() {
    let results = generate_keyword_data("seo").unwrap();
    assert_eq!(results.len(), 12);
    for pair in results.windows(2) {
        assert!(pair[0].volume >= pair[1].volume);
    }

    let csv = report::keywords_csv(&results);
    assert!(csv.starts_with("Keyword,Search Volume,Difficulty,CPC ($),Trend\n"));
    assert_eq!(csv.lines().count(), 13);
}

#[test]
fn backlink_profile_end_to_end() {
    let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
    let profile = generate_backlink_data("example.com", now).unwrap();

    assert_eq!(
        profile.dofollow_links + profile.nofollow_links,
        profile.total_backlinks
    );
    assert!(profile.backlinks.len() <= 50);

    let again = generate_backlink_data("example.com", now).unwrap();
    assert_eq!(profile, again);

    let csv = report::backlinks_csv(&profile);
    assert_eq!(csv.lines().count(), profile.backlinks.len() + 1);
}

#[test]
fn content_pipeline_produces_consistent_report() {
    let text = "# Rust for the Web\n\n\
                Rust keeps getting better for web work. The tooling matured. \
                The async story settled down. Teams ship production services with it today.\n\n\
                ## Why it matters\n\n\
                Fast startup and low memory use matter for dense deployments. \
                Rust delivers both without a garbage collector.";
    let analysis = analyze_content(text, Some("rust"));

    assert!(analysis.seo_score <= 100);
    assert!(analysis.keyword_occurrences > 0);
    assert_eq!(analysis.heading_count, 2);

    let rendered = report::content_report(
        &analysis,
        chrono::NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
    );
    assert!(rendered.contains("Target Keyword: rust"));
    assert!(rendered.contains("ANALYZED CONTENT"));
    assert!(rendered.contains(text));
}

#[test]
fn empty_inputs_are_rejected_uniformly() {
    assert!(matches!(
        generate_keyword_data("  "),
        Err(InputError::EmptyKeyword)
    ));
    assert!(matches!(
        generate_backlink_data("", Utc::now()),
        Err(InputError::EmptyDomain)
    ));
    assert!(matches!(build_sitemap("", &[]), Err(InputError::EmptyUrl)));
}

#[test]
fn markup_generators_round_out_the_toolkit() {
    let sitemap = build_sitemap("example.com", &[SitemapUrl::new("/blog")]).unwrap();
    assert!(sitemap.contains("<loc>https://example.com/blog</loc>"));

    let robots = build_robots_txt(
        &[AgentRule {
            user_agent: "*".to_string(),
            disallow: vec!["/admin/".to_string()],
            allow: vec![],
        }],
        None,
    );
    assert!(robots.starts_with("# robots.txt generated by SiteForge"));
    assert!(robots.contains("Disallow: /admin/"));

    let tags = build_meta_tags(&MetaTagForm {
        title: "SiteForge".to_string(),
        description: "Free SEO tools.".to_string(),
        ..MetaTagForm::default()
    })
    .unwrap();
    assert!(tags.contains("<title>SiteForge</title>"));
    assert!(tags.contains("og:title"));
}

#[test]
fn summaries_can_be_saved_to_files() {
    let dir = tempfile::tempdir().unwrap();

    let analysis = analyze_content(&"word ".repeat(400), Some("word"));
    let content_path = dir.path().join("content-summary.txt");
    std::fs::write(&content_path, report::content_summary(&analysis)).unwrap();
    assert!(std::fs::read_to_string(&content_path)
        .unwrap()
        .contains("SEO score"));

    let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
    let profile = generate_backlink_data("example.com", now).unwrap();
    let backlink_path = dir.path().join("backlinks.txt");
    std::fs::write(&backlink_path, report::backlink_summary(&profile)).unwrap();
    assert!(std::fs::read_to_string(&backlink_path)
        .unwrap()
        .contains("link-to-domain ratio"));
}

#[test]
fn exported_files_can_be_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let results = generate_keyword_data("seo").unwrap();
    let path = dir.path().join(report::keywords_csv_filename("seo"));
    std::fs::write(&path, report::keywords_csv(&results)).unwrap();

    let read_back = std::fs::read_to_string(&path).unwrap();
    assert!(read_back.contains("seo vs"));
}

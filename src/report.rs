// Export formatting: CSV files, the plain-text content report, and terminal
// tables
use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

use std::fmt::Write as _;

use crate::audit::AuditReport;
use crate::backlinks::BacklinkProfile;
use crate::content::ContentAnalysis;
use crate::keywords::{average_difficulty, best_roi, KeywordResult};
use crate::models::Issue;

pub fn keywords_csv(results: &[KeywordResult]) -> String {
    let mut csv = String::from("Keyword,Search Volume,Difficulty,CPC ($),Trend\n");
    let rows: Vec<String> = results
        .iter()
        .map(|row| {
            format!(
                "\"{}\",{},{},{},{}",
                row.keyword, row.volume, row.difficulty, row.cpc, row.trend
            )
        })
        .collect();
    csv.push_str(&rows.join("\n"));
    csv
}

pub fn keywords_csv_filename(seed: &str) -> String {
    format!(
        "keyword-research-{}.csv",
        seed.split_whitespace().collect::<Vec<_>>().join("-")
    )
}

pub fn backlinks_csv(profile: &BacklinkProfile) -> String {
    let mut csv =
        String::from("URL,Title,Domain,Authority,Anchor Text,Link Type,First Seen,Last Seen\n");
    let rows: Vec<String> = profile
        .backlinks
        .iter()
        .map(|link| {
            format!(
                "\"{}\",\"{}\",\"{}\",{},\"{}\",\"{}\",\"{}\",\"{}\"",
                link.url,
                link.title,
                link.domain,
                link.authority,
                link.anchor,
                link.link_type,
                link.first_seen,
                link.last_seen
            )
        })
        .collect();
    csv.push_str(&rows.join("\n"));
    csv
}

pub fn backlinks_csv_filename(domain: &str) -> String {
    format!("backlinks-{}.csv", domain.replace('.', "-"))
}

fn issue_lines(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return "None".to_string();
    }
    issues
        .iter()
        .map(|issue| format!("- {}: {}", issue.title, issue.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain-text content analysis report, the downloadable companion to the
/// on-screen summary.
pub fn content_report(analysis: &ContentAnalysis, date: NaiveDate) -> String {
    let top_keywords = analysis
        .top_keywords
        .iter()
        .map(|kw| {
            format!(
                "{}: {} occurrences ({:.2}%)",
                kw.keyword, kw.occurrences, kw.density
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\nContent Analysis Report\n\
         =======================\n\
         \n\
         Date: {date}\n\
         \n\
         OVERVIEW\n\
         --------\n\
         Word Count: {word_count}\n\
         SEO Score: {seo_score}/100\n\
         Readability Score: {readability:.1}/100 ({level})\n\
         Target Keyword: {keyword}\n\
         Keyword Density: {density:.2}%\n\
         Estimated Reading Time: {minutes} minute{plural}\n\
         \n\
         CONTENT STATISTICS\n\
         -----------------\n\
         Sentences: {sentences}\n\
         Average Sentence Length: {avg_sentence:.1} words\n\
         Paragraphs: {paragraphs}\n\
         Headings: {headings}\n\
         \n\
         TOP KEYWORDS\n\
         -----------\n\
         {top_keywords}\n\
         \n\
         ISSUES\n\
         ------\n\
         Critical Issues:\n\
         {critical}\n\
         \n\
         Warnings:\n\
         {warnings}\n\
         \n\
         Improvements:\n\
         {improvements}\n\
         \n\
         Passed Checks:\n\
         {passed}\n\
         \n\
         ANALYZED CONTENT\n\
         ---------------\n\
         {text}\n",
        date = date,
        word_count = analysis.word_count,
        seo_score = analysis.seo_score,
        readability = analysis.readability_score,
        level = analysis.readability_level,
        keyword = analysis.target_keyword.as_deref().unwrap_or("Not specified"),
        density = analysis.keyword_density,
        minutes = analysis.estimated_read_time,
        plural = if analysis.estimated_read_time != 1 {
            "s"
        } else {
            ""
        },
        sentences = analysis.sentence_count,
        avg_sentence = analysis.avg_sentence_length,
        paragraphs = analysis.paragraph_count,
        headings = analysis.heading_count,
        top_keywords = top_keywords,
        critical = issue_lines(&analysis.issues.critical),
        warnings = issue_lines(&analysis.issues.warnings),
        improvements = issue_lines(&analysis.issues.improvements),
        passed = issue_lines(&analysis.issues.passed),
        text = analysis.text,
    )
}

pub fn keywords_table(results: &[KeywordResult]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Keyword",
        "Volume",
        "Difficulty",
        "CPC ($)",
        "Trend",
    ]);
    for row in results {
        table.add_row(vec![
            row.keyword.clone(),
            row.volume.to_string(),
            format!("{} ({})", row.difficulty, row.difficulty_label()),
            format!("{:.2}", row.cpc),
            row.trend.to_string(),
        ]);
    }
    table
}

pub fn backlinks_table(profile: &BacklinkProfile) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "URL",
        "Domain",
        "Authority",
        "Anchor",
        "Type",
        "First Seen",
    ]);
    for link in &profile.backlinks {
        table.add_row(vec![
            link.url.clone(),
            link.domain.clone(),
            link.authority.to_string(),
            link.anchor.clone(),
            link.link_type.to_string(),
            link.first_seen.to_string(),
        ]);
    }
    table
}

/// 0-100 score with traffic-light coloring for terminal summaries.
pub fn colored_score(score: i64) -> String {
    let text = format!("{score}/100");
    if score >= 80 {
        text.green().to_string()
    } else if score >= 60 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

/// Strategy notes under the keyword table: average difficulty, the biggest
/// traffic opportunities, and the best volume-per-CPC pick for paid
/// campaigns.
pub fn keyword_insights(seed: &str, results: &[KeywordResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Keyword insights".bold());
    let _ = writeln!(
        out,
        "  The average difficulty for keywords related to \"{seed}\" is {}. \
         Consider targeting keywords with lower difficulty scores for quicker results.",
        average_difficulty(results)
    );
    if let [first, second, ..] = results {
        let _ = writeln!(
            out,
            "  The highest volume keywords are \"{}\" ({}) and \"{}\" ({}). \
             These represent your biggest traffic opportunities.",
            first.keyword, first.volume, second.keyword, second.volume
        );
    }
    if let Some(pick) = best_roi(results) {
        let _ = writeln!(
            out,
            "  For paid campaigns, consider keywords with high volume but lower CPC, \
             such as \"{}\" for the best ROI.",
            pick.keyword
        );
    }
    out
}

pub fn backlink_summary(profile: &BacklinkProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!("Backlink profile: {}", profile.domain).bold()
    );
    let _ = writeln!(out, "  Total backlinks:   {}", profile.total_backlinks);
    let _ = writeln!(
        out,
        "  Referring domains: {} (link-to-domain ratio {:.1})",
        profile.unique_domains,
        profile.link_to_domain_ratio()
    );
    let _ = writeln!(
        out,
        "  Dofollow:          {} ({}%)",
        profile.dofollow_links,
        profile.dofollow_percent()
    );
    let _ = writeln!(out, "  Nofollow:          {}", profile.nofollow_links);
    let _ = writeln!(
        out,
        "  Domain authority:  {} ({})",
        profile.domain_authority,
        profile.authority_label()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Top anchors".bold());
    for anchor in &profile.top_anchors {
        let _ = writeln!(out, "  {:>3}x  {}", anchor.count, anchor.text);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Top linking domains".bold());
    for domain in &profile.top_linking_domains {
        let _ = writeln!(
            out,
            "  {:>3} links  {} (authority {})",
            domain.links, domain.domain, domain.authority
        );
    }
    out
}

pub fn content_summary(analysis: &ContentAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Content analysis".bold());
    let _ = writeln!(
        out,
        "  SEO score:    {} ({})",
        colored_score(analysis.seo_score as i64),
        analysis.seo_label()
    );
    let _ = writeln!(
        out,
        "  Readability:  {:.1}/100 ({})",
        analysis.readability_score, analysis.readability_level
    );
    let _ = writeln!(
        out,
        "  Words: {}  Sentences: {}  Paragraphs: {}  Headings: {}",
        analysis.word_count,
        analysis.sentence_count,
        analysis.paragraph_count,
        analysis.heading_count
    );
    let _ = writeln!(out, "  Reading time: {} min", analysis.estimated_read_time);

    let buckets = [
        ("Critical", &analysis.issues.critical, "red"),
        ("Warnings", &analysis.issues.warnings, "yellow"),
        ("Improvements", &analysis.issues.improvements, "blue"),
        ("Passed", &analysis.issues.passed, "green"),
    ];
    for (label, issues, color) in buckets {
        if issues.is_empty() {
            continue;
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            format!("{label} ({})", issues.len()).color(color).bold()
        );
        for issue in issues.iter() {
            let _ = writeln!(out, "  - {}", issue.title);
            let _ = writeln!(out, "    {}", issue.description.dimmed());
        }
    }
    out
}

pub fn audit_summary(report: &AuditReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("Audit: {}", report.url).bold());
    let _ = writeln!(
        out,
        "  Overall:        {}",
        colored_score(report.scores.overall as i64)
    );
    let _ = writeln!(
        out,
        "  Performance:    {}",
        colored_score(report.scores.performance as i64)
    );
    let _ = writeln!(
        out,
        "  SEO:            {}",
        colored_score(report.scores.seo as i64)
    );
    let _ = writeln!(
        out,
        "  Accessibility:  {}",
        colored_score(report.scores.accessibility as i64)
    );
    let _ = writeln!(
        out,
        "  Best practices: {}",
        colored_score(report.scores.best_practices as i64)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Recommendations".bold());
    for rec in &report.recommendations {
        let _ = writeln!(out, "  [{}] {}", rec.priority, rec.title);
    }
    out
}

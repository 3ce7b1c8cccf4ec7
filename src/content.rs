// Content analysis: text statistics, readability estimation, and the SEO
// heuristic scorer
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::models::{Issue, IssueBuckets};

lazy_static! {
    static ref HEADING_RE: Regex = Regex::new(r"(?m)^#{1,6}\s+.+").unwrap();
    static ref SENTENCE_SPLIT_RE: Regex = Regex::new(r"[.!?]+").unwrap();
    static ref PARAGRAPH_SPLIT_RE: Regex = Regex::new(r"\n+").unwrap();
    static ref VOWEL_RUN_RE: Regex = Regex::new(r"[aeiouy]+").unwrap();
    static ref STOP_WORDS: HashSet<&'static str> = [
        "the", "and", "a", "an", "in", "on", "at", "to", "for", "of", "with", "by", "as", "is",
        "are", "was", "were", "be", "this", "that", "it", "from", "or", "but",
    ]
    .into_iter()
    .collect();
}

/// Words a reader covers per minute; drives the estimated reading time.
const READING_SPEED_WPM: usize = 225;

/// Starting point for the SEO score before the checks apply their deltas.
const BASE_SEO_SCORE: i32 = 70;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopKeyword {
    pub keyword: String,
    pub occurrences: usize,
    pub density: f64,
}

/// Full analysis of a piece of content against an optional target keyword.
///
/// The same `(text, target_keyword)` pair always produces the same result;
/// nothing here touches shared state.
#[derive(Debug, Clone, Serialize)]
pub struct ContentAnalysis {
    pub text: String,
    pub target_keyword: Option<String>,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub heading_count: usize,
    pub avg_sentence_length: f64,
    pub readability_score: f64,
    pub readability_level: &'static str,
    pub seo_score: i32,
    pub keyword_density: f64,
    pub keyword_occurrences: usize,
    pub estimated_read_time: usize,
    pub top_keywords: Vec<TopKeyword>,
    pub issues: IssueBuckets,
}

impl ContentAnalysis {
    pub fn seo_label(&self) -> &'static str {
        if self.seo_score >= 80 {
            "Good"
        } else if self.seo_score >= 60 {
            "Average"
        } else {
            "Poor"
        }
    }
}

pub fn readability_level(score: f64) -> &'static str {
    if score >= 90.0 {
        "Very Easy"
    } else if score >= 80.0 {
        "Easy"
    } else if score >= 70.0 {
        "Fairly Easy"
    } else if score >= 60.0 {
        "Standard"
    } else if score >= 50.0 {
        "Fairly Difficult"
    } else if score >= 30.0 {
        "Difficult"
    } else {
        "Very Difficult"
    }
}

/// Analyze `text` for readability and on-page SEO signals.
///
/// An empty `target_keyword` is treated the same as no keyword at all, which
/// mirrors how callers guard the input form.
pub fn analyze_content(text: &str, target_keyword: Option<&str>) -> ContentAnalysis {
    let keyword = target_keyword.map(str::trim).filter(|k| !k.is_empty());

    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();
    let sentence_count = SENTENCE_SPLIT_RE
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    let paragraphs: Vec<&str> = PARAGRAPH_SPLIT_RE
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .collect();
    let paragraph_count = paragraphs.len();
    let heading_count = HEADING_RE.find_iter(text).count();

    let avg_sentence_length = word_count as f64 / sentence_count.max(1) as f64;
    let estimated_read_time = word_count.div_ceil(READING_SPEED_WPM).max(1);

    let keyword_occurrences = keyword.map_or(0, |k| count_keyword(text, k));
    let keyword_density = if keyword.is_some() {
        keyword_occurrences as f64 / word_count.max(1) as f64 * 100.0
    } else {
        0.0
    };

    let syllable_count = estimate_syllables(text);
    let readability_score = (206.835
        - 1.015 * (word_count as f64 / sentence_count.max(1) as f64)
        - 84.6 * (syllable_count as f64 / word_count.max(1) as f64))
        .clamp(0.0, 100.0);

    let top_keywords = top_keywords(&words, word_count);

    let (seo_score, issues) = score_seo(ScoreInputs {
        word_count,
        keyword,
        keyword_density,
        first_paragraph: paragraphs.first().copied().unwrap_or(""),
        readability_score,
        avg_sentence_length,
        heading_count,
        paragraph_count,
    });

    debug!(
        word_count,
        seo_score, readability_score, "content analysis complete"
    );

    ContentAnalysis {
        text: text.to_string(),
        target_keyword: keyword.map(str::to_string),
        word_count,
        sentence_count,
        paragraph_count,
        heading_count,
        avg_sentence_length,
        readability_score,
        readability_level: readability_level(readability_score),
        seo_score,
        keyword_density,
        keyword_occurrences,
        estimated_read_time,
        top_keywords,
        issues,
    }
}

/// Case-insensitive, non-overlapping count of the literal keyword.
fn count_keyword(text: &str, keyword: &str) -> usize {
    match RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.find_iter(text).count(),
        Err(_) => 0,
    }
}

/// Most frequent meaningful words: lowercased, punctuation stripped, longer
/// than two characters, stop words excluded. Ties keep first-seen order.
fn top_keywords(words: &[&str], word_count: usize) -> Vec<TopKeyword> {
    let mut order: Vec<String> = Vec::new();
    let mut frequency: HashMap<String, usize> = HashMap::new();

    for word in words {
        let clean: String = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if clean.chars().count() > 2 && !STOP_WORDS.contains(clean.as_str()) {
            if !frequency.contains_key(&clean) {
                order.push(clean.clone());
            }
            *frequency.entry(clean).or_insert(0) += 1;
        }
    }

    let mut top: Vec<TopKeyword> = order
        .into_iter()
        .map(|keyword| {
            let occurrences = frequency[&keyword];
            TopKeyword {
                keyword,
                occurrences,
                density: occurrences as f64 / word_count.max(1) as f64 * 100.0,
            }
        })
        .collect();
    top.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    top.truncate(10);
    top
}

/// Sum of per-word syllable estimates across the text.
pub fn estimate_syllables(text: &str) -> usize {
    text.split_whitespace().map(syllables_in_word).sum()
}

fn syllables_in_word(word: &str) -> usize {
    let w: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    if w.is_empty() {
        return 0;
    }

    let mut count = VOWEL_RUN_RE.find_iter(&w).count() as i32;
    if w.ends_with('e') {
        count -= 1;
    }
    if w.ends_with("le") && w.len() > 2 {
        count += 1;
    }
    if w.ends_with("es") || w.ends_with("ed") {
        count -= 1;
    }
    count.max(1) as usize
}

struct ScoreInputs<'a> {
    word_count: usize,
    keyword: Option<&'a str>,
    keyword_density: f64,
    first_paragraph: &'a str,
    readability_score: f64,
    avg_sentence_length: f64,
    heading_count: usize,
    paragraph_count: usize,
}

/// Single pass of independent checks. The check order is fixed because it
/// determines the ordering of issues inside each bucket, which shows up in
/// exported reports.
fn score_seo(inputs: ScoreInputs<'_>) -> (i32, IssueBuckets) {
    let mut score = BASE_SEO_SCORE;
    let mut issues = IssueBuckets::default();

    // Word count
    if inputs.word_count < 300 {
        issues.critical.push(Issue::new(
            "Content is too short",
            "Content with fewer than 300 words is unlikely to rank well. \
             Aim for at least 600-800 words.",
        ));
        score -= 15;
    } else if inputs.word_count < 600 {
        issues.warnings.push(Issue::new(
            "Content could be longer",
            "Consider expanding your content to at least 600-800 words for \
             better ranking potential.",
        ));
        score -= 5;
    } else {
        issues.passed.push(Issue::new(
            "Good content length",
            format!(
                "Your content has {} words, which is a good length for SEO.",
                inputs.word_count
            ),
        ));
        score += 5;
    }

    // Keyword
    if let Some(keyword) = inputs.keyword {
        if inputs.keyword_density > 3.0 {
            issues.warnings.push(Issue::new(
                "Keyword density too high",
                format!(
                    "Your keyword density is {:.1}%, which may be considered \
                     keyword stuffing. Aim for 1-2% keyword density.",
                    inputs.keyword_density
                ),
            ));
            score -= 10;
        } else if inputs.keyword_density < 0.5 {
            issues.warnings.push(Issue::new(
                "Keyword density too low",
                format!(
                    "Your keyword density is {:.1}%, which is quite low. \
                     Consider using your target keyword more frequently.",
                    inputs.keyword_density
                ),
            ));
            score -= 5;
        } else {
            issues.passed.push(Issue::new(
                "Good keyword density",
                format!(
                    "Your keyword density is {:.1}%, which is optimal.",
                    inputs.keyword_density
                ),
            ));
            score += 5;
        }

        if !inputs
            .first_paragraph
            .to_lowercase()
            .contains(&keyword.to_lowercase())
        {
            issues.improvements.push(Issue::new(
                "Keyword missing from introduction",
                "Include your target keyword in the first paragraph to \
                 establish relevance early.",
            ));
            score -= 3;
        } else {
            issues.passed.push(Issue::new(
                "Keyword in introduction",
                "Your target keyword appears in the introduction, which is \
                 good for SEO.",
            ));
            score += 3;
        }
    } else {
        issues.warnings.push(Issue::new(
            "No target keyword specified",
            "Specify a target keyword to get more accurate SEO recommendations.",
        ));
        score -= 5;
    }

    // Readability
    if inputs.readability_score < 50.0 {
        issues.warnings.push(Issue::new(
            "Content is difficult to read",
            "Your content may be too complex for the average reader. Consider \
             simplifying your language and shortening sentences.",
        ));
        score -= 5;
    } else {
        issues.passed.push(Issue::new(
            "Good readability",
            format!(
                "Your content has a readability score of {}, making it \
                 accessible to most readers.",
                inputs.readability_score.round() as i64
            ),
        ));
        score += 5;
    }

    // Sentence length
    if inputs.avg_sentence_length > 25.0 {
        issues.improvements.push(Issue::new(
            "Sentences are too long",
            format!(
                "Your average sentence length is {:.1} words. Consider \
                 breaking up longer sentences for better readability.",
                inputs.avg_sentence_length
            ),
        ));
        score -= 3;
    } else {
        issues.passed.push(Issue::new(
            "Good sentence length",
            format!(
                "Your average sentence length is {:.1} words, which is good \
                 for readability.",
                inputs.avg_sentence_length
            ),
        ));
        score += 3;
    }

    // Headings
    if inputs.heading_count == 0 {
        issues.critical.push(Issue::new(
            "No headings found",
            "Using headings (H1, H2, H3, etc.) helps structure your content \
             and improves SEO.",
        ));
        score -= 10;
    } else if inputs.word_count > 300 && inputs.heading_count < 2 {
        issues.warnings.push(Issue::new(
            "Not enough headings",
            "For content of this length, consider using more headings to \
             break up your text.",
        ));
        score -= 5;
    } else {
        issues.passed.push(Issue::new(
            "Good use of headings",
            format!(
                "Your content has {} headings, which helps structure your content.",
                inputs.heading_count
            ),
        ));
        score += 5;
    }

    // Paragraph length
    if inputs.paragraph_count > 0 {
        let avg_paragraph_length = inputs.word_count as f64 / inputs.paragraph_count as f64;
        if avg_paragraph_length > 100.0 {
            issues.improvements.push(Issue::new(
                "Paragraphs are too long",
                format!(
                    "Your average paragraph is {:.0} words. Consider breaking \
                     up longer paragraphs for better readability.",
                    avg_paragraph_length
                ),
            ));
            score -= 3;
        } else {
            issues.passed.push(Issue::new(
                "Good paragraph length",
                format!(
                    "Your average paragraph is {:.0} words, which is good for \
                     readability.",
                    avg_paragraph_length
                ),
            ));
            score += 3;
        }
    }

    (score.clamp(0, 100), issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["alpha"; n].join(" ")
    }

    #[test]
    fn repeated_letter_text_pins_expected_analysis() {
        let text = "a".repeat(50);
        let result = analyze_content(&text, None);

        assert_eq!(result.word_count, 1);
        assert_eq!(result.sentence_count, 1);
        assert_eq!(result.heading_count, 0);
        assert_eq!(result.seo_score, 51);
        assert!(result
            .issues
            .critical
            .iter()
            .any(|i| i.title == "Content is too short"));
        assert!(result
            .issues
            .critical
            .iter()
            .any(|i| i.title == "No headings found"));
    }

    #[test]
    fn word_count_boundary_at_300() {
        let short = analyze_content(&words(299), None);
        assert!(short
            .issues
            .critical
            .iter()
            .any(|i| i.title == "Content is too short"));

        let ok = analyze_content(&words(300), None);
        assert!(!ok
            .issues
            .critical
            .iter()
            .any(|i| i.title == "Content is too short"));
        assert!(ok
            .issues
            .warnings
            .iter()
            .any(|i| i.title == "Content could be longer"));
    }

    #[test]
    fn keyword_density_boundary_is_strict() {
        // 3 keyword hits in exactly 100 words: density is 3.00%, which must
        // NOT trigger the too-high warning.
        let text = format!("zebra zebra zebra {}", words(97));
        let exact = analyze_content(&text, Some("zebra"));
        assert!((exact.keyword_density - 3.0).abs() < 1e-9);
        assert!(!exact
            .issues
            .warnings
            .iter()
            .any(|i| i.title == "Keyword density too high"));

        // 4 hits in 100 words crosses the line.
        let text = format!("zebra zebra zebra zebra {}", words(96));
        let high = analyze_content(&text, Some("zebra"));
        assert!(high.keyword_density > 3.0);
        assert!(high
            .issues
            .warnings
            .iter()
            .any(|i| i.title == "Keyword density too high"));
    }

    #[test]
    fn scores_stay_clamped() {
        for text in [
            String::new(),
            "word".to_string(),
            words(50),
            words(1000),
            format!("# Title\n\n{}\n\n## More\n\n{}", words(400), words(400)),
        ] {
            let result = analyze_content(&text, Some("alpha"));
            assert!((0..=100).contains(&result.seo_score), "seo {result:?}");
            assert!(
                (0.0..=100.0).contains(&result.readability_score),
                "readability {result:?}"
            );
        }
    }

    #[test]
    fn headings_are_counted_per_line() {
        let text = "# One\n\nbody text here\n\n## Two\n\n### Three deep";
        let result = analyze_content(text, None);
        assert_eq!(result.heading_count, 3);
    }

    #[test]
    fn keyword_in_first_paragraph_is_detected() {
        let text = format!("Zebra care basics.\n\n{}", words(40));
        let result = analyze_content(&text, Some("zebra"));
        assert!(result
            .issues
            .passed
            .iter()
            .any(|i| i.title == "Keyword in introduction"));

        let text = format!("Intro without it.\n\nzebra appears later {}", words(40));
        let result = analyze_content(&text, Some("zebra"));
        assert!(result
            .issues
            .improvements
            .iter()
            .any(|i| i.title == "Keyword missing from introduction"));
    }

    #[test]
    fn top_keywords_exclude_stop_words_and_short_words() {
        let text = "the the the rust rust analysis analysis analysis is of to ab cd";
        let result = analyze_content(text, None);
        let names: Vec<&str> = result
            .top_keywords
            .iter()
            .map(|k| k.keyword.as_str())
            .collect();
        assert_eq!(names, vec!["analysis", "rust"]);
        assert_eq!(result.top_keywords[0].occurrences, 3);
    }

    #[test]
    fn syllable_estimation_matches_reference_rules() {
        // "hello": runs e,o -> 2; no trailing adjustments.
        assert_eq!(estimate_syllables("hello"), 2);
        // "table": runs a,e -> 2; trailing e -> 1; trailing le (len>2) -> 2.
        assert_eq!(estimate_syllables("table"), 2);
        // "jumped": runs u,e -> 2; trailing ed -> 1.
        assert_eq!(estimate_syllables("jumped"), 1);
        // "strengths": single run e -> 1.
        assert_eq!(estimate_syllables("strengths"), 1);
        // floor at one syllable per word.
        assert_eq!(estimate_syllables("tree"), 1);
    }

    #[test]
    fn reading_time_has_a_floor_of_one_minute() {
        assert_eq!(analyze_content("short", None).estimated_read_time, 1);
        assert_eq!(analyze_content(&words(450), None).estimated_read_time, 2);
    }

    #[test]
    fn analysis_is_pure() {
        let text = format!("# Guide\n\n{}", words(350));
        let a = analyze_content(&text, Some("alpha"));
        let b = analyze_content(&text, Some("alpha"));
        assert_eq!(a.seo_score, b.seo_score);
        assert_eq!(a.issues.total(), b.issues.total());
    }

    #[test]
    fn readability_levels_map_thresholds() {
        assert_eq!(readability_level(95.0), "Very Easy");
        assert_eq!(readability_level(80.0), "Easy");
        assert_eq!(readability_level(70.0), "Fairly Easy");
        assert_eq!(readability_level(60.0), "Standard");
        assert_eq!(readability_level(50.0), "Fairly Difficult");
        assert_eq!(readability_level(30.0), "Difficult");
        assert_eq!(readability_level(10.0), "Very Difficult");
    }
}

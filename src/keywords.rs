// Keyword research: deterministic variation expansion from a seed keyword
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::hash::seed_hash;
use crate::models::{round2, InputError, Trend};

/// The fixed variation list every seed is expanded with. Order matters: it is
/// the tie-break order when two variations hash to the same volume.
const VARIATIONS: [&str; 12] = [
    "",
    " tool",
    " software",
    " service",
    " best",
    " free",
    " online",
    " how to",
    " tips",
    " guide",
    " vs",
    " alternative",
];

/// One researched keyword variation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keyword: String,
    pub volume: u32,
    pub difficulty: u32,
    pub cpc: f64,
    pub trend: Trend,
}

impl KeywordResult {
    pub fn difficulty_label(&self) -> &'static str {
        if self.difficulty < 30 {
            "Easy"
        } else if self.difficulty < 60 {
            "Medium"
        } else {
            "Hard"
        }
    }
}

/// Expand a seed keyword into its 12 variations with volume, difficulty, CPC
/// and trend, sorted descending by volume.
///
/// All fields are pure functions of the variation's hash, so the same seed
/// always produces the same result set.
pub fn generate_keyword_data(seed: &str) -> Result<Vec<KeywordResult>, InputError> {
    if seed.trim().is_empty() {
        return Err(InputError::EmptyKeyword);
    }

    let mut results: Vec<KeywordResult> = VARIATIONS
        .iter()
        .map(|variation| {
            let keyword = format!("{seed}{variation}");
            let h = seed_hash(&keyword);
            KeywordResult {
                volume: 100 + h % 9900,
                difficulty: 10 + h % 90,
                cpc: round2(0.5 + (h % 100) as f64 / 20.0),
                trend: match h % 3 {
                    0 => Trend::Up,
                    1 => Trend::Down,
                    _ => Trend::Stable,
                },
                keyword,
            }
        })
        .collect();

    // Stable sort keeps the variation order for equal volumes.
    results.sort_by(|a, b| b.volume.cmp(&a.volume));
    debug!(seed, count = results.len(), "generated keyword variations");
    Ok(results)
}

/// Average difficulty across a result set, rounded to the nearest integer.
/// Used by the insights section of the report.
pub fn average_difficulty(results: &[KeywordResult]) -> u32 {
    if results.is_empty() {
        return 0;
    }
    let sum: u32 = results.iter().map(|r| r.difficulty).sum();
    ((sum as f64) / results.len() as f64).round() as u32
}

/// The variation with the best volume-per-CPC ratio, for paid-campaign hints.
pub fn best_roi<'a>(results: &'a [KeywordResult]) -> Option<&'a KeywordResult> {
    results.iter().max_by(|a, b| {
        (a.volume as f64 / a.cpc)
            .partial_cmp(&(b.volume as f64 / b.cpc))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_seed_is_rejected() {
        assert_eq!(generate_keyword_data(""), Err(InputError::EmptyKeyword));
        assert_eq!(generate_keyword_data("   "), Err(InputError::EmptyKeyword));
    }

    #[test]
    fn seo_seed_pins_exact_values() {
        let results = generate_keyword_data("seo").unwrap();
        assert_eq!(results.len(), 12);

        // Highest-volume variation for "seo" is "seo vs".
        assert_eq!(results[0].keyword, "seo vs");
        assert_eq!(results[0].volume, 9484);
        assert_eq!(results[0].difficulty, 34);
        assert_eq!(results[0].cpc, 4.7);
        assert_eq!(results[0].trend, Trend::Up);

        // The bare seed itself lands mid-table.
        let bare = results.iter().find(|r| r.keyword == "seo").unwrap();
        assert_eq!(bare.volume, 4957);
        assert_eq!(bare.difficulty, 97);
        assert_eq!(bare.cpc, 3.35);
        assert_eq!(bare.trend, Trend::Up);
    }

    #[test]
    fn sorted_descending_with_fields_in_range() {
        let results = generate_keyword_data("seo").unwrap();
        for pair in results.windows(2) {
            assert!(pair[0].volume >= pair[1].volume);
        }
        for r in &results {
            assert!((100..=9999).contains(&r.volume));
            assert!((10..=99).contains(&r.difficulty));
            assert!(r.cpc >= 0.5 && r.cpc <= 5.5);
        }
    }

    #[test]
    fn idempotent_for_same_seed() {
        let a = generate_keyword_data("rust web framework").unwrap();
        let b = generate_keyword_data("rust web framework").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn insights_helpers() {
        let results = generate_keyword_data("seo").unwrap();
        let avg = average_difficulty(&results);
        assert!((10..=99).contains(&avg));
        assert!(best_roi(&results).is_some());
        assert_eq!(average_difficulty(&[]), 0);
    }
}

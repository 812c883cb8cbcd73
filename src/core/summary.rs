// summary.rs - Per-sample match summaries built from ranked comparison tables

use crate::core::comparison::{ComparisonRow, SampleComparison, ScoringConfig};
use crate::data::StrProfile;

/// Condensed view of one sample's ranked comparison table
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSummary<'a> {
    pub sample_id: &'a str,
    pub mixed: bool,
    /// Best partner by Tanabe score, `None` when the cohort has a single sample
    pub top_hit: Option<String>,
    /// Second-best partner, `None` with fewer than three samples
    pub next_best: Option<String>,
    pub tanabe_matches: String,
    pub masters_query_matches: String,
    pub masters_ref_matches: String,
    pub profile: &'a StrProfile,
}

/// Round to 2 decimals, exact halves to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Render a float the way Python's `repr` does for typical score values
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// `"Name: score"` with the score rounded to 2 decimals
pub fn format_hit(sample_id: &str, score: f64) -> String {
    format!("{}: {}", sample_id, format_float(round2(score)))
}

/// Non-self rows meeting `threshold` on one metric, in ranked order, joined by "; "
fn threshold_matches<F>(hits: &[ComparisonRow<'_>], threshold: f64, metric: F) -> String
where
    F: Fn(&ComparisonRow<'_>) -> f64,
{
    hits.iter()
        .filter(|row| metric(row) >= threshold)
        .map(|row| format_hit(row.sample_id(), metric(row)))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Reduce one ranked table to a `SampleSummary`
pub fn make_summary<'a>(
    comparison: &SampleComparison<'a>,
    config: &ScoringConfig,
) -> SampleSummary<'a> {
    let hits = comparison.hits();
    let ranked_hit = |rank: usize| {
        hits.get(rank)
            .map(|row| format_hit(row.sample_id(), row.tanabe_score()))
    };

    SampleSummary {
        sample_id: comparison.query.sample_id.as_str(),
        mixed: comparison.mixed,
        top_hit: ranked_hit(0),
        next_best: ranked_hit(1),
        tanabe_matches: threshold_matches(hits, config.tan_threshold, |r| r.tanabe_score()),
        masters_query_matches: threshold_matches(hits, config.mas_q_threshold, |r| {
            r.masters_query_score()
        }),
        masters_ref_matches: threshold_matches(hits, config.mas_r_threshold, |r| {
            r.masters_ref_score()
        }),
        profile: comparison.query,
    }
}

/// Summaries in the same order as `comparisons`
pub fn summarize_cohort<'a>(
    comparisons: &[SampleComparison<'a>],
    config: &ScoringConfig,
) -> Vec<SampleSummary<'a>> {
    comparisons
        .iter()
        .map(|comparison| make_summary(comparison, config))
        .collect()
}

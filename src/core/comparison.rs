// comparison.rs - All-pairs comparison engine producing ranked per-sample tables

use crate::core::mixing::mixing_check;
use crate::core::scoring::{score_query, ScoreResult};
use crate::data::{Cohort, StrProfile};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Instant;

pub const DEFAULT_SCORE_THRESHOLD: f64 = 80.0;
pub const DEFAULT_MIX_THRESHOLD: usize = 3;
pub const DEFAULT_AMEL_COL: &str = "AMEL";

/// Scoring and match-reporting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub tan_threshold: f64,
    pub mas_q_threshold: f64,
    pub mas_r_threshold: f64,
    /// Markers with >2 alleles tolerated before a sample is flagged as mixed
    pub mix_threshold: usize,
    pub use_amel: bool,
    pub amel_col: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tan_threshold: DEFAULT_SCORE_THRESHOLD,
            mas_q_threshold: DEFAULT_SCORE_THRESHOLD,
            mas_r_threshold: DEFAULT_SCORE_THRESHOLD,
            mix_threshold: DEFAULT_MIX_THRESHOLD,
            use_amel: false,
            amel_col: DEFAULT_AMEL_COL.to_string(),
        }
    }
}

/// One row of a ranked comparison table
#[derive(Debug, Clone)]
pub struct ComparisonRow<'a> {
    pub profile: &'a StrProfile,
    pub query_sample: bool,
    /// Only set on the query's own row
    pub mixed: Option<bool>,
    /// `None` on the query's own row
    pub score: Option<ScoreResult>,
}

impl<'a> ComparisonRow<'a> {
    pub fn sample_id(&self) -> &'a str {
        &self.profile.sample_id
    }

    pub fn tanabe_score(&self) -> f64 {
        self.score.map_or(f64::NAN, |s| s.tanabe_score)
    }

    pub fn masters_query_score(&self) -> f64 {
        self.score.map_or(f64::NAN, |s| s.masters_query_score)
    }

    pub fn masters_ref_score(&self) -> f64 {
        self.score.map_or(f64::NAN, |s| s.masters_ref_score)
    }
}

/// Ranked comparison table of one query sample against the rest of the cohort
#[derive(Debug, Clone)]
pub struct SampleComparison<'a> {
    pub query: &'a StrProfile,
    pub mixed: bool,
    /// Row 0 is the query itself, then partners by descending Tanabe score
    pub rows: Vec<ComparisonRow<'a>>,
}

impl<'a> SampleComparison<'a> {
    pub fn self_row(&self) -> &ComparisonRow<'a> {
        &self.rows[0]
    }

    /// Partner rows in ranked order
    pub fn hits(&self) -> &[ComparisonRow<'a>] {
        &self.rows[1..]
    }
}

/// Descending order with NaN first; NaNs compare equal to each other
fn descending_nan_first(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Stable sort of partner rows by Tanabe score
pub fn rank_by_tanabe(rows: &mut [ComparisonRow<'_>]) {
    rows.sort_by(|a, b| descending_nan_first(a.tanabe_score(), b.tanabe_score()));
}

/// Compare the sample at `index` against every other sample in the cohort
pub fn compare_sample<'a>(
    cohort: &'a Cohort,
    index: usize,
    config: &ScoringConfig,
) -> SampleComparison<'a> {
    let query = &cohort.samples[index];
    let mixed = mixing_check(query, config.mix_threshold);

    let mut hits: Vec<ComparisonRow<'a>> = cohort
        .samples
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .map(|(_, reference)| ComparisonRow {
            profile: reference,
            query_sample: false,
            mixed: None,
            score: Some(score_query(
                query,
                reference,
                config.use_amel,
                &config.amel_col,
            )),
        })
        .collect();
    rank_by_tanabe(&mut hits);

    let mut rows = Vec::with_capacity(hits.len() + 1);
    rows.push(ComparisonRow {
        profile: query,
        query_sample: true,
        mixed: Some(mixed),
        score: None,
    });
    rows.extend(hits);

    SampleComparison { query, mixed, rows }
}

/// Compare every sample against the cohort
pub fn compare_cohort<'a>(cohort: &'a Cohort, config: &ScoringConfig) -> Vec<SampleComparison<'a>> {
    compare_cohort_with_progress(cohort, config, &ProgressBar::hidden())
}

/// Parallel all-pairs comparison; results come back in cohort order
pub fn compare_cohort_with_progress<'a>(
    cohort: &'a Cohort,
    config: &ScoringConfig,
    pb: &ProgressBar,
) -> Vec<SampleComparison<'a>> {
    let n_samples = cohort.len();
    let start = Instant::now();

    pb.set_length(n_samples as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} samples ({percent}%) ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let comparisons: Vec<_> = (0..n_samples)
        .into_par_iter()
        .map(|i| {
            let comparison = compare_sample(cohort, i, config);
            pb.inc(1);
            comparison
        })
        .collect();

    pb.finish_with_message("✅ Comparisons completed");
    if !pb.is_hidden() {
        println!(
            "✅ {} × {} comparisons in {:.2}s",
            n_samples,
            n_samples.saturating_sub(1),
            start.elapsed().as_secs_f64()
        );
    }

    comparisons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cohort(samples: Vec<StrProfile>) -> Cohort {
        let mut marker_names: Vec<String> = Vec::new();
        for sample in &samples {
            for marker in sample.markers.keys() {
                if !marker_names.contains(marker) {
                    marker_names.push(marker.clone());
                }
            }
        }
        Cohort {
            samples,
            marker_names,
        }
    }

    fn abc() -> Cohort {
        cohort(vec![
            StrProfile::new("A").with_marker("M1", "9,10"),
            StrProfile::new("B").with_marker("M1", "9,10"),
            StrProfile::new("C").with_marker("M1", "11,12"),
        ])
    }

    #[test]
    fn test_self_row_first_then_ranked() {
        let cohort = abc();
        let comparison = compare_sample(&cohort, 0, &ScoringConfig::default());

        assert_eq!(comparison.rows.len(), 3);
        let own = comparison.self_row();
        assert!(own.query_sample);
        assert_eq!(own.sample_id(), "A");
        assert_eq!(own.mixed, Some(false));
        assert!(own.tanabe_score().is_nan());

        let hits: Vec<_> = comparison.hits().iter().map(|r| r.sample_id()).collect();
        assert_eq!(hits, vec!["B", "C"]);
        assert_eq!(comparison.hits()[0].tanabe_score(), 100.0);
        assert_eq!(comparison.hits()[1].tanabe_score(), 0.0);
        assert!(comparison.hits().iter().all(|r| r.mixed.is_none() && !r.query_sample));
    }

    #[test]
    fn test_nan_scores_rank_first_and_ties_stay_stable() {
        let cohort = cohort(vec![
            StrProfile::new("Q").with_marker("M1", "9,10").with_marker("M2", "7"),
            StrProfile::new("low").with_marker("M1", "11"),
            StrProfile::new("tie1").with_marker("M1", "9"),
            StrProfile::new("blank").with_marker("M1", ""),
            StrProfile::new("tie2").with_marker("M1", "10"),
            StrProfile::new("top").with_marker("M1", "9,10"),
        ]);
        let comparison = compare_sample(&cohort, 0, &ScoringConfig::default());

        let order: Vec<_> = comparison.rows.iter().map(|r| r.sample_id()).collect();
        assert_eq!(order, vec!["Q", "blank", "top", "tie1", "tie2", "low"]);
    }

    #[test]
    fn test_mixing_flag_uses_threshold() {
        let cohort = cohort(vec![
            StrProfile::new("mix")
                .with_marker("M1", "8,9,10")
                .with_marker("M2", "8,9,10"),
            StrProfile::new("ref").with_marker("M1", "8,9"),
        ]);
        let strict = ScoringConfig {
            mix_threshold: 1,
            ..ScoringConfig::default()
        };
        assert!(compare_sample(&cohort, 0, &strict).mixed);
        assert!(!compare_sample(&cohort, 0, &ScoringConfig::default()).mixed);
    }

    #[test]
    fn test_compare_cohort_keeps_cohort_order() {
        let cohort = abc();
        let comparisons = compare_cohort(&cohort, &ScoringConfig::default());
        let queries: Vec<_> = comparisons.iter().map(|c| c.query.sample_id.as_str()).collect();
        assert_eq!(queries, vec!["A", "B", "C"]);

        // C matches nobody, both zeros keep enumeration order
        let c_hits: Vec<_> = comparisons[2].hits().iter().map(|r| r.sample_id()).collect();
        assert_eq!(c_hits, vec!["A", "B"]);
    }

    #[test]
    fn test_single_sample_has_only_self_row() {
        let cohort = cohort(vec![StrProfile::new("solo").with_marker("M1", "9")]);
        let comparisons = compare_cohort(&cohort, &ScoringConfig::default());
        assert_eq!(comparisons.len(), 1);
        assert_eq!(comparisons[0].rows.len(), 1);
        assert!(comparisons[0].hits().is_empty());
    }
}

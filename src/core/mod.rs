// mod.rs - Core logic module

pub mod comparison;
pub mod mixing;
pub mod scoring;
pub mod summary;

// Re-export main types for convenience
pub use comparison::{
    compare_cohort, compare_cohort_with_progress, compare_sample, rank_by_tanabe, ComparisonRow,
    SampleComparison, ScoringConfig,
};
pub use mixing::{count_multi_allele_markers, mixing_check};
pub use scoring::{score_query, ScoreResult};
pub use summary::{format_float, format_hit, make_summary, summarize_cohort, SampleSummary};

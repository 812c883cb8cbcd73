// lib.rs - strprofiler library root

//! # strprofiler - STR profile comparison for cell-line authentication
//!
//! Loads short tandem repeat (STR) profiles from heterogeneous tables, folds
//! them into one canonical cohort and compares every sample against every
//! other one with the Tanabe and Masters similarity scores.
//!
//! ## Features
//!
//! - **Layout detection**: wide (one row per sample and marker, `Allele N`
//!   columns) and long (one row per sample) tables, mixed in one run
//! - **Canonical alleles**: trimmed, de-duplicated labels with `.0` artifacts removed
//! - **PentaD/PentaE folding**: alias spellings coalesced to one marker name
//! - **Mixing check**: flags samples with too many markers carrying >2 alleles
//! - **Parallel comparison**: all-pairs scoring on the rayon thread pool
//! - **Tabular output**: one ranked CSV per sample plus a cohort summary
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use strprofiler::prelude::*;
//!
//! let table = load_table(std::path::Path::new("profiles.csv"))?;
//! let cohort = canonicalize(&[table], &IngestConfig::default(), None)?;
//!
//! let config = ScoringConfig::default();
//! let comparisons = compare_cohort(&cohort, &config);
//! for summary in summarize_cohort(&comparisons, &config) {
//!     println!("{}: {:?}", summary.sample_id, summary.top_hit);
//! }
//! # Ok::<(), strprofiler::ProfilerError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{compare_cohort, make_summary, score_query, summarize_cohort};
    pub use crate::core::{ScoreResult, ScoringConfig, SampleComparison, SampleSummary};
    pub use crate::data::{canonicalize, load_table, IngestConfig, SampleMap};
    pub use crate::data::{AlleleSet, Cohort, RawTable, StrProfile};
    pub use crate::error::{ProfilerError, Result};
    pub use crate::output::{write_reports, RunLog};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{ScoreResult, ScoringConfig};
pub use data::{AlleleSet, Cohort, StrProfile};
pub use error::{ProfilerError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// mod.rs - Data structures module

pub mod canonical;
pub mod loaders;
pub mod profile;
pub mod table;

// Re-export main types for convenience
pub use canonical::{canonicalize, IngestConfig, TableLayout};
pub use loaders::{load_table, SampleMap};
pub use profile::{AlleleSet, Cohort, CohortStatistics, StrProfile};
pub use table::{RawRow, RawTable};

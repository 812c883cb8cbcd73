// scoring.rs - Tanabe and Masters similarity between two STR profiles

use crate::data::StrProfile;

/// Scores for one (query, reference) pair; recomputed per pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub n_shared_markers: usize,
    pub n_shared_alleles: usize,
    pub n_query_alleles: usize,
    pub n_reference_alleles: usize,
    pub tanabe_score: f64,
    pub masters_query_score: f64,
    pub masters_ref_score: f64,
}

/// `100 * numerator / denominator`, NaN when the denominator is zero
fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        f64::NAN
    } else {
        100.0 * numerator as f64 / denominator as f64
    }
}

/// Score `query` against `reference`.
///
/// Only markers called (non-empty) in both profiles are compared. The sex
/// marker `amel_col` is left out unless `use_amel` is set. When the shared
/// markers carry no alleles every score is NaN.
pub fn score_query(
    query: &StrProfile,
    reference: &StrProfile,
    use_amel: bool,
    amel_col: &str,
) -> ScoreResult {
    let mut n_shared_markers = 0;
    let mut n_shared_alleles = 0;
    let mut n_query_alleles = 0;
    let mut n_reference_alleles = 0;

    for (marker, query_alleles) in query.called_markers() {
        if !use_amel && marker == amel_col {
            continue;
        }
        let reference_alleles = match reference.alleles(marker) {
            Some(alleles) if !alleles.is_empty() => alleles,
            _ => continue,
        };

        n_shared_markers += 1;
        n_reference_alleles += reference_alleles.len();
        n_query_alleles += query_alleles.len();
        n_shared_alleles += reference_alleles.shared_count(query_alleles);
    }

    ScoreResult {
        n_shared_markers,
        n_shared_alleles,
        n_query_alleles,
        n_reference_alleles,
        tanabe_score: percentage(2 * n_shared_alleles, n_query_alleles + n_reference_alleles),
        masters_query_score: percentage(n_shared_alleles, n_query_alleles),
        masters_ref_score: percentage(n_shared_alleles, n_reference_alleles),
    }
}

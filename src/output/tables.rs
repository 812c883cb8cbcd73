// tables.rs - Row layout and cell formatting of the exported tables

use crate::core::{format_float, ComparisonRow, SampleComparison, SampleSummary};
use crate::data::StrProfile;

/// Leading columns of a per-sample ranked table
pub const RANKED_COLUMNS: &[&str] = &[
    "Sample",
    "mixed",
    "query_sample",
    "n_shared_markers",
    "n_shared_alleles",
    "n_query_alleles",
    "n_reference_alleles",
    "tanabe_score",
    "masters_query_score",
    "masters_ref_score",
];

/// Leading columns of the cohort summary
pub const SUMMARY_COLUMNS: &[&str] = &[
    "Sample",
    "mixed",
    "top_hit",
    "next_best",
    "tanabe_matches",
    "masters_query_matches",
    "masters_ref_matches",
];

pub fn bool_cell(value: bool) -> String {
    let label = if value { "True" } else { "False" };
    label.to_string()
}

/// Scores keep full precision; NaN is written as an empty cell
pub fn score_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format_float(value)
    }
}

fn header(leading: &[&str], marker_names: &[String]) -> Vec<String> {
    leading
        .iter()
        .map(|c| c.to_string())
        .chain(marker_names.iter().cloned())
        .collect()
}

pub fn ranked_header(marker_names: &[String]) -> Vec<String> {
    header(RANKED_COLUMNS, marker_names)
}

pub fn summary_header(marker_names: &[String]) -> Vec<String> {
    header(SUMMARY_COLUMNS, marker_names)
}

fn push_alleles(record: &mut Vec<String>, profile: &StrProfile, marker_names: &[String]) {
    for marker in marker_names {
        record.push(
            profile
                .alleles(marker)
                .map(|alleles| alleles.to_string())
                .unwrap_or_default(),
        );
    }
}

pub fn ranked_record(row: &ComparisonRow<'_>, marker_names: &[String]) -> Vec<String> {
    let mut record = Vec::with_capacity(RANKED_COLUMNS.len() + marker_names.len());
    record.push(row.sample_id().to_string());
    record.push(row.mixed.map(bool_cell).unwrap_or_default());
    record.push(bool_cell(row.query_sample));

    match &row.score {
        Some(score) => {
            record.push(score.n_shared_markers.to_string());
            record.push(score.n_shared_alleles.to_string());
            record.push(score.n_query_alleles.to_string());
            record.push(score.n_reference_alleles.to_string());
        }
        None => record.extend(std::iter::repeat(String::new()).take(4)),
    }
    record.push(score_cell(row.tanabe_score()));
    record.push(score_cell(row.masters_query_score()));
    record.push(score_cell(row.masters_ref_score()));

    push_alleles(&mut record, row.profile, marker_names);
    record
}

/// All records of one ranked table, self row first
pub fn ranked_records(comparison: &SampleComparison<'_>, marker_names: &[String]) -> Vec<Vec<String>> {
    comparison
        .rows
        .iter()
        .map(|row| ranked_record(row, marker_names))
        .collect()
}

pub fn summary_record(summary: &SampleSummary<'_>, marker_names: &[String]) -> Vec<String> {
    let mut record = vec![
        summary.sample_id.to_string(),
        bool_cell(summary.mixed),
        summary.top_hit.clone().unwrap_or_default(),
        summary.next_best.clone().unwrap_or_default(),
        summary.tanabe_matches.clone(),
        summary.masters_query_matches.clone(),
        summary.masters_ref_matches.clone(),
    ];
    push_alleles(&mut record, summary.profile, marker_names);
    record
}

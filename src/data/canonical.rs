// canonical.rs - Fold raw wide/long tables into a canonical cohort

use crate::data::loaders::SampleMap;
use crate::data::profile::{AlleleSet, Cohort, StrProfile};
use crate::data::table::RawTable;
use crate::error::{ProfilerError, Result};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Canonical Penta marker names and the spellings folded into them
const PENTA_ALIASES: &[(&str, &[&str])] = &[
    ("PentaD", &["Penta D", "Penta_D", "Penta-D"]),
    ("PentaE", &["Penta E", "Penta_E", "Penta-E"]),
];

/// Column substring that marks a wide (one row per sample × marker) table
const ALLELE_COLUMN_TAG: &str = "Allele";

/// Ingestion settings
#[derive(Debug, Clone, PartialEq)]
pub struct IngestConfig {
    pub sample_col: String,
    /// Only consulted for wide tables
    pub marker_col: String,
    pub penta_fix: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            sample_col: "Sample".to_string(),
            marker_col: "Marker".to_string(),
            penta_fix: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    /// Several "Allele N" columns, one row per sample × marker
    Wide,
    /// One row per sample, one column per marker
    Long,
}

impl TableLayout {
    pub fn detect(table: &RawTable) -> Self {
        if table.columns.iter().any(|c| c.contains(ALLELE_COLUMN_TAG)) {
            TableLayout::Wide
        } else {
            TableLayout::Long
        }
    }
}

/// Record under construction: markers in first-seen order
#[derive(Debug)]
struct PendingRecord {
    sample_id: String,
    markers: Vec<(String, AlleleSet)>,
}

impl PendingRecord {
    fn marker_mut(&mut self, marker: &str) -> &mut AlleleSet {
        let pos = match self.markers.iter().position(|(name, _)| name == marker) {
            Some(pos) => pos,
            None => {
                self.markers.push((marker.to_string(), AlleleSet::new()));
                self.markers.len() - 1
            }
        };
        &mut self.markers[pos].1
    }
}

/// Rename Penta alias keys to their canonical name.
///
/// An existing canonical key wins and the aliases are dropped. Otherwise the
/// first alias present (in `PENTA_ALIASES` order) is renamed in place.
pub fn normalize_penta(markers: &mut Vec<(String, AlleleSet)>) {
    for &(canonical, aliases) in PENTA_ALIASES {
        let mut resolved = markers.iter().any(|(name, _)| name == canonical);
        for alias in aliases.iter() {
            if let Some(pos) = markers.iter().position(|(name, _)| name == alias) {
                if resolved {
                    markers.remove(pos);
                } else {
                    markers[pos].0 = canonical.to_string();
                    resolved = true;
                }
            }
        }
    }
}

fn fold_wide(table: &RawTable, config: &IngestConfig) -> Result<Vec<PendingRecord>> {
    let sample_idx = table.require_column(&config.sample_col)?;
    let marker_idx = table.require_column(&config.marker_col)?;
    let allele_idx: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, name)| name.contains(ALLELE_COLUMN_TAG))
        .map(|(i, _)| i)
        .collect();

    // Sorted by sample name, as a group-by over the sample column yields them
    let mut groups: BTreeMap<String, PendingRecord> = BTreeMap::new();

    for row in &table.rows {
        let sample_id = row.cells[sample_idx].as_deref().ok_or_else(|| {
            ProfilerError::format(
                &table.source_name,
                format!("line {}: missing value in sample column '{}'", row.line, config.sample_col),
            )
        })?;
        let marker = row.cells[marker_idx].as_deref().ok_or_else(|| {
            ProfilerError::format(
                &table.source_name,
                format!("line {}: missing value in marker column '{}'", row.line, config.marker_col),
            )
        })?;

        let record = groups
            .entry(sample_id.to_string())
            .or_insert_with(|| PendingRecord {
                sample_id: sample_id.to_string(),
                markers: Vec::new(),
            });
        let alleles = record.marker_mut(marker);

        for &i in &allele_idx {
            if let Some(value) = row.cells[i].as_deref() {
                for piece in value.split(',') {
                    alleles.insert(piece);
                }
            }
        }
    }

    Ok(groups.into_values().collect())
}

fn fold_long(table: &RawTable, config: &IngestConfig) -> Result<Vec<PendingRecord>> {
    let sample_idx = table.require_column(&config.sample_col)?;

    table
        .rows
        .iter()
        .map(|row| {
            let sample_id = row.cells[sample_idx].as_deref().ok_or_else(|| {
                ProfilerError::format(
                    &table.source_name,
                    format!("line {}: missing value in sample column '{}'", row.line, config.sample_col),
                )
            })?;

            let markers = table
                .columns
                .iter()
                .zip(&row.cells)
                .enumerate()
                .filter(|(i, _)| *i != sample_idx)
                .map(|(_, (marker, cell))| {
                    let alleles = cell
                        .as_deref()
                        .map(AlleleSet::parse_list)
                        .unwrap_or_default()
                        .sorted();
                    (marker.clone(), alleles)
                })
                .collect();

            Ok(PendingRecord {
                sample_id: sample_id.to_string(),
                markers,
            })
        })
        .collect()
}

/// Canonicalize raw tables into a cohort.
///
/// Each table is folded according to its detected layout, Penta aliases are
/// coalesced when enabled, the sample map is applied once, and every record
/// is filled out to the cohort-wide marker union with empty sets.
pub fn canonicalize(
    tables: &[RawTable],
    config: &IngestConfig,
    sample_map: Option<&SampleMap>,
) -> Result<Cohort> {
    let renames = match sample_map {
        Some(map) => map.resolve()?,
        None => HashMap::new(),
    };

    let mut pending = Vec::new();
    for table in tables {
        let records = match TableLayout::detect(table) {
            TableLayout::Wide => fold_wide(table, config)?,
            TableLayout::Long => fold_long(table, config)?,
        };
        pending.extend(records);
    }

    let mut seen = HashSet::new();
    let mut marker_names: Vec<String> = Vec::new();
    let mut known_markers = HashSet::new();

    for record in &mut pending {
        if config.penta_fix {
            normalize_penta(&mut record.markers);
        }
        if let Some(&new_name) = renames.get(record.sample_id.as_str()) {
            record.sample_id = new_name.to_string();
        }
        if !seen.insert(record.sample_id.clone()) {
            return Err(ProfilerError::DuplicateSample {
                sample: record.sample_id.clone(),
            });
        }
        for (marker, _) in &record.markers {
            if known_markers.insert(marker.clone()) {
                marker_names.push(marker.clone());
            }
        }
    }

    let samples = pending
        .into_iter()
        .map(|record| {
            let mut markers: HashMap<String, AlleleSet> = record.markers.into_iter().collect();
            for marker in &marker_names {
                markers.entry(marker.clone()).or_default();
            }
            StrProfile {
                sample_id: record.sample_id,
                markers,
            }
        })
        .collect();

    Ok(Cohort {
        samples,
        marker_names,
    })
}

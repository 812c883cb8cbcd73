// sample_map.rs - Sample renaming table (old name → new name)

use crate::data::table::clean_cell;
use crate::error::{ProfilerError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Ordered (old, new) sample name pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleMap {
    entries: Vec<(String, String)>,
}

impl SampleMap {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the old → new lookup.
    ///
    /// Repeating an identical pair is harmless; mapping one old name to two
    /// different new names is rejected.
    pub fn resolve(&self) -> Result<HashMap<&str, &str>> {
        let mut lookup: HashMap<&str, &str> = HashMap::with_capacity(self.entries.len());
        for (old, new) in &self.entries {
            if let Some(previous) = lookup.insert(old.as_str(), new.as_str()) {
                if previous != new {
                    return Err(ProfilerError::AmbiguousRename {
                        sample: old.clone(),
                    });
                }
            }
        }
        Ok(lookup)
    }

    /// Parse a headerless two-column CSV; extra columns are ignored
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (idx, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| {
                ProfilerError::format(source_name, format!("line {}: {}", idx + 1, e))
            })?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 1);

            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let old = record.get(0).and_then(clean_cell);
            let new = record.get(1).and_then(clean_cell);
            match (old, new) {
                (Some(old), Some(new)) => entries.push((old, new)),
                _ => {
                    return Err(ProfilerError::format(
                        source_name,
                        format!("line {}: expected 'old name,new name'", line),
                    ))
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn from_file(file_path: &Path) -> Result<Self> {
        let file = File::open(file_path).map_err(|e| ProfilerError::io(file_path, e))?;
        let map = Self::from_reader(BufReader::new(file), &file_path.display().to_string())?;
        println!(
            "📋 Loaded {} sample renames from '{}'",
            map.len(),
            file_path.display()
        );
        Ok(map)
    }
}

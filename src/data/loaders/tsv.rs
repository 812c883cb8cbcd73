// tsv.rs - Tab-separated (.tsv / .txt) loader for STR profiles

use crate::data::table::RawTable;
use crate::error::{ProfilerError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

impl RawTable {
    /// Load a tab-separated profile table
    pub fn from_tsv(file_path: &Path) -> Result<Self> {
        let file = File::open(file_path).map_err(|e| ProfilerError::io(file_path, e))?;
        let table = Self::from_reader(
            BufReader::new(file),
            b'\t',
            &file_path.display().to_string(),
        )?;

        println!(
            "✅ TSV loaded: {} rows, {} columns ({})",
            table.rows.len(),
            table.columns.len(),
            file_path.display()
        );
        Ok(table)
    }
}

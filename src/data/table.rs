// table.rs - Raw tabular input handed from the loaders to the canonicalizer

use crate::error::{ProfilerError, Result};
use std::io::Read;

/// Cell tokens read as "no value", the same set a spreadsheet export usually produces
const NA_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "#N/A"];

/// A single cell: `None` is an absent value, never an empty string
pub type Cell = Option<String>;

/// One data row, aligned with `RawTable::columns`
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line number in the source file (header is line 1)
    pub line: usize,
    pub cells: Vec<Cell>,
}

/// A loaded input table before layout detection
#[derive(Debug, Clone)]
pub struct RawTable {
    pub source_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Trim a raw cell and map NA tokens to an absent value
pub fn clean_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if NA_TOKENS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl RawTable {
    pub fn new(source_name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            source_name: source_name.into(),
            columns: columns.into_iter().map(|c| c.trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, rejecting ones that do not match the header width
    pub fn push_row(&mut self, line: usize, cells: Vec<Cell>) -> Result<()> {
        if cells.len() != self.columns.len() {
            return Err(ProfilerError::format(
                &self.source_name,
                format!(
                    "line {} has {} fields, expected {}",
                    line,
                    cells.len(),
                    self.columns.len()
                ),
            ));
        }
        self.rows.push(RawRow { line, cells });
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like `column_index`, but a missing column is an error naming this table
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ProfilerError::MissingColumn {
                source_name: self.source_name.clone(),
                column: name.to_string(),
            })
    }

    /// Parse delimited text with a header line
    pub fn from_reader<R: Read>(reader: R, delimiter: u8, source_name: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| ProfilerError::format(source_name, format!("failed to read header: {}", e)))?
            .clone();

        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ProfilerError::format(source_name, "empty table (no header line)"));
        }

        let mut table = RawTable::new(source_name, headers.iter().map(str::to_string).collect());

        for (idx, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| {
                ProfilerError::format(source_name, format!("line {}: {}", idx + 2, e))
            })?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);

            // Fully blank lines carry no sample
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            table.push_row(line, record.iter().map(clean_cell).collect())?;
        }

        Ok(table)
    }

    #[cfg(test)]
    pub(crate) fn from_strings(source_name: &str, columns: &[&str], rows: &[&[&str]]) -> Self {
        let mut table = RawTable::new(source_name, columns.iter().map(|c| c.to_string()).collect());
        for (idx, row) in rows.iter().enumerate() {
            table
                .push_row(idx + 2, row.iter().map(|c| clean_cell(c)).collect())
                .expect("test row width");
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_cell_absent_vs_value() {
        assert_eq!(clean_cell("  12 "), Some("12".to_string()));
        assert_eq!(clean_cell(""), None);
        assert_eq!(clean_cell("   "), None);
        assert_eq!(clean_cell("NA"), None);
        assert_eq!(clean_cell("nan"), None);
        assert_eq!(clean_cell("X,Y"), Some("X,Y".to_string()));
    }

    #[test]
    fn test_from_reader_trims_columns_and_tracks_lines() {
        let data = " Sample ,D5S818, TH01 \nA,11,\"9,9.3\"\n\nB, 12 ,NA\n";
        let table = RawTable::from_reader(data.as_bytes(), b',', "mem.csv").unwrap();

        assert_eq!(table.columns, vec!["Sample", "D5S818", "TH01"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].line, 2);
        assert_eq!(table.rows[0].cells[2], Some("9,9.3".to_string()));
        assert_eq!(table.rows[1].line, 4);
        assert_eq!(table.rows[1].cells[1], Some("12".to_string()));
        assert_eq!(table.rows[1].cells[2], None);
    }

    #[test]
    fn test_ragged_row_is_format_error() {
        let data = "Sample\tD5S818\nA\t11\t12\n";
        let err = RawTable::from_reader(data.as_bytes(), b'\t', "ragged.tsv").unwrap_err();
        match err {
            ProfilerError::Format { source_name, message } => {
                assert_eq!(source_name, "ragged.tsv");
                assert!(message.contains("line 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input_is_format_error() {
        let err = RawTable::from_reader("".as_bytes(), b',', "empty.csv").unwrap_err();
        assert!(matches!(err, ProfilerError::Format { .. }));
    }

    #[test]
    fn test_require_column() {
        let table = RawTable::from_strings("t.csv", &["Sample", "AMEL"], &[&["A", "X"]]);
        assert_eq!(table.require_column("AMEL").unwrap(), 1);
        assert!(matches!(
            table.require_column("Marker"),
            Err(ProfilerError::MissingColumn { .. })
        ));
    }
}

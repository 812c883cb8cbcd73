// mod.rs - Input loaders and extension dispatch

pub mod csv;
pub mod sample_map;
pub mod tsv;

pub use sample_map::SampleMap;

use crate::data::table::RawTable;
use crate::error::{ProfilerError, Result};
use std::path::Path;

/// Lower-cased extension of a path, empty if there is none
fn extension_of(file_path: &Path) -> String {
    file_path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

/// Whether `load_table` knows how to read this file
pub fn is_supported(file_path: &Path) -> bool {
    matches!(extension_of(file_path).as_str(), "csv" | "tsv" | "txt")
}

/// Load one STR profile file, picking the reader from its extension
pub fn load_table(file_path: &Path) -> Result<RawTable> {
    let source_name = file_path.display().to_string();
    match extension_of(file_path).as_str() {
        "csv" => RawTable::from_csv(file_path),
        "tsv" | "txt" => RawTable::from_tsv(file_path),
        "xlsx" | "xls" => Err(ProfilerError::format(
            source_name,
            "Excel workbooks are not supported; export the sheet to .csv or .tsv",
        )),
        other => Err(ProfilerError::format(
            source_name,
            format!(
                "unrecognized file extension '{}' (expected .csv, .tsv or .txt)",
                other
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_dispatch_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("batch.CSV");
        fs::write(&csv_path, "Sample,TH01\nA,\"6,9.3\"\n").unwrap();
        let table = load_table(&csv_path).unwrap();
        assert_eq!(table.columns, vec!["Sample", "TH01"]);
        assert_eq!(table.rows[0].cells[1], Some("6,9.3".to_string()));

        let txt_path = dir.path().join("batch.txt");
        fs::write(&txt_path, "Sample\tTH01\nB\t7\n").unwrap();
        let table = load_table(&txt_path).unwrap();
        assert_eq!(table.rows[0].cells[0], Some("B".to_string()));
    }

    #[test]
    fn test_unsupported_extensions() {
        for name in ["profiles.xlsx", "profiles.json", "profiles"] {
            let err = load_table(Path::new(name)).unwrap_err();
            assert!(matches!(err, ProfilerError::Format { .. }), "{name}");
        }
        assert!(is_supported(Path::new("a.tsv")));
        assert!(!is_supported(Path::new("a.xlsx")));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_table(Path::new("/nonexistent/dir/batch.csv")).unwrap_err();
        assert!(matches!(err, ProfilerError::Io { .. }));
    }
}

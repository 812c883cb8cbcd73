// error.rs - Error taxonomy for ingestion, configuration and output

use std::path::PathBuf;
use thiserror::Error;

/// All failures a strprofiler run can report
#[derive(Debug, Error)]
pub enum ProfilerError {
    /// Input table (or sample map) could not be parsed
    #[error("Format error in {source_name}: {message}")]
    Format {
        source_name: String,
        message: String,
    },

    /// Two records ended up with the same sample key after renaming
    #[error("Duplicate sample '{sample}' after renaming; sample names must be unique")]
    DuplicateSample { sample: String },

    /// The sample map assigns two different new names to one sample
    #[error("Ambiguous sample map entry: '{sample}' is mapped to more than one new name")]
    AmbiguousRename { sample: String },

    /// A configured column is not present in a table
    #[error("Column '{column}' not found in {source_name}")]
    MissingColumn { source_name: String, column: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProfilerError {
    pub fn format(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        ProfilerError::Format {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProfilerError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfilerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_offender() {
        let err = ProfilerError::MissingColumn {
            source_name: "batch1.csv".to_string(),
            column: "Sample".to_string(),
        };
        assert_eq!(err.to_string(), "Column 'Sample' not found in batch1.csv");

        let err = ProfilerError::format("batch2.tsv", "line 4: missing sample identifier");
        assert!(err.to_string().contains("batch2.tsv"));
        assert!(err.to_string().contains("line 4"));

        let err = ProfilerError::DuplicateSample {
            sample: "HeLa".to_string(),
        };
        assert!(err.to_string().contains("'HeLa'"));
    }
}

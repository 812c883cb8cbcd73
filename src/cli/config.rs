// config.rs - Configuration file support

use crate::error::{ProfilerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    // Input/Output
    pub input_files: Option<Vec<String>>,
    pub sample_map: Option<String>,
    pub output_dir: Option<String>,

    // Thresholds
    pub tan_threshold: Option<f64>,
    pub mas_q_threshold: Option<f64>,
    pub mas_r_threshold: Option<f64>,
    pub mix_threshold: Option<usize>,

    // Columns
    pub amel_col: Option<String>,
    pub sample_col: Option<String>,
    pub marker_col: Option<String>,

    // Flags
    pub penta_fix: Option<bool>,
    pub score_amel: Option<bool>,
    pub dry_run: Option<bool>,

    // Performance
    pub threads: Option<usize>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ProfilerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            ProfilerError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# strprofiler.toml - Configuration file for strprofiler
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# STR profile files (.csv, .tsv or .txt); used when none are given on the command line
input_files = ["batch1.csv", "batch2.tsv"]

# Headerless CSV mapping old sample names to new ones
# sample_map = "sample_map.csv"

# Output directory for per-sample tables, the summary and the run log
output_dir = "./STRprofiler"

# =============================================================================
# THRESHOLDS
# =============================================================================

# Minimum scores (percent) for a partner to be listed as a match
tan_threshold = 80.0
mas_q_threshold = 80.0
mas_r_threshold = 80.0

# Markers with >2 alleles allowed before a sample is flagged as mixed
mix_threshold = 3

# =============================================================================
# COLUMNS
# =============================================================================

amel_col = "AMEL"
sample_col = "Sample"

# Only used for wide-layout files (one row per sample and marker)
marker_col = "Marker"

# =============================================================================
# FLAGS
# =============================================================================

# Fold "Penta D", "Penta_D" and "Penta-D" into "PentaD" (same for PentaE)
penta_fix = true

# Use amelogenin for similarity scoring
score_amel = false

# Load inputs and report cohort statistics without writing output
dry_run = false

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config: Config = toml::from_str(&Config::generate_sample()).unwrap();
        assert_eq!(config.tan_threshold, Some(80.0));
        assert_eq!(config.mix_threshold, Some(3));
        assert_eq!(config.penta_fix, Some(true));
        assert_eq!(config.sample_map, None);
        assert_eq!(config.threads, None);
        assert_eq!(
            config.input_files,
            Some(vec!["batch1.csv".to_string(), "batch2.tsv".to_string()])
        );
    }

    #[test]
    fn test_from_file_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strprofiler.toml");

        fs::write(&path, "tan_threshold = 70.0\namel_col = \"Amelogenin\"\n").unwrap();
        let expected = Config {
            tan_threshold: Some(70.0),
            amel_col: Some("Amelogenin".to_string()),
            ..Config::new()
        };
        assert_eq!(Config::from_file(&path).unwrap(), expected);

        fs::write(&path, "tan_threshold = \"high\"").unwrap();
        assert!(matches!(Config::from_file(&path), Err(ProfilerError::Config(_))));
        assert!(matches!(
            Config::from_file(dir.path().join("missing.toml")),
            Err(ProfilerError::Config(_))
        ));
    }
}

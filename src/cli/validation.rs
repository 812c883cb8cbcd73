// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::ScoringConfig;
use crate::data::{loaders, IngestConfig};
use crate::error::{ProfilerError, Result};
use std::path::{Path, PathBuf};

/// Settings resolved from validated arguments
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub ingest: IngestConfig,
    pub scoring: ScoringConfig,
    pub input_files: Vec<PathBuf>,
    pub sample_map: Option<PathBuf>,
    pub output_dir: PathBuf,
}

/// Any finite cutoff is usable; scores above 100 simply never match
fn check_threshold(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ProfilerError::Config(format!(
            "{} must be a finite number, got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_column(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProfilerError::Config(format!("{} must not be empty", name)));
    }
    Ok(())
}

fn check_existing_file(kind: &str, path: &str) -> Result<PathBuf> {
    let path = PathBuf::from(path);
    if !path.is_file() {
        return Err(ProfilerError::Config(format!(
            "{} '{}' does not exist or is not a file",
            kind,
            path.display()
        )));
    }
    Ok(path)
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult> {
    // Thresholds
    check_threshold("--tan-threshold", args.tan_threshold)?;
    check_threshold("--mas-q-threshold", args.mas_q_threshold)?;
    check_threshold("--mas-r-threshold", args.mas_r_threshold)?;

    // Columns
    check_column("--sample-col", &args.sample_col)?;
    check_column("--marker-col", &args.marker_col)?;
    check_column("--amel-col", &args.amel_col)?;
    if args.sample_col.trim() == args.marker_col.trim() {
        return Err(ProfilerError::Config(format!(
            "--sample-col and --marker-col must differ (both are '{}')",
            args.sample_col
        )));
    }

    if args.threads == Some(0) {
        return Err(ProfilerError::Config("--threads must be at least 1".to_string()));
    }

    // Input files
    if args.input_files.is_empty() {
        return Err(ProfilerError::Config(
            "No input files given (pass them as arguments or set input_files in the config)"
                .to_string(),
        ));
    }
    let mut input_files = Vec::with_capacity(args.input_files.len());
    for file in &args.input_files {
        let path = check_existing_file("Input file", file)?;
        if !loaders::is_supported(&path) {
            return Err(ProfilerError::format(
                path.display().to_string(),
                "unsupported file extension (expected .csv, .tsv or .txt)",
            ));
        }
        input_files.push(path);
    }

    let sample_map = args
        .sample_map
        .as_deref()
        .map(|path| check_existing_file("Sample map", path))
        .transpose()?;

    if args.output_dir.trim().is_empty() {
        return Err(ProfilerError::Config("--output-dir must not be empty".to_string()));
    }

    Ok(ValidationResult {
        ingest: IngestConfig {
            sample_col: args.sample_col.trim().to_string(),
            marker_col: args.marker_col.trim().to_string(),
            penta_fix: args.penta_fix.unwrap_or(true),
        },
        scoring: ScoringConfig {
            tan_threshold: args.tan_threshold,
            mas_q_threshold: args.mas_q_threshold,
            mas_r_threshold: args.mas_r_threshold,
            mix_threshold: args.mix_threshold,
            use_amel: args.score_amel,
            amel_col: args.amel_col.trim().to_string(),
        },
        input_files,
        sample_map,
        output_dir: Path::new(&args.output_dir).to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;
    use std::fs;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["strprofiler"], args).unwrap()
    }

    fn fixture() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("profiles.csv");
        fs::write(&input, "Sample,TH01\nA,7\n").unwrap();
        let input = input.to_str().unwrap().to_string();
        (dir, input)
    }

    #[test]
    fn test_valid_args_resolve_configs() {
        let (_dir, input) = fixture();
        let result = validate_args(&parse(&[
            "--mix-threshold",
            "4",
            "--penta-fix",
            "false",
            "--score-amel",
            input.as_str(),
        ]))
        .unwrap();

        assert_eq!(result.input_files, vec![PathBuf::from(&input)]);
        assert_eq!(result.ingest.sample_col, "Sample");
        assert!(!result.ingest.penta_fix);
        assert_eq!(result.scoring.mix_threshold, 4);
        assert!(result.scoring.use_amel);
        assert_eq!(result.scoring.tan_threshold, 80.0);
        assert_eq!(result.sample_map, None);
        assert_eq!(result.output_dir, PathBuf::from("./STRprofiler"));

        let defaults = validate_args(&parse(&[input.as_str()])).unwrap();
        assert!(defaults.ingest.penta_fix);
    }

    #[test]
    fn test_thresholds_outside_percent_range_are_accepted() {
        let (_dir, input) = fixture();
        let result = validate_args(&parse(&[
            "--tan-threshold",
            "120",
            "--mas-q-threshold",
            "100.5",
            input.as_str(),
        ]))
        .unwrap();
        assert_eq!(result.scoring.tan_threshold, 120.0);
        assert_eq!(result.scoring.mas_q_threshold, 100.5);
    }

    #[test]
    fn test_rejects_bad_values() {
        let (dir, input) = fixture();

        for bad in [
            vec!["--tan-threshold", "inf"],
            vec!["--mas-r-threshold", "NaN"],
            vec!["--sample-col", " "],
            vec!["--sample-col", "Marker"],
            vec!["--threads", "0"],
        ] {
            let mut argv = bad.clone();
            argv.push(input.as_str());
            let err = validate_args(&parse(&argv)).unwrap_err();
            assert!(matches!(err, ProfilerError::Config(_)), "{:?} -> {}", bad, err);
        }

        assert!(matches!(
            validate_args(&parse(&[])),
            Err(ProfilerError::Config(_))
        ));

        let missing = dir.path().join("missing.csv");
        assert!(matches!(
            validate_args(&parse(&[missing.to_str().unwrap()])),
            Err(ProfilerError::Config(_))
        ));

        let missing_map = dir.path().join("map.csv");
        assert!(matches!(
            validate_args(&parse(&[
                "--sample-map",
                missing_map.to_str().unwrap(),
                input.as_str(),
            ])),
            Err(ProfilerError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let xlsx = dir.path().join("profiles.xlsx");
        fs::write(&xlsx, b"PK").unwrap();
        assert!(matches!(
            validate_args(&parse(&[xlsx.to_str().unwrap()])),
            Err(ProfilerError::Format { .. })
        ));
    }
}

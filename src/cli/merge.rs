// merge.rs - Merge configuration file with CLI arguments

use crate::cli::args::{DEFAULT_MARKER_COL, DEFAULT_OUTPUT_DIR, DEFAULT_SAMPLE_COL};
use crate::cli::{Args, Config};
use crate::core::comparison::{DEFAULT_AMEL_COL, DEFAULT_MIX_THRESHOLD, DEFAULT_SCORE_THRESHOLD};
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.input_files.is_empty() {
            if let Some(files) = config.input_files {
                self.input_files = files;
            }
        }
        if self.sample_map.is_none() {
            self.sample_map = config.sample_map;
        }
        if self.output_dir == DEFAULT_OUTPUT_DIR {
            if let Some(dir) = config.output_dir {
                self.output_dir = dir;
            }
        }

        // Thresholds (only override defaults, not explicit CLI values)
        if self.tan_threshold == DEFAULT_SCORE_THRESHOLD {
            if let Some(value) = config.tan_threshold {
                self.tan_threshold = value;
            }
        }
        if self.mas_q_threshold == DEFAULT_SCORE_THRESHOLD {
            if let Some(value) = config.mas_q_threshold {
                self.mas_q_threshold = value;
            }
        }
        if self.mas_r_threshold == DEFAULT_SCORE_THRESHOLD {
            if let Some(value) = config.mas_r_threshold {
                self.mas_r_threshold = value;
            }
        }
        if self.mix_threshold == DEFAULT_MIX_THRESHOLD {
            if let Some(value) = config.mix_threshold {
                self.mix_threshold = value;
            }
        }

        // Columns
        if self.amel_col == DEFAULT_AMEL_COL {
            if let Some(col) = config.amel_col {
                self.amel_col = col;
            }
        }
        if self.sample_col == DEFAULT_SAMPLE_COL {
            if let Some(col) = config.sample_col {
                self.sample_col = col;
            }
        }
        if self.marker_col == DEFAULT_MARKER_COL {
            if let Some(col) = config.marker_col {
                self.marker_col = col;
            }
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if self.penta_fix.is_none() {
            self.penta_fix = config.penta_fix;
        }
        if !self.score_amel && config.score_amel.unwrap_or(false) {
            self.score_amel = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["strprofiler"], args).unwrap()
    }

    fn config() -> Config {
        Config {
            input_files: Some(vec!["from_config.csv".to_string()]),
            sample_map: Some("map.csv".to_string()),
            tan_threshold: Some(70.0),
            mas_q_threshold: Some(60.0),
            mix_threshold: Some(5),
            sample_col: Some("Cell line".to_string()),
            penta_fix: Some(false),
            score_amel: Some(true),
            threads: Some(4),
            ..Config::new()
        }
    }

    #[test]
    fn test_config_fills_defaults() {
        let merged = parse(&[]).merge_with_config(config());
        assert_eq!(merged.input_files, vec!["from_config.csv"]);
        assert_eq!(merged.sample_map.as_deref(), Some("map.csv"));
        assert_eq!(merged.tan_threshold, 70.0);
        assert_eq!(merged.mas_q_threshold, 60.0);
        assert_eq!(merged.mas_r_threshold, 80.0);
        assert_eq!(merged.mix_threshold, 5);
        assert_eq!(merged.sample_col, "Cell line");
        assert_eq!(merged.marker_col, "Marker");
        assert_eq!(merged.penta_fix, Some(false));
        assert!(merged.score_amel);
        assert_eq!(merged.threads, Some(4));
        assert_eq!(merged.output_dir, DEFAULT_OUTPUT_DIR);
    }

    #[test]
    fn test_cli_values_win() {
        let merged = parse(&[
            "--tan-threshold",
            "95",
            "--mix-threshold",
            "2",
            "--penta-fix",
            "true",
            "--threads",
            "2",
            "cli.csv",
        ])
        .merge_with_config(config());
        assert_eq!(merged.input_files, vec!["cli.csv"]);
        assert_eq!(merged.tan_threshold, 95.0);
        assert_eq!(merged.mix_threshold, 2);
        assert_eq!(merged.penta_fix, Some(true));
        assert_eq!(merged.threads, Some(2));
    }

    #[test]
    fn test_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "mas_r_threshold = 55.5\noutput_dir = \"results\"\n").unwrap();

        let merged = parse(&["in.csv"])
            .with_config_file(path.to_str().unwrap())
            .unwrap();
        assert_eq!(merged.mas_r_threshold, 55.5);
        assert_eq!(merged.output_dir, "results");
    }
}

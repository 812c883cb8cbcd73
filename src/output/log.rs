// log.rs - Run log written next to the output tables

use crate::core::ScoringConfig;
use crate::data::IngestConfig;
use crate::error::{ProfilerError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Explicit reporter for one run; every entry goes through a method call
pub struct RunLog<W: Write> {
    writer: W,
    path: PathBuf,
}

impl RunLog<Vec<u8>> {
    /// In-memory log bound for `strprofiler.<stamp>.log` inside `output_dir`
    pub fn buffered(output_dir: &Path, stamp: &str) -> Self {
        Self::from_writer(Vec::new(), output_dir.join(format!("strprofiler.{}.log", stamp)))
    }

    /// Write the collected entries to disk; nothing touches the file system before this
    pub fn persist(self) -> Result<PathBuf> {
        let path = self.path.clone();
        let contents = self.finish()?;
        fs::write(&path, contents).map_err(|e| ProfilerError::io(&path, e))?;
        Ok(path)
    }
}

impl<W: Write> RunLog<W> {
    pub fn from_writer(writer: W, path: impl Into<PathBuf>) -> Self {
        Self {
            writer,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text).map_err(|e| ProfilerError::io(&self.path, e))
    }

    /// Header block with every setting that shapes the results
    pub fn parameters(
        &mut self,
        ingest: &IngestConfig,
        scoring: &ScoringConfig,
        sample_map: Option<&str>,
    ) -> Result<()> {
        self.line(&format!("Tanabe threshold: {}", scoring.tan_threshold))?;
        self.line(&format!(
            "Masters (vs. query) threshold: {}",
            scoring.mas_q_threshold
        ))?;
        self.line(&format!(
            "Masters (vs. reference) threshold: {}",
            scoring.mas_r_threshold
        ))?;
        self.line(&format!("Mix threshold: {}", scoring.mix_threshold))?;
        self.line(&format!("Sample map: {}", sample_map.unwrap_or("None")))?;
        self.line(&format!("Amelogenin column: {}", scoring.amel_col))?;
        self.line(&format!("Sample column: {}", ingest.sample_col))?;
        self.line(&format!("Marker column: {}", ingest.marker_col))?;
        self.line(&format!("Penta fix: {}", ingest.penta_fix))?;
        self.line(&format!("Use amelogenin for scoring: {}\n", scoring.use_amel))
    }

    pub fn command(&mut self, command_line: &str) -> Result<()> {
        self.line("Full command:")?;
        self.line(command_line)
    }

    pub fn comparison(&mut self, query: &str, reference: &str) -> Result<()> {
        self.line(&format!("Comparing {} to {}", query, reference))
    }

    pub fn note(&mut self, message: &str) -> Result<()> {
        self.line(message)
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.writer
            .flush()
            .map_err(|e| ProfilerError::io(&self.path, e))?;
        Ok(self.writer)
    }
}

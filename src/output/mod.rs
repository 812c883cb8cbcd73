// mod.rs - Output writers: timestamped CSV tables and the run log

pub mod log;
pub mod tables;

pub use log::RunLog;

use crate::core::{SampleComparison, SampleSummary};
use crate::error::{ProfilerError, Result};
use std::collections::HashSet;
use std::fs::{self, create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Local-time stamp shared by every file of one run
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d.%H_%M_%S").to_string()
}

/// Create the output directory (and parents) if needed
pub fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    create_dir_all(output_dir).map_err(|e| ProfilerError::io(output_dir, e))
}

/// Sample names become file names; path separators must not escape the output dir
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c => c,
        })
        .collect()
}

pub fn sample_file_name(sample_id: &str, stamp: &str) -> String {
    format!("{}.strprofiler.{}.csv", sanitize_file_stem(sample_id), stamp)
}

pub fn summary_file_name(stamp: &str) -> String {
    format!("full_summary.strprofiler.{}.csv", stamp)
}

/// Tables written to temporary siblings, renamed into place only once all succeed
struct StagedOutputs {
    staged: Vec<(PathBuf, PathBuf)>,
}

impl StagedOutputs {
    fn new() -> Self {
        Self { staged: Vec::new() }
    }

    fn write_table(&mut self, target: PathBuf, header: &[String], records: &[Vec<String>]) -> Result<()> {
        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp = target.with_file_name(format!(".{}.tmp", file_name));
        // Registered before writing so a failure still cleans it up
        self.staged.push((temp.clone(), target));

        let file = File::create(&temp).map_err(|e| ProfilerError::io(&temp, e))?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        let to_io = |e: csv::Error| ProfilerError::io(&temp, std::io::Error::other(e));

        writer.write_record(header).map_err(to_io)?;
        for record in records {
            writer.write_record(record).map_err(to_io)?;
        }
        let mut inner = writer
            .into_inner()
            .map_err(|e| ProfilerError::io(&temp, std::io::Error::other(e.to_string())))?;
        inner.flush().map_err(|e| ProfilerError::io(&temp, e))?;
        Ok(())
    }

    /// Rename every staged file into place; on failure the ones already moved are removed again
    fn commit(mut self) -> Result<Vec<PathBuf>> {
        let mut written: Vec<PathBuf> = Vec::with_capacity(self.staged.len());
        while !self.staged.is_empty() {
            let (temp, target) = self.staged.remove(0);
            if let Err(e) = fs::rename(&temp, &target) {
                let _ = fs::remove_file(&temp);
                for path in &written {
                    let _ = fs::remove_file(path);
                }
                // Remaining temp files are dropped with `self`
                return Err(ProfilerError::io(&target, e));
            }
            written.push(target);
        }
        Ok(written)
    }
}

impl Drop for StagedOutputs {
    fn drop(&mut self) {
        for (temp, _) in &self.staged {
            let _ = fs::remove_file(temp);
        }
    }
}

/// Per-sample output paths, rejecting names that map onto the same file
fn sample_targets(
    output_dir: &Path,
    stamp: &str,
    comparisons: &[SampleComparison<'_>],
) -> Result<Vec<PathBuf>> {
    let mut taken = HashSet::new();
    taken.insert(summary_file_name(stamp));

    let mut targets = Vec::with_capacity(comparisons.len());
    for comparison in comparisons {
        let file_name = sample_file_name(&comparison.query.sample_id, stamp);
        if !taken.insert(file_name.clone()) {
            return Err(ProfilerError::DuplicateSample {
                sample: comparison.query.sample_id.clone(),
            });
        }
        targets.push(output_dir.join(file_name));
    }
    Ok(targets)
}

/// Write one ranked table per sample plus the cohort summary.
///
/// Either every file lands in `output_dir` or none does; the returned paths
/// follow cohort order with the summary last.
pub fn write_reports(
    output_dir: &Path,
    stamp: &str,
    marker_names: &[String],
    comparisons: &[SampleComparison<'_>],
    summaries: &[SampleSummary<'_>],
) -> Result<Vec<PathBuf>> {
    let targets = sample_targets(output_dir, stamp, comparisons)?;
    ensure_output_dir(output_dir)?;

    let mut staged = StagedOutputs::new();
    let ranked_header = tables::ranked_header(marker_names);
    for (comparison, target) in comparisons.iter().zip(targets) {
        let records = tables::ranked_records(comparison, marker_names);
        staged.write_table(target, &ranked_header, &records)?;
    }

    let summary_records: Vec<_> = summaries
        .iter()
        .map(|summary| tables::summary_record(summary, marker_names))
        .collect();
    staged.write_table(
        output_dir.join(summary_file_name(stamp)),
        &tables::summary_header(marker_names),
        &summary_records,
    )?;

    let written = staged.commit()?;
    println!(
        "✅ Wrote {} sample tables and the summary to: {}",
        comparisons.len(),
        output_dir.display()
    );
    Ok(written)
}

//! Report rendering
//!
//! Renders the sorted result set as an xlsx workbook. The "conflict test"
//! sheet carries a bold `worker-{W}-task-{N}` header row followed by one
//! latency per row, in milliseconds, ascending. Captured environment labels
//! go on a separate "environment" sheet and never touch the data contract.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rust_xlsxwriter::{Format, Workbook};

use crate::config::{EnvMetadata, RunConfig};
use crate::error::BenchResult;
use crate::orchestrator::RunOutcome;

/// Workbook base name derived from the run shape and total duration.
pub fn report_basename(workers: usize, tasks: usize, total: Duration) -> String {
    format!(
        "worker-{workers}-task-{tasks}-time-{:.6}s",
        total.as_secs_f64()
    )
}

/// Write the run's workbook into `dir`, returning the file path.
pub fn write_report(
    dir: &Path,
    outcome: &RunOutcome,
    config: &RunConfig,
    metadata: &EnvMetadata,
) -> BenchResult<PathBuf> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("conflict test")?;

    let title = format!("worker-{}-task-{}", config.workers, config.tasks);
    sheet.write_with_format(0, 0, title.as_str(), &bold)?;
    for (idx, sample) in outcome.samples.iter().enumerate() {
        sheet.write((idx + 1) as u32, 0, sample.elapsed_ms())?;
    }
    sheet.set_column_width(0, 25)?;

    if !metadata.is_empty() {
        let env_sheet = workbook.add_worksheet();
        env_sheet.set_name("environment")?;
        env_sheet.write_with_format(0, 0, "Component", &bold)?;
        env_sheet.write_with_format(0, 1, "Version", &bold)?;
        for (idx, (name, value)) in metadata.labels().iter().enumerate() {
            let row = (idx + 1) as u32;
            env_sheet.write(row, 0, name.as_str())?;
            env_sheet.write(row, 1, value.as_str())?;
        }
        env_sheet.set_column_width(0, 20)?;
        env_sheet.set_column_width(1, 20)?;
    }

    let path = dir.join(format!(
        "{}.xlsx",
        report_basename(config.workers, config.tasks, outcome.total)
    ));
    workbook.save(&path)?;
    Ok(path)
}

//! Result aggregation: drain outcomes into a [`Report`], then log and optionally list it.

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use log::{Level, info, log};
use std::fmt::Write as _;
use std::path::Path;

use crate::utils::config::{LIST_THRESHOLD, PackagePaths};
use crate::{FileOutcome, Report};

/// Drain `result_rx` until every worker has exited, splitting outcomes into the two buckets in
/// arrival order. `on_outcome` sees each outcome first; keep it fast, workers wait on this loop.
pub fn aggregate<F>(result_rx: &Receiver<FileOutcome>, mut on_outcome: F) -> Report
where
    F: FnMut(&FileOutcome),
{
    let mut report = Report::default();
    while let Ok(outcome) = result_rx.recv() {
        on_outcome(&outcome);
        match outcome.error {
            None => report.succeeded.push(outcome.path),
            Some(err) => report.failed.push((outcome.path, err)),
        }
    }
    report
}

/// Both buckets as log records: copies at info, failures at warn with their reason.
fn report_records(report: &Report) -> Vec<(Level, String)> {
    let copied = report
        .succeeded
        .iter()
        .map(|p| (Level::Info, format!("copied {}", p.display())));
    let failed = report
        .failed
        .iter()
        .map(|(p, err)| (Level::Warn, format!("{}: {}", p.display(), err)));
    copied.chain(failed).collect()
}

fn render_list(report: &Report) -> String {
    let mut out = String::new();
    for p in &report.succeeded {
        let _ = writeln!(out, "ok      {}", p.display());
    }
    for (p, err) in &report.failed {
        let _ = writeln!(out, "failed  {}: {}", p.display(), err);
    }
    out
}

/// Log the counts and every outcome. With `list_paths`, also print the listing, or write it to
/// the results file in `output_dir` when there are more than [`LIST_THRESHOLD`] paths.
pub fn log_report(report: &Report, list_paths: bool, output_dir: &Path) -> Result<()> {
    info!(
        "Done: {} copied, {} failed ({} files)",
        report.succeeded.len(),
        report.failed.len(),
        report.total()
    );
    for (level, line) in report_records(report) {
        log!(level, "{}", line);
    }
    if !list_paths {
        return Ok(());
    }
    let listing = render_list(report);
    if report.total() > LIST_THRESHOLD {
        let results_path = output_dir.join(PackagePaths::get().results_filename());
        std::fs::write(&results_path, listing)
            .with_context(|| format!("write results to {}", results_path.display()))?;
        info!("Listing written to {}", results_path.display());
    } else {
        print!("{}", listing);
    }
    Ok(())
}

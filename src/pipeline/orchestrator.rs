//! Orchestrator: start the walk and the worker pool, drain outcomes, tear down.

use log::{debug, error};
use std::path::{Path, PathBuf};

use crate::pipeline::{self, CancelSource, WalkError};
use crate::{CoalescerError, FileOutcome, Report, Result};

/// Start the walk + recognition pipeline over `pics_dir`. Returns the result receiver and
/// handles; drain it with [`collect_outcomes`].
pub fn run_pipeline(
    pics_dir: &Path,
    ctx: &pipeline::WorkerContext,
    tuning: pipeline::PipelineTuning,
    exclude_dirs: Vec<PathBuf>,
) -> Result<pipeline::PipelineHandles> {
    let root = pics_dir
        .canonicalize()
        .map_err(|e| CoalescerError::Walk(format!("{}: {e}", pics_dir.display())))?;
    let exclude_dirs = exclude_dirs
        .into_iter()
        .filter_map(|d| d.canonicalize().ok())
        .collect();

    let cancel = CancelSource::new();
    let channels = pipeline::create_pipeline_channels();

    let walk_handle = pipeline::spawn_walk_thread(
        channels.path_tx,
        pipeline::WalkContext { root, exclude_dirs },
        cancel.token(),
    );

    let worker_handles = pipeline::spawn_workers(
        channels.path_rx,
        &channels.result_tx,
        ctx,
        &cancel.token(),
        tuning.num_workers,
    );
    debug!("pipeline: {} workers", tuning.num_workers);

    // Dropping the last sender closes the result stream once every worker exits.
    drop(channels.result_tx);

    Ok(pipeline::PipelineHandles {
        result_rx: channels.result_rx,
        walk_handle,
        worker_handles,
        cancel,
    })
}

/// Main orchestrator: drain every outcome, join the pool, fire cancellation, then read the walk
/// result. A walk I/O failure fails the run even if every file that got through succeeded.
pub fn collect_outcomes<F>(handles: pipeline::PipelineHandles, on_outcome: F) -> Result<Report>
where
    F: FnMut(&FileOutcome),
{
    let pipeline::PipelineHandles {
        result_rx,
        walk_handle,
        worker_handles,
        mut cancel,
    } = handles;

    let report = pipeline::aggregate(&result_rx, on_outcome);
    debug!(
        "main: result stream closed, {} outcomes",
        report.total()
    );

    for h in worker_handles {
        if h.join().is_err() {
            error!("a recognition worker panicked; its current file has no outcome");
        }
    }
    cancel.cancel();

    match walk_handle.join() {
        Err(_) => Err(CoalescerError::Walk("walk thread panicked".to_string())),
        Ok(Err(WalkError::Io(msg))) => Err(CoalescerError::Walk(msg)),
        Ok(Err(WalkError::Canceled)) => {
            debug!("walk ended by cancellation");
            Ok(report)
        }
        Ok(Ok(count)) => {
            debug!("walk handed out {} files", count);
            Ok(report)
        }
    }
}

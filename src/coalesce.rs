//! Run a full sort: validate, probe, scan people, prepare folders, teach, then the pipeline.

use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::engine::validate::validate_opts;
use crate::matching::build_match_config;
use crate::people::{scan_people, teach_people};
use crate::pipeline::{self, PipelineTuning, WorkerContext};
use crate::recognizer::Recognizer;
use crate::utils::config::TEACH_COOLDOWN;
use crate::{CoalescerError, FileOutcome, MatchConfig, Opts, Report, Result};

/// Create every destination folder under `output_dir` before any worker starts. Returns the
/// folders (already existing ones included).
pub fn create_destination_folders(output_dir: &Path, config: &MatchConfig) -> Result<Vec<PathBuf>> {
    config
        .destinations()
        .iter()
        .map(|dest| {
            let dir = output_dir.join(dest.dir_name());
            std::fs::create_dir_all(&dir).map_err(|e| CoalescerError::io(&dir, e))?;
            Ok(dir)
        })
        .collect()
}

/// Sort `opts.pics_dir` into per-person (or combined) folders. Per-file problems land in the
/// returned [`Report`]; setup problems, an unreachable service and walk failures are errors.
pub fn coalesce(opts: &Opts, recognizer: Arc<dyn Recognizer>) -> Result<Report> {
    coalesce_with(opts, recognizer, |_| {})
}

/// [`coalesce`] with a callback run on the caller's thread for each outcome as it arrives.
pub fn coalesce_with<F>(opts: &Opts, recognizer: Arc<dyn Recognizer>, on_outcome: F) -> Result<Report>
where
    F: FnMut(&FileOutcome),
{
    validate_opts(opts)?;

    let service = recognizer.info()?;
    info!(
        "Connected to {} (version {}, build {}, status {})",
        service.name, service.version, service.build, service.status
    );

    let people = scan_people(&opts.people_dir)?;
    if people.is_empty() {
        return Err(CoalescerError::Config(format!(
            "no reference photos in {}",
            opts.people_dir.display()
        )));
    }
    let config = build_match_config(opts, people)?;
    if config.combined_mode() {
        info!(
            "Combined matching: {} -> {}/",
            config.combination.join(", "),
            config.combined_dir_name
        );
    }

    let dest_dirs = create_destination_folders(&opts.output_dir, &config)?;

    teach_people(
        &*recognizer,
        &opts.people_dir,
        &config.people,
        opts.cooldown.then_some(TEACH_COOLDOWN),
    )?;

    info!("Sorting {}...", opts.pics_dir.display());
    let ctx = WorkerContext::new(recognizer, config, &opts.output_dir);
    let handles = pipeline::run_pipeline(
        &opts.pics_dir,
        &ctx,
        PipelineTuning {
            num_workers: opts.num_workers,
        },
        dest_dirs,
    )?;
    drop(ctx);
    pipeline::collect_outcomes(handles, on_outcome)
}

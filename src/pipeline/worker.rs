//! Recognition workers: check each path from the walk, copy matches, report one outcome.

use crossbeam_channel::{Receiver, Sender, select};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crate::engine::tools::sniff_image;
use crate::matching::decide;
use crate::{CoalescerError, Destination, FileOutcome, Result};

use super::cancel::CancelToken;
use super::context::WorkerContext;

/// Single recognition worker: take paths from `path_rx`, check and copy each, send one outcome
/// per path on `result_tx`. Exits when the path stream closes or `cancel` fires; a file whose
/// outcome cannot be sent because of cancellation is dropped without an outcome.
fn worker_loop(
    path_rx: Receiver<PathBuf>,
    result_tx: Sender<FileOutcome>,
    ctx: WorkerContext,
    cancel: CancelToken,
) {
    loop {
        let next = select! {
            recv(path_rx) -> msg => msg.ok(),
            recv(cancel.receiver()) -> _ => None,
        };
        let Some(path) = next else {
            break;
        };
        if cancel.is_cancelled() {
            debug!("worker: canceled before checking {}", path.display());
            break;
        }
        let outcome = match process_file(&path, &ctx) {
            Ok(destinations) => {
                let dirs: Vec<&str> = destinations.iter().map(Destination::dir_name).collect();
                debug!("{} -> {}", path.display(), dirs.join(", "));
                FileOutcome::ok(path)
            }
            Err(e) => FileOutcome::failed(path, e),
        };
        let delivered = select! {
            send(result_tx, outcome) -> res => res.is_ok(),
            recv(cancel.receiver()) -> _ => {
                debug!("worker: canceled with an unsent outcome");
                false
            }
        };
        if !delivered {
            break;
        }
    }
}

/// Spawn `num_workers` workers sharing `path_rx`. Caller must drop its own `result_tx` after
/// this so the result stream closes when the last worker exits.
pub fn spawn_workers(
    path_rx: Receiver<PathBuf>,
    result_tx: &Sender<FileOutcome>,
    ctx: &WorkerContext,
    cancel: &CancelToken,
    num_workers: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_workers)
        .map(|_| {
            let path_rx = path_rx.clone();
            let result_tx = result_tx.clone();
            let ctx = ctx.clone();
            let cancel = cancel.clone();
            thread::spawn(move || worker_loop(path_rx, result_tx, ctx, cancel))
        })
        .collect()
}

/// Read, validate, check, decide, copy. The first error ends the file.
///
/// Copies keep the source file name, so two pictures with the same name landing in one
/// folder overwrite each other; the later copy logs a warning.
pub fn process_file(path: &Path, ctx: &WorkerContext) -> Result<Vec<Destination>> {
    let bytes = std::fs::read(path).map_err(|e| CoalescerError::io(path, e))?;
    if sniff_image(&bytes).is_none() {
        return Err(CoalescerError::UnsupportedFormat(path.to_path_buf()));
    }
    let faces = ctx.recognizer.check(&bytes)?;
    let destinations = decide(&faces, &ctx.config);
    if destinations.is_empty() {
        return Err(CoalescerError::NoMatch);
    }
    let Some(file_name) = path.file_name() else {
        return Err(CoalescerError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        ));
    };
    for dest in &destinations {
        let target = ctx.output_dir.join(dest.dir_name()).join(file_name);
        if !ctx.claim_target(&target) {
            warn!(
                "{} overwrites an earlier copy at {}",
                path.display(),
                target.display()
            );
        }
        std::fs::write(&target, &bytes).map_err(|e| CoalescerError::io(&target, e))?;
    }
    Ok(destinations)
}

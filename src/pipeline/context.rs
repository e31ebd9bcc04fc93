//! Pipeline context: channels, shared read-only worker state, and the handles the caller drains.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::recognizer::Recognizer;
use crate::{FileOutcome, MatchConfig};

use super::cancel::CancelSource;
use super::walk::WalkResult;

/// Worker pool sizing.
#[derive(Clone, Copy, Debug)]
pub struct PipelineTuning {
    pub num_workers: usize,
}

/// Everything a worker reads while processing files. Cloning shares, never copies.
#[derive(Clone)]
pub struct WorkerContext {
    pub recognizer: Arc<dyn Recognizer>,
    pub config: Arc<MatchConfig>,
    pub output_dir: Arc<PathBuf>,
    /// Copy targets written so far in this run.
    written: Arc<Mutex<HashSet<PathBuf>>>,
}

impl WorkerContext {
    pub fn new(recognizer: Arc<dyn Recognizer>, config: MatchConfig, output_dir: &Path) -> Self {
        Self {
            recognizer,
            config: Arc::new(config),
            output_dir: Arc::new(output_dir.to_path_buf()),
            written: Arc::default(),
        }
    }

    /// Record `target` as written in this run. False if another file already claimed it.
    pub fn claim_target(&self, target: &Path) -> bool {
        match self.written.lock() {
            Ok(mut written) => written.insert(target.to_path_buf()),
            Err(_) => true,
        }
    }
}

/// Shared context for the walk thread: the root to walk and the folders to prune from it.
pub struct WalkContext {
    pub root: PathBuf,
    /// Destination folders, pruned so copies are never fed back into the pipeline.
    pub exclude_dirs: Vec<PathBuf>,
}

/// Handles returned by [`run_pipeline`](super::run_pipeline): receive outcomes, then join.
/// Dropping `cancel` fires the signal, so keep it until the threads are joined.
pub struct PipelineHandles {
    pub result_rx: Receiver<FileOutcome>,
    pub walk_handle: JoinHandle<WalkResult>,
    pub worker_handles: Vec<JoinHandle<()>>,
    pub cancel: CancelSource,
}

/// Path stream (walker → workers) and result stream (workers → aggregator). Both are rendezvous
/// channels: a slow aggregator throttles the workers, a busy pool throttles the walk.
pub struct PipelineChannels {
    pub path_tx: Sender<PathBuf>,
    pub path_rx: Receiver<PathBuf>,
    pub result_tx: Sender<FileOutcome>,
    pub result_rx: Receiver<FileOutcome>,
}

pub fn create_pipeline_channels() -> PipelineChannels {
    let (path_tx, path_rx) = bounded::<PathBuf>(0);
    let (result_tx, result_rx) = bounded::<FileOutcome>(0);
    PipelineChannels {
        path_tx,
        path_rx,
        result_tx,
        result_rx,
    }
}

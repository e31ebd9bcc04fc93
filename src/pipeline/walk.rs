//! Walk loop: consumes an iterator of files / errors and hands each file to the pool.

use crossbeam_channel::{Sender, select};
use log::debug;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use walkdir::WalkDir;

use super::cancel::CancelToken;
use super::context::WalkContext;

/// One result from a directory walk: a regular file, or the error that ends the walk.
pub enum WalkOutcome {
    File(PathBuf),
    Err { msg: String, path: Option<PathBuf> },
}

/// Why a walk stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    /// The cancel signal fired or every worker went away.
    Canceled,
    Io(String),
}

/// Files handed to the pool, or why the walk stopped.
pub type WalkResult = Result<usize, WalkError>;

/// Convert a walkdir result into [`WalkOutcome`]; directories and other non-regular entries yield `None`.
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> Option<WalkOutcome> {
    match r {
        Ok(entry) if entry.file_type().is_file() => Some(WalkOutcome::File(entry.into_path())),
        Ok(_) => None,
        Err(err) => Some(WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        }),
    }
}

/// Returns false for anything under one of `exclude_dirs`.
pub fn should_include_in_walk(path: &Path, exclude_dirs: &[PathBuf]) -> bool {
    !exclude_dirs.iter().any(|dir| path.starts_with(dir))
}

fn walkdir_iter(ctx: WalkContext) -> impl Iterator<Item = WalkOutcome> {
    let WalkContext { root, exclude_dirs } = ctx;
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(move |entry| should_include_in_walk(entry.path(), &exclude_dirs))
        .filter_map(to_outcome_walkdir)
}

pub fn spawn_walk_thread(
    path_tx: Sender<PathBuf>,
    ctx: WalkContext,
    cancel: CancelToken,
) -> JoinHandle<WalkResult> {
    thread::spawn(move || run_walk_loop(path_tx, walkdir_iter(ctx), &cancel))
}

/// Send every file from `iter` to `path_tx`, one at a time, until the iterator ends, an error
/// shows up (terminal), or `cancel` fires. Drops `path_tx` on return so workers see the close.
pub fn run_walk_loop<I>(path_tx: Sender<PathBuf>, iter: I, cancel: &CancelToken) -> WalkResult
where
    I: Iterator<Item = WalkOutcome>,
{
    let mut count = 0_usize;
    for outcome in iter {
        match outcome {
            WalkOutcome::File(path) => {
                let sent = select! {
                    send(path_tx, path) -> res => res.is_ok(),
                    recv(cancel.receiver()) -> _ => false,
                };
                if !sent {
                    debug!("walk: stopped after {} files", count);
                    return Err(WalkError::Canceled);
                }
                count += 1;
            }
            WalkOutcome::Err { msg, path } => {
                let msg = match path {
                    Some(p) => format!("{} ({})", msg, p.display()),
                    None => msg,
                };
                return Err(WalkError::Io(msg));
            }
        }
    }
    debug!("walk: done, {} files", count);
    Ok(count)
}

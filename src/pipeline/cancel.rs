//! One-shot cancellation broadcast built on a channel that is never sent on, only closed.
//!
//! Dropping the sender disconnects every receiver at once, so a token can sit in a
//! `select!` next to a send or receive and wake it. Once fired it stays fired.

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};
use log::debug;

/// Owner side. Fires on [`cancel`](Self::cancel) or when dropped.
pub struct CancelSource {
    tx: Option<Sender<()>>,
    rx: Receiver<()>,
}

impl CancelSource {
    pub fn new() -> Self {
        let (tx, rx) = bounded(0);
        Self { tx: Some(tx), rx }
    }

    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.rx.clone(),
        }
    }

    /// Fire the signal. Later calls do nothing.
    pub fn cancel(&mut self) {
        if self.tx.take().is_some() {
            debug!("cancellation fired");
        }
    }
}

impl Default for CancelSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side, cloned into the walker and every worker.
#[derive(Clone)]
pub struct CancelToken {
    rx: Receiver<()>,
}

impl CancelToken {
    /// Non-blocking poll.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Becomes ready (with an error) once cancelled; use as a `recv` arm in `select!`.
    pub fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }
}

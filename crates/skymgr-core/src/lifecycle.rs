// ── Operation release-list ──
//
// Every asynchronous operation a panel starts is registered here. On
// teardown the group cancels and aborts all of them, so results that
// arrive late never reach a destroyed panel.

use std::future::Future;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Default)]
pub struct OperationGroup {
    cancel: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl OperationGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `operation` as a task owned by this group.
    ///
    /// The receiver yields the result, or an error if the group was
    /// released first. Operations spawned after release never run.
    pub fn spawn<F>(&mut self, operation: F) -> oneshot::Receiver<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handles.retain(|handle| !handle.is_finished());

        let (tx, rx) = oneshot::channel();
        let cancel = self.cancel.clone();
        self.handles.push(tokio::spawn(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {}
                output = operation => {
                    let _ = tx.send(output);
                }
            }
        }));
        rx
    }

    /// Operations that have not finished yet.
    pub fn pending(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn is_released(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel and abort every registered operation.
    pub fn release(&mut self) {
        if !self.cancel.is_cancelled() {
            debug!(operations = self.handles.len(), "releasing operation group");
        }
        self.cancel.cancel();
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for OperationGroup {
    fn drop(&mut self) {
        self.release();
    }
}

// ── Batch command sequencer ──
//
// Applies one mutating operation to a list of keys, strictly one call in
// flight at a time. The first failure aborts the rest. Every run that
// reaches the remote side (or finds nothing to do) ends with a
// settle-then-refresh of the owning page.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::collaborators::{Collaborators, Confirmation};
use super::translate::TranslatedError;
use crate::error::CoreError;

/// Header shown in a confirmation dialog when a step fails.
pub const ERROR_HEADER_KEY: &str = "confirmation.error-header-text";

/// Observable progress of the current (or last) batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BatchState {
    #[default]
    Idle,
    Confirming,
    Processing {
        remaining: usize,
    },
    Cancelled,
    /// Nothing needed to change.
    Unnecessary,
    StepFailed {
        key: String,
    },
    AllSucceeded {
        processed: usize,
    },
}

/// How a batch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Declined at the confirmation step. Nothing was sent.
    Cancelled,
    /// No key needed the operation.
    Unnecessary,
    Succeeded {
        processed: usize,
    },
    /// `key` failed after `processed` earlier keys went through.
    Failed {
        key: String,
        processed: usize,
        error: TranslatedError,
    },
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Notification keys for one kind of batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchMessages {
    pub done_key: &'static str,
    pub unnecessary_key: &'static str,
}

#[derive(Clone)]
pub struct BatchSequencer {
    collaborators: Collaborators,
    settle_delay: Duration,
    state: Arc<watch::Sender<BatchState>>,
}

impl BatchSequencer {
    pub fn new(collaborators: Collaborators, settle_delay: Duration) -> Self {
        let (state, _) = watch::channel(BatchState::Idle);
        Self {
            collaborators,
            settle_delay,
            state: Arc::new(state),
        }
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn state(&self) -> BatchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BatchState> {
        self.state.subscribe()
    }

    /// Ask for confirmation (when `confirm_key` is set), then run.
    ///
    /// Declining returns [`BatchOutcome::Cancelled`] without calling `op`
    /// or refreshing the page.
    pub async fn confirm_and_run<F, Fut>(
        &self,
        confirm_key: Option<&str>,
        keys: Vec<String>,
        messages: BatchMessages,
        op: F,
    ) -> BatchOutcome
    where
        F: FnMut(String) -> Fut + Send,
        Fut: Future<Output = Result<(), CoreError>> + Send,
    {
        let confirmation = match confirm_key {
            Some(text_key) => {
                self.publish(BatchState::Confirming);
                let dialog = self.collaborators.dialogs.confirm(text_key);
                if !dialog.accepted().await {
                    debug!(text_key, "batch declined");
                    self.publish(BatchState::Cancelled);
                    return BatchOutcome::Cancelled;
                }
                dialog.show_processing();
                Some(dialog)
            }
            None => None,
        };

        self.run(confirmation, keys, messages, op).await
    }

    /// Run `op` over `keys` in submission order.
    pub async fn run<F, Fut>(
        &self,
        confirmation: Option<Box<dyn Confirmation>>,
        keys: Vec<String>,
        messages: BatchMessages,
        mut op: F,
    ) -> BatchOutcome
    where
        F: FnMut(String) -> Fut + Send,
        Fut: Future<Output = Result<(), CoreError>> + Send,
    {
        let mut pending: VecDeque<String> = keys.into();

        if pending.is_empty() {
            debug!("batch has no targets");
            self.collaborators
                .notifier
                .show_warning(messages.unnecessary_key);
            if let Some(dialog) = &confirmation {
                dialog.close();
            }
            self.publish(BatchState::Unnecessary);
            self.settle_then_refresh().await;
            return BatchOutcome::Unnecessary;
        }

        let mut processed = 0;
        while let Some(key) = pending.pop_front() {
            self.publish(BatchState::Processing {
                remaining: pending.len() + 1,
            });
            debug!(key = %key, remaining = pending.len(), "batch step");

            if let Err(err) = op(key.clone()).await {
                let error = self.collaborators.translator.translate(&err);
                warn!(key = %key, processed, error = %err, "batch step failed");

                match &confirmation {
                    Some(dialog) => dialog.show_done(ERROR_HEADER_KEY, &error.translatable_msg),
                    None => self
                        .collaborators
                        .notifier
                        .show_error(&error.translatable_msg),
                }
                self.publish(BatchState::StepFailed { key: key.clone() });
                self.settle_then_refresh().await;
                return BatchOutcome::Failed {
                    key,
                    processed,
                    error,
                };
            }
            processed += 1;
        }

        info!(processed, "batch completed");
        if let Some(dialog) = &confirmation {
            dialog.close();
        }
        self.collaborators.notifier.show_done(messages.done_key);
        self.publish(BatchState::AllSucceeded { processed });
        self.settle_then_refresh().await;
        BatchOutcome::Succeeded { processed }
    }

    /// Wait for the visor to apply the change, then reload the page.
    pub async fn settle_then_refresh(&self) {
        tokio::time::sleep(self.settle_delay).await;
        self.collaborators.page.refresh_displayed_data();
    }

    fn publish(&self, state: BatchState) {
        self.state.send_replace(state);
    }
}

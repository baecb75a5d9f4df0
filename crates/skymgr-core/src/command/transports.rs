// ── Transport commands ──

use std::sync::Arc;

use super::StepFuture;
use super::batch::{BatchMessages, BatchOutcome, BatchSequencer};

const MESSAGES: BatchMessages = BatchMessages {
    done_key: "transports.deleted",
    unnecessary_key: "transports.operation-unnecessary",
};

#[derive(Clone)]
pub struct TransportCommands {
    sequencer: BatchSequencer,
}

impl TransportCommands {
    pub fn new(sequencer: BatchSequencer) -> Self {
        Self { sequencer }
    }

    pub fn sequencer(&self) -> &BatchSequencer {
        &self.sequencer
    }

    /// Delete every selected transport, after confirmation.
    pub async fn delete_selected(&self, ids: Vec<String>) -> BatchOutcome {
        self.sequencer
            .confirm_and_run(
                Some("transports.delete-selected-confirmation"),
                ids,
                MESSAGES,
                self.delete_step(),
            )
            .await
    }

    /// Delete one transport, after confirmation.
    pub async fn delete(&self, id: &str) -> BatchOutcome {
        self.sequencer
            .confirm_and_run(
                Some("transports.delete-confirmation"),
                vec![id.to_owned()],
                MESSAGES,
                self.delete_step(),
            )
            .await
    }

    fn delete_step(&self) -> impl FnMut(String) -> StepFuture + Send {
        let remote = Arc::clone(&self.sequencer.collaborators().remote);
        let page = Arc::clone(&self.sequencer.collaborators().page);
        move |id: String| -> StepFuture {
            let remote = Arc::clone(&remote);
            let device = page.current_device_key();
            Box::pin(async move { remote.delete_transport(&device, &id).await })
        }
    }
}

//! Shared helpers for command handlers.

use tokio::sync::oneshot;

use skymgr_core::{BatchOutcome, ListEntity, ListView};

use crate::error::CliError;
use crate::messages::text;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Check the given keys in `view`. Every key must be on the visible page.
pub fn select_keys<E: ListEntity>(
    view: &mut ListView<E>,
    keys: &[String],
    resource_type: &str,
    list_command: &str,
) -> Result<(), CliError> {
    for key in keys {
        if !view.set_selected(key, true) {
            return Err(CliError::NotFound {
                resource_type: resource_type.into(),
                identifier: key.clone(),
                list_command: list_command.into(),
            });
        }
    }
    Ok(())
}

/// Wait for a panel operation and turn its outcome into a CLI result.
pub async fn finish(pending: oneshot::Receiver<BatchOutcome>) -> Result<BatchOutcome, CliError> {
    let outcome = pending
        .await
        .map_err(|_| CliError::Internal("operation was released before completing".into()))?;
    report(outcome)
}

/// Turn a batch outcome into a CLI result.
pub fn report(outcome: BatchOutcome) -> Result<BatchOutcome, CliError> {
    match outcome {
        BatchOutcome::Failed {
            key,
            processed,
            error,
        } => Err(CliError::CommandFailed {
            key,
            message: text(&error.translatable_msg).to_owned(),
            processed,
        }),
        BatchOutcome::Cancelled => {
            eprintln!("Cancelled.");
            Ok(BatchOutcome::Cancelled)
        }
        other => Ok(other),
    }
}

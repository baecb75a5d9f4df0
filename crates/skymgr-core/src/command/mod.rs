// ── Commands ──
//
// Mutating operations on visor apps and transports, sequenced through
// the batch engine and reported through the collaborator seams.

pub mod apps;
pub mod batch;
pub mod collaborators;
pub mod hypervisor;
pub mod logs;
pub mod transports;
pub mod translate;

use std::future::Future;
use std::pin::Pin;

use crate::error::CoreError;

pub use apps::AppCommands;
pub use logs::{LOG_EPOCH, LogReader};
pub use transports::TransportCommands;

/// One remote call of a batch.
pub(crate) type StepFuture = Pin<Box<dyn Future<Output = Result<(), CoreError>> + Send>>;

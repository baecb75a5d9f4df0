// ── Collaborator seams ──
//
// Everything the engine talks to but does not own: the remote command
// service, dialogs, notifications and the page that owns the data.
// Front ends (the CLI, tests) provide the implementations.

use std::sync::Arc;

use async_trait::async_trait;

use super::translate::ErrorTranslator;
use crate::error::CoreError;
use crate::model::{AppLogBatch, AppSettings};

/// Mutating calls against a visor.
#[async_trait]
pub trait RemoteCommandService: Send + Sync {
    async fn set_run_state(
        &self,
        device_key: &str,
        app_name: &str,
        running: bool,
    ) -> Result<(), CoreError>;

    async fn set_autostart(
        &self,
        device_key: &str,
        app_name: &str,
        autostart: bool,
    ) -> Result<(), CoreError>;

    async fn delete_transport(&self, device_key: &str, transport_id: &str)
    -> Result<(), CoreError>;

    async fn apply_settings(
        &self,
        device_key: &str,
        app_name: &str,
        settings: &AppSettings,
    ) -> Result<(), CoreError>;
}

/// Reads the log of an app running on a visor.
#[async_trait]
pub trait AppLogSource: Send + Sync {
    /// Lines logged after `since` (RFC 3339).
    async fn logs_since(
        &self,
        device_key: &str,
        app_name: &str,
        since: &str,
    ) -> Result<AppLogBatch, CoreError>;
}

/// Fetches the authoritative list of one entity type.
#[async_trait]
pub trait CollectionSource<E>: Send + Sync {
    async fn fetch(&self, device_key: &str) -> Result<Vec<E>, CoreError>;
}

/// An open confirmation dialog.
#[async_trait]
pub trait Confirmation: Send + Sync {
    /// Resolves `true` when the user accepts, `false` when they cancel.
    async fn accepted(&self) -> bool;

    /// Switch the dialog into its busy state.
    fn show_processing(&self);

    /// Replace the dialog content with a final message.
    fn show_done(&self, header_key: &str, message: &str);

    fn close(&self);
}

/// Opens confirmation dialogs.
pub trait Dialogs: Send + Sync {
    fn confirm(&self, text_key: &str) -> Box<dyn Confirmation>;
}

/// Fire-and-forget notifications.
pub trait Notifier: Send + Sync {
    fn show_done(&self, key: &str);
    fn show_error(&self, message: &str);
    fn show_warning(&self, key: &str);
}

/// The page that owns the collections.
pub trait OwningPage: Send + Sync {
    /// Ask for the displayed data to be reloaded from the visor.
    fn refresh_displayed_data(&self);

    /// Public key of the visor being shown.
    fn current_device_key(&self) -> String;
}

/// Bundle of collaborators handed to command objects.
#[derive(Clone)]
pub struct Collaborators {
    pub remote: Arc<dyn RemoteCommandService>,
    pub translator: Arc<dyn ErrorTranslator>,
    pub dialogs: Arc<dyn Dialogs>,
    pub notifier: Arc<dyn Notifier>,
    pub page: Arc<dyn OwningPage>,
}

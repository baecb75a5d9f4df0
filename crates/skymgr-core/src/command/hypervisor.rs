// ── Hypervisor-backed collaborators ──
//
// Adapts `skymgr_api::HypervisorClient` to the command and collection
// seams, converting wire types and errors on the way.

use std::sync::Arc;

use async_trait::async_trait;
use skymgr_api::HypervisorClient;
use tracing::debug;

use super::collaborators::{AppLogSource, CollectionSource, RemoteCommandService};
use crate::error::CoreError;
use crate::model::{AppLogBatch, AppSettings, Application, Transport};

#[derive(Clone)]
pub struct HypervisorCommands {
    client: Arc<HypervisorClient>,
}

impl HypervisorCommands {
    pub fn new(client: Arc<HypervisorClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &HypervisorClient {
        &self.client
    }
}

#[async_trait]
impl RemoteCommandService for HypervisorCommands {
    async fn set_run_state(
        &self,
        device_key: &str,
        app_name: &str,
        running: bool,
    ) -> Result<(), CoreError> {
        debug!(device_key, app_name, running, "setting app run state");
        Ok(self
            .client
            .set_app_status(device_key, app_name, running)
            .await?)
    }

    async fn set_autostart(
        &self,
        device_key: &str,
        app_name: &str,
        autostart: bool,
    ) -> Result<(), CoreError> {
        debug!(device_key, app_name, autostart, "setting app autostart");
        Ok(self
            .client
            .set_app_autostart(device_key, app_name, autostart)
            .await?)
    }

    async fn delete_transport(
        &self,
        device_key: &str,
        transport_id: &str,
    ) -> Result<(), CoreError> {
        debug!(device_key, transport_id, "deleting transport");
        Ok(self.client.delete_transport(device_key, transport_id).await?)
    }

    async fn apply_settings(
        &self,
        device_key: &str,
        app_name: &str,
        settings: &AppSettings,
    ) -> Result<(), CoreError> {
        debug!(device_key, app_name, "saving app settings");
        match settings {
            AppSettings::Passcode(passcode) => {
                self.client
                    .set_app_passcode(device_key, app_name, passcode)
                    .await?;
            }
            AppSettings::RemotePk(pk) => {
                self.client
                    .set_app_remote_pk(device_key, app_name, pk)
                    .await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AppLogSource for HypervisorCommands {
    async fn logs_since(
        &self,
        device_key: &str,
        app_name: &str,
        since: &str,
    ) -> Result<AppLogBatch, CoreError> {
        let raw = self.client.app_logs_since(device_key, app_name, since).await?;
        Ok(AppLogBatch::from(raw))
    }
}

#[async_trait]
impl CollectionSource<Application> for HypervisorCommands {
    async fn fetch(&self, device_key: &str) -> Result<Vec<Application>, CoreError> {
        let raw = self.client.list_apps(device_key).await?;
        Ok(raw.into_iter().map(Application::from).collect())
    }
}

#[async_trait]
impl CollectionSource<Transport> for HypervisorCommands {
    async fn fetch(&self, device_key: &str) -> Result<Vec<Transport>, CoreError> {
        let raw = self.client.list_transports(device_key).await?;
        Ok(raw.into_iter().map(Transport::from).collect())
    }
}

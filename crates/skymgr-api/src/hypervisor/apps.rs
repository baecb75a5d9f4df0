// Hypervisor app endpoints
//
// Listing and state changes for the applications of one visor.

use tracing::debug;

use crate::error::Error;
use crate::hypervisor::client::HypervisorClient;
use crate::hypervisor::models::{AppLogs, AppState, AppUpdateRequest};

impl HypervisorClient {
    /// List the applications of a visor.
    ///
    /// `GET /api/visors/{pk}/apps`
    pub async fn list_apps(&self, visor_pk: &str) -> Result<Vec<AppState>, Error> {
        let url = self.visor_url(visor_pk, &["apps"])?;
        debug!(visor = visor_pk, "listing apps");
        let apps: Option<Vec<AppState>> = self.get(url).await?;
        Ok(apps.unwrap_or_default())
    }

    /// Start or stop an application.
    ///
    /// `PUT /api/visors/{pk}/apps/{name}` with `{"status": 1}` or `{"status": 0}`
    pub async fn set_app_status(
        &self,
        visor_pk: &str,
        app_name: &str,
        running: bool,
    ) -> Result<(), Error> {
        let url = self.visor_url(visor_pk, &["apps", app_name])?;
        debug!(visor = visor_pk, app = app_name, running, "changing app state");
        let body = AppUpdateRequest {
            status: Some(u8::from(running)),
            ..AppUpdateRequest::default()
        };
        self.put(url, &body).await
    }

    /// Enable or disable autostart for an application.
    ///
    /// `PUT /api/visors/{pk}/apps/{name}` with `{"autostart": bool}`
    pub async fn set_app_autostart(
        &self,
        visor_pk: &str,
        app_name: &str,
        autostart: bool,
    ) -> Result<(), Error> {
        let url = self.visor_url(visor_pk, &["apps", app_name])?;
        debug!(visor = visor_pk, app = app_name, autostart, "changing app autostart");
        let body = AppUpdateRequest {
            autostart: Some(autostart),
            ..AppUpdateRequest::default()
        };
        self.put(url, &body).await
    }

    /// Set the proxy password of `skysocks`. An empty passcode removes it.
    ///
    /// `PUT /api/visors/{pk}/apps/{name}` with `{"passcode": "..."}`
    pub async fn set_app_passcode(
        &self,
        visor_pk: &str,
        app_name: &str,
        passcode: &str,
    ) -> Result<(), Error> {
        let url = self.visor_url(visor_pk, &["apps", app_name])?;
        debug!(visor = visor_pk, app = app_name, "changing app passcode");
        let body = AppUpdateRequest {
            passcode: Some(passcode.to_owned()),
            ..AppUpdateRequest::default()
        };
        self.put(url, &body).await
    }

    /// Point `skysocks-client` at another proxy server.
    ///
    /// `PUT /api/visors/{pk}/apps/{name}` with `{"pk": "..."}`
    pub async fn set_app_remote_pk(
        &self,
        visor_pk: &str,
        app_name: &str,
        remote_pk: &str,
    ) -> Result<(), Error> {
        let url = self.visor_url(visor_pk, &["apps", app_name])?;
        debug!(visor = visor_pk, app = app_name, remote_pk, "changing app server key");
        let body = AppUpdateRequest {
            pk: Some(remote_pk.to_owned()),
            ..AppUpdateRequest::default()
        };
        self.put(url, &body).await
    }

    /// Log lines written by an app after `since` (RFC 3339).
    ///
    /// `GET /api/visors/{pk}/apps/{name}/logs?since=...`
    pub async fn app_logs_since(
        &self,
        visor_pk: &str,
        app_name: &str,
        since: &str,
    ) -> Result<AppLogs, Error> {
        let mut url = self.visor_url(visor_pk, &["apps", app_name, "logs"])?;
        url.query_pairs_mut().append_pair("since", since);
        debug!(visor = visor_pk, app = app_name, since, "fetching app logs");
        self.get(url).await
    }
}

// Hypervisor transport endpoints

use tracing::debug;

use crate::error::Error;
use crate::hypervisor::client::HypervisorClient;
use crate::hypervisor::models::TransportSummary;

impl HypervisorClient {
    /// List the transports of a visor, including their byte counters.
    ///
    /// `GET /api/visors/{pk}/transports`
    pub async fn list_transports(&self, visor_pk: &str) -> Result<Vec<TransportSummary>, Error> {
        let url = self.visor_url(visor_pk, &["transports"])?;
        debug!(visor = visor_pk, "listing transports");
        let transports: Option<Vec<TransportSummary>> = self.get(url).await?;
        Ok(transports.unwrap_or_default())
    }

    /// Delete a transport.
    ///
    /// `DELETE /api/visors/{pk}/transports/{tid}`
    pub async fn delete_transport(&self, visor_pk: &str, transport_id: &str) -> Result<(), Error> {
        let url = self.visor_url(visor_pk, &["transports", transport_id])?;
        debug!(visor = visor_pk, transport = transport_id, "deleting transport");
        self.delete(url).await
    }
}

// Hypervisor HTTP client
//
// Wraps `reqwest::Client` with visor-scoped URL construction and
// error-body parsing. Endpoint groups (apps, transports) are implemented
// as inherent methods in separate files.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Longest body excerpt carried in error messages.
const BODY_PREVIEW_CHARS: usize = 200;

/// The hypervisor reports failures as `{"error": "..."}`.
#[derive(serde::Deserialize)]
struct HypervisorErrorBody {
    error: Option<String>,
}

/// Raw HTTP client for a skywire hypervisor.
///
/// Every endpoint is scoped to a visor public key:
/// `{base}/api/visors/{pk}/...`. Methods return decoded payloads; mutating
/// calls resolve to `()` on success.
pub struct HypervisorClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HypervisorClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the hypervisor root, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The hypervisor base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/visors/{pk}/{segments...}`.
    ///
    /// Segments are percent-encoded individually, so app names and
    /// transport ids never alter the path structure.
    pub(crate) fn visor_url(&self, visor_pk: &str, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["api", "visors", visor_pk])
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }

    /// Send a PUT request with a JSON body, discarding the response payload.
    pub(crate) async fn put(&self, url: Url, body: &(impl Serialize + Sync)) -> Result<(), Error> {
        debug!("PUT {}", url);

        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check_status(resp).await?;
        Ok(())
    }

    /// Send a DELETE request, discarding the response payload.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);

        let resp = self.http.delete(url).send().await.map_err(Error::Transport)?;
        Self::check_status(resp).await?;
        Ok(())
    }

    /// Turn any non-2xx response into `Error::Hypervisor`, preferring the
    /// message from the `{"error": "..."}` body.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        trace!(status = status.as_u16(), body = %preview(&body), "hypervisor rejected request");

        let message = serde_json::from_str::<HypervisorErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_owned()
                } else {
                    preview(&body)
                }
            });

        Err(Error::Hypervisor {
            status: status.as_u16(),
            message,
        })
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

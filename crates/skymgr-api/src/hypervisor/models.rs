// ── Hypervisor wire types ──
//
// Mirrors the JSON the hypervisor serves. Kept loose (`#[serde(default)]`)
// because older visors omit fields.

use serde::{Deserialize, Serialize};

/// An application as reported by `GET /api/visors/{pk}/apps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub name: String,
    #[serde(default)]
    pub autostart: bool,
    #[serde(default)]
    pub port: u16,
    /// 0 = stopped, 1 = running; other values are reserved by the visor.
    #[serde(default)]
    pub status: u8,
}

/// A transport as reported by `GET /api/visors/{pk}/transports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportSummary {
    pub id: String,
    #[serde(default)]
    pub local_pk: String,
    #[serde(default)]
    pub remote_pk: String,
    #[serde(rename = "type", default)]
    pub transport_type: String,
    #[serde(default)]
    pub is_up: bool,
    #[serde(default)]
    pub log: Option<TransportLogEntry>,
}

/// Cumulative byte counters of a transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportLogEntry {
    #[serde(default)]
    pub recv: u64,
    #[serde(default)]
    pub sent: u64,
}

/// Log lines of an app, as served by `GET /api/visors/{pk}/apps/{name}/logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppLogs {
    /// RFC 3339 timestamp of the newest line; pass it back as `since`.
    #[serde(default)]
    pub last_log_timestamp: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub logs: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `PUT /api/visors/{pk}/apps/{name}`. Only the set field is sent.
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct AppUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autostart: Option<bool>,
    /// Proxy password of `skysocks`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passcode: Option<String>,
    /// Server public key of `skysocks-client`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pk: Option<String>,
}

// ── Transport domain type ──

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

use super::entity::ListEntity;

/// Cumulative byte counters of a transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportLog {
    pub sent: u64,
    pub recv: u64,
}

/// A transport between the visor and a remote peer. Keyed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transport {
    pub id: String,
    pub local_pk: String,
    pub remote_pk: String,
    pub transport_type: String,
    pub is_up: bool,
    pub log: TransportLog,
}

/// Sortable columns of the transport list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TransportColumn {
    #[strum(serialize = "state", serialize = "status")]
    State,
    #[default]
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "remote", serialize = "remote-pk")]
    RemotePk,
    #[strum(serialize = "type")]
    Type,
    #[strum(serialize = "uploaded", serialize = "sent")]
    Uploaded,
    #[strum(serialize = "downloaded", serialize = "recv")]
    Downloaded,
}

impl TransportColumn {
    /// Translation key of the column header.
    pub fn label(self) -> &'static str {
        match self {
            Self::State => "transports.state",
            Self::Id => "transports.id",
            Self::RemotePk => "transports.remote",
            Self::Type => "transports.type",
            Self::Uploaded => "common.uploaded",
            Self::Downloaded => "common.downloaded",
        }
    }

    /// Name accepted on the command line.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Id => "id",
            Self::RemotePk => "remote",
            Self::Type => "type",
            Self::Uploaded => "uploaded",
            Self::Downloaded => "downloaded",
        }
    }
}

impl ListEntity for Transport {
    type Column = TransportColumn;

    fn key(&self) -> &str {
        &self.id
    }

    fn compare_by(&self, other: &Self, column: TransportColumn) -> Ordering {
        match column {
            TransportColumn::Id => self.id.cmp(&other.id),
            // Up before down.
            TransportColumn::State => other.is_up.cmp(&self.is_up),
            TransportColumn::RemotePk => self.remote_pk.cmp(&other.remote_pk),
            TransportColumn::Type => self.transport_type.cmp(&other.transport_type),
            TransportColumn::Uploaded => other.log.sent.cmp(&self.log.sent),
            TransportColumn::Downloaded => other.log.recv.cmp(&self.log.recv),
        }
    }
}

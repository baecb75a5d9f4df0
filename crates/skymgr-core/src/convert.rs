// ── API-to-domain type conversions ──
//
// Bridges raw `skymgr_api` wire types into `skymgr_core::model` domain
// types. Missing counters default to zero.

use skymgr_api::{AppLogs, AppState, TransportLogEntry, TransportSummary};

use crate::model::{AppLogBatch, AppStatus, Application, Transport, TransportLog};

impl From<AppState> for Application {
    fn from(raw: AppState) -> Self {
        Self {
            name: raw.name,
            status: AppStatus::from(raw.status),
            autostart: raw.autostart,
            port: raw.port,
        }
    }
}

impl From<AppLogs> for AppLogBatch {
    fn from(raw: AppLogs) -> Self {
        Self {
            last_timestamp: raw.last_log_timestamp,
            lines: raw.logs,
        }
    }
}

impl From<TransportLogEntry> for TransportLog {
    fn from(raw: TransportLogEntry) -> Self {
        Self {
            sent: raw.sent,
            recv: raw.recv,
        }
    }
}

impl From<TransportSummary> for Transport {
    fn from(raw: TransportSummary) -> Self {
        Self {
            id: raw.id,
            local_pk: raw.local_pk,
            remote_pk: raw.remote_pk,
            transport_type: raw.transport_type,
            is_up: raw.is_up,
            log: raw.log.map(TransportLog::from).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_status_is_decoded() {
        let app = Application::from(AppState {
            name: "skychat".into(),
            autostart: true,
            port: 1,
            status: 1,
        });
        assert!(app.is_running());
        assert!(app.autostart);
    }

    #[test]
    fn missing_transport_log_is_zeroed() {
        let tp = Transport::from(TransportSummary {
            id: "t1".into(),
            local_pk: "02a".into(),
            remote_pk: "03b".into(),
            transport_type: "stcp".into(),
            is_up: false,
            log: None,
        });
        assert_eq!(tp.log, TransportLog::default());
    }
}

// ── Core error types ──
//
// User-facing errors from skymgr-core. These are NOT API-specific --
// consumers never see reqwest errors or JSON parse failures directly.
// The `From<skymgr_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach hypervisor at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Hypervisor request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation rejected by visor: {message}")]
    Remote {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` when the hypervisor could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. } | Self::Timeout { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<skymgr_api::Error> for CoreError {
    fn from(err: skymgr_api::Error) -> Self {
        match err {
            skymgr_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Remote {
                        status: err.status(),
                        message: e.to_string(),
                    }
                }
            }
            skymgr_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            skymgr_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            skymgr_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            skymgr_api::Error::Hypervisor { status, message } => CoreError::Remote {
                message,
                status: Some(status),
            },
            skymgr_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hypervisor_rejection_keeps_message_and_status() {
        let err = CoreError::from(skymgr_api::Error::Hypervisor {
            status: 500,
            message: "app not running".into(),
        });
        match err {
            CoreError::Remote { message, status } => {
                assert_eq!(message, "app not running");
                assert_eq!(status, Some(500));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn hypervisor_404_keeps_visor_message() {
        let err = CoreError::from(skymgr_api::Error::Hypervisor {
            status: 404,
            message: "transport not found".into(),
        });
        match err {
            CoreError::Remote { message, status } => {
                assert_eq!(message, "transport not found");
                assert_eq!(status, Some(404));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn timeout_is_connectivity() {
        let err = CoreError::from(skymgr_api::Error::Timeout { timeout_secs: 30 });
        assert!(err.is_connectivity());
    }
}

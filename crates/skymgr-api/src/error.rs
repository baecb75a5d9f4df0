use thiserror::Error;

/// Top-level error type for the `skymgr-api` crate.
///
/// Covers every failure mode of the hypervisor REST surface: transport,
/// structured hypervisor rejections, and payload decoding.
/// `skymgr-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Hypervisor ──────────────────────────────────────────────────
    /// Non-success response, parsed from the `{"error": "..."}` body when present.
    #[error("Hypervisor error (HTTP {status}): {message}")]
    Hypervisor { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Hypervisor { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hypervisor_rejection_carries_status() {
        let err = Error::Hypervisor {
            status: 404,
            message: "transport not found".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "Hypervisor error (HTTP 404): transport not found"
        );
    }

    #[test]
    fn local_failures_have_no_status() {
        assert_eq!(Error::Timeout { timeout_secs: 5 }.status(), None);
        assert_eq!(Error::Tls("bad pem".into()).status(), None);
    }
}

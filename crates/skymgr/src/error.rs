//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use skymgr_config::ConfigError;
use skymgr_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to hypervisor at {url}")]
    #[diagnostic(
        code(skymgr::connection_failed),
        help(
            "Check that the hypervisor is running and accessible.\n\
             URL: {url}\n\
             Try: skymgr --hypervisor http://127.0.0.1:8000 apps list"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(skymgr::timeout),
        help("Increase timeout with --timeout or check hypervisor responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(skymgr::not_found),
        help(
            "Run: skymgr {list_command} to see the {resource_type}s on this page.\n\
             Use --full or --page to reach other pages."
        )
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("No visor selected")]
    #[diagnostic(
        code(skymgr::no_visor),
        help("Pass --visor <PK>, set SKYMGR_VISOR, or add `visor = \"...\"` to {path}")
    )]
    NoVisor { path: String },

    // ── Operations ───────────────────────────────────────────────────

    #[error("Hypervisor error: {message}")]
    #[diagnostic(code(skymgr::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("Operation failed on '{key}': {message}")]
    #[diagnostic(
        code(skymgr::command_failed),
        help("{processed} item(s) were changed before the failure. Run the list again to see the current state.")
    )]
    CommandFailed {
        key: String,
        message: String,
        processed: usize,
    },

    // ── Validation / configuration ───────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(skymgr::validation))]
    Validation { field: String, reason: String },

    #[error("Invalid configuration: {source}")]
    #[diagnostic(
        code(skymgr::config),
        help("Check the config file at {path}")
    )]
    Config {
        #[source]
        source: Box<ConfigError>,
        path: String,
    },

    #[error("Internal error: {0}")]
    #[diagnostic(code(skymgr::internal))]
    Internal(String),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    #[diagnostic(code(skymgr::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NoVisor { .. } | Self::Config { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    pub fn config(source: ConfigError, path: &std::path::Path) -> Self {
        Self::Config {
            source: Box::new(source),
            path: path.display().to_string(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Remote { message, status } => CliError::ApiError { message, status },

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "hypervisor".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_category() {
        let timeout = CliError::from(CoreError::Timeout { timeout_secs: 5 });
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let refused = CliError::from(CoreError::ConnectionFailed {
            url: "http://127.0.0.1:8000".into(),
            reason: "refused".into(),
        });
        assert_eq!(refused.exit_code(), exit_code::CONNECTION);

        let remote = CliError::from(CoreError::Remote {
            message: "busy".into(),
            status: Some(500),
        });
        assert_eq!(remote.exit_code(), exit_code::GENERAL);
    }
}

//! Configuration for skymgr.
//!
//! A TOML file at the platform config path, overridden by `SKYMGR_`
//! environment variables, translated into `skymgr_core::ListConfig` and
//! `skymgr_api::TransportConfig`. The CLI layers its own flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use skymgr_api::{TlsMode, TransportConfig};
use skymgr_core::config::{
    DEFAULT_FULL_PAGE_SIZE, DEFAULT_SETTLE_DELAY, DEFAULT_SHORT_PAGE_SIZE,
};
use skymgr_core::{ListConfig, PageSizes};

/// Prefix of environment overrides. Nested keys use `__`, e.g.
/// `SKYMGR_LISTS__FULL_PAGE_SIZE=100`.
pub const ENV_PREFIX: &str = "SKYMGR_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Hypervisor base URL (e.g., "http://127.0.0.1:8000").
    #[serde(default = "default_hypervisor")]
    pub hypervisor: String,

    /// Public key of the visor to manage when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visor: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept self-signed hypervisor certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    #[serde(default)]
    pub lists: ListsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hypervisor: default_hypervisor(),
            visor: None,
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            lists: ListsConfig::default(),
        }
    }
}

/// List presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ListsConfig {
    #[serde(default = "default_short_page_size")]
    pub short_page_size: usize,

    #[serde(default = "default_full_page_size")]
    pub full_page_size: usize,

    /// Wait after a command before reloading, in milliseconds.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            short_page_size: default_short_page_size(),
            full_page_size: default_full_page_size(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

fn default_hypervisor() -> String {
    "http://127.0.0.1:8000".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_short_page_size() -> usize {
    DEFAULT_SHORT_PAGE_SIZE
}
fn default_full_page_size() -> usize {
    DEFAULT_FULL_PAGE_SIZE
}
fn default_settle_delay_ms() -> u64 {
    u64::try_from(DEFAULT_SETTLE_DELAY.as_millis()).unwrap_or(50)
}

// ── Validation and translation ──────────────────────────────────────

impl Config {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hypervisor_url()?;
        for (field, value) in [
            ("lists.short_page_size", self.lists.short_page_size),
            ("lists.full_page_size", self.lists.full_page_size),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation {
                    field: field.into(),
                    reason: "must be at least 1".into(),
                });
            }
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }

    pub fn hypervisor_url(&self) -> Result<Url, ConfigError> {
        self.hypervisor.parse().map_err(|_| ConfigError::Validation {
            field: "hypervisor".into(),
            reason: format!("invalid URL: {}", self.hypervisor),
        })
    }

    /// Page sizes and settle delay for the list engine.
    pub fn list_config(&self) -> ListConfig {
        ListConfig {
            page_sizes: PageSizes {
                short: self.lists.short_page_size,
                full: self.lists.full_page_size,
            },
            settle_delay: Duration::from_millis(self.lists.settle_delay_ms),
        }
    }

    /// HTTP settings for the hypervisor client.
    pub fn transport_config(&self) -> TransportConfig {
        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "skymgr", "skymgr").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("skymgr");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Defaults, then the TOML file at `path`, then the environment.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load and validate the config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load and validate the config from `path` + environment. A missing
/// file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, returning a default if it is missing or invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.list_config(), ListConfig::default());
        assert_eq!(cfg.transport_config().timeout, Duration::from_secs(30));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut cfg = Config::default();
        cfg.lists.full_page_size = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("lists.full_page_size"));
    }

    #[test]
    fn insecure_wins_over_ca_cert() {
        let cfg = Config {
            insecure: true,
            ca_cert: Some("/etc/ca.pem".into()),
            ..Config::default()
        };
        assert!(matches!(
            cfg.transport_config().tls,
            TlsMode::DangerAcceptInvalid
        ));
    }

    #[test]
    fn bad_url_is_rejected() {
        let cfg = Config {
            hypervisor: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "hypervisor"
        ));
    }
}

// ── Application domain type ──

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

use super::entity::ListEntity;

const SOCKS_SERVER: &str = "skysocks";
const SOCKS_CLIENT: &str = "skysocks-client";

/// Apps whose settings can be edited directly from the manager.
const APPS_WITH_CONFIG: &[&str] = &[SOCKS_SERVER, SOCKS_CLIENT];

/// Run state of an app as reported by the visor.
///
/// Ordered by raw value; the State column sorts higher values first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum AppStatus {
    Stopped,
    Running,
    Errored,
    Starting,
    /// A value reserved by newer visors.
    Other(u8),
}

impl AppStatus {
    pub fn raw(self) -> u8 {
        match self {
            Self::Stopped => 0,
            Self::Running => 1,
            Self::Errored => 2,
            Self::Starting => 3,
            Self::Other(v) => v,
        }
    }
}

impl From<u8> for AppStatus {
    fn from(v: u8) -> Self {
        match v {
            0 => Self::Stopped,
            1 => Self::Running,
            2 => Self::Errored,
            3 => Self::Starting,
            other => Self::Other(other),
        }
    }
}

impl From<AppStatus> for u8 {
    fn from(status: AppStatus) -> Self {
        status.raw()
    }
}

impl Ord for AppStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw().cmp(&other.raw())
    }
}

impl PartialOrd for AppStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An application installed on a visor. Keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    pub status: AppStatus,
    pub autostart: bool,
    pub port: u16,
}

impl Application {
    pub fn is_running(&self) -> bool {
        self.status == AppStatus::Running
    }

    /// Whether the manager offers a settings dialog for this app.
    pub fn has_config(&self) -> bool {
        APPS_WITH_CONFIG.contains(&self.name.as_str())
    }
}

/// Editable settings of a configurable app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppSettings {
    /// Password required by skysocks clients. Empty removes it.
    Passcode(String),
    /// Public key of the skysocks server a client connects to.
    RemotePk(String),
}

impl AppSettings {
    /// Whether these settings belong to the named app.
    pub fn applies_to(&self, app_name: &str) -> bool {
        match self {
            Self::Passcode(_) => app_name == SOCKS_SERVER,
            Self::RemotePk(_) => app_name == SOCKS_CLIENT,
        }
    }
}

/// Lines an app logged since a given moment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppLogBatch {
    /// Timestamp to resume from. Empty when the visor sent nothing new.
    pub last_timestamp: String,
    pub lines: Vec<String>,
}

/// Sortable columns of the app list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum AppColumn {
    #[strum(serialize = "state", serialize = "status")]
    State,
    #[default]
    #[strum(serialize = "name")]
    Name,
    #[strum(serialize = "port")]
    Port,
    #[strum(serialize = "autostart", serialize = "auto-start")]
    AutoStart,
}

impl AppColumn {
    /// Translation key of the column header.
    pub fn label(self) -> &'static str {
        match self {
            Self::State => "apps.apps-list.state",
            Self::Name => "apps.apps-list.app-name",
            Self::Port => "apps.apps-list.port",
            Self::AutoStart => "apps.apps-list.auto-start",
        }
    }

    /// Name accepted on the command line.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Name => "name",
            Self::Port => "port",
            Self::AutoStart => "autostart",
        }
    }
}

impl ListEntity for Application {
    type Column = AppColumn;

    fn key(&self) -> &str {
        &self.name
    }

    fn compare_by(&self, other: &Self, column: AppColumn) -> Ordering {
        match column {
            AppColumn::Name => self.name.cmp(&other.name),
            AppColumn::Port => self.port.cmp(&other.port),
            // Running (1) before stopped (0).
            AppColumn::State => other.status.cmp(&self.status),
            AppColumn::AutoStart => other.autostart.cmp(&self.autostart),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    fn app(name: &str, status: u8, autostart: bool, port: u16) -> Application {
        Application {
            name: name.into(),
            status: AppStatus::from(status),
            autostart,
            port,
        }
    }

    #[test]
    fn status_round_trips_reserved_values() {
        assert_eq!(AppStatus::from(7), AppStatus::Other(7));
        assert_eq!(u8::from(AppStatus::Other(7)), 7);
        assert_eq!(AppStatus::from(1), AppStatus::Running);
    }

    #[test]
    fn config_allow_list() {
        assert!(app("skysocks", 0, false, 3).has_config());
        assert!(app("skysocks-client", 0, false, 13).has_config());
        assert!(!app("skychat", 0, false, 1).has_config());
    }

    #[test]
    fn settings_match_their_app() {
        assert!(AppSettings::Passcode("x".into()).applies_to("skysocks"));
        assert!(!AppSettings::Passcode("x".into()).applies_to("skysocks-client"));
        assert!(AppSettings::RemotePk("03ab".into()).applies_to("skysocks-client"));
        assert!(!AppSettings::RemotePk("03ab".into()).applies_to("skychat"));
    }

    #[test]
    fn state_puts_running_first() {
        let running = app("b", 1, false, 0);
        let stopped = app("a", 0, false, 0);
        assert_eq!(running.compare_by(&stopped, AppColumn::State), Ordering::Less);
    }

    #[test]
    fn autostart_puts_enabled_first() {
        let on = app("b", 0, true, 0);
        let off = app("a", 0, false, 0);
        assert_eq!(on.compare_by(&off, AppColumn::AutoStart), Ordering::Less);
    }

    #[test]
    fn port_is_ascending() {
        let low = app("z", 0, false, 1);
        let high = app("a", 0, false, 44);
        assert_eq!(low.compare_by(&high, AppColumn::Port), Ordering::Less);
    }

    #[test]
    fn columns_parse_from_short_names() {
        for column in AppColumn::iter() {
            assert_eq!(AppColumn::from_str(column.short_name()).unwrap(), column);
        }
        assert_eq!(AppColumn::from_str("AutoStart").unwrap(), AppColumn::AutoStart);
        assert!(AppColumn::from_str("remote").is_err());
    }
}

//! Clap derive structures for the `skymgr` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use strum::IntoEnumIterator;

use skymgr_core::{AppColumn, AppSettings, TransportColumn};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// skymgr -- manage the apps and transports of skywire visors
#[derive(Debug, Parser)]
#[command(
    name = "skymgr",
    version,
    about = "Manage skywire visor apps and transports from the command line",
    long_about = "Lists, sorts and pages the apps and transports of a visor through\n\
        its hypervisor, and starts, stops, toggles autostart on, or deletes\n\
        them one at a time. Also reads app logs and edits skysocks settings.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Hypervisor URL (overrides config)
    #[arg(long, short = 'H', env = "SKYMGR_HYPERVISOR", global = true)]
    pub hypervisor: Option<String>,

    /// Public key of the visor to manage (overrides config)
    #[arg(long, env = "SKYMGR_VISOR", global = true)]
    pub visor: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Use the full-list page size instead of the short preview
    #[arg(long, global = true)]
    pub full: bool,

    /// Page to show (1-based; invalid values mean 1)
    #[arg(long, global = true)]
    pub page: Option<String>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// One key per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the apps of a visor
    #[command(alias = "a")]
    Apps(AppsArgs),

    /// Manage the transports of a visor
    #[command(alias = "tp", alias = "t")]
    Transports(TransportsArgs),
}

// ── Apps ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AppsArgs {
    #[command(subcommand)]
    pub command: AppsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AppsCommand {
    /// List apps
    #[command(alias = "ls")]
    List(AppListArgs),

    /// Start apps (no confirmation)
    Start(NamesArgs),

    /// Stop apps
    Stop(NamesArgs),

    /// Enable or disable autostart
    Autostart {
        toggle: Toggle,
        #[command(flatten)]
        names: NamesArgs,
    },

    /// Show the log of an app
    Logs(LogsArgs),

    /// Change the settings of skysocks or skysocks-client
    Settings(SettingsArgs),
}

#[derive(Debug, Args)]
pub struct NamesArgs {
    /// App names
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(Debug, Args)]
pub struct LogsArgs {
    /// App name
    pub name: String,

    /// Only show lines logged after this RFC 3339 timestamp
    #[arg(long)]
    pub since: Option<String>,

    /// Keep polling for new lines until interrupted
    #[arg(long, short = 'f')]
    pub follow: bool,
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// App name
    pub name: String,

    #[command(flatten)]
    pub value: SettingsValue,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SettingsValue {
    /// Passcode skysocks clients must present (empty removes it)
    #[arg(long)]
    pub passcode: Option<String>,

    /// Public key of the skysocks server to connect to
    #[arg(long)]
    pub pk: Option<String>,
}

impl SettingsValue {
    pub fn into_settings(self) -> Option<AppSettings> {
        match (self.passcode, self.pk) {
            (Some(passcode), _) => Some(AppSettings::Passcode(passcode)),
            (None, Some(pk)) => Some(AppSettings::RemotePk(pk)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    Enable,
    Disable,
}

// ── Transports ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TransportsArgs {
    #[command(subcommand)]
    pub command: TransportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TransportsCommand {
    /// List transports
    #[command(alias = "ls")]
    List(TransportListArgs),

    /// Delete transports (asks for confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Transport ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

// ── Sorting ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AppListArgs {
    /// Column to sort by [state, name, port, autostart]
    #[arg(long, short = 's', value_parser = parse_app_column)]
    pub sort: Option<AppColumn>,

    /// Reverse the sort direction
    #[arg(long, short = 'r')]
    pub reverse: bool,
}

#[derive(Debug, Args)]
pub struct TransportListArgs {
    /// Column to sort by [state, id, remote, type, uploaded, downloaded]
    #[arg(long, short = 's', value_parser = parse_transport_column)]
    pub sort: Option<TransportColumn>,

    /// Reverse the sort direction
    #[arg(long, short = 'r')]
    pub reverse: bool,
}

fn parse_app_column(raw: &str) -> Result<AppColumn, String> {
    AppColumn::from_str(raw).map_err(|_| {
        let valid: Vec<_> = AppColumn::iter().map(AppColumn::short_name).collect();
        format!("unknown column '{raw}', expected one of: {}", valid.join(", "))
    })
}

fn parse_transport_column(raw: &str) -> Result<TransportColumn, String> {
    TransportColumn::from_str(raw).map_err(|_| {
        let valid: Vec<_> = TransportColumn::iter()
            .map(TransportColumn::short_name)
            .collect();
        format!("unknown column '{raw}', expected one of: {}", valid.join(", "))
    })
}

mod cli;
mod commands;
mod error;
mod messages;
mod output;
mod ui;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skymgr_api::HypervisorClient;
use skymgr_core::{HypervisorCommands, ListMode};

use crate::cli::{Cli, GlobalOpts};
use crate::commands::Context;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = build_context(&cli.global)?;
    tracing::debug!(command = ?cli.command, visor = %ctx.visor, "dispatching command");
    commands::dispatch(cli.command, &ctx).await
}

/// Build the command context from the config file, environment and CLI overrides.
fn build_context(global: &GlobalOpts) -> Result<Context, CliError> {
    let path = skymgr_config::config_path();
    let mut cfg =
        skymgr_config::load_config_from(&path).map_err(|e| CliError::config(e, &path))?;

    if let Some(ref url) = global.hypervisor {
        cfg.hypervisor.clone_from(url);
    }
    if let Some(ref visor) = global.visor {
        cfg.visor = Some(visor.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    cfg.insecure |= global.insecure;

    let url = cfg.hypervisor_url().map_err(|e| match e {
        skymgr_config::ConfigError::Validation { field, reason } => {
            CliError::Validation { field, reason }
        }
        other => CliError::config(other, &path),
    })?;
    if cfg.timeout == 0 {
        return Err(CliError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let visor = cfg
        .visor
        .clone()
        .filter(|pk| !pk.trim().is_empty())
        .ok_or_else(|| CliError::NoVisor {
            path: path.display().to_string(),
        })?;

    let client = HypervisorClient::new(url, &cfg.transport_config())
        .map_err(skymgr_core::CoreError::from)?;

    Ok(Context {
        hypervisor: Arc::new(HypervisorCommands::new(Arc::new(client))),
        visor,
        list_config: cfg.list_config(),
        mode: if global.full {
            ListMode::Full
        } else {
            ListMode::Short
        },
        page: global.page.clone(),
        output: global.output,
        color: output::should_color(global.color),
        quiet: global.quiet,
        yes: global.yes,
    })
}

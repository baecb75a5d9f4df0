//! Output formatting: table, JSON, plain.
//!
//! Tables are built column by column from the entity's sortable columns,
//! so headers carry the sort arrow of the shared sort spec.

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use bytesize::ByteSize;
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;
use tabled::{builder::Builder, settings::Style};

use skymgr_core::{
    AppColumn, AppStatus, Application, ListEntity, ListView, SortSpec, Transport,
    TransportColumn,
};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;
use crate::messages::text;

/// Appended to the names of apps that `apps settings` can edit.
const SETTINGS_MARK: char = '⚙';

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render the visible page of an app list.
pub fn render_apps(
    format: OutputFormat,
    view: &ListView<Application>,
    color: bool,
) -> Result<String, CliError> {
    render(format, view, color, |app, column| app_cell(app, column, color))
}

/// Render the visible page of a transport list.
pub fn render_transports(
    format: OutputFormat,
    view: &ListView<Transport>,
    color: bool,
) -> Result<String, CliError> {
    render(format, view, color, |tp, column| transport_cell(tp, column, color))
}

/// Render one batch of app log lines. JSON emits one array per batch.
pub fn render_log_lines(format: OutputFormat, lines: &[String]) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(lines)?),
        OutputFormat::Table | OutputFormat::Plain => Ok(lines.join("\n")),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn render<E>(
    format: OutputFormat,
    view: &ListView<E>,
    color: bool,
    cell: impl Fn(&E, E::Column) -> String,
) -> Result<String, CliError>
where
    E: ListEntity + Columns + serde::Serialize,
{
    let visible = view.visible();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(visible)?),
        OutputFormat::Plain => Ok(visible
            .iter()
            .map(|e| e.key().to_owned())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Table => {
            let mut out = render_table(visible, view.sort_spec(), cell);
            if view.page_count() > 1 {
                let footer = format!(
                    "page {} of {} ({} total)",
                    view.current_page(),
                    view.page_count(),
                    view.total()
                );
                out.push('\n');
                if color {
                    out.push_str(&footer.dimmed().to_string());
                } else {
                    out.push_str(&footer);
                }
            }
            Ok(out)
        }
    }
}

// ── Tables ───────────────────────────────────────────────────────────

/// Column metadata shared by both entity types.
pub trait Columns: ListEntity {
    fn columns() -> Vec<Self::Column>;
    fn label(column: Self::Column) -> &'static str;
}

impl Columns for Application {
    fn columns() -> Vec<AppColumn> {
        AppColumn::iter().collect()
    }

    fn label(column: AppColumn) -> &'static str {
        column.label()
    }
}

impl Columns for Transport {
    fn columns() -> Vec<TransportColumn> {
        TransportColumn::iter().collect()
    }

    fn label(column: TransportColumn) -> &'static str {
        column.label()
    }
}

fn render_table<E: Columns>(
    rows: &[Arc<E>],
    sort: SortSpec<E::Column>,
    cell: impl Fn(&E, E::Column) -> String,
) -> String {
    let columns = E::columns();
    let mut builder = Builder::default();

    builder.push_record(columns.iter().map(|&column| {
        let header = text(E::label(column)).to_owned();
        if column == sort.column {
            format!("{header} {}", sort.arrow().icon())
        } else {
            header
        }
    }));
    for row in rows {
        builder.push_record(columns.iter().map(|&column| cell(row, column)));
    }

    builder.build().with(Style::rounded()).to_string()
}

fn app_cell(app: &Application, column: AppColumn, color: bool) -> String {
    match column {
        AppColumn::State => status_label(app.status, color),
        AppColumn::Name if app.has_config() => format!("{} {SETTINGS_MARK}", app.name),
        AppColumn::Name => app.name.clone(),
        AppColumn::Port => app.port.to_string(),
        AppColumn::AutoStart => yes_no(app.autostart, color),
    }
}

fn transport_cell(tp: &Transport, column: TransportColumn, color: bool) -> String {
    match column {
        TransportColumn::State => up_down(tp.is_up, color),
        TransportColumn::Id => tp.id.clone(),
        TransportColumn::RemotePk => tp.remote_pk.clone(),
        TransportColumn::Type => tp.transport_type.clone(),
        TransportColumn::Uploaded => ByteSize(tp.log.sent).to_string(),
        TransportColumn::Downloaded => ByteSize(tp.log.recv).to_string(),
    }
}

fn status_label(status: AppStatus, color: bool) -> String {
    let label = match status {
        AppStatus::Running => "running".to_owned(),
        AppStatus::Stopped => "stopped".to_owned(),
        AppStatus::Errored => "errored".to_owned(),
        AppStatus::Starting => "starting".to_owned(),
        AppStatus::Other(raw) => format!("status {raw}"),
    };
    if !color {
        return label;
    }
    match status {
        AppStatus::Running => label.green().to_string(),
        AppStatus::Errored => label.red().to_string(),
        AppStatus::Starting => label.yellow().to_string(),
        _ => label.dimmed().to_string(),
    }
}

fn yes_no(value: bool, color: bool) -> String {
    match (value, color) {
        (true, true) => "yes".green().to_string(),
        (false, true) => "no".dimmed().to_string(),
        (true, false) => "yes".into(),
        (false, false) => "no".into(),
    }
}

fn up_down(value: bool, color: bool) -> String {
    match (value, color) {
        (true, true) => "up".green().to_string(),
        (false, true) => "down".red().to_string(),
        (true, false) => "up".into(),
        (false, false) => "down".into(),
    }
}

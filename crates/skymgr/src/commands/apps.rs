//! App command handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use skymgr_core::{
    AppCommands, AppsPanel, Application, BatchOutcome, CollectionSource, CollectionStore,
    CoreError, ListMode, ListView, LogReader, SharedSort, SortSpec,
};

use crate::cli::{AppsArgs, AppsCommand, LogsArgs, SettingsArgs, Toggle};
use crate::error::CliError;
use crate::output;

use super::Context;
use super::util;

const LIST_COMMAND: &str = "apps list";

/// How often `apps logs --follow` asks for new lines.
const FOLLOW_INTERVAL: Duration = Duration::from_secs(2);

pub async fn handle(ctx: &Context, args: AppsArgs) -> Result<(), CliError> {
    match args.command {
        AppsCommand::List(list) => {
            let store = load(ctx).await?;
            let sort = SharedSort::new(SortSpec::new(list.sort.unwrap_or_default(), list.reverse));
            let view = ListView::new(&store, &sort, ctx.page_source(), &ctx.list_config, ctx.mode);
            print_view(ctx, &view)
        }
        AppsCommand::Start(names) => change_state(ctx, &names.names, true).await,
        AppsCommand::Stop(names) => change_state(ctx, &names.names, false).await,
        AppsCommand::Autostart { toggle, names } => {
            change_autostart(ctx, &names.names, toggle == Toggle::Enable).await
        }
        AppsCommand::Logs(logs) => show_logs(ctx, logs).await,
        AppsCommand::Settings(settings) => configure(ctx, settings).await,
    }
}

async fn fetch(ctx: &Context) -> Result<Vec<Application>, CoreError> {
    CollectionSource::<Application>::fetch(ctx.hypervisor.as_ref(), &ctx.visor).await
}

async fn load(ctx: &Context) -> Result<CollectionStore<Application>, CliError> {
    let store = CollectionStore::new();
    store.replace(fetch(ctx).await?);
    debug!(count = store.len(), visor = %ctx.visor, "apps loaded");
    Ok(store)
}

fn print_view(ctx: &Context, view: &ListView<Application>) -> Result<(), CliError> {
    let out = output::render_apps(ctx.output, view, ctx.color)?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

async fn change_state(ctx: &Context, names: &[String], start: bool) -> Result<(), CliError> {
    run(ctx, names, |panel, single| match single {
        Some(app) if app.is_running() != start => panel.change_app_state(app),
        _ => panel.change_state_of_selected(start),
    })
    .await
}

async fn change_autostart(ctx: &Context, names: &[String], autostart: bool) -> Result<(), CliError> {
    run(ctx, names, |panel, single| match single {
        Some(app) if app.autostart != autostart => panel.change_app_autostart(app),
        _ => panel.change_autostart_of_selected(autostart),
    })
    .await
}

/// Select `names` on the full page, start the operation and wait for it.
///
/// `start` receives the app when exactly one name was given, for the
/// single-app command; otherwise it should run the bulk variant.
async fn run(
    ctx: &Context,
    names: &[String],
    start: impl FnOnce(&mut AppsPanel, Option<Arc<Application>>) -> oneshot::Receiver<BatchOutcome>,
) -> Result<(), CliError> {
    let store = load(ctx).await?;
    let sort = SharedSort::default();
    let view = ListView::new(&store, &sort, ctx.page_source(), &ctx.list_config, ListMode::Full);
    let (sequencer, page) = ctx.sequencer();
    let mut panel = AppsPanel::new(view, AppCommands::new(sequencer));

    util::select_keys(panel.view_mut(), names, "app", LIST_COMMAND)?;
    let single = match names {
        [name] => panel.view().visible_entity(name).cloned(),
        _ => None,
    };

    let pending = start(&mut panel, single);
    let result = util::finish(pending).await;
    panel.teardown();

    if page.take_refresh() {
        match fetch(ctx).await {
            Ok(fresh) => {
                store.replace(fresh);
                panel.view_mut().sync();
                if result.as_ref().is_ok_and(BatchOutcome::is_success) {
                    print_view(ctx, panel.view())?;
                }
            }
            Err(err) => warn!(error = %err, "could not reload apps"),
        }
    }
    result.map(|_| ())
}

async fn show_logs(ctx: &Context, args: LogsArgs) -> Result<(), CliError> {
    let mut reader = LogReader::new(ctx.hypervisor.clone(), args.name);
    if let Some(since) = args.since {
        reader = reader.starting_at(since);
    }

    let lines = reader.next_batch(&ctx.visor).await?;
    output::print_output(&output::render_log_lines(ctx.output, &lines)?, ctx.quiet);
    if !args.follow {
        return Ok(());
    }

    let mut ticker = tokio::time::interval(FOLLOW_INTERVAL);
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
        let lines = reader.next_batch(&ctx.visor).await?;
        debug!(since = reader.since(), lines = lines.len(), "polled app log");
        if !lines.is_empty() {
            output::print_output(&output::render_log_lines(ctx.output, &lines)?, ctx.quiet);
        }
    }
}

async fn configure(ctx: &Context, args: SettingsArgs) -> Result<(), CliError> {
    let Some(settings) = args.value.into_settings() else {
        return Err(CliError::Validation {
            field: "settings".into(),
            reason: "pass --passcode or --pk".into(),
        });
    };
    let app = fetch(ctx)
        .await?
        .into_iter()
        .find(|app| app.name == args.name)
        .ok_or_else(|| CliError::NotFound {
            resource_type: "app".into(),
            identifier: args.name.clone(),
            list_command: LIST_COMMAND.into(),
        })?;

    let (sequencer, _page) = ctx.sequencer();
    let outcome = AppCommands::new(sequencer)
        .configure_app(&app, settings)
        .await?;
    util::report(outcome).map(|_| ())
}

//! Transport command handlers.

use tracing::{debug, warn};

use skymgr_core::{
    BatchOutcome, CollectionSource, CollectionStore, CoreError, ListMode, ListView, SharedSort,
    SortSpec, Transport, TransportCommands, TransportsPanel,
};

use crate::cli::{TransportsArgs, TransportsCommand};
use crate::error::CliError;
use crate::output;

use super::Context;
use super::util;

const LIST_COMMAND: &str = "transports list";

pub async fn handle(ctx: &Context, args: TransportsArgs) -> Result<(), CliError> {
    match args.command {
        TransportsCommand::List(list) => {
            let store = load(ctx).await?;
            let sort = SharedSort::new(SortSpec::new(list.sort.unwrap_or_default(), list.reverse));
            let view = ListView::new(&store, &sort, ctx.page_source(), &ctx.list_config, ctx.mode);
            print_view(ctx, &view)
        }
        TransportsCommand::Delete { ids } => delete(ctx, &ids).await,
    }
}

async fn fetch(ctx: &Context) -> Result<Vec<Transport>, CoreError> {
    CollectionSource::<Transport>::fetch(ctx.hypervisor.as_ref(), &ctx.visor).await
}

async fn load(ctx: &Context) -> Result<CollectionStore<Transport>, CliError> {
    let store = CollectionStore::new();
    store.replace(fetch(ctx).await?);
    debug!(count = store.len(), visor = %ctx.visor, "transports loaded");
    Ok(store)
}

fn print_view(ctx: &Context, view: &ListView<Transport>) -> Result<(), CliError> {
    let out = output::render_transports(ctx.output, view, ctx.color)?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

async fn delete(ctx: &Context, ids: &[String]) -> Result<(), CliError> {
    let store = load(ctx).await?;
    let sort = SharedSort::default();
    let view = ListView::new(&store, &sort, ctx.page_source(), &ctx.list_config, ListMode::Full);
    let (sequencer, page) = ctx.sequencer();
    let mut panel = TransportsPanel::new(view, TransportCommands::new(sequencer));

    let pending = match ids {
        [id] => {
            if panel.view().visible_entity(id).is_none() {
                return Err(CliError::NotFound {
                    resource_type: "transport".into(),
                    identifier: id.clone(),
                    list_command: LIST_COMMAND.into(),
                });
            }
            panel.delete(id.clone())
        }
        _ => {
            util::select_keys(panel.view_mut(), ids, "transport", LIST_COMMAND)?;
            panel.delete_selected()
        }
    };
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
            Err(err) => warn!(error = %err, "could not reload transports"),
        }
    }
    result.map(|_| ())
}

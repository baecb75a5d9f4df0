//! Command dispatch: bridges CLI args -> core panels -> output formatting.

pub mod apps;
pub mod transports;
pub mod util;

use std::sync::Arc;

use skymgr_core::{
    BatchSequencer, Collaborators, DefaultErrorTranslator, HypervisorCommands, ListConfig,
    ListMode, PageSource,
};

use crate::cli::{Command, OutputFormat};
use crate::error::CliError;
use crate::ui::{CliPage, TerminalDialogs, TerminalNotifier};

/// Everything a command handler needs, resolved from config and flags.
pub struct Context {
    pub hypervisor: Arc<HypervisorCommands>,
    pub visor: String,
    pub list_config: ListConfig,
    /// Page size used by `list`. Mutations always select from the full page.
    pub mode: ListMode,
    pub page: Option<String>,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}

impl Context {
    /// Wire the terminal collaborators into a sequencer for one command.
    pub fn sequencer(&self) -> (BatchSequencer, Arc<CliPage>) {
        let page = Arc::new(CliPage::new(self.visor.clone()));
        let collaborators = Collaborators {
            remote: self.hypervisor.clone(),
            translator: Arc::new(DefaultErrorTranslator),
            dialogs: Arc::new(TerminalDialogs {
                yes: self.yes,
                quiet: self.quiet,
                color: self.color,
            }),
            notifier: Arc::new(TerminalNotifier {
                quiet: self.quiet,
                color: self.color,
            }),
            page: page.clone(),
        };
        (
            BatchSequencer::new(collaborators, self.list_config.settle_delay),
            page,
        )
    }

    pub fn page_source(&self) -> PageSource {
        PageSource::from_raw(self.page.clone())
    }
}

/// Dispatch a visor-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context) -> Result<(), CliError> {
    match cmd {
        Command::Apps(args) => apps::handle(ctx, args).await,
        Command::Transports(args) => transports::handle(ctx, args).await,
    }
}

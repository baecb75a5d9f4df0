//! List reconciliation and batch command engine for skywire visors.
//!
//! This crate owns the client-side logic behind the app and transport
//! lists of a visor:
//!
//! - **[`CollectionStore`]**: Holds the full collection as last received
//!   from the hypervisor, replaced wholesale on every refresh and observed
//!   through a `tokio::sync::watch` channel.
//!
//! - **[`ListView`]**: Sorts and paginates a store's snapshot
//!   ([`list::projector`]), keeps the [`SelectionSet`] aligned with the
//!   visible slice, and re-projects whenever the collection, the shared
//!   [`SharedSort`] or the [`PageSource`] changes.
//!
//! - **[`BatchSequencer`]**: Runs one mutating command over a list of
//!   keys strictly one at a time, aborting on the first failure, driving a
//!   [`Confirmation`] and [`Notifier`], and asking the [`OwningPage`] to
//!   reload after a settle delay.
//!
//! - **Panels** ([`AppsPanel`], [`TransportsPanel`]): One list view plus
//!   its commands plus an [`OperationGroup`] release-list, per entity type.
//!
//! - **[`LogReader`]**: Follows an app's log through an [`AppLogSource`],
//!   resuming each read where the previous one ended.
//!
//! - **Domain model** ([`model`]): [`Application`] and [`Transport`] with
//!   their hard-coded sortable columns.

pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod lifecycle;
pub mod list;
pub mod model;
pub mod panel;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::batch::{BatchMessages, BatchOutcome, BatchSequencer, BatchState};
pub use command::collaborators::{
    AppLogSource, CollectionSource, Collaborators, Confirmation, Dialogs, Notifier, OwningPage,
    RemoteCommandService,
};
pub use command::hypervisor::HypervisorCommands;
pub use command::translate::{DefaultErrorTranslator, ErrorTranslator, TranslatedError};
pub use command::{AppCommands, LOG_EPOCH, LogReader, TransportCommands};
pub use config::{ListConfig, ListMode, PageSizes};
pub use error::CoreError;
pub use lifecycle::OperationGroup;
pub use list::page::{PageParam, PageSource, parse_page};
pub use list::selection::SelectionSet;
pub use list::sort::{SharedSort, SortArrow, SortSpec};
pub use list::view::ListView;
pub use model::{
    AppColumn, AppLogBatch, AppSettings, AppStatus, Application, ListEntity, Transport,
    TransportColumn, TransportLog,
};
pub use panel::{AppsPanel, TransportsPanel};
pub use store::CollectionStore;

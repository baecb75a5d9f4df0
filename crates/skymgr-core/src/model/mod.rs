// ── Domain model ──
//
// The two entity shapes shown in visor lists, and the sortable columns
// each of them exposes.

pub mod application;
pub mod entity;
pub mod transport;

pub use application::{AppColumn, AppLogBatch, AppSettings, AppStatus, Application};
pub use entity::ListEntity;
pub use transport::{Transport, TransportColumn, TransportLog};

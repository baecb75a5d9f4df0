// ── Panels ──
//
// One list view, its commands and a release-list per entity type.

mod apps;
mod transports;

pub use apps::AppsPanel;
pub use transports::TransportsPanel;

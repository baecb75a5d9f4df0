// ── List reconciliation ──
//
// Sorting, pagination and selection for a live collection.

pub mod page;
pub mod projector;
pub mod selection;
pub mod sort;
pub mod view;

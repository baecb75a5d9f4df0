// ── Reactive data store ──

mod collection;

pub use collection::{CollectionStore, Snapshot};

// ── Reactive entity collection ──
//
// Holds the latest list fetched for one entity type and pushes every
// replacement to subscribers via a `watch` channel. `None` means no data
// has been delivered yet.

use std::sync::Arc;

use tokio::sync::watch;

/// Shared snapshot handed to list views.
pub type Snapshot<E> = Option<Arc<Vec<Arc<E>>>>;

/// The owner-side handle of an entity collection.
///
/// The owning page replaces the whole list on every refresh; list views
/// hold receivers and re-project on change.
pub struct CollectionStore<E: Send + Sync + 'static> {
    snapshot: watch::Sender<Snapshot<E>>,
}

impl<E: Send + Sync + 'static> CollectionStore<E> {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(None);
        Self { snapshot }
    }

    /// Replace the collection with a freshly fetched list.
    pub fn replace(&self, entities: Vec<E>) {
        let values: Vec<Arc<E>> = entities.into_iter().map(Arc::new).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Some(Arc::new(values)));
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<E>> {
        self.snapshot.subscribe()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().as_ref().map_or(0, |v| v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Send + Sync + 'static> Default for CollectionStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_data() {
        let store: CollectionStore<String> = CollectionStore::new();
        assert!(store.subscribe().borrow().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn replace_publishes_to_subscribers() {
        let store: CollectionStore<String> = CollectionStore::new();
        let mut rx = store.subscribe();

        store.replace(vec!["a".into(), "b".into()]);

        assert!(rx.has_changed().unwrap());
        let snap = rx.borrow_and_update().clone().unwrap();
        assert_eq!(snap.len(), 2);
        assert_eq!(*snap[1], "b");
        assert_eq!(store.len(), 2);
    }
}

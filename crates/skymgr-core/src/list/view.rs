// ── List view ──
//
// Binds a collection store, the shared sort spec and a page source into a
// projected, selectable page. Any input change triggers a full
// re-projection followed by selection reconciliation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

use super::page::PageSource;
use super::projector::{self, Pagination};
use super::selection::SelectionSet;
use super::sort::{SharedSort, SortArrow, SortSpec};
use crate::config::{ListConfig, ListMode, PageSizes};
use crate::model::ListEntity;
use crate::store::{CollectionStore, Snapshot};

pub struct ListView<E: ListEntity> {
    sort: SharedSort<E::Column>,
    sort_rx: watch::Receiver<SortSpec<E::Column>>,
    collection_rx: watch::Receiver<Snapshot<E>>,
    page: PageSource,
    page_open: bool,

    mode: ListMode,
    page_sizes: PageSizes,

    /// Full collection in last projected order. `None` until data arrives.
    all: Option<Vec<Arc<E>>>,
    visible: Vec<Arc<E>>,
    visible_index: HashMap<String, usize>,
    selection: SelectionSet,

    page_count: usize,
    current_page: usize,
    requested_page: usize,
}

impl<E: ListEntity> ListView<E> {
    pub fn new(
        store: &CollectionStore<E>,
        sort: &SharedSort<E::Column>,
        page: PageSource,
        config: &ListConfig,
        mode: ListMode,
    ) -> Self {
        let page_open = page.is_live();
        let mut view = Self {
            sort: sort.clone(),
            sort_rx: sort.subscribe(),
            collection_rx: store.subscribe(),
            page,
            page_open,
            mode,
            page_sizes: config.page_sizes,
            all: None,
            visible: Vec::new(),
            visible_index: HashMap::new(),
            selection: SelectionSet::new(),
            page_count: 1,
            current_page: 1,
            requested_page: 1,
        };
        view.sync();
        view
    }

    // ── Reactive inputs ──────────────────────────────────────────────

    /// Pull the latest value of every input and re-project.
    pub fn sync(&mut self) {
        let snapshot = self.collection_rx.borrow_and_update().clone();
        self.all = snapshot.map(|entities| entities.as_ref().clone());
        self.requested_page = self.page.current();
        self.sort_rx.mark_unchanged();
        self.recalculate();
    }

    /// Wait until the collection, the sort spec or the page changes, then
    /// re-project. Returns `false` once the collection store is gone.
    pub async fn next_change(&mut self) -> bool {
        let page_open = self.page_open;
        tokio::select! {
            biased;
            changed = self.collection_rx.changed() => {
                if changed.is_err() {
                    return false;
                }
            }
            _ = self.sort_rx.changed() => {}
            page = self.page.changed(), if page_open => {
                if page.is_none() {
                    self.page_open = false;
                }
            }
        }
        self.sync();
        true
    }

    // ── Mode and sorting ─────────────────────────────────────────────

    pub fn mode(&self) -> ListMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ListMode) {
        if self.mode != mode {
            self.mode = mode;
            self.recalculate();
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_sizes.for_mode(self.mode)
    }

    pub fn sort_spec(&self) -> SortSpec<E::Column> {
        self.sort.get()
    }

    pub fn sorting_arrow(&self) -> SortArrow {
        self.sort.get().arrow()
    }

    /// Header click: select `column` or flip its direction.
    pub fn change_sorting_order(&mut self, column: E::Column) {
        self.sort.change_order(column);
        self.sort_rx.mark_unchanged();
        self.recalculate();
    }

    /// Sort-modal choice. Re-projects only if the sort spec actually changed.
    pub fn set_sorting(&mut self, column: E::Column, reverse: bool) -> bool {
        let changed = self.sort.set(column, reverse);
        if changed {
            self.sort_rx.mark_unchanged();
            self.recalculate();
        }
        changed
    }

    // ── Projection results ───────────────────────────────────────────

    pub fn has_data(&self) -> bool {
        self.all.is_some()
    }

    /// Size of the full collection.
    pub fn total(&self) -> usize {
        self.all.as_ref().map_or(0, Vec::len)
    }

    pub fn visible(&self) -> &[Arc<E>] {
        &self.visible
    }

    pub fn visible_entity(&self, key: &str) -> Option<&Arc<E>> {
        self.visible_index.get(key).and_then(|&i| self.visible.get(i))
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn requested_page(&self) -> usize {
        self.requested_page
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.is_selected(key)
    }

    pub fn toggle_selection(&mut self, key: &str) -> Option<bool> {
        self.selection.toggle(key)
    }

    pub fn set_selected(&mut self, key: &str, checked: bool) -> bool {
        self.selection.set(key, checked)
    }

    /// Check or uncheck every visible entity.
    pub fn set_all_selected(&mut self, checked: bool) {
        self.selection.set_all(checked);
    }

    pub fn has_selected(&self) -> bool {
        self.selection.has_any_selected()
    }

    pub fn selected_keys(&self) -> Vec<String> {
        self.selection.selected_keys()
    }

    /// Checked entities, in display order.
    pub fn selected_entities(&self) -> Vec<Arc<E>> {
        self.selection
            .selected_keys()
            .iter()
            .filter_map(|key| self.visible_entity(key).cloned())
            .collect()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn recalculate(&mut self) {
        let Some(all) = self.all.as_mut() else {
            self.visible.clear();
            self.visible_index.clear();
            self.selection.clear();
            self.page_count = 1;
            self.current_page = 1;
            return;
        };

        let spec = *self.sort_rx.borrow();
        let projection = projector::project(
            all,
            spec,
            Pagination {
                page_size: self.page_sizes.for_mode(self.mode),
                requested_page: self.requested_page,
            },
        );

        self.page_count = projection.page_count;
        self.current_page = projection.current_page;
        self.visible = projection.visible;
        self.visible_index = self
            .visible
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key().to_owned(), i))
            .collect();
        self.selection
            .reconcile(self.visible.iter().map(|e| e.key()));

        trace!(
            total = all.len(),
            visible = self.visible.len(),
            page = self.current_page,
            pages = self.page_count,
            column = ?spec.column,
            reverse = spec.reverse,
            "list re-projected"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{AppColumn, AppStatus, Application};

    fn app(name: &str, status: u8) -> Application {
        Application {
            name: name.into(),
            status: AppStatus::from(status),
            autostart: false,
            port: 0,
        }
    }

    fn config(short: usize) -> ListConfig {
        ListConfig {
            page_sizes: PageSizes { short, full: 40 },
            ..ListConfig::default()
        }
    }

    fn names(view: &ListView<Application>) -> Vec<String> {
        view.visible().iter().map(|a| a.name.clone()).collect()
    }

    #[test]
    fn starts_empty_without_data() {
        let store = CollectionStore::new();
        let sort = SharedSort::default();
        let view: ListView<Application> =
            ListView::new(&store, &sort, PageSource::fixed(3), &config(5), ListMode::Short);

        assert!(!view.has_data());
        assert!(view.visible().is_empty());
        assert!(view.selection().is_empty());
        assert_eq!(view.page_count(), 1);
        assert_eq!(view.requested_page(), 3);
    }

    #[test]
    fn shared_sort_reaches_every_view() {
        let store = CollectionStore::new();
        store.replace(vec![app("c", 0), app("a", 1), app("b", 0)]);
        let sort = SharedSort::default();
        let mut first = ListView::new(&store, &sort, PageSource::fixed(1), &config(5), ListMode::Short);
        let mut second = ListView::new(&store, &sort, PageSource::fixed(1), &config(5), ListMode::Full);

        first.change_sorting_order(AppColumn::State);
        first.change_sorting_order(AppColumn::State);
        assert_eq!(names(&first), ["b", "c", "a"]);
        assert_eq!(first.sorting_arrow(), SortArrow::Up);

        second.sync();
        assert_eq!(names(&second), ["b", "c", "a"]);
    }

    #[test]
    fn selection_survives_refresh_while_visible() {
        let store = CollectionStore::new();
        store.replace(vec![app("a", 0), app("b", 0), app("c", 0)]);
        let sort = SharedSort::default();
        let mut view = ListView::new(&store, &sort, PageSource::fixed(1), &config(5), ListMode::Short);

        view.toggle_selection("a");
        view.toggle_selection("c");

        store.replace(vec![app("a", 1), app("b", 0)]);
        view.sync();

        assert_eq!(view.selected_keys(), ["a"]);
        assert_eq!(view.selection().keys().collect::<Vec<_>>(), ["a", "b"]);
        assert!(view.visible_entity("a").unwrap().is_running());
    }

    #[test]
    fn selection_resets_after_leaving_the_page() {
        let store = CollectionStore::new();
        store.replace(vec![app("a", 0), app("b", 0), app("c", 0)]);
        let sort = SharedSort::default();
        let (param, source) = PageSource::channel(None);
        let mut view = ListView::new(&store, &sort, source, &config(2), ListMode::Short);

        view.set_all_selected(true);
        param.navigate(2);
        view.sync();
        assert_eq!(names(&view), ["c"]);
        assert!(!view.has_selected());

        param.navigate(1);
        view.sync();
        assert!(!view.has_selected());
    }

    #[test]
    fn requested_page_is_restored_when_data_grows() {
        let store = CollectionStore::new();
        store.replace(vec![app("a", 0)]);
        let sort = SharedSort::default();
        let mut view = ListView::new(&store, &sort, PageSource::fixed(2), &config(1), ListMode::Short);
        assert_eq!(view.current_page(), 1);

        store.replace(vec![app("a", 0), app("b", 0)]);
        view.sync();
        assert_eq!(view.current_page(), 2);
        assert_eq!(names(&view), ["b"]);
    }

    #[test]
    fn mode_switch_changes_page_size() {
        let store = CollectionStore::new();
        store.replace((0..7).map(|i| app(&format!("app{i}"), 0)).collect());
        let sort = SharedSort::default();
        let mut view = ListView::new(&store, &sort, PageSource::fixed(1), &config(5), ListMode::Short);
        assert_eq!(view.visible().len(), 5);
        assert_eq!(view.page_count(), 2);

        view.set_mode(ListMode::Full);
        assert_eq!(view.visible().len(), 7);
        assert_eq!(view.page_count(), 1);
    }

    #[test]
    fn huge_page_number_lands_on_last_page() {
        let store = CollectionStore::new();
        store.replace(vec![app("a", 0), app("b", 0), app("c", 0)]);
        let sort = SharedSort::default();
        let page = PageSource::from_raw(Some("99999999999999999999".into()));
        let view = ListView::new(&store, &sort, page, &config(2), ListMode::Short);

        assert_eq!(view.current_page(), 2);
        assert_eq!(names(&view), ["c"]);
    }

    #[test]
    fn identical_sorting_is_not_reapplied() {
        let store: CollectionStore<Application> = CollectionStore::new();
        let sort = SharedSort::default();
        let mut view = ListView::new(&store, &sort, PageSource::fixed(1), &config(5), ListMode::Short);
        assert!(!view.set_sorting(AppColumn::Name, false));
        assert!(view.set_sorting(AppColumn::Port, true));
    }

    #[test]
    fn next_change_waits_for_input() {
        let store = CollectionStore::new();
        let sort = SharedSort::default();
        let (_param, source) = PageSource::channel(None);
        let mut view = ListView::new(&store, &sort, source, &config(5), ListMode::Short);

        let mut change = tokio_test::task::spawn(view.next_change());
        tokio_test::assert_pending!(change.poll());

        store.replace(vec![app("a", 0)]);
        assert!(change.is_woken());
        tokio_test::assert_ready_eq!(change.poll(), true);
        drop(change);

        assert_eq!(names(&view), ["a"]);
    }

    #[test]
    fn fixed_page_does_not_wake_an_unchanged_view() {
        let store = CollectionStore::new();
        store.replace(vec![app("a", 0)]);
        let sort = SharedSort::default();
        let mut view = ListView::new(&store, &sort, PageSource::fixed(1), &config(5), ListMode::Short);

        let mut change = tokio_test::task::spawn(view.next_change());
        tokio_test::assert_pending!(change.poll());

        sort.set(AppColumn::Port, false);
        assert!(change.is_woken());
        tokio_test::assert_ready_eq!(change.poll(), true);
    }

    #[tokio::test]
    async fn next_change_follows_the_store() {
        let store = CollectionStore::new();
        let sort = SharedSort::default();
        let mut view = ListView::new(&store, &sort, PageSource::fixed(1), &config(5), ListMode::Short);

        store.replace(vec![app("x", 1)]);
        assert!(view.next_change().await);
        assert_eq!(names(&view), ["x"]);

        drop(store);
        assert!(!view.next_change().await);
    }
}

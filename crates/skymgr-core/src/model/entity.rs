use std::cmp::Ordering;
use std::fmt;

/// An entity that can be shown in a sortable, paginated, selectable list.
pub trait ListEntity: Send + Sync + 'static {
    /// Fixed set of columns the list can be sorted by.
    type Column: Copy + Eq + Default + fmt::Debug + Send + Sync + 'static;

    /// Unique, stable key. Selections are tracked by it.
    fn key(&self) -> &str;

    /// Compare by `column` in its non-reversed direction.
    ///
    /// May return `Equal` for distinct entities; the projector breaks such
    /// ties with [`default_order`](Self::default_order).
    fn compare_by(&self, other: &Self, column: Self::Column) -> Ordering;

    /// Total order used to break ties: lexicographic by key.
    fn default_order(&self, other: &Self) -> Ordering {
        self.key().cmp(other.key())
    }
}

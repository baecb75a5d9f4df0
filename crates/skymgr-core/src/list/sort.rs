// ── Shared sort settings ──
//
// One sort spec per entity type, shared by every list view of that type.
// Views hold a receiver and re-project when it changes.

use std::sync::Arc;

use tokio::sync::watch;

/// Column plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec<C> {
    pub column: C,
    pub reverse: bool,
}

impl<C: Copy + Eq> SortSpec<C> {
    pub fn new(column: C, reverse: bool) -> Self {
        Self { column, reverse }
    }

    /// Header-click semantics: a new column starts non-reversed, the
    /// current column flips direction.
    #[must_use]
    pub fn toggled_for(self, column: C) -> Self {
        if self.column == column {
            Self {
                column,
                reverse: !self.reverse,
            }
        } else {
            Self {
                column,
                reverse: false,
            }
        }
    }

    pub fn arrow(self) -> SortArrow {
        if self.reverse {
            SortArrow::Up
        } else {
            SortArrow::Down
        }
    }
}

/// Direction indicator shown next to the sorted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArrow {
    Up,
    Down,
}

impl SortArrow {
    pub fn icon(self) -> char {
        match self {
            Self::Up => '↑',
            Self::Down => '↓',
        }
    }
}

/// Process-wide sort spec for one entity type.
///
/// Cloning yields another handle to the same spec; construct one per
/// entity type and hand a clone to every view.
#[derive(Debug)]
pub struct SharedSort<C> {
    tx: Arc<watch::Sender<SortSpec<C>>>,
}

impl<C> Clone for SharedSort<C> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<C: Copy + Eq + Default + Send + Sync + 'static> Default for SharedSort<C> {
    fn default() -> Self {
        Self::new(SortSpec::default())
    }
}

impl<C: Copy + Eq + Send + Sync + 'static> SharedSort<C> {
    pub fn new(initial: SortSpec<C>) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> SortSpec<C> {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SortSpec<C>> {
        self.tx.subscribe()
    }

    /// Select `column`, or flip direction if it is already selected.
    pub fn change_order(&self, column: C) -> SortSpec<C> {
        let mut next = self.get();
        self.tx.send_modify(|spec| {
            *spec = spec.toggled_for(column);
            next = *spec;
        });
        next
    }

    /// Replace the sort spec. Returns `false` (and notifies nobody) when it is
    /// unchanged.
    pub fn set(&self, column: C, reverse: bool) -> bool {
        let wanted = SortSpec::new(column, reverse);
        self.tx.send_if_modified(|spec| {
            if *spec == wanted {
                false
            } else {
                *spec = wanted;
                true
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::AppColumn;

    #[test]
    fn same_column_flips_direction() {
        let sort = SharedSort::<AppColumn>::default();
        assert_eq!(sort.change_order(AppColumn::Name), SortSpec::new(AppColumn::Name, true));
        assert_eq!(sort.change_order(AppColumn::Name), SortSpec::new(AppColumn::Name, false));
    }

    #[test]
    fn new_column_starts_forward() {
        let sort = SharedSort::new(SortSpec::new(AppColumn::Name, true));
        assert_eq!(sort.change_order(AppColumn::Port), SortSpec::new(AppColumn::Port, false));
    }

    #[test]
    fn set_ignores_identical_spec() {
        let sort = SharedSort::<AppColumn>::default();
        let mut rx = sort.subscribe();
        assert!(!sort.set(AppColumn::Name, false));
        assert!(!rx.has_changed().unwrap());

        assert!(sort.set(AppColumn::State, true));
        assert!(rx.has_changed().unwrap());
        assert_eq!(sort.get().arrow(), SortArrow::Up);
    }

    #[test]
    fn clones_share_one_spec() {
        let a = SharedSort::<AppColumn>::default();
        let b = a.clone();
        a.change_order(AppColumn::AutoStart);
        assert_eq!(b.get().column, AppColumn::AutoStart);
    }
}

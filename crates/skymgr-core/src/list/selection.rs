// ── Selection tracker ──
//
// Checked state per visible key. After every reconciliation the tracked
// keys are exactly the keys of the visible slice, in display order.

use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    entries: IndexMap<String, bool>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Align tracked keys with `visible_keys`: new keys start unchecked,
    /// vanished keys are dropped, surviving keys keep their state.
    pub fn reconcile<'a, I>(&mut self, visible_keys: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let entries = visible_keys
            .into_iter()
            .map(|key| {
                let checked = self.entries.get(key).copied().unwrap_or(false);
                (key.to_owned(), checked)
            })
            .collect();
        self.entries = entries;
    }

    /// Flip the state of `key`. Returns the new state, or `None` if the
    /// key is not tracked.
    pub fn toggle(&mut self, key: &str) -> Option<bool> {
        let checked = self.entries.get_mut(key)?;
        *checked = !*checked;
        Some(*checked)
    }

    /// Set the state of a tracked key. Untracked keys are ignored.
    pub fn set(&mut self, key: &str, checked: bool) -> bool {
        match self.entries.get_mut(key) {
            Some(v) => {
                *v = checked;
                true
            }
            None => false,
        }
    }

    /// Set every tracked key.
    pub fn set_all(&mut self, checked: bool) {
        self.entries.values_mut().for_each(|v| *v = checked);
    }

    pub fn has_any_selected(&self) -> bool {
        self.entries.values().any(|&v| v)
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    /// Checked keys, in display order.
    pub fn selected_keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, checked)| **checked)
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// All tracked keys, in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

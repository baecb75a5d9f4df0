// ── Runtime list configuration ──
//
// Page sizes and timing knobs for list views and command sequencing.
// Core never reads config files; `skymgr-config` builds a `ListConfig`
// and hands it in.

use std::time::Duration;

/// Rows per page when a list is embedded as a short preview.
pub const DEFAULT_SHORT_PAGE_SIZE: usize = 5;

/// Rows per page on the dedicated full-list page.
pub const DEFAULT_FULL_PAGE_SIZE: usize = 40;

/// Wait between a mutating call returning and the owning page reloading.
///
/// The visor applies app and transport changes after acknowledging the
/// request, so an immediate reload can still observe the old state.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Which page size a list view uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Preview with few rows and a link to the full list.
    #[default]
    Short,
    /// Full list with pagination controls.
    Full,
}

/// Page sizes for both list modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizes {
    pub short: usize,
    pub full: usize,
}

impl PageSizes {
    /// Page size for `mode`. Never zero.
    pub fn for_mode(self, mode: ListMode) -> usize {
        match mode {
            ListMode::Short => self.short,
            ListMode::Full => self.full,
        }
        .max(1)
    }
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            short: DEFAULT_SHORT_PAGE_SIZE,
            full: DEFAULT_FULL_PAGE_SIZE,
        }
    }
}

/// Configuration shared by every list view and command sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    pub page_sizes: PageSizes,
    pub settle_delay: Duration,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_sizes: PageSizes::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

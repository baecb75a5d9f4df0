// ── Page-number source ──
//
// The current page arrives as a raw route parameter. Missing or malformed
// values mean page 1.

use std::sync::Arc;

use tokio::sync::watch;

/// Parse a raw `page` parameter. Leading digits are honoured (`"3abc"` is
/// page 3) and saturate at `usize::MAX`; anything else, or a value below
/// 1, yields 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return 1;
    };
    let raw = raw.trim_start();
    let digits_end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..digits_end]
        .bytes()
        .fold(0usize, |page, digit| {
            page.saturating_mul(10)
                .saturating_add(usize::from(digit - b'0'))
        })
        .max(1)
}

/// Writer side of a page parameter, held by whatever does the routing.
#[derive(Debug, Clone)]
pub struct PageParam {
    tx: Arc<watch::Sender<Option<String>>>,
}

impl PageParam {
    pub fn navigate(&self, page: usize) {
        self.tx.send_replace(Some(page.to_string()));
    }

    pub fn subscribe(&self) -> PageSource {
        PageSource {
            rx: self.tx.subscribe(),
        }
    }
}

/// Reader side: yields the 1-based page whenever navigation changes it.
#[derive(Debug, Clone)]
pub struct PageSource {
    rx: watch::Receiver<Option<String>>,
}

impl PageSource {
    pub fn new(rx: watch::Receiver<Option<String>>) -> Self {
        Self { rx }
    }

    /// A connected parameter/source pair starting at `initial`.
    pub fn channel(initial: Option<String>) -> (PageParam, PageSource) {
        let (tx, rx) = watch::channel(initial);
        (
            PageParam {
                tx: Arc::new(tx),
            },
            PageSource { rx },
        )
    }

    /// A source pinned to a raw parameter that never changes.
    pub fn from_raw(raw: Option<String>) -> Self {
        let (_, source) = Self::channel(raw);
        source
    }

    /// A source pinned to page `page`.
    pub fn fixed(page: usize) -> Self {
        Self::from_raw(Some(page.to_string()))
    }

    /// Current page, marking it as seen.
    pub fn current(&mut self) -> usize {
        parse_page(self.rx.borrow_and_update().as_deref())
    }

    /// Whether a writer can still navigate this source.
    pub fn is_live(&self) -> bool {
        self.rx.has_changed().is_ok()
    }

    /// Wait for the next navigation. `None` once the writer is gone.
    pub async fn changed(&mut self) -> Option<usize> {
        self.rx.changed().await.ok()?;
        Some(self.current())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn malformed_pages_default_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-4")), 1);
    }

    #[test]
    fn leading_digits_are_parsed() {
        assert_eq!(parse_page(Some("3")), 3);
        assert_eq!(parse_page(Some("12px")), 12);
        assert_eq!(parse_page(Some(" 7")), 7);
        assert_eq!(parse_page(Some("007")), 7);
    }

    #[test]
    fn overlong_pages_saturate() {
        assert_eq!(parse_page(Some("99999999999999999999999")), usize::MAX);
    }

    #[tokio::test]
    async fn navigation_is_delivered() {
        let (param, mut source) = PageSource::channel(None);
        assert_eq!(source.current(), 1);

        param.navigate(4);
        assert_eq!(source.changed().await, Some(4));

        drop(param);
        assert_eq!(source.changed().await, None);
    }

    #[test]
    fn fixed_source_reports_its_page() {
        let mut source = PageSource::fixed(2);
        assert_eq!(source.current(), 2);
        assert!(!source.is_live());
    }

    #[test]
    fn channel_source_is_live_until_writer_drops() {
        let (param, source) = PageSource::channel(None);
        assert!(source.is_live());
        drop(param);
        assert!(!source.is_live());
    }
}

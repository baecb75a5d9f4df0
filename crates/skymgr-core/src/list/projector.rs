// ── View projector ──
//
// Pure sort + paginate step. Takes the full collection, the sort spec and
// the requested page, and yields the visible slice.

use std::cmp::Ordering;
use std::sync::Arc;

use super::sort::SortSpec;
use crate::model::ListEntity;

/// Page size and the 1-based page the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_size: usize,
    pub requested_page: usize,
}

/// Result of one projection.
#[derive(Debug)]
pub struct Projection<E> {
    pub visible: Vec<Arc<E>>,
    pub page_count: usize,
    /// Requested page clamped to `[1, page_count]`.
    pub current_page: usize,
}

/// Ordering for `spec`: column comparator, flipped when reversed, with
/// ties always broken by ascending default order.
pub fn compare<E: ListEntity>(a: &E, b: &E, spec: SortSpec<E::Column>) -> Ordering {
    let primary = a.compare_by(b, spec.column);
    let primary = if spec.reverse { primary.reverse() } else { primary };
    primary.then_with(|| a.default_order(b))
}

/// `max(1, ceil(len / page_size))`.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Sort `all` in place and cut out the requested page.
pub fn project<E: ListEntity>(
    all: &mut [Arc<E>],
    spec: SortSpec<E::Column>,
    pagination: Pagination,
) -> Projection<E> {
    all.sort_by(|a, b| compare(a.as_ref(), b.as_ref(), spec));

    let page_size = pagination.page_size.max(1);
    let page_count = page_count(all.len(), page_size);
    let current_page = pagination.requested_page.clamp(1, page_count);

    let start = page_size * (current_page - 1);
    let end = (start + page_size).min(all.len());
    let visible = all.get(start..end).map(<[_]>::to_vec).unwrap_or_default();

    Projection {
        visible,
        page_count,
        current_page,
    }
}

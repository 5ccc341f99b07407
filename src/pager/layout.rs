//! Page boundary arithmetic shared by the controller and the renderer.

use std::ops::Range;

/// Geometry of a collection split into fixed-size pages.
///
/// Pages are numbered from 1. Every page holds `page_size` items except
/// possibly the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    total_items: usize,
    page_size: usize,
}

impl PageLayout {
    /// Create a layout. A page size of zero is raised to one.
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            total_items,
            page_size: page_size.max(1),
        }
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages, zero for an empty collection
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    /// Resolve an arbitrary page request to the nearest valid page.
    ///
    /// An empty layout has no valid page; it resolves everything to 1.
    pub fn clamp_page(&self, target: i64) -> usize {
        let last = self.total_pages().max(1);
        if target < 1 {
            return 1;
        }
        usize::try_from(target).map_or(last, |page| page.min(last))
    }

    /// Item index range covered by `page`, clipped to the collection
    pub fn page_range(&self, page: usize) -> Range<usize> {
        if page == 0 || self.is_empty() {
            return 0..0;
        }

        let start = (page - 1)
            .saturating_mul(self.page_size)
            .min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        start..end
    }
}

/// Convert a page number into the signed form accepted by page requests.
pub(crate) fn as_target(page: usize) -> i64 {
    i64::try_from(page).unwrap_or(i64::MAX)
}

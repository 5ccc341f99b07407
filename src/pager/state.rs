//! Observable page state published by the controller.

use super::layout::PageLayout;
use serde::Serialize;
use std::ops::Range;

/// Phase of the controller's transition state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No navigation in flight
    Idle,
    /// Waiting for the simulated latency to elapse
    Transitioning,
}

/// Snapshot of the pagination state.
///
/// `current_page` is 1-based and always lies in `1..=total_pages` when the
/// collection is non-empty. For an empty collection it stays at 1 and
/// `total_pages` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub is_loading: bool,
}

impl PageState {
    /// Idle state showing `page` of `layout`
    pub(crate) fn settled(layout: PageLayout, page: usize) -> Self {
        Self {
            current_page: page,
            page_size: layout.page_size(),
            total_pages: layout.total_pages(),
            total_items: layout.total_items(),
            is_loading: false,
        }
    }

    pub fn layout(&self) -> PageLayout {
        PageLayout::new(self.total_items, self.page_size)
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Transitioning
        } else {
            Phase::Idle
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    /// Item indices visible on the current page
    pub fn item_range(&self) -> Range<usize> {
        self.layout().page_range(self.current_page)
    }

    /// Whether a "previous" control should be enabled
    pub fn can_go_previous(&self) -> bool {
        !self.is_loading && !self.is_empty() && self.current_page > 1
    }

    /// Whether a "next" control should be enabled
    pub fn can_go_next(&self) -> bool {
        !self.is_loading && self.current_page < self.total_pages
    }
}

//! Page state and pagination controls.

/// Products per shop page.
pub const ITEMS_PER_PAGE: u32 = 12;

/// Width of the page-number window.
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// Current page and the match count of the last fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: u32,
    total_items: u64,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_items: 0,
        }
    }
}

impl PageState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 1-based.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    pub const fn set_total_items(&mut self, total_items: u64) {
        self.total_items = total_items;
    }

    /// `ceil(total_items / ITEMS_PER_PAGE)`; 0 when nothing matched.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_items.div_ceil(u64::from(ITEMS_PER_PAGE));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Ask for `page` before its range is known; the next render pulls it
    /// back into range.
    pub fn request_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// Back to page 1.
    pub const fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Move to `page` if it exists and is not the current one.
    pub fn go_to(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn first(&mut self) -> bool {
        self.go_to(1)
    }

    pub fn prev(&mut self) -> bool {
        self.go_to(self.current_page.saturating_sub(1))
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current_page.saturating_add(1))
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.total_pages())
    }

    /// Pull the current page back into `[1, total_pages]`; with no pages it
    /// stays at 1. Returns whether it moved.
    pub fn clamp(&mut self) -> bool {
        let target = self.current_page.clamp(1, self.total_pages().max(1));
        let moved = target != self.current_page;
        self.current_page = target;
        moved
    }

    /// Controls for the current state.
    #[must_use]
    pub fn controls(&self) -> PaginationControls {
        let total_pages = self.total_pages();
        if total_pages == 0 {
            return PaginationControls::default();
        }

        let current = self.current_page.min(total_pages);
        let span = MAX_VISIBLE_PAGES - 1;
        let mut start = current.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
        let end = start.saturating_add(span).min(total_pages);
        if end - start < span {
            start = end.saturating_sub(span).max(1);
        }

        PaginationControls {
            current_page: current,
            total_pages,
            first_enabled: current > 1,
            prev_enabled: current > 1,
            next_enabled: current < total_pages,
            last_enabled: current < total_pages,
            pages: (start..=end).collect(),
        }
    }
}

/// What the pagination bar shows. Empty (no buttons) when there are no pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationControls {
    pub current_page: u32,
    pub total_pages: u32,
    pub first_enabled: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub last_enabled: bool,
    /// Visible page numbers, ascending.
    pub pages: Vec<u32>,
}

impl PaginationControls {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    /// `Page 3 of 7`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(current_page: u32, total_items: u64) -> PageState {
        PageState {
            current_page,
            total_items,
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(state(1, 0).total_pages(), 0);
        assert_eq!(state(1, 1).total_pages(), 1);
        assert_eq!(state(1, 12).total_pages(), 1);
        assert_eq!(state(1, 25).total_pages(), 3);
    }

    #[test]
    fn test_no_pages_no_controls() {
        let controls = state(1, 0).controls();
        assert!(controls.is_empty());
        assert!(controls.pages.is_empty());
        assert!(!controls.next_enabled);
    }

    #[test]
    fn test_window_centred() {
        let controls = state(10, 20 * 12).controls();
        assert_eq!(controls.pages, [8, 9, 10, 11, 12]);
        assert!(controls.prev_enabled && controls.next_enabled);
    }

    #[test]
    fn test_window_clamped_at_edges() {
        assert_eq!(state(1, 20 * 12).controls().pages, [1, 2, 3, 4, 5]);
        assert_eq!(state(20, 20 * 12).controls().pages, [16, 17, 18, 19, 20]);
        assert_eq!(state(19, 20 * 12).controls().pages, [16, 17, 18, 19, 20]);
        assert_eq!(state(3, 25).controls().pages, [1, 2, 3]);
    }

    #[test]
    fn test_first_and_last_page_buttons() {
        let first = state(1, 25).controls();
        assert!(!first.first_enabled && !first.prev_enabled);
        assert!(first.next_enabled && first.last_enabled);

        let last = state(3, 25).controls();
        assert!(last.first_enabled && last.prev_enabled);
        assert!(!last.next_enabled && !last.last_enabled);
        assert_eq!(last.label(), "Page 3 of 3");
    }

    #[test]
    fn test_navigation_stays_in_range() {
        let mut page = state(1, 25);
        assert!(!page.prev());
        assert!(!page.first());
        assert!(page.next());
        assert!(page.last());
        assert_eq!(page.current_page(), 3);
        assert!(!page.next());
        assert!(!page.go_to(4));
        assert!(!page.go_to(0));
        assert!(page.go_to(2));
    }

    #[test]
    fn test_requested_page_is_clamped_later() {
        let mut page = PageState::new();
        page.request_page(7);
        assert_eq!(page.current_page(), 7);
        page.set_total_items(25);
        assert!(page.clamp());
        assert_eq!(page.current_page(), 3);

        page.request_page(0);
        assert_eq!(page.current_page(), 1);
    }

    #[test]
    fn test_clamp() {
        let mut page = state(5, 25);
        assert!(page.clamp());
        assert_eq!(page.current_page(), 3);

        let mut empty = state(4, 0);
        assert!(empty.clamp());
        assert_eq!(empty.current_page(), 1);
        assert!(!empty.clamp());
    }
}

use std::ops::Range;

/// Client-side pagination over an already-fetched result list. The current
/// page is always within `1..=total_pages`, and `total_pages` is at least 1
/// even when the list is empty, so "Page 1 of 1" renders instead of
/// "Page 1 of 0".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current_page: usize,
    per_page: usize,
    total_items: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(25)
    }
}

impl Pager {
    pub fn new(per_page: usize) -> Self {
        Self {
            current_page: 1,
            per_page: per_page.max(1),
            total_items: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page).max(1)
    }

    /// Install a fresh result set; always returns to page 1.
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = 1;
    }

    /// Jump to `page`; out-of-range requests are ignored.
    pub fn go_to_page(&mut self, page: usize) {
        if (1..=self.total_pages()).contains(&page) {
            self.current_page = page;
        }
    }

    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Change the page size, keeping the current page in range.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.current_page = self.current_page.min(self.total_pages());
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Index range of the current page, clamped to the item count so the
    /// final partial page is exactly as long as the leftover items.
    pub fn page_bounds(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.per_page;
        let start = start.min(self.total_items);
        let end = (start + self.per_page).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.page_bounds()]
    }
}

//! Pagination state and page slicing.

/// One page of an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<'a, R> {
    /// Rows on this page.
    pub rows: &'a [R],
    /// Index of this page (after clamping).
    pub page_index: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
    /// Whether a previous page exists.
    pub can_prev: bool,
    /// Whether a next page exists.
    pub can_next: bool,
}

/// Number of pages for `len` items, never less than 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Slice out one page. `page_index` is clamped into range.
pub fn slice<R>(ordered: &[R], page_index: usize, page_size: usize) -> PageSlice<'_, R> {
    let total = total_pages(ordered.len(), page_size);
    let page_index = page_index.min(total - 1);
    let start = (page_index * page_size).min(ordered.len());
    let end = (start + page_size).min(ordered.len());
    PageSlice {
        rows: &ordered[start..end],
        page_index,
        total_pages: total,
        can_prev: page_index > 0,
        can_next: page_index + 1 < total,
    }
}

/// Page index and size for one table.
///
/// The index is kept inside `[0, total_pages - 1]` for the most recent
/// item count. Changing the page size returns to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page_index: usize,
    page_size: usize,
    item_count: usize,
}

impl Pagination {
    /// Create pagination at the first page.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            item_count: 0,
        }
    }

    /// Current page index.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Current page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Item count the index is clamped against.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Total number of pages.
    pub fn total_pages(&self) -> usize {
        total_pages(self.item_count, self.page_size)
    }

    /// Whether a previous page exists.
    pub fn can_prev(&self) -> bool {
        self.page_index > 0
    }

    /// Whether a next page exists.
    pub fn can_next(&self) -> bool {
        self.page_index + 1 < self.total_pages()
    }

    /// Index range of the current page within the ordered sequence.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.page_index * self.page_size).min(self.item_count);
        let end = (start + self.page_size).min(self.item_count);
        start..end
    }

    /// Update the item count and reclamp. Returns true if the index moved.
    pub fn set_item_count(&mut self, count: usize) -> bool {
        self.item_count = count;
        self.clamp()
    }

    /// Set the page size. Returns to the first page.
    ///
    /// Returns true if anything changed.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        let size = size.max(1);
        if size == self.page_size {
            return false;
        }
        log::debug!("Page size {} -> {}, back to first page", self.page_size, size);
        self.page_size = size;
        self.page_index = 0;
        true
    }

    /// Go to a page, clamped into range. Returns true if the index moved.
    pub fn set_page_index(&mut self, index: usize) -> bool {
        let previous = self.page_index;
        self.page_index = index;
        self.clamp();
        self.page_index != previous
    }

    /// Go to the next page.
    pub fn next(&mut self) -> bool {
        self.can_next() && self.set_page_index(self.page_index + 1)
    }

    /// Go to the previous page.
    pub fn previous(&mut self) -> bool {
        self.can_prev() && self.set_page_index(self.page_index - 1)
    }

    /// Go to the first page.
    pub fn first(&mut self) -> bool {
        self.set_page_index(0)
    }

    /// Go to the last page.
    pub fn last(&mut self) -> bool {
        self.set_page_index(self.total_pages() - 1)
    }

    fn clamp(&mut self) -> bool {
        let max_index = self.total_pages() - 1;
        if self.page_index > max_index {
            log::debug!("Page index {} clamped to {}", self.page_index, max_index);
            self.page_index = max_index;
            return true;
        }
        false
    }
}

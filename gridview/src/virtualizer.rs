//! Row virtualization.
//!
//! Computes which rows of the displayed sequence must be rendered for the
//! current scroll position, plus the padding that stands in for the rows
//! that are skipped. The padding always satisfies
//! `padding_top + rendered height + padding_bottom == total_height`, so the
//! scroll container keeps its height while the window moves.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Height of rows, in pixels.
#[derive(Clone)]
pub enum RowHeight {
    /// Every row has the same height.
    Fixed(u32),
    /// Height per row index.
    Variable(Arc<dyn Fn(usize) -> u32 + Send + Sync>),
}

impl RowHeight {
    /// Per-row height from a function.
    pub fn variable<F>(f: F) -> Self
    where
        F: Fn(usize) -> u32 + Send + Sync + 'static,
    {
        RowHeight::Variable(Arc::new(f))
    }

    fn height(&self, index: usize) -> u32 {
        match self {
            RowHeight::Fixed(h) => *h,
            RowHeight::Variable(f) => f(index),
        }
    }
}

impl fmt::Debug for RowHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowHeight::Fixed(h) => f.debug_tuple("Fixed").field(h).finish(),
            RowHeight::Variable(_) => f.write_str("Variable(..)"),
        }
    }
}

/// The rows to render and the padding around them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualWindow {
    /// Indices (into the displayed rows) to render.
    pub range: Range<usize>,
    /// Height standing in for the rows above the window.
    pub padding_top: u64,
    /// Height standing in for the rows below the window.
    pub padding_bottom: u64,
    /// Height of all displayed rows.
    pub total_height: u64,
}

impl VirtualWindow {
    fn empty(total_height: u64) -> Self {
        Self {
            range: 0..0,
            padding_top: 0,
            padding_bottom: total_height,
            total_height,
        }
    }
}

/// Scroll state and window computation for one list of rows.
#[derive(Debug, Clone)]
pub struct Virtualizer {
    row_height: RowHeight,
    overscan: usize,
    container_height: u32,
    scroll_offset: u64,
    row_count: usize,
    /// Prefix sums of row heights for variable heights.
    /// offsets[i] = top of row i, offsets[row_count] = total height.
    offsets: Vec<u64>,
}

impl Virtualizer {
    /// Create a virtualizer with no rows.
    pub fn new(row_height: RowHeight, container_height: u32, overscan: usize) -> Self {
        let row_height = match row_height {
            RowHeight::Fixed(h) => RowHeight::Fixed(h.max(1)),
            variable => variable,
        };
        Self {
            row_height,
            overscan,
            container_height,
            scroll_offset: 0,
            row_count: 0,
            offsets: vec![0],
        }
    }

    /// Number of rows being virtualized.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Scroll container height.
    pub fn container_height(&self) -> u32 {
        self.container_height
    }

    /// Overscan row count.
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Update the row count.
    ///
    /// A different count means the dataset changed shape, so the scroll
    /// position re-anchors to the first row. Returns true if it changed.
    pub fn set_row_count(&mut self, count: usize) -> bool {
        if count == self.row_count {
            return false;
        }
        log::trace!("Virtualizer row count {} -> {}", self.row_count, count);
        self.row_count = count;
        self.rebuild_offsets();
        self.scroll_offset = 0;
        true
    }

    /// Re-anchor the window at the first row.
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
    }

    /// Replace the row height and recompute offsets.
    pub fn set_row_height(&mut self, row_height: RowHeight) {
        self.row_height = row_height;
        self.rebuild_offsets();
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
    }

    /// Set the container height, clamping the scroll offset.
    pub fn set_container_height(&mut self, height: u32) {
        self.container_height = height;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
    }

    /// Set the scroll offset, clamped into range. Returns true if it moved.
    pub fn set_scroll_offset(&mut self, offset: u64) -> bool {
        let offset = offset.min(self.max_scroll_offset());
        if offset == self.scroll_offset {
            return false;
        }
        self.scroll_offset = offset;
        true
    }

    /// Scroll by a signed delta.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let target = if delta < 0 {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as u64)
        };
        self.set_scroll_offset(target)
    }

    /// Scroll the minimum distance that brings a row fully into view.
    pub fn scroll_to_index(&mut self, index: usize) -> bool {
        if index >= self.row_count {
            return false;
        }
        let top = self.offset_of(index);
        let bottom = self.offset_of(index + 1);
        let viewport = u64::from(self.container_height);
        if top < self.scroll_offset {
            self.set_scroll_offset(top)
        } else if bottom > self.scroll_offset + viewport {
            self.set_scroll_offset(bottom.saturating_sub(viewport))
        } else {
            false
        }
    }

    /// Height of all rows.
    pub fn total_height(&self) -> u64 {
        self.offset_of(self.row_count)
    }

    /// Largest valid scroll offset.
    pub fn max_scroll_offset(&self) -> u64 {
        self.total_height()
            .saturating_sub(u64::from(self.container_height))
    }

    /// Top edge of a row. `index == row_count` gives the total height.
    pub fn offset_of(&self, index: usize) -> u64 {
        let index = index.min(self.row_count);
        match &self.row_height {
            RowHeight::Fixed(h) => index as u64 * u64::from(*h),
            RowHeight::Variable(_) => self.offsets[index],
        }
    }

    /// Row covering a content offset.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.row_count == 0 || offset >= self.total_height() {
            return None;
        }
        let index = match &self.row_height {
            RowHeight::Fixed(h) => (offset / u64::from(*h)) as usize,
            RowHeight::Variable(_) => {
                self.offsets[..self.row_count].partition_point(|&o| o <= offset) - 1
            }
        };
        Some(index.min(self.row_count - 1))
    }

    /// Compute the render window for the current scroll position.
    pub fn window(&self) -> VirtualWindow {
        let total_height = self.total_height();
        if self.row_count == 0 || self.container_height == 0 {
            return VirtualWindow::empty(total_height);
        }

        let Some(first) = self.index_at_offset(self.scroll_offset) else {
            return VirtualWindow::empty(total_height);
        };
        let viewport_end = self.scroll_offset + u64::from(self.container_height);
        let visible_end = self.first_row_at_or_after(viewport_end);

        let start = first.saturating_sub(self.overscan);
        let end = visible_end.saturating_add(self.overscan).min(self.row_count);

        let padding_top = self.offset_of(start);
        let padding_bottom = total_height - self.offset_of(end);
        VirtualWindow {
            range: start..end,
            padding_top,
            padding_bottom,
            total_height,
        }
    }

    /// Number of rows whose top edge is above `offset`.
    fn first_row_at_or_after(&self, offset: u64) -> usize {
        match &self.row_height {
            RowHeight::Fixed(h) => {
                let h = u64::from(*h);
                (offset.div_ceil(h) as usize).min(self.row_count)
            }
            RowHeight::Variable(_) => {
                self.offsets[..self.row_count].partition_point(|&o| o < offset)
            }
        }
    }

    fn rebuild_offsets(&mut self) {
        self.offsets.clear();
        if let RowHeight::Variable(_) = self.row_height {
            self.offsets.reserve(self.row_count + 1);
            let mut top = 0u64;
            self.offsets.push(top);
            for i in 0..self.row_count {
                top += u64::from(self.row_height.height(i));
                self.offsets.push(top);
            }
        } else {
            self.offsets.push(0);
        }
    }
}

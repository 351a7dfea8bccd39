//! Windowed rendering: which rows of a container are materialized.
//!
//! Extents and offsets are in whatever unit the host lays rows out in
//! (terminal cells here). Every row of one container has the same extent.

use std::ops::Range;

use serde::Serialize;

/// The rows to materialize for one frame. Never stored between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowRange {
    pub first_visible_index: usize,
    /// Inclusive
    pub last_visible_index: usize,
    /// Logical rows plus the placeholder slot, if any
    pub row_count: usize,
    /// First row materialized, overscan included
    pub overscan_start: usize,
    /// One past the last row materialized, overscan included
    pub overscan_end: usize,
}

impl WindowRange {
    const EMPTY: WindowRange = WindowRange {
        first_visible_index: 0,
        last_visible_index: 0,
        row_count: 0,
        overscan_start: 0,
        overscan_end: 0,
    };

    /// No rows at all. A valid terminal state, not an error.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Rows intersecting the viewport.
    pub fn visible(&self) -> Range<usize> {
        if self.is_empty() {
            0..0
        } else {
            self.first_visible_index..self.last_visible_index + 1
        }
    }

    /// Rows to build, overscan included.
    pub fn materialized(&self) -> Range<usize> {
        self.overscan_start..self.overscan_end
    }

    pub fn is_visible(&self, row: usize) -> bool {
        self.visible().contains(&row)
    }
}

/// What a window row stands for while a drag may be in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSlot {
    /// A logical entry, by index into the container's sequence
    Entry(usize),
    /// The origin row of the lifted subject; rendered as an empty reservation
    Lifted(usize),
    /// The extra trailing slot reserved while a placeholder is in use
    Placeholder,
}

impl RowSlot {
    pub fn is_placeholder(self) -> bool {
        self == RowSlot::Placeholder
    }
}

/// Row geometry for one container kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowModel {
    row_extent: usize,
    overscan: usize,
}

impl WindowModel {
    /// A zero row extent is treated as one.
    pub fn new(row_extent: usize, overscan: usize) -> Self {
        WindowModel {
            row_extent: row_extent.max(1),
            overscan,
        }
    }

    pub fn row_extent(&self) -> usize {
        self.row_extent
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Rows the window must hold: one extra while the placeholder is in use.
    pub fn row_count(logical_count: usize, using_placeholder: bool) -> usize {
        if using_placeholder {
            logical_count.saturating_add(1)
        } else {
            logical_count
        }
    }

    /// Compute the window for one frame.
    ///
    /// The scroll offset is clamped so the window never starts past the last
    /// row. A viewport smaller than one row still shows the row under the
    /// offset.
    pub fn compute(
        &self,
        logical_count: usize,
        using_placeholder: bool,
        viewport_extent: usize,
        scroll_offset: usize,
    ) -> WindowRange {
        let row_count = Self::row_count(logical_count, using_placeholder);
        if row_count == 0 {
            return WindowRange::EMPTY;
        }

        let last_row = row_count - 1;
        let offset = scroll_offset.min(self.max_scroll_offset(row_count, viewport_extent));
        let first = (offset / self.row_extent).min(last_row);
        let last = (offset.saturating_add(viewport_extent.max(1) - 1) / self.row_extent).min(last_row);

        WindowRange {
            first_visible_index: first,
            last_visible_index: last,
            row_count,
            overscan_start: first.saturating_sub(self.overscan),
            overscan_end: last.saturating_add(1).saturating_add(self.overscan).min(row_count),
        }
    }

    /// Total extent of `row_count` rows, saturating at `usize::MAX`.
    pub fn content_extent(&self, row_count: usize) -> usize {
        row_count.saturating_mul(self.row_extent)
    }

    /// Largest offset that still fills the viewport.
    pub fn max_scroll_offset(&self, row_count: usize, viewport_extent: usize) -> usize {
        self.content_extent(row_count).saturating_sub(viewport_extent)
    }

    pub fn clamp_scroll(&self, row_count: usize, viewport_extent: usize, scroll_offset: usize) -> usize {
        scroll_offset.min(self.max_scroll_offset(row_count, viewport_extent))
    }

    /// Smallest change to `scroll_offset` that brings `row` fully into view.
    pub fn scroll_to_reveal(&self, row: usize, viewport_extent: usize, scroll_offset: usize) -> usize {
        let top = row.saturating_mul(self.row_extent);
        let bottom = top.saturating_add(self.row_extent);
        if top < scroll_offset {
            top
        } else if bottom > scroll_offset.saturating_add(viewport_extent) {
            bottom.saturating_sub(viewport_extent)
        } else {
            scroll_offset
        }
    }

    /// Position of `row` relative to the viewport start. Negative when the row
    /// begins above it (overscan rows).
    pub fn row_offset(&self, row: usize, scroll_offset: usize) -> isize {
        let top = isize::try_from(row.saturating_mul(self.row_extent)).unwrap_or(isize::MAX);
        top.saturating_sub(isize::try_from(scroll_offset).unwrap_or(isize::MAX))
    }

    /// Map a window row to what it shows.
    ///
    /// `logical_count` excludes the placeholder; `lifted` is the origin row of
    /// a subject currently dragged out of this container.
    pub fn slot(row: usize, logical_count: usize, lifted: Option<usize>) -> RowSlot {
        if row >= logical_count {
            RowSlot::Placeholder
        } else if lifted == Some(row) {
            RowSlot::Lifted(row)
        } else {
            RowSlot::Entry(row)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_adds_one_row() {
        let model = WindowModel::new(3, 0);
        for n in [0usize, 1, 4, 1000] {
            assert_eq!(model.compute(n, true, 30, 0).row_count, n + 1);
            assert_eq!(model.compute(n, false, 30, 0).row_count, n);
        }
    }

    #[test]
    fn empty_without_placeholder_renders_nothing() {
        let range = WindowModel::new(3, 2).compute(0, false, 30, 0);
        assert!(range.is_empty());
        assert_eq!(range.visible(), 0..0);
        assert_eq!(range.materialized(), 0..0);
    }

    #[test]
    fn empty_with_placeholder_renders_the_slot() {
        let range = WindowModel::new(3, 2).compute(0, true, 30, 0);
        assert_eq!(range.row_count, 1);
        assert_eq!(range.visible(), 0..1);
    }

    #[test]
    fn visible_range_from_offset() {
        // 10 rows of height 3, viewport 9 → three rows at a time
        let model = WindowModel::new(3, 0);
        let range = model.compute(10, false, 9, 0);
        assert_eq!((range.first_visible_index, range.last_visible_index), (0, 2));

        let range = model.compute(10, false, 9, 4);
        // Rows 1 (partially), 2, 3, 4 (partially)
        assert_eq!((range.first_visible_index, range.last_visible_index), (1, 4));
    }

    #[test]
    fn offset_is_clamped_to_content() {
        let model = WindowModel::new(3, 0);
        let range = model.compute(4, false, 6, 999);
        assert_eq!(range.visible(), 2..4);
        assert_eq!(model.clamp_scroll(4, 6, 999), 6);
    }

    #[test]
    fn viewport_larger_than_content() {
        let range = WindowModel::new(3, 0).compute(2, false, 100, 0);
        assert_eq!(range.visible(), 0..2);
    }

    #[test]
    fn overscan_is_bounded() {
        let model = WindowModel::new(1, 2);
        let range = model.compute(10, false, 3, 5);
        assert_eq!(range.visible(), 5..8);
        assert_eq!(range.materialized(), 3..10);
        assert!(!range.is_visible(3));

        let top = model.compute(10, false, 3, 0);
        assert_eq!(top.materialized(), 0..5);
    }

    #[test]
    fn scroll_to_reveal_moves_minimally() {
        let model = WindowModel::new(3, 0);
        // Already visible
        assert_eq!(model.scroll_to_reveal(1, 9, 0), 0);
        // Below the viewport: align bottom edge
        assert_eq!(model.scroll_to_reveal(5, 9, 0), 9);
        // Above the viewport: align top edge
        assert_eq!(model.scroll_to_reveal(1, 9, 9), 3);
    }

    #[test]
    fn zero_extent_is_one() {
        let model = WindowModel::new(0, 0);
        assert_eq!(model.row_extent(), 1);
        assert_eq!(model.compute(5, false, 2, 0).visible(), 0..2);
    }

    #[test]
    fn slots_mark_lifted_and_placeholder() {
        assert_eq!(WindowModel::slot(0, 3, Some(1)), RowSlot::Entry(0));
        assert_eq!(WindowModel::slot(1, 3, Some(1)), RowSlot::Lifted(1));
        assert_eq!(WindowModel::slot(3, 3, Some(1)), RowSlot::Placeholder);
        assert_eq!(WindowModel::slot(2, 3, None), RowSlot::Entry(2));
        assert!(WindowModel::slot(0, 0, None).is_placeholder());
    }

    #[test]
    fn huge_counts_saturate() {
        let model = WindowModel::new(3, 1);

        let range = model.compute(usize::MAX, true, 10, 0);
        assert_eq!(range.row_count, usize::MAX);
        assert_eq!(range.visible(), 0..4);
        assert_eq!(range.materialized(), 0..5);

        let range = model.compute(usize::MAX / 2, false, 10, 0);
        assert_eq!(range.row_count, usize::MAX / 2);
        assert_eq!(range.visible(), 0..4);

        // Content extent saturates, so the far end is clamped but still valid
        let range = model.compute(usize::MAX / 2, false, 10, usize::MAX);
        assert!(range.first_visible_index <= range.last_visible_index);
        assert!(range.overscan_end <= range.row_count);
    }

    #[test]
    fn extents_saturate() {
        let model = WindowModel::new(usize::MAX, 0);
        assert_eq!(model.content_extent(2), usize::MAX);
        assert_eq!(model.max_scroll_offset(2, 10), usize::MAX - 10);
        assert_eq!(model.scroll_to_reveal(5, 10, 0), usize::MAX - 10);
        assert_eq!(model.row_offset(3, 0), isize::MAX);
    }

    #[test]
    fn row_offset_is_relative_to_scroll() {
        let model = WindowModel::new(3, 0);
        assert_eq!(model.row_offset(2, 4), 2);
        assert_eq!(model.row_offset(0, 4), -4);
    }
}

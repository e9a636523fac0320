use crate::item::{item_end, item_start};
use crate::{PoolItem, Window};

/// Boundary tracking for lists with per-item extents.
///
/// Offsets cannot be turned into indexes by division, so the tracker remembers the visible
/// boundaries of the previous update and walks them one item at a time. Scroll events move
/// the boundaries by a handful of items, which keeps updates cheap without a prefix-sum
/// structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct VariableTracker {
    // Visible boundaries without the retain buffer.
    first: usize,
    last: usize,
}

impl VariableTracker {
    pub(crate) fn reset(&mut self) {
        self.first = 0;
        self.last = 0;
    }

    /// Index of the first item ending after `offset`, clamped to the list.
    pub(crate) fn index_at<T: PoolItem>(items: &[T], offset: f32) -> usize {
        let offset = offset.abs();
        items
            .partition_point(|it| item_end(it) <= offset)
            .min(items.len().saturating_sub(1))
    }

    pub(crate) fn window<T: PoolItem>(
        &mut self,
        items: &[T],
        offset: f32,
        viewport: f32,
        retain: usize,
    ) -> Option<Window> {
        let count = items.len();
        if count == 0 {
            self.reset();
            return None;
        }
        let last_index = count - 1;
        let top = offset.abs();
        let bottom = top + viewport.max(0.0);

        // Boundaries may be stale after the list shrank.
        self.first = self.first.min(last_index);
        self.last = self.last.min(last_index);

        // First visible item: the first one ending after the top edge.
        while self.first < last_index && item_end(&items[self.first]) <= top {
            self.first += 1;
        }
        while self.first > 0 && item_end(&items[self.first - 1]) > top {
            self.first -= 1;
        }

        // Last visible item: the last one starting before the bottom edge.
        while self.last < last_index && item_start(&items[self.last + 1]) < bottom {
            self.last += 1;
        }
        while self.last > 0 && item_start(&items[self.last]) >= bottom {
            self.last -= 1;
        }

        let last = self.last.max(self.first);
        Some(Window::new(self.first, last).retained(retain, count))
    }

    pub(crate) fn content_extent<T: PoolItem>(items: &[T]) -> f32 {
        items.last().map(item_end).unwrap_or(0.0)
    }
}

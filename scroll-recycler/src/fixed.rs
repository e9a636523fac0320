use crate::Window;

/// Window arithmetic for lists whose items all share one extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FixedTracker {
    extent: f32,
}

impl FixedTracker {
    pub(crate) fn new(extent: f32) -> Self {
        debug_assert!(extent > 0.0, "FixedTracker: extent must be positive");
        Self { extent }
    }

    /// Index of the item under `offset`, clamped to the list.
    pub(crate) fn index_at(&self, offset: f32, count: usize) -> usize {
        let index = (offset.abs() / self.extent).floor() as usize;
        index.min(count.saturating_sub(1))
    }

    pub(crate) fn position_of(&self, index: usize) -> f32 {
        index as f32 * self.extent
    }

    pub(crate) fn content_extent(&self, count: usize) -> f32 {
        count as f32 * self.extent
    }

    /// Computes the window directly from the offset.
    ///
    /// An item is visible when `[i * extent, (i + 1) * extent)` intersects
    /// `[offset, offset + viewport)`, so a row starting exactly at the bottom edge is not.
    pub(crate) fn window(
        &self,
        offset: f32,
        viewport: f32,
        count: usize,
        retain: usize,
    ) -> Option<Window> {
        if count == 0 {
            return None;
        }
        let last_index = count - 1;
        let offset = offset.abs();

        let first = ((offset / self.extent).floor() as usize).min(last_index);
        let last = (((offset + viewport.max(0.0)) / self.extent).ceil() as usize)
            .saturating_sub(1)
            .min(last_index)
            .max(first);

        Some(Window::new(first, last).retained(retain, count))
    }
}

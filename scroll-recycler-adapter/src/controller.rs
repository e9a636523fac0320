use scroll_recycler::{PoolItem, PoolSource, RecycleError, Recycler, ScrollResponse};

use crate::{ScrollAnchor, ScrollHost, apply_anchor, capture_first_visible_anchor};

/// A framework-neutral controller that binds a [`Recycler`] to a [`ScrollHost`].
///
/// This type does not hold any UI objects besides the host handle. Adapters drive it by calling:
/// - `on_value_changed` whenever the host reports a scroll movement
/// - `on_viewport_resized` when the scroll container changes size
///
/// After every operation the host's content extent (and, where the recycler moved it, scroll
/// offset) is brought in sync with the recycler.
pub struct HostedRecycler<T: PoolItem, S: PoolSource<T>, H> {
    recycler: Recycler<T, S>,
    host: H,
}

impl<T: PoolItem, S: PoolSource<T>, H: ScrollHost> HostedRecycler<T, S, H> {
    pub fn new(recycler: Recycler<T, S>, host: H) -> Self {
        Self { recycler, host }
    }

    pub fn recycler(&self) -> &Recycler<T, S> {
        &self.recycler
    }

    pub fn recycler_mut(&mut self) -> &mut Recycler<T, S> {
        &mut self.recycler
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_parts(self) -> (Recycler<T, S>, H) {
        (self.recycler, self.host)
    }

    /// Binds `items`, reading the viewport from the host, and scrolls the host to the top.
    pub fn setup(&mut self, items: impl IntoIterator<Item = T>) -> Result<usize, RecycleError> {
        self.sync_viewport();
        let result = self.recycler.setup(items);
        self.push_to_host();
        result
    }

    /// Binds `items` while keeping the host's current scroll offset (clamped to the new content).
    ///
    /// The previous list is not re-windowed at the host offset first, so only the new list's
    /// items see callbacks.
    pub fn setup_preserving_scroll_offset(
        &mut self,
        items: impl IntoIterator<Item = T>,
    ) -> Result<usize, RecycleError> {
        self.sync_viewport();
        let offset = self.host.scroll_offset();
        let result = self.recycler.setup_at_offset(items, offset);
        self.push_to_host();
        result
    }

    /// Binds `items` and scrolls the host so the item at `index` starts the viewport.
    pub fn setup_at_index(
        &mut self,
        items: impl IntoIterator<Item = T>,
        index: usize,
    ) -> Result<usize, RecycleError> {
        self.sync_viewport();
        let result = self.recycler.setup_at_index(items, index);
        self.push_to_host();
        result
    }

    /// Replaces the list while keeping the first visible item at the same place on screen.
    ///
    /// Falls back to the top of the list when the anchored item is gone.
    pub fn replace_anchored(
        &mut self,
        items: impl IntoIterator<Item = T>,
    ) -> Result<usize, RecycleError> {
        let anchor = self.capture_first_visible_anchor();
        self.sync_viewport();
        let result = self.recycler.setup(items);
        if let (Ok(_), Some(anchor)) = (&result, &anchor) {
            apply_anchor(&mut self.recycler, anchor);
        }
        self.push_to_host();
        result
    }

    pub fn append(&mut self, items: impl IntoIterator<Item = T>) -> Result<usize, RecycleError> {
        let count = self.recycler.append(items)?;
        self.host.set_content_extent(self.recycler.content_extent());
        Ok(count)
    }

    /// Call this when the host reports a scroll movement.
    ///
    /// Reads the offset from the host and forwards it with `velocity`. When the recycler
    /// answers [`ScrollResponse::Stop`] the host's movement is halted.
    pub fn on_value_changed(&mut self, velocity: f32) -> ScrollResponse {
        let offset = self.host.scroll_offset();
        let response = self.recycler.on_scroll_event(offset, velocity);
        if response == ScrollResponse::Stop {
            atrace!(offset, velocity, "stopping host movement");
            self.host.stop_movement();
        }
        response
    }

    /// Re-reads the viewport from the host and recomputes the window.
    pub fn on_viewport_resized(&mut self) {
        self.sync_viewport();
        self.recycler.refresh();
    }

    /// Scrolls the host so the item at `index` (clamped) starts the viewport.
    ///
    /// Returns the applied offset, or `None` when no list is bound.
    pub fn scroll_to_index(&mut self, index: usize) -> Option<f32> {
        let last = self.recycler.item_count().checked_sub(1)?;
        let start = self.recycler.position_of(index.min(last))?.abs();
        let offset = start.clamp(0.0, self.recycler.max_scroll_offset());
        self.scroll_to_offset(offset);
        Some(offset)
    }

    /// Moves both the host and the recycler to `offset` (no clamping).
    pub fn scroll_to_offset(&mut self, offset: f32) {
        self.host.set_scroll_offset(offset);
        self.recycler.set_scroll_offset(offset);
    }

    pub fn clear(&mut self) {
        self.recycler.clear();
        self.push_to_host();
    }

    pub fn capture_first_visible_anchor(&self) -> Option<ScrollAnchor<T::Id>> {
        capture_first_visible_anchor(&self.recycler)
    }

    /// Applies a previously captured anchor to both the recycler and the host.
    ///
    /// Returns `true` when the anchored item is still in the list.
    pub fn apply_anchor(&mut self, anchor: &ScrollAnchor<T::Id>) -> bool {
        match apply_anchor(&mut self.recycler, anchor) {
            Some(offset) => {
                self.host.set_scroll_offset(offset);
                true
            }
            None => false,
        }
    }

    fn sync_viewport(&mut self) {
        let viewport = self.host.viewport_extent();
        self.recycler.set_viewport_extent(viewport);
    }

    fn push_to_host(&mut self) {
        let extent = self.recycler.content_extent();
        let offset = self.recycler.scroll_offset();
        adebug!(extent, offset, "syncing host");
        self.host.set_content_extent(extent);
        self.host.set_scroll_offset(offset);
    }
}

impl<T, S, H> core::fmt::Debug for HostedRecycler<T, S, H>
where
    T: PoolItem + core::fmt::Debug,
    S: PoolSource<T> + core::fmt::Debug,
    H: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HostedRecycler")
            .field("recycler", &self.recycler)
            .field("host", &self.host)
            .finish()
    }
}

use std::sync::Arc;

use crate::fixed::FixedTracker;
use crate::instance::{MatchBy, OnActivate, Recyclable};
use crate::pool::{Activation, InstancePool, PoolSource};
use crate::registry::PoolRegistry;
use crate::variable::VariableTracker;
use crate::window::{Change, diff};
use crate::{
    InstanceError, Layout, Phase, PoolItem, RecycleError, RecyclerOptions, RecyclerState,
    ScrollDirection, ScrollResponse, TypedPoolItem, Window,
};

/// A recycler backed by one instance pool.
pub type ListRecycler<T, I> = Recycler<T, InstancePool<T, I>>;

/// A recycler dispatching items to per-tag pools.
pub type TypedRecycler<T, I> = Recycler<T, PoolRegistry<T, I>>;

/// The recycling controller.
///
/// Owns a private snapshot of the item list, the window state and the pool(s). The host drives
/// it with the viewport extent and scroll offsets; the recycler answers by activating,
/// positioning and deactivating pooled instances so that only the items intersecting the
/// viewport (plus the retain buffer) are displayed.
///
/// Every operation runs synchronously. Callbacks receive only the instance and the item, so
/// they cannot re-enter the recycler mid-update.
pub struct Recycler<T: PoolItem, S: PoolSource<T>> {
    options: RecyclerOptions<T, S::Instance>,
    source: S,
    layout: Layout,
    items: Vec<T>,
    phase: Phase,
    viewport_extent: f32,
    scroll_offset: f32,
    content_extent: f32,
    window: Option<Window>,
    variable: VariableTracker,
}

impl<T: PoolItem, I: Recyclable<T>> Recycler<T, InstancePool<T, I>> {
    /// Creates a single-pool recycler. Register a template before calling `setup`.
    pub fn new(options: RecyclerOptions<T, I>) -> Self {
        Self::with_source(InstancePool::new(1), Layout::Variable, options)
    }

    /// Sets the template instances are created from.
    ///
    /// `pool_size` is the number of instances created each time the pool runs dry. When
    /// `item_extent` is set the list uses the fixed-height layout with that extent; otherwise
    /// every item supplies its own extent and position.
    pub fn register_template(
        &mut self,
        template: impl Fn() -> I + Send + Sync + 'static,
        pool_size: usize,
        item_extent: Option<f32>,
    ) {
        self.source.set_template(Some(Arc::new(template)));
        self.source.set_batch_size(pool_size);
        let layout = match item_extent {
            Some(extent) if extent.is_finite() && extent > 0.0 => Layout::Fixed { extent },
            Some(_extent) => {
                rwarn!(
                    extent = _extent,
                    "ignoring non-positive item extent; using per-item extents"
                );
                Layout::Variable
            }
            None => Layout::Variable,
        };
        self.set_layout(layout);
        rdebug!(pool_size, layout = ?layout, "register_template");
    }

    pub fn pool(&self) -> &InstancePool<T, I> {
        &self.source
    }

    /// Sets the activation callback and binds `items`.
    pub fn setup_with(
        &mut self,
        items: impl IntoIterator<Item = T>,
        on_activate: impl Fn(&mut I, &T) -> Result<(), InstanceError> + Send + Sync + 'static,
    ) -> Result<usize, RecycleError> {
        self.set_on_activate(Some(Arc::new(on_activate)));
        self.setup(items)
    }

    pub fn set_on_activate(&mut self, on_activate: Option<OnActivate<I, T>>) {
        self.source.set_on_activate(on_activate);
    }
}

impl<T: TypedPoolItem, I: Recyclable<T>> Recycler<T, PoolRegistry<T, I>> {
    /// Creates a heterogeneous recycler with no pools registered.
    pub fn new_typed(layout: Layout, options: RecyclerOptions<T, I>) -> Self {
        Self::with_source(PoolRegistry::new(), layout, options)
    }

    /// Creates or updates the pool servicing items tagged `tag`.
    pub fn register_pool(
        &mut self,
        tag: T::Tag,
        template: Option<crate::Template<I>>,
        initial_size: usize,
        on_activate: Option<OnActivate<I, T>>,
    ) {
        self.source
            .register_pool(tag, template, initial_size, on_activate);
    }

    pub fn registry(&self) -> &PoolRegistry<T, I> {
        &self.source
    }

    pub fn registry_mut(&mut self) -> &mut PoolRegistry<T, I> {
        &mut self.source
    }
}

impl<T: PoolItem, S: PoolSource<T>> Recycler<T, S> {
    pub fn with_source(
        source: S,
        layout: Layout,
        options: RecyclerOptions<T, S::Instance>,
    ) -> Self {
        Self {
            options,
            source,
            layout,
            items: Vec::new(),
            phase: Phase::Empty,
            viewport_extent: 0.0,
            scroll_offset: 0.0,
            content_extent: 0.0,
            window: None,
            variable: VariableTracker::default(),
        }
    }

    pub fn options(&self) -> &RecyclerOptions<T, S::Instance> {
        &self.options
    }

    pub fn set_options(&mut self, options: RecyclerOptions<T, S::Instance>) {
        let padding_changed = options.content_padding != self.options.content_padding;
        self.options = options;
        if padding_changed && self.phase != Phase::Empty {
            self.publish_content_extent();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut RecyclerOptions<T, S::Instance>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Switches between fixed- and variable-height layouts.
    ///
    /// When a list is bound its instances are returned to the pool; the next scroll update
    /// re-fills the window under the new layout.
    pub fn set_layout(&mut self, layout: Layout) {
        if self.layout == layout {
            return;
        }
        self.layout = layout;
        if self.phase != Phase::Empty {
            self.return_all_to_pool();
            self.variable.reset();
            self.publish_content_extent();
        }
    }

    /// Keeps `count` extra items active beyond each visible edge.
    pub fn set_retain_buffer(&mut self, count: usize) {
        self.options.retain_buffer = count;
    }

    /// Extra length added to the computed content extent.
    pub fn set_content_extent_padding(&mut self, extra: f32) {
        if self.options.content_padding == extra {
            return;
        }
        self.options.content_padding = extra;
        if self.phase != Phase::Empty {
            self.publish_content_extent();
        }
    }

    pub fn set_on_spawned(&mut self, on_spawned: Option<impl Fn(usize) + Send + Sync + 'static>) {
        self.options.on_spawned = on_spawned.map(|f| Arc::new(f) as _);
    }

    pub fn set_on_content_extent(&mut self, sink: Option<impl Fn(f32) + Send + Sync + 'static>) {
        self.options.on_content_extent = sink.map(|f| Arc::new(f) as _);
    }

    pub fn set_on_item_deactivated(
        &mut self,
        f: Option<impl Fn(&S::Instance, &T) + Send + Sync + 'static>,
    ) {
        self.options.on_item_deactivated = f.map(|f| Arc::new(f) as _);
    }

    /// Sets the viewport length along the scroll axis.
    ///
    /// The window is not recomputed; call [`Self::refresh`] if the viewport changed while a
    /// list is bound.
    pub fn set_viewport_extent(&mut self, extent: f32) {
        self.viewport_extent = extent;
    }

    pub fn viewport_extent(&self) -> f32 {
        self.viewport_extent
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn content_extent(&self) -> f32 {
        self.content_extent
    }

    /// Largest offset at which the viewport still lies within the content.
    pub fn max_scroll_offset(&self) -> f32 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// The closed index range currently mapped to active instances.
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Number of items in the current window.
    pub fn visible_item_count(&self) -> usize {
        self.window.map(|w| w.count()).unwrap_or(0)
    }

    /// Number of fixed-height rows that fit in the viewport at once (rounded up).
    ///
    /// `None` for variable-height lists.
    pub fn viewport_capacity(&self) -> Option<usize> {
        match self.layout {
            Layout::Fixed { extent } => {
                Some((self.viewport_extent.max(0.0) / extent).ceil() as usize)
            }
            Layout::Variable => None,
        }
    }

    /// Index of the item under the current scroll offset (`0` for an empty list).
    pub fn current_cursor_index(&self) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        match self.layout {
            Layout::Fixed { extent } => {
                FixedTracker::new(extent).index_at(self.scroll_offset, self.items.len())
            }
            Layout::Variable => VariableTracker::index_at(&self.items, self.scroll_offset),
        }
    }

    /// Start of the item at `index` along the scroll axis.
    pub fn position_of(&self, index: usize) -> Option<f32> {
        let item = self.items.get(index)?;
        Some(match self.layout {
            Layout::Fixed { extent } => FixedTracker::new(extent).position_of(index),
            Layout::Variable => item.position(),
        })
    }

    /// Number of active instances across all pools.
    pub fn active_count(&self) -> usize {
        self.source.active_count()
    }

    /// Number of instances ever created across all pools.
    pub fn pool_size(&self) -> usize {
        self.source.size()
    }

    /// Returns a lightweight snapshot of the current state.
    pub fn state(&self) -> RecyclerState {
        RecyclerState {
            phase: self.phase,
            item_count: self.items.len(),
            scroll_offset: self.scroll_offset,
            viewport_extent: self.viewport_extent,
            content_extent: self.content_extent,
            window: self.window,
        }
    }

    /// Binds `items` and fills the viewport from offset 0.
    ///
    /// Returns the number of items bound. An empty list clears the recycler and reports
    /// `on_spawned(0)`. Configuration errors leave every instance untouched, zero the content
    /// extent, report `on_spawned(0)` and are returned.
    pub fn setup(&mut self, items: impl IntoIterator<Item = T>) -> Result<usize, RecycleError> {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            rdebug!("setup: empty item list");
            self.clear();
            self.emit_spawned(0);
            return Ok(0);
        }

        let viewport = self.viewport_extent;
        if !viewport.is_finite() || viewport < 0.0 {
            return Err(self.fail_setup(RecycleError::InvalidViewport(viewport)));
        }
        if let Err(err) = self.source.validate(&items) {
            return Err(self.fail_setup(err));
        }

        self.source.return_all();
        self.items = items;
        for (i, item) in self.items.iter_mut().enumerate() {
            item.set_index(i);
        }
        self.scroll_offset = 0.0;
        self.window = None;
        self.variable.reset();
        self.phase = Phase::Ready;

        let count = self.items.len();
        rdebug!(count, viewport, layout = ?self.layout, "setup");
        self.emit_spawned(count);
        self.update_window(ScrollDirection::Forward);
        self.publish_content_extent();
        Ok(count)
    }

    /// Like [`Self::setup`], but restores the scroll offset the recycler had before.
    ///
    /// The offset is clamped to the new content and the window is updated once more so the
    /// visible set matches it.
    pub fn setup_preserving_scroll_offset(
        &mut self,
        items: impl IntoIterator<Item = T>,
    ) -> Result<usize, RecycleError> {
        let saved = self.scroll_offset;
        self.setup_at_offset(items, saved)
    }

    /// Like [`Self::setup`], but scrolls to `offset` (clamped to the new content) after the
    /// initial fill.
    ///
    /// The previous list is torn down without a window update, so no callback fires for
    /// its items.
    pub fn setup_at_offset(
        &mut self,
        items: impl IntoIterator<Item = T>,
        offset: f32,
    ) -> Result<usize, RecycleError> {
        let count = self.setup(items)?;
        if count > 0 {
            self.reanchor(offset);
        }
        Ok(count)
    }

    /// Like [`Self::setup`], but scrolls so the item at `index` (clamped) starts the viewport.
    pub fn setup_at_index(
        &mut self,
        items: impl IntoIterator<Item = T>,
        index: usize,
    ) -> Result<usize, RecycleError> {
        let count = self.setup(items)?;
        if count > 0 {
            let index = index.min(count - 1);
            let offset = self.position_of(index).map(f32::abs).unwrap_or(0.0);
            self.reanchor(offset);
        }
        Ok(count)
    }

    fn reanchor(&mut self, offset: f32) {
        let offset = if offset.is_finite() { offset.abs() } else { 0.0 };
        let offset = offset.clamp(0.0, self.max_scroll_offset());
        rtrace!(offset, "reanchor");
        self.scroll_offset = offset;
        self.update_window(ScrollDirection::Forward);
    }

    /// Appends items with continuing indexes and extends the content extent.
    ///
    /// The window is not re-evaluated; deliver a scroll update if the viewport should pick up
    /// the new items. Returns the new item count.
    pub fn append(&mut self, items: impl IntoIterator<Item = T>) -> Result<usize, RecycleError> {
        if self.phase == Phase::Empty {
            rerror!("append: recycler has not been set up");
            return Err(RecycleError::NotReady);
        }

        let mut added: Vec<T> = items.into_iter().collect();
        if added.is_empty() {
            return Ok(self.items.len());
        }
        if let Err(err) = self.source.validate(&added) {
            rerror!(error = %err, "append rejected");
            return Err(err);
        }

        let start = self.items.len();
        for (i, item) in added.iter_mut().enumerate() {
            item.set_index(start + i);
        }
        self.items.append(&mut added);
        rdebug!(start, count = self.items.len(), "append");
        self.publish_content_extent();
        Ok(self.items.len())
    }

    /// Applies a new scroll offset and updates the window.
    ///
    /// No-op while no list is bound or when the offset did not change.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        if self.phase == Phase::Empty {
            return;
        }
        if !offset.is_finite() {
            rwarn!(offset, "ignoring non-finite scroll offset");
            return;
        }
        if offset == self.scroll_offset && self.window.is_some() {
            return;
        }
        let direction = if offset >= self.scroll_offset {
            ScrollDirection::Forward
        } else {
            ScrollDirection::Backward
        };
        rtrace!(offset, prev = self.scroll_offset, "set_scroll_offset");
        self.scroll_offset = offset;
        self.update_window(direction);
    }

    /// Handles a scroll notification from the host.
    ///
    /// When `velocity²` is below the stop threshold the update is skipped and the host is
    /// asked to stop moving; otherwise the offset is applied.
    pub fn on_scroll_event(&mut self, offset: f32, velocity: f32) -> ScrollResponse {
        if self.phase == Phase::Empty {
            return ScrollResponse::Continue;
        }
        if velocity * velocity < self.options.stop_velocity_threshold {
            rtrace!(velocity, "scroll velocity below threshold; stopping");
            self.phase = Phase::Ready;
            return ScrollResponse::Stop;
        }
        self.phase = Phase::Scrolling;
        self.set_scroll_offset(offset);
        ScrollResponse::Continue
    }

    /// Recomputes the window at the current offset (e.g. after a viewport resize or append).
    pub fn refresh(&mut self) {
        if self.phase == Phase::Empty {
            return;
        }
        self.update_window(ScrollDirection::Forward);
    }

    /// Deactivates every instance but keeps the item list.
    ///
    /// Deactivation callbacks are not fired. The next scroll update or [`Self::refresh`]
    /// re-fills the window.
    pub fn return_all_to_pool(&mut self) {
        self.source.return_all();
        self.window = None;
    }

    /// Returns everything to the pools, drops the item list and zeroes the content extent.
    pub fn clear(&mut self) {
        self.source.return_all();
        self.items.clear();
        self.window = None;
        self.variable.reset();
        self.scroll_offset = 0.0;
        self.phase = Phase::Empty;
        self.set_content_extent(0.0);
    }

    /// Detaches from the current list: scroll updates and `append` are ignored until the next
    /// successful `setup`. Instances are left as they are.
    fn fail_setup(&mut self, err: RecycleError) -> RecycleError {
        rerror!(error = %err, "setup failed");
        self.phase = Phase::Empty;
        self.window = None;
        self.variable.reset();
        self.set_content_extent(0.0);
        self.emit_spawned(0);
        err
    }

    fn compute_window(&mut self) -> Option<Window> {
        let retain = self.options.retain_buffer;
        match self.layout {
            Layout::Fixed { extent } => FixedTracker::new(extent).window(
                self.scroll_offset,
                self.viewport_extent,
                self.items.len(),
                retain,
            ),
            Layout::Variable => self.variable.window(
                &self.items,
                self.scroll_offset,
                self.viewport_extent,
                retain,
            ),
        }
    }

    fn match_by(&self) -> MatchBy {
        match self.layout {
            Layout::Fixed { .. } => MatchBy::Index,
            Layout::Variable => MatchBy::Id,
        }
    }

    fn update_window(&mut self, direction: ScrollDirection) {
        let old = self.window;
        let new = self.compute_window();
        if old == new {
            return;
        }

        let match_by = self.match_by();
        let layout = self.layout;
        let Self {
            source,
            items,
            options,
            ..
        } = self;
        let on_deactivate = options.on_item_deactivated.as_ref();

        diff(old, new, direction, |change| match change {
            Change::Release(i) => {
                source.release(i, &items[i], match_by, on_deactivate);
            }
            Change::Acquire(i) => {
                let item = &items[i];
                let position = match layout {
                    Layout::Fixed { extent } => FixedTracker::new(extent).position_of(i),
                    Layout::Variable => item.position(),
                };
                if let Activation::Skipped = source.activate(i, item, position, match_by) {
                    rdebug!(index = i, "item skipped");
                }
            }
        });

        rtrace!(old = ?old, new = ?new, "window updated");
        self.window = new;
    }

    fn base_content_extent(&self) -> f32 {
        match self.layout {
            Layout::Fixed { extent } => FixedTracker::new(extent).content_extent(self.items.len()),
            Layout::Variable => VariableTracker::content_extent(&self.items),
        }
    }

    fn publish_content_extent(&mut self) {
        let extent = if self.items.is_empty() {
            0.0
        } else {
            self.base_content_extent() + self.options.content_padding
        };
        self.set_content_extent(extent);
    }

    fn set_content_extent(&mut self, extent: f32) {
        self.content_extent = extent;
        if let Some(sink) = &self.options.on_content_extent {
            sink(extent);
        }
    }

    fn emit_spawned(&self, count: usize) {
        if let Some(cb) = &self.options.on_spawned {
            cb(count);
        }
    }
}

impl<T: PoolItem + core::fmt::Debug, S: PoolSource<T> + core::fmt::Debug> core::fmt::Debug
    for Recycler<T, S>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Recycler")
            .field("options", &self.options)
            .field("source", &self.source)
            .field("layout", &self.layout)
            .field("phase", &self.phase)
            .field("items", &self.items.len())
            .field("viewport_extent", &self.viewport_extent)
            .field("scroll_offset", &self.scroll_offset)
            .field("content_extent", &self.content_extent)
            .field("window", &self.window)
            .finish()
    }
}

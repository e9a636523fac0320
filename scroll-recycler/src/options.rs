use std::sync::Arc;

use crate::instance::OnDeactivate;

/// Fired with the number of items bound by `setup` (`0` when setup was empty or failed).
pub type OnSpawnedCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Receives the scrollable content length so the host can size its scroll track.
pub type ContentExtentSink = Arc<dyn Fn(f32) + Send + Sync>;

/// Default squared-velocity below which a scroll event stops movement instead of updating.
pub const DEFAULT_STOP_VELOCITY_THRESHOLD: f32 = 0.1;

/// Configuration for [`crate::Recycler`].
///
/// Callbacks are stored in `Arc`s so options stay cheap to clone.
pub struct RecyclerOptions<T, I> {
    /// Extra items kept active beyond each visible edge (aka "prefab offset").
    pub retain_buffer: usize,

    /// Added to the computed content extent (e.g. footer space).
    pub content_padding: f32,

    /// Squared scroll velocity under which `on_scroll_event` asks the host to stop instead of
    /// processing the update. Guards against endless tiny updates from floating jitter.
    pub stop_velocity_threshold: f32,

    pub on_spawned: Option<OnSpawnedCallback>,

    pub on_content_extent: Option<ContentExtentSink>,

    /// Fired right before an instance bound to an item is deactivated by a scroll update.
    ///
    /// Not fired by `return_all_to_pool`/`clear`.
    pub on_item_deactivated: Option<OnDeactivate<I, T>>,
}

impl<T, I> Default for RecyclerOptions<T, I> {
    fn default() -> Self {
        Self {
            retain_buffer: 0,
            content_padding: 0.0,
            stop_velocity_threshold: DEFAULT_STOP_VELOCITY_THRESHOLD,
            on_spawned: None,
            on_content_extent: None,
            on_item_deactivated: None,
        }
    }
}

impl<T, I> Clone for RecyclerOptions<T, I> {
    fn clone(&self) -> Self {
        Self {
            retain_buffer: self.retain_buffer,
            content_padding: self.content_padding,
            stop_velocity_threshold: self.stop_velocity_threshold,
            on_spawned: self.on_spawned.clone(),
            on_content_extent: self.on_content_extent.clone(),
            on_item_deactivated: self.on_item_deactivated.clone(),
        }
    }
}

impl<T, I> RecyclerOptions<T, I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retain_buffer(mut self, retain_buffer: usize) -> Self {
        self.retain_buffer = retain_buffer;
        self
    }

    pub fn with_content_padding(mut self, content_padding: f32) -> Self {
        self.content_padding = content_padding;
        self
    }

    pub fn with_stop_velocity_threshold(mut self, threshold: f32) -> Self {
        self.stop_velocity_threshold = threshold;
        self
    }

    pub fn with_on_spawned(
        mut self,
        on_spawned: Option<impl Fn(usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_spawned = on_spawned.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_content_extent(
        mut self,
        on_content_extent: Option<impl Fn(f32) + Send + Sync + 'static>,
    ) -> Self {
        self.on_content_extent = on_content_extent.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_item_deactivated(
        mut self,
        on_item_deactivated: Option<impl Fn(&I, &T) + Send + Sync + 'static>,
    ) -> Self {
        self.on_item_deactivated = on_item_deactivated.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T, I> core::fmt::Debug for RecyclerOptions<T, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecyclerOptions")
            .field("retain_buffer", &self.retain_buffer)
            .field("content_padding", &self.content_padding)
            .field("stop_velocity_threshold", &self.stop_velocity_threshold)
            .finish_non_exhaustive()
    }
}

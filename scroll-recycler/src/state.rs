use crate::{Phase, Window};

/// A lightweight, serializable snapshot of a recycler's scroll state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecyclerState {
    pub phase: Phase,
    pub item_count: usize,
    pub scroll_offset: f32,
    pub viewport_extent: f32,
    pub content_extent: f32,
    pub window: Option<Window>,
}

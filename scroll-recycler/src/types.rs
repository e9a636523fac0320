#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Lifecycle of a [`crate::Recycler`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No item list bound; scroll updates are no-ops.
    #[default]
    Empty,
    Ready,
    /// Processing a stream of scroll events.
    Scrolling,
}

/// How item geometry is obtained.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    /// Every item has the same extent; per-item extent/position are ignored.
    Fixed { extent: f32 },
    /// Each item supplies its own extent and position.
    Variable,
}

/// What the host should do after delivering a scroll event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollResponse {
    /// The event was processed (or was a no-op); keep scrolling.
    Continue,
    /// Velocity fell below the stop threshold; the host should halt its scroll movement.
    Stop,
}

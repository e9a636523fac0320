use core::fmt;

use scroll_recycler::{Phase, PoolItem, PoolSource, Recycler};

/// A scroll anchor that can be used to preserve visual position across list replacement.
///
/// Typical use cases:
/// - chat/timeline "load older" (items inserted above) without content jumping
/// - re-sorting or refreshing a list while keeping the item under the viewport top in place
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<Id> {
    pub id: Id,
    /// The distance from the anchor item's start to the viewport's scroll offset.
    pub offset_in_viewport: f32,
}

impl<Id: fmt::Debug> fmt::Debug for ScrollAnchor<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnchor")
            .field("id", &self.id)
            .field("offset_in_viewport", &self.offset_in_viewport)
            .finish()
    }
}

/// Captures an anchor for the item under the current scroll offset (by id).
///
/// Returns `None` if no list is bound.
pub fn capture_first_visible_anchor<T: PoolItem, S: PoolSource<T>>(
    r: &Recycler<T, S>,
) -> Option<ScrollAnchor<T::Id>> {
    if r.phase() == Phase::Empty {
        return None;
    }
    let index = r.current_cursor_index();
    let item = r.item(index)?;
    let start = r.position_of(index)?.abs();
    Some(ScrollAnchor {
        id: item.id(),
        offset_in_viewport: (r.scroll_offset().abs() - start).max(0.0),
    })
}

/// Applies a previously captured anchor by moving the scroll offset.
///
/// The anchor item is looked up by id in the recycler's current list; the resulting offset is
/// clamped to the scrollable range.
///
/// Returns the applied offset, or `None` when the anchor item is no longer in the list.
pub fn apply_anchor<T: PoolItem, S: PoolSource<T>>(
    r: &mut Recycler<T, S>,
    anchor: &ScrollAnchor<T::Id>,
) -> Option<f32> {
    let index = r.items().iter().position(|it| it.id() == anchor.id)?;
    let start = r.position_of(index)?.abs();
    let target = (start + anchor.offset_in_viewport).clamp(0.0, r.max_scroll_offset());
    r.set_scroll_offset(target);
    Some(target)
}

use core::fmt;
use core::hash::Hash;

/// The per-item data contract consumed by the recycler.
///
/// One contract serves every variant:
/// - fixed-height lists only need `id` (extent/position are ignored, the registered uniform
///   extent is used instead)
/// - variable-height lists read `extent` and `position` for every item
///
/// `position` is a signed offset from the list origin; the recycler uses `|position|` as the
/// item's start so hosts with a downward-negative axis can pass their native coordinates.
/// Items are expected back-to-back in index order; this is trusted, not validated.
pub trait PoolItem {
    type Id: Clone + PartialEq + fmt::Debug;

    /// Stable identity, unique within the active list.
    fn id(&self) -> Self::Id;

    fn extent(&self) -> f32 {
        0.0
    }

    fn position(&self) -> f32 {
        0.0
    }

    /// Called with the item's index in the recycler's snapshot every time `setup`/`append`
    /// (re)assigns it.
    fn set_index(&mut self, _index: usize) {}
}

/// Items of a heterogeneous list, each serviced by the pool registered for its tag.
pub trait TypedPoolItem: PoolItem {
    type Tag: PoolTag;

    fn type_tag(&self) -> Self::Tag;
}

/// Keys usable as pool-registry tags.
#[doc(hidden)]
pub trait PoolTag: Copy + Hash + Eq + fmt::Debug {}
impl<T: Copy + Hash + Eq + fmt::Debug> PoolTag for T {}

/// A ready-made item record.
///
/// `Tag` defaults to `()` for single-pool lists.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRecord<Tag = ()> {
    pub id: String,
    /// Assigned by the recycler.
    pub index: usize,
    pub extent: f32,
    pub position: f32,
    pub type_tag: Tag,
}

impl ItemRecord<()> {
    /// A record for fixed-height lists, where only the identity matters.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            index: 0,
            extent: 0.0,
            position: 0.0,
            type_tag: (),
        }
    }

    pub fn with_geometry(id: impl Into<String>, position: f32, extent: f32) -> Self {
        Self {
            id: id.into(),
            index: 0,
            extent,
            position,
            type_tag: (),
        }
    }
}

impl<Tag> ItemRecord<Tag> {
    pub fn typed(id: impl Into<String>, position: f32, extent: f32, type_tag: Tag) -> Self {
        Self {
            id: id.into(),
            index: 0,
            extent,
            position,
            type_tag,
        }
    }

    /// End of the item along the scroll axis (`|position| + extent`).
    pub fn end(&self) -> f32 {
        self.position.abs() + self.extent
    }
}

impl<Tag> PoolItem for ItemRecord<Tag> {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn extent(&self) -> f32 {
        self.extent
    }

    fn position(&self) -> f32 {
        self.position
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

impl<Tag: PoolTag> TypedPoolItem for ItemRecord<Tag> {
    type Tag = Tag;

    fn type_tag(&self) -> Tag {
        self.type_tag
    }
}

pub(crate) fn item_start<T: PoolItem>(item: &T) -> f32 {
    item.position().abs()
}

pub(crate) fn item_end<T: PoolItem>(item: &T) -> f32 {
    item_start(item) + item.extent().max(0.0)
}

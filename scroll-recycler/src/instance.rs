use std::sync::Arc;

use crate::InstanceError;

/// Capability implemented by every visual-instance kind the recycler drives.
///
/// The recycler never owns UI objects directly; it only toggles activation, moves instances
/// along the scroll axis and hands them the item to display. Heterogeneous instance kinds can
/// share one pool through `Box<dyn Recyclable<T>>`.
pub trait Recyclable<T> {
    fn set_active(&mut self, active: bool);

    /// Moves the instance to `position` along the scroll axis.
    fn set_position(&mut self, position: f32);

    /// Binds the item this instance is about to display.
    fn bind(&mut self, _item: &T) -> Result<(), InstanceError> {
        Ok(())
    }

    /// Per-instance cleanup run every time the instance returns to its pool (subscriptions,
    /// timers). This is not destruction: the instance is reused afterwards.
    fn dispose(&mut self) -> Result<(), InstanceError> {
        Ok(())
    }
}

impl<T, R: Recyclable<T> + ?Sized> Recyclable<T> for Box<R> {
    fn set_active(&mut self, active: bool) {
        (**self).set_active(active);
    }

    fn set_position(&mut self, position: f32) {
        (**self).set_position(position);
    }

    fn bind(&mut self, item: &T) -> Result<(), InstanceError> {
        (**self).bind(item)
    }

    fn dispose(&mut self) -> Result<(), InstanceError> {
        (**self).dispose()
    }
}

/// Creates a new, inactive instance. Plays the role of a prefab/template.
pub type Template<I> = Arc<dyn Fn() -> I + Send + Sync>;

/// Called after an instance has been activated, bound and positioned for an item.
pub type OnActivate<I, T> = Arc<dyn Fn(&mut I, &T) -> Result<(), InstanceError> + Send + Sync>;

/// Called right before an instance bound to an item is deactivated.
pub type OnDeactivate<I, T> = Arc<dyn Fn(&I, &T) + Send + Sync>;

/// Identity of the item an active instance currently displays.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding<Id> {
    pub index: usize,
    pub id: Id,
}

/// How a deactivating item is matched back to the instance(s) displaying it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchBy {
    /// Snapshot index (fixed-height lists).
    Index,
    /// Item id (variable-height and typed lists).
    Id,
}

impl MatchBy {
    pub(crate) fn matches<Id: PartialEq>(
        self,
        binding: &Binding<Id>,
        index: usize,
        id: &Id,
    ) -> bool {
        match self {
            Self::Index => binding.index == index,
            Self::Id => binding.id == *id,
        }
    }
}

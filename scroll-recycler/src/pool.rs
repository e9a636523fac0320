use std::sync::Arc;

use crate::instance::{Binding, MatchBy, OnActivate, OnDeactivate, Recyclable, Template};
use crate::{PoolItem, RecycleError};

/// Outcome of asking a pool to display an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// The item is now displayed by the instance in this slot.
    Activated(usize),
    /// An active instance already displays this item; nothing changed.
    AlreadyActive,
    /// The item could not be displayed (missing template/pool, or instance code failed).
    Skipped,
}

/// Pool dispatch used by [`crate::Recycler`].
///
/// Implemented by a single [`InstancePool`] and by the tag-keyed [`crate::PoolRegistry`].
pub trait PoolSource<T: PoolItem> {
    type Instance: Recyclable<T>;

    /// Checks that every item of `items` can be serviced.
    fn validate(&self, items: &[T]) -> Result<(), RecycleError>;

    fn activate(&mut self, index: usize, item: &T, position: f32, match_by: MatchBy)
    -> Activation;

    /// Returns every instance displaying `item` to its pool. Returns the number released.
    fn release(
        &mut self,
        index: usize,
        item: &T,
        match_by: MatchBy,
        on_deactivate: Option<&OnDeactivate<Self::Instance, T>>,
    ) -> usize;

    /// Deactivates every instance without firing deactivation callbacks.
    fn return_all(&mut self);

    fn active_count(&self) -> usize;

    /// Total number of instances ever created.
    fn size(&self) -> usize;
}

struct Slot<I, Id> {
    instance: I,
    binding: Option<Binding<Id>>,
}

/// A growable, never-shrinking pool of instances created from one template.
///
/// `acquire` hands out the first inactive instance (linear scan). When every instance is in
/// use the pool instantiates `batch_size` new ones, so its size is the high-water mark of
/// concurrently displayed items, rounded up to the batch.
pub struct InstancePool<T: PoolItem, I> {
    template: Option<Template<I>>,
    batch_size: usize,
    on_activate: Option<OnActivate<I, T>>,
    slots: Vec<Slot<I, T::Id>>,
}

impl<T: PoolItem, I: Recyclable<T>> InstancePool<T, I> {
    /// Creates a pool without a template. `setup` fails until one is registered.
    pub fn new(batch_size: usize) -> Self {
        Self {
            template: None,
            batch_size,
            on_activate: None,
            slots: Vec::new(),
        }
    }

    pub fn with_template(
        template: impl Fn() -> I + Send + Sync + 'static,
        batch_size: usize,
    ) -> Self {
        let mut pool = Self::new(batch_size);
        pool.template = Some(Arc::new(template));
        pool
    }

    pub fn set_template(&mut self, template: Option<Template<I>>) {
        self.template = template;
    }

    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn set_batch_size(&mut self, batch_size: usize) {
        self.batch_size = batch_size;
    }

    pub fn set_on_activate(&mut self, on_activate: Option<OnActivate<I, T>>) {
        self.on_activate = on_activate;
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.binding.is_some()).count()
    }

    pub fn instance(&self, slot: usize) -> Option<&I> {
        self.slots.get(slot).map(|s| &s.instance)
    }

    pub fn binding(&self, slot: usize) -> Option<&Binding<T::Id>> {
        self.slots.get(slot).and_then(|s| s.binding.as_ref())
    }

    /// Iterates over active instances together with the item they display.
    pub fn for_each_active(&self, mut f: impl FnMut(&I, &Binding<T::Id>)) {
        for slot in &self.slots {
            if let Some(binding) = &slot.binding {
                f(&slot.instance, binding);
            }
        }
    }

    /// Iterates over every instance, active or not.
    pub fn for_each_instance(&self, mut f: impl FnMut(&I)) {
        for slot in &self.slots {
            f(&slot.instance);
        }
    }

    /// Returns the slot of an inactive instance, growing the pool if needed.
    ///
    /// Returns `None` only when no template is registered.
    pub fn acquire(&mut self) -> Option<usize> {
        if let Some(i) = self.slots.iter().position(|s| s.binding.is_none()) {
            return Some(i);
        }

        let Some(template) = &self.template else {
            rerror!("InstancePool::acquire: no template registered");
            return None;
        };

        let first_new = self.slots.len();
        let batch = self.batch_size.max(1);
        self.slots.reserve(batch);
        for _ in 0..batch {
            let mut instance = template();
            instance.set_active(false);
            self.slots.push(Slot {
                instance,
                binding: None,
            });
        }
        rdebug!(size = self.slots.len(), batch, "InstancePool grew");
        Some(first_new)
    }

    fn active_slot_for(&self, index: usize, id: &T::Id, match_by: MatchBy) -> Option<usize> {
        self.slots.iter().position(|s| {
            s.binding
                .as_ref()
                .is_some_and(|b| match_by.matches(b, index, id))
        })
    }

    /// Acquires an instance and sets it up to display `item`.
    ///
    /// Activating an item that is already displayed is a logged no-op. Failures raised by
    /// `bind` or the activation callback return the instance to the pool and skip the item.
    pub fn activate(
        &mut self,
        index: usize,
        item: &T,
        position: f32,
        match_by: MatchBy,
    ) -> Activation {
        let id = item.id();
        if self.active_slot_for(index, &id, match_by).is_some() {
            rwarn!(index, id = ?id, "attempted to activate an item that is already active");
            return Activation::AlreadyActive;
        }

        let Some(slot_index) = self.acquire() else {
            return Activation::Skipped;
        };

        let on_activate = self.on_activate.clone();
        let slot = &mut self.slots[slot_index];
        slot.instance.set_active(true);
        slot.binding = Some(Binding {
            index,
            id: id.clone(),
        });

        let result = slot.instance.bind(item).and_then(|()| {
            slot.instance.set_position(position);
            match &on_activate {
                Some(cb) => cb(&mut slot.instance, item),
                None => Ok(()),
            }
        });

        match result {
            Ok(()) => {
                rtrace!(index, slot = slot_index, position, "activated");
                Activation::Activated(slot_index)
            }
            Err(_err) => {
                rerror!(
                    index,
                    id = ?id,
                    error = %_err,
                    "failed to set up instance; skipping item"
                );
                if let Err(_err) = slot.instance.dispose() {
                    rerror!(index, error = %_err, "dispose failed");
                }
                slot.instance.set_active(false);
                slot.binding = None;
                Activation::Skipped
            }
        }
    }

    /// Returns every instance displaying `item` to the pool.
    ///
    /// `on_deactivate` fires before the instance is disposed and deactivated.
    pub fn release(
        &mut self,
        index: usize,
        item: &T,
        match_by: MatchBy,
        on_deactivate: Option<&OnDeactivate<I, T>>,
    ) -> usize {
        let id = item.id();
        let mut released = 0usize;
        for slot in self.slots.iter_mut() {
            let matched = slot
                .binding
                .as_ref()
                .is_some_and(|b| match_by.matches(b, index, &id));
            if !matched {
                continue;
            }
            if let Some(cb) = on_deactivate {
                cb(&slot.instance, item);
            }
            if let Err(_err) = slot.instance.dispose() {
                rerror!(index, error = %_err, "dispose failed while releasing instance");
            }
            slot.instance.set_active(false);
            slot.binding = None;
            released += 1;
        }
        if released > 0 {
            rtrace!(index, released, "released");
        }
        released
    }

    /// Deactivates every instance. Deactivation callbacks are not fired.
    pub fn return_all(&mut self) {
        for slot in self.slots.iter_mut() {
            if let Err(_err) = slot.instance.dispose() {
                rerror!(error = %_err, "dispose failed while returning instance to pool");
            }
            slot.instance.set_active(false);
            slot.binding = None;
        }
    }
}

impl<T: PoolItem, I: Recyclable<T>> PoolSource<T> for InstancePool<T, I> {
    type Instance = I;

    fn validate(&self, _items: &[T]) -> Result<(), RecycleError> {
        if self.template.is_none() {
            return Err(RecycleError::MissingTemplate);
        }
        Ok(())
    }

    fn activate(&mut self, index: usize, item: &T, position: f32, match_by: MatchBy) -> Activation {
        InstancePool::activate(self, index, item, position, match_by)
    }

    fn release(
        &mut self,
        index: usize,
        item: &T,
        match_by: MatchBy,
        on_deactivate: Option<&OnDeactivate<I, T>>,
    ) -> usize {
        InstancePool::release(self, index, item, match_by, on_deactivate)
    }

    fn return_all(&mut self) {
        InstancePool::return_all(self);
    }

    fn active_count(&self) -> usize {
        InstancePool::active_count(self)
    }

    fn size(&self) -> usize {
        InstancePool::size(self)
    }
}

impl<T: PoolItem, I> core::fmt::Debug for InstancePool<T, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InstancePool")
            .field("has_template", &self.template.is_some())
            .field("batch_size", &self.batch_size)
            .field("size", &self.slots.len())
            .field(
                "active",
                &self.slots.iter().filter(|s| s.binding.is_some()).count(),
            )
            .finish_non_exhaustive()
    }
}

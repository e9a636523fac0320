use std::collections::HashMap;
use std::sync::Arc;

use crate::instance::{MatchBy, OnActivate, OnDeactivate, Recyclable, Template};
use crate::pool::{Activation, InstancePool, PoolSource};
use crate::{InstanceError, RecycleError, TypedPoolItem};

/// Maps an item's type tag to the [`InstancePool`] servicing it.
///
/// Used by heterogeneous lists where row kinds share one scroll list but are recycled
/// independently.
pub struct PoolRegistry<T: TypedPoolItem, I> {
    pools: HashMap<T::Tag, InstancePool<T, I>>,
}

impl<T: TypedPoolItem, I: Recyclable<T>> Default for PoolRegistry<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TypedPoolItem, I: Recyclable<T>> PoolRegistry<T, I> {
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }

    /// Creates or updates the pool bound to `tag`.
    ///
    /// Passing `None` as the template registers the tag but makes `setup` fail until a
    /// template is provided. Instances already created by the pool are kept.
    pub fn register_pool(
        &mut self,
        tag: T::Tag,
        template: Option<Template<I>>,
        initial_size: usize,
        on_activate: Option<OnActivate<I, T>>,
    ) {
        let pool = self
            .pools
            .entry(tag)
            .or_insert_with(|| InstancePool::new(initial_size));
        pool.set_template(template);
        pool.set_batch_size(initial_size);
        pool.set_on_activate(on_activate);
        rdebug!(tag = ?tag, initial_size, "register_pool");
    }

    /// Convenience wrapper around [`Self::register_pool`] for closures.
    pub fn register(
        &mut self,
        tag: T::Tag,
        template: impl Fn() -> I + Send + Sync + 'static,
        initial_size: usize,
        on_activate: Option<
            impl Fn(&mut I, &T) -> Result<(), InstanceError> + Send + Sync + 'static,
        >,
    ) {
        self.register_pool(
            tag,
            Some(Arc::new(template)),
            initial_size,
            on_activate.map(|f| Arc::new(f) as _),
        );
    }

    pub fn pool(&self, tag: &T::Tag) -> Option<&InstancePool<T, I>> {
        self.pools.get(tag)
    }

    pub fn pool_mut(&mut self, tag: &T::Tag) -> Option<&mut InstancePool<T, I>> {
        self.pools.get_mut(tag)
    }

    pub fn contains(&self, tag: &T::Tag) -> bool {
        self.pools.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &T::Tag> {
        self.pools.keys()
    }
}

fn tag_list<Tag: core::fmt::Debug>(tags: &[Tag]) -> Vec<String> {
    tags.iter().map(|t| format!("{t:?}")).collect()
}

impl<T: TypedPoolItem, I: Recyclable<T>> PoolSource<T> for PoolRegistry<T, I> {
    type Instance = I;

    fn validate(&self, items: &[T]) -> Result<(), RecycleError> {
        let without_template: Vec<T::Tag> = self
            .pools
            .iter()
            .filter(|(_, pool)| !pool.has_template())
            .map(|(tag, _)| *tag)
            .collect();
        if !without_template.is_empty() {
            // Hash iteration order is unstable.
            let mut names = tag_list(&without_template);
            names.sort();
            return Err(RecycleError::MissingTemplates(names));
        }

        let mut missing: Vec<T::Tag> = Vec::new();
        for item in items {
            let tag = item.type_tag();
            if !self.pools.contains_key(&tag) && !missing.contains(&tag) {
                missing.push(tag);
            }
        }
        if !missing.is_empty() {
            return Err(RecycleError::UnregisteredTags(tag_list(&missing)));
        }
        Ok(())
    }

    fn activate(&mut self, index: usize, item: &T, position: f32, match_by: MatchBy) -> Activation {
        let tag = item.type_tag();
        let Some(pool) = self.pools.get_mut(&tag) else {
            rerror!(index, tag = ?tag, "no pool registered for item tag; skipping item");
            return Activation::Skipped;
        };
        pool.activate(index, item, position, match_by)
    }

    fn release(
        &mut self,
        index: usize,
        item: &T,
        match_by: MatchBy,
        on_deactivate: Option<&OnDeactivate<I, T>>,
    ) -> usize {
        let tag = item.type_tag();
        let Some(pool) = self.pools.get_mut(&tag) else {
            rerror!(index, tag = ?tag, "no pool registered for item tag; nothing to release");
            return 0;
        };
        pool.release(index, item, match_by, on_deactivate)
    }

    fn return_all(&mut self) {
        for pool in self.pools.values_mut() {
            pool.return_all();
        }
    }

    fn active_count(&self) -> usize {
        self.pools.values().map(|p| p.active_count()).sum()
    }

    fn size(&self) -> usize {
        self.pools.values().map(|p| p.size()).sum()
    }
}

impl<T: TypedPoolItem, I> core::fmt::Debug for PoolRegistry<T, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.pools.iter()).finish()
    }
}

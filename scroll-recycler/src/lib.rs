//! A headless scroll-list recycler.
//!
//! Long lists are displayed with a small, reusable set of visual instances: only the items
//! intersecting the viewport (plus an optional retain buffer on each side) are mapped to
//! active instances, and instances scrolled out of view go back to a pool for reuse.
//!
//! The crate owns no UI objects. A host layer is expected to provide:
//! - a template creating new instances ([`Recyclable`])
//! - the viewport extent along the scroll axis
//! - scroll offsets (and, optionally, velocities)
//!
//! Three variants share one controller:
//! - fixed-height lists ([`ListRecycler`] with an item extent)
//! - variable-height lists ([`ListRecycler`] without one; items report their own geometry)
//! - heterogeneous lists ([`TypedRecycler`]; items are dispatched to per-tag pools)
//!
//! For host glue (scroll notifications, anchoring), see the `scroll-recycler-adapter` crate.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod error;
mod fixed;
mod instance;
mod item;
mod options;
mod pool;
mod recycler;
mod registry;
mod state;
mod types;
mod variable;
mod window;


pub use error::{InstanceError, RecycleError};
pub use instance::{Binding, MatchBy, OnActivate, OnDeactivate, Recyclable, Template};
pub use item::{ItemRecord, PoolItem, TypedPoolItem};
pub use options::{
    ContentExtentSink, DEFAULT_STOP_VELOCITY_THRESHOLD, OnSpawnedCallback, RecyclerOptions,
};
pub use pool::{Activation, InstancePool, PoolSource};
pub use recycler::{ListRecycler, Recycler, TypedRecycler};
pub use registry::PoolRegistry;
pub use state::RecyclerState;
pub use types::{Layout, Phase, ScrollDirection, ScrollResponse};
pub use window::Window;

#[doc(hidden)]
pub use item::PoolTag;

//! Adapter utilities for the `scroll-recycler` crate.
//!
//! The `scroll-recycler` crate is UI-agnostic and only manages item windows and instance
//! pools. This crate provides small, framework-neutral helpers commonly needed to attach it to
//! a host toolkit:
//!
//! - A [`ScrollHost`] boundary for the toolkit's scroll container
//! - [`HostedRecycler`], which routes scroll notifications into the recycler, halts slow
//!   inertial movement and keeps the host's content extent in sync
//! - Scroll anchoring (keep the visual position when the list is replaced)
//!
//! This crate is intentionally framework-agnostic (no bindings to a specific toolkit).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod anchor;
mod controller;
mod host;


pub use anchor::{ScrollAnchor, apply_anchor, capture_first_visible_anchor};
pub use controller::HostedRecycler;
pub use host::ScrollHost;

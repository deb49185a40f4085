// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relocate World: typed per-object storage behind the [`Lookup`] seam.
//!
//! Simulated objects carry geometry in several optional, type-specific forms at once.
//! This crate provides the data kinds, the handle type and an in-memory store:
//!
//! - [`Entity`]: generational handle of an object; displays as `E{index}.{generation}`.
//! - [`Component`]: the sealed, closed set of data kinds (see [`components`]).
//! - [`Markers`]: classification bits (deleted, terrain, plant, building, static, network object).
//! - [`DirtyFlags`]: signals for downstream recompute.
//! - [`Lookup`]: has/get/get-mut, markers and dirty-marking; what the transform engine consumes.
//! - [`World`]: the in-memory implementation, with spawn/despawn, typed editing and
//!   [`World::commit`].
//!
//! It is not a scene graph: relations between objects are plain handle buffers
//! ([`ConnectedEdges`], [`SubObjects`], ...) that consumers follow on demand.
//!
//! ## Dirty tracking
//!
//! [`Lookup::mark_dirty`] is idempotent. [`World::commit`] drains everything marked since the
//! previous commit into a [`Damage`] value, per flag, in first-marked order.
//!
//! ### Minimal usage
//!
//! ```
//! use glam::Vec3;
//! use relocate_world::{DirtyFlags, Lookup, Markers, NetNode, World};
//!
//! let mut world = World::new();
//! let node = world.spawn();
//! world.insert(node, NetNode::from_position(Vec3::new(1.0, 0.0, 2.0)));
//! world.set_markers(node, Markers::NET_OBJECT);
//!
//! assert!(world.has::<NetNode>(node));
//! assert_eq!(node.to_string(), "E0.1");
//!
//! world.mark_dirty(node, DirtyFlags::UPDATED);
//! world.mark_dirty(node, DirtyFlags::UPDATED);
//! let damage = world.commit();
//! assert_eq!(damage.updated, [node]);
//! ```

#![no_std]

extern crate alloc;

pub mod components;
mod lookup;
mod types;
mod world;

pub use components::{
    AreaGeometry, AreaNodes, Component, ConnectedEdges, CullingInfo, Curve, Edge, EdgeGeometry,
    EndNodeGeometry, NetNode, NodeGeometry, ObjectGeometry, Owner, StartNodeGeometry, SubAreas,
    SubLanes, SubNets, SubObjects, Transform,
};
pub use lookup::Lookup;
pub use types::{DirtyFlags, Entity, Markers};
pub use world::{Damage, World};

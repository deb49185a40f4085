// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relocate Transform: move and rotate objects whose geometry lives in many places at once.
//!
//! ## Overview
//!
//! A simulated object rarely stores its placement in one spot. A building has a transform;
//! a network node has a node point plus the curves of every edge it touches; an area has a
//! centroid, bounds and a polygon; a compound has all of these spread over its descendants.
//! This crate keeps every one of those representations consistent through an edit.
//!
//! It talks to the object store only through [`relocate_world::Lookup`]; nothing is cached
//! between calls.
//!
//! ## Pieces
//!
//! - [`classify()`]: labels an object with a [`Category`] from its markers and data.
//! - [`EntityAccessor`]: resolves position and rotation by [`POSITION_SOURCES`] priority and
//!   writes moves and rotations into every representation the object carries.
//! - [`NodeCascade`]: a node accessor that also drags the near half of each incident edge,
//!   recomputing edge bounds from the rails afterwards.
//! - [`Compound`]: a top-level object plus its descendants (found through
//!   [`REFERENCE_KINDS`], at most [`MAX_HIERARCHY_DEPTH`] deep), moved and rotated as one.
//!
//! The first two implement [`Transformable`]; [`Accessor`] picks between them.
//!
//! ## Errors
//!
//! A handle that no longer exists is ordinary: operations return `Ok(false)` and write
//! nothing. Structural misuse (reading node data from a non-node) and malformed hierarchies
//! (deeper than the limit) are [`TransformError`]s.
//!
//! ## Example
//!
//! ```rust
//! use glam::Vec3;
//! use relocate_geometry::Bezier;
//! use relocate_transform::{Compound, NodeCascade, Transformable};
//! use relocate_world::{ConnectedEdges, Curve, Edge, Lookup, NetNode, World};
//!
//! let mut world = World::new();
//! let a = world.spawn();
//! let b = world.spawn();
//! let road = world.spawn();
//! world.insert(a, NetNode::from_position(Vec3::ZERO));
//! world.insert(b, NetNode::from_position(Vec3::new(3.0, 0.0, 0.0)));
//! world.insert(road, Edge { start: a, end: b });
//! world.insert(road, Curve { bezier: Bezier::line(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)) });
//! world.insert(a, ConnectedEdges(vec![road]));
//!
//! // Drag node `a`: the road's near half follows, the far half stays on `b`.
//! let cascade = NodeCascade::new(&world, a);
//! assert!(cascade.move_by(&mut world, Vec3::new(0.0, 0.0, 5.0))?);
//! let curve = world.get::<Curve>(road).unwrap().bezier;
//! assert_eq!(curve.a, Vec3::new(0.0, 0.0, 5.0));
//! assert_eq!(curve.d, Vec3::new(3.0, 0.0, 0.0));
//!
//! // Both the road and the far node are flagged for downstream rebuilds.
//! let damage = world.commit();
//! assert!(damage.contains(road) && damage.contains(b));
//!
//! // A compound turns around its own position.
//! let compound = Compound::new(&world, a)?;
//! assert!(compound.rotate_to(&mut world, 90.0)?);
//! assert!((compound.angle(&world)? - 90.0).abs() < 1e-3);
//! # Ok::<(), relocate_transform::TransformError>(())
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod accessor;
mod classify;
mod compound;
mod error;
mod node;
mod types;

pub use accessor::EntityAccessor;
pub use classify::classify;
pub use compound::{Accessor, Compound, Descendant};
pub use error::{Result, TransformError};
pub use node::{IncidentEdge, NodeCascade};
pub use types::{
    Category, MAX_HIERARCHY_DEPTH, POSITION_SOURCES, PositionSource, REFERENCE_KINDS,
    ReferenceKind, Representations, Transformable, yaw_degrees,
};

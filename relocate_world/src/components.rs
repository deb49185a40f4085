// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of data kinds an object may carry.
//!
//! Every kind implements the sealed [`Component`] trait, so the set is fixed
//! at compile time and accessed through ordinary generics.

use alloc::vec::Vec;

use glam::{Quat, Vec3};
use relocate_geometry::{Bezier, Bounds3, EdgeNodeGeometry, Segment};

use crate::types::Entity;

/// Direct point and orientation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub rotation: Quat,
}

impl Transform {
    /// Unrotated transform at `position`.
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Network node point and orientation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NetNode {
    /// Node position.
    pub position: Vec3,
    /// Node orientation.
    pub rotation: Quat,
}

impl NetNode {
    /// Unrotated node at `position`.
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Declared endpoints of a network edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Node at the curve's `a` end.
    pub start: Entity,
    /// Node at the curve's `d` end.
    pub end: Entity,
}

/// Centre line of an edge.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Curve {
    /// The curve.
    pub bezier: Bezier,
}

/// Rails of an edge, split into the half adjacent to each endpoint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeGeometry {
    /// Half adjacent to the start node.
    pub start: Segment,
    /// Half adjacent to the end node.
    pub end: Segment,
    /// Union of both rails' bounds; see [`EdgeGeometry::recompute_bounds`].
    pub bounds: Bounds3,
}

impl EdgeGeometry {
    /// Create edge geometry with freshly computed bounds.
    pub fn new(start: Segment, end: Segment) -> Self {
        let mut g = Self {
            start,
            end,
            bounds: Bounds3::EMPTY,
        };
        g.recompute_bounds();
        g
    }

    /// Recompute `bounds` from the current rails.
    ///
    /// Must run after every rail edit is complete.
    pub fn recompute_bounds(&mut self) {
        self.bounds = self.start.bounds().union(self.end.bounds());
    }
}

/// Geometry local to an edge's start node.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StartNodeGeometry {
    /// Endpoint rails and bounds.
    pub geometry: EdgeNodeGeometry,
}

/// Geometry local to an edge's end node.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EndNodeGeometry {
    /// Endpoint rails and bounds.
    pub geometry: EdgeNodeGeometry,
}

/// Geometry of a node's junction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NodeGeometry {
    /// Junction bounds.
    pub bounds: Bounds3,
    /// Height of the node point.
    pub elevation: f32,
}

/// Area centroid and bounds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AreaGeometry {
    /// Centroid.
    pub center_position: Vec3,
    /// Bounds of the polygon.
    pub bounds: Bounds3,
}

/// Prefab pivot and bounds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ObjectGeometry {
    /// Pivot point.
    pub pivot: Vec3,
    /// Bounds of the prefab mesh.
    pub bounds: Bounds3,
}

/// Bounds used for visibility culling.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CullingInfo {
    /// Culling bounds.
    pub bounds: Bounds3,
}

/// Ordered polygon of an area.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AreaNodes(pub Vec<Vec3>);

/// Edges connected to a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectedEdges(pub Vec<Entity>);

/// Areas contained by an object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubAreas(pub Vec<Entity>);

/// Network pieces contained by an object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubNets(pub Vec<Entity>);

/// Lanes contained by an object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubLanes(pub Vec<Entity>);

/// Objects contained by an object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubObjects(pub Vec<Entity>);

/// The object that owns this one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Owner {
    /// Owning object.
    pub owner: Entity,
}

mod sealed {
    pub trait Sealed {}
}

/// A data kind that can be attached to an [`Entity`].
///
/// Sealed: the set of kinds is closed.
pub trait Component: sealed::Sealed + Sized + 'static {
    /// Kind name, used in errors and logs.
    const NAME: &'static str;

    #[doc(hidden)]
    fn column(storage: &Storage) -> &Vec<Option<Self>>;

    #[doc(hidden)]
    fn column_mut(storage: &mut Storage) -> &mut Vec<Option<Self>>;
}

macro_rules! components {
    ($($ty:ident => $field:ident),* $(,)?) => {
        /// Per-kind columns indexed by slot.
        #[derive(Clone, Debug, Default)]
        pub struct Storage {
            $($field: Vec<Option<$ty>>,)*
        }

        impl Storage {
            /// Drop every component of slot `idx`.
            pub(crate) fn clear_slot(&mut self, idx: usize) {
                $(
                    if let Some(slot) = self.$field.get_mut(idx) {
                        *slot = None;
                    }
                )*
            }
        }

        $(
            impl sealed::Sealed for $ty {}

            impl Component for $ty {
                const NAME: &'static str = stringify!($ty);

                fn column(storage: &Storage) -> &Vec<Option<Self>> {
                    &storage.$field
                }

                fn column_mut(storage: &mut Storage) -> &mut Vec<Option<Self>> {
                    &mut storage.$field
                }
            }
        )*
    };
}

components! {
    Transform => transforms,
    NetNode => net_nodes,
    Edge => edges,
    Curve => curves,
    EdgeGeometry => edge_geometries,
    StartNodeGeometry => start_node_geometries,
    EndNodeGeometry => end_node_geometries,
    NodeGeometry => node_geometries,
    AreaGeometry => area_geometries,
    ObjectGeometry => object_geometries,
    CullingInfo => culling_infos,
    AreaNodes => area_nodes,
    ConnectedEdges => connected_edges,
    SubAreas => sub_areas,
    SubNets => sub_nets,
    SubLanes => sub_lanes,
    SubObjects => sub_objects,
    Owner => owners,
}

impl Storage {
    pub(crate) fn get<C: Component>(&self, idx: usize) -> Option<&C> {
        C::column(self).get(idx).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut<C: Component>(&mut self, idx: usize) -> Option<&mut C> {
        C::column_mut(self).get_mut(idx).and_then(Option::as_mut)
    }

    pub(crate) fn insert<C: Component>(&mut self, idx: usize, value: C) -> Option<C> {
        let col = C::column_mut(self);
        if col.len() <= idx {
            col.resize_with(idx + 1, || None);
        }
        col[idx].replace(value)
    }

    pub(crate) fn remove<C: Component>(&mut self, idx: usize) -> Option<C> {
        C::column_mut(self).get_mut(idx).and_then(Option::take)
    }
}

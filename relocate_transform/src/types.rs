// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the engine: categories, position sources, reference kinds and
//! the [`Transformable`] seam.

use glam::{EulerRot, Quat, Vec3};
use relocate_geometry::Pivot;
use relocate_world::{
    AreaGeometry, AreaNodes, CullingInfo, Curve, EdgeGeometry, EndNodeGeometry, Entity, Lookup,
    NetNode, NodeGeometry, ObjectGeometry, StartNodeGeometry, SubAreas, SubLanes, SubNets,
    SubObjects, Transform,
};

use crate::error::Result;

/// Deepest level of descendants a compound may have. The top object is level 0.
pub const MAX_HIERARCHY_DEPTH: usize = 3;

/// Structural category of an object, derived from its markers and data.
///
/// Produced by [`classify`](crate::classify()); picks the accessor specialization.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Single point and orientation (plants, buildings).
    Point,
    /// Network node with connected edges.
    NetworkNode,
    /// Network edge between two nodes.
    NetworkEdge,
    /// Polygonal area.
    Area,
    /// Static network object wrapping edges (roundabout-like).
    CompoundWrapper,
    /// Anything else.
    Other,
    /// Gone, deleted or terrain; never edited.
    Invalid,
}

/// A representation a position can be read from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PositionSource {
    /// [`Transform::position`].
    Transform,
    /// [`NetNode::position`].
    NetNode,
    /// [`AreaGeometry::center_position`].
    AreaCentroid,
    /// [`ObjectGeometry::pivot`].
    PrefabPivot,
    /// Centre of [`NodeGeometry::bounds`] raised to [`NodeGeometry::elevation`].
    NodeGeometryPoint,
    /// Centre of [`CullingInfo::bounds`].
    CullingBounds,
    /// Centre of [`EdgeGeometry::bounds`].
    EdgeGeometryBounds,
    /// Centre of the [`EndNodeGeometry`] bounds.
    EndNodeGeometryBounds,
    /// Centre of [`NodeGeometry::bounds`].
    NodeGeometryBounds,
    /// Centre of the [`StartNodeGeometry`] bounds.
    StartNodeGeometryBounds,
    /// Centre of [`ObjectGeometry::bounds`].
    PrefabBounds,
    /// First control point of the [`Curve`].
    CurveStart,
    /// First point of [`AreaNodes`].
    AreaNodesFirst,
}

/// Resolution order for positions.
///
/// The first five are authoritative; the rest are geometric approximations used
/// only when nothing authoritative exists.
pub const POSITION_SOURCES: [PositionSource; 13] = [
    PositionSource::Transform,
    PositionSource::NetNode,
    PositionSource::AreaCentroid,
    PositionSource::PrefabPivot,
    PositionSource::NodeGeometryPoint,
    PositionSource::CullingBounds,
    PositionSource::EdgeGeometryBounds,
    PositionSource::EndNodeGeometryBounds,
    PositionSource::NodeGeometryBounds,
    PositionSource::StartNodeGeometryBounds,
    PositionSource::PrefabBounds,
    PositionSource::CurveStart,
    PositionSource::AreaNodesFirst,
];

impl PositionSource {
    /// Whether this source reflects authoritative simulation state.
    pub const fn is_primary(self) -> bool {
        matches!(
            self,
            Self::Transform
                | Self::NetNode
                | Self::AreaCentroid
                | Self::PrefabPivot
                | Self::NodeGeometryPoint
        )
    }

    /// Read the position from this source alone.
    pub fn read<L: Lookup>(self, lookup: &L, entity: Entity) -> Option<Vec3> {
        match self {
            Self::Transform => lookup.get::<Transform>(entity).map(|t| t.position),
            Self::NetNode => lookup.get::<NetNode>(entity).map(|n| n.position),
            Self::AreaCentroid => lookup
                .get::<AreaGeometry>(entity)
                .map(|a| a.center_position),
            Self::PrefabPivot => lookup.get::<ObjectGeometry>(entity).map(|o| o.pivot),
            Self::NodeGeometryPoint => lookup.get::<NodeGeometry>(entity).map(|g| {
                let mut p = g.bounds.center();
                p.y = g.elevation;
                p
            }),
            Self::CullingBounds => lookup.get::<CullingInfo>(entity).map(|c| c.bounds.center()),
            Self::EdgeGeometryBounds => lookup
                .get::<EdgeGeometry>(entity)
                .map(|g| g.bounds.center()),
            Self::EndNodeGeometryBounds => lookup
                .get::<EndNodeGeometry>(entity)
                .map(|g| g.geometry.bounds.center()),
            Self::NodeGeometryBounds => lookup
                .get::<NodeGeometry>(entity)
                .map(|g| g.bounds.center()),
            Self::StartNodeGeometryBounds => lookup
                .get::<StartNodeGeometry>(entity)
                .map(|g| g.geometry.bounds.center()),
            Self::PrefabBounds => lookup
                .get::<ObjectGeometry>(entity)
                .map(|o| o.bounds.center()),
            Self::CurveStart => lookup.get::<Curve>(entity).map(|c| c.bezier.a),
            Self::AreaNodesFirst => lookup
                .get::<AreaNodes>(entity)
                .and_then(|n| n.0.first().copied()),
        }
    }
}

/// Reference-buffer relations followed by descendant discovery.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// [`SubAreas`].
    SubAreas,
    /// [`SubNets`].
    SubNets,
    /// [`SubLanes`].
    SubLanes,
    /// [`SubObjects`].
    SubObjects,
}

/// Relations followed by descendant discovery, in traversal order.
pub const REFERENCE_KINDS: [ReferenceKind; 4] = [
    ReferenceKind::SubAreas,
    ReferenceKind::SubNets,
    ReferenceKind::SubLanes,
    ReferenceKind::SubObjects,
];

impl ReferenceKind {
    /// Handles `entity` references through this relation; empty if it has none.
    pub fn targets<L: Lookup>(self, lookup: &L, entity: Entity) -> &[Entity] {
        let buffer = match self {
            Self::SubAreas => lookup.get::<SubAreas>(entity).map(|b| &b.0),
            Self::SubNets => lookup.get::<SubNets>(entity).map(|b| &b.0),
            Self::SubLanes => lookup.get::<SubLanes>(entity).map(|b| &b.0),
            Self::SubObjects => lookup.get::<SubObjects>(entity).map(|b| &b.0),
        };
        buffer.map(|b| b.as_slice()).unwrap_or_default()
    }
}

bitflags::bitflags! {
    /// The set of representations an object carries, as touched by move and rotate.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Representations: u16 {
        /// [`Transform`].
        const TRANSFORM           = 1 << 0;
        /// [`NetNode`].
        const NET_NODE            = 1 << 1;
        /// [`AreaGeometry`].
        const AREA_GEOMETRY       = 1 << 2;
        /// [`ObjectGeometry`].
        const OBJECT_GEOMETRY     = 1 << 3;
        /// [`NodeGeometry`].
        const NODE_GEOMETRY       = 1 << 4;
        /// [`CullingInfo`].
        const CULLING_INFO        = 1 << 5;
        /// [`Curve`].
        const CURVE               = 1 << 6;
        /// [`EdgeGeometry`].
        const EDGE_GEOMETRY       = 1 << 7;
        /// [`StartNodeGeometry`].
        const START_NODE_GEOMETRY = 1 << 8;
        /// [`EndNodeGeometry`].
        const END_NODE_GEOMETRY   = 1 << 9;
        /// [`AreaNodes`].
        const AREA_NODES          = 1 << 10;
    }
}

/// Yaw of `rotation` in degrees, normalized to `[0, 360)`.
pub fn yaw_degrees(rotation: Quat) -> f32 {
    let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
    let deg = yaw.to_degrees() % 360.0;
    let deg = if deg < 0.0 { deg + 360.0 } else { deg };
    // Fold -0.0 and a rounded-up 360.0 onto 0.0.
    if deg >= 360.0 { 0.0 } else { deg + 0.0 }
}

/// An object, or group of objects, that can be moved and rotated.
///
/// Every mutating call takes the lookup by `&mut`, which is the exclusive access
/// the engine assumes for the duration of the call. Calls on a handle that no
/// longer exists return `Ok(false)` and change nothing.
pub trait Transformable {
    /// The object the operations are addressed to.
    fn entity(&self) -> Entity;

    /// Current position.
    fn position<L: Lookup>(&self, lookup: &L) -> Result<Vec3>;

    /// Current orientation.
    fn rotation<L: Lookup>(&self, lookup: &L) -> Result<Quat>;

    /// Current yaw in degrees, in `[0, 360)`.
    fn angle<L: Lookup>(&self, lookup: &L) -> Result<f32> {
        Ok(yaw_degrees(self.rotation(lookup)?))
    }

    /// Translate by `delta`.
    fn move_by<L: Lookup>(&self, lookup: &mut L, delta: Vec3) -> Result<bool>;

    /// Translate so the resolved position becomes `position`.
    fn move_to<L: Lookup>(&self, lookup: &mut L, position: Vec3) -> Result<bool> {
        if !lookup.exists(self.entity()) {
            return Ok(false);
        }
        let delta = position - self.position(lookup)?;
        self.move_by(lookup, delta)
    }

    /// Rotate with `pivot`, composing its delta onto the current orientation.
    fn rotate_by<L: Lookup>(&self, lookup: &mut L, pivot: &Pivot) -> Result<bool>;

    /// Rotate points with `pivot` and set the orientation to a yaw of `angle` degrees.
    fn rotate_to<L: Lookup>(&self, lookup: &mut L, angle: f32, pivot: &Pivot) -> Result<bool>;
}

// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position and rotation of a single object across all of its representations.
//!
//! ## Reading
//!
//! Positions resolve through [`POSITION_SOURCES`] in order: the first representation
//! the object carries wins. Orientation comes from [`Transform`], then [`NetNode`],
//! else identity.
//!
//! ## Writing
//!
//! A move or rotate writes to every representation the object carries, not just the
//! one the position was read from:
//!
//! - Point-like data (transform, node, area centroid, prefab pivot) is set to the result.
//! - Curves, rails and polygon points are translated or rotated in full.
//! - Edge and endpoint bounds are recomputed from their rails; other bounds are translated.
//! - Bounds-only data is not rotated. The object is marked dirty so downstream
//!   systems rebuild it.

use glam::{Quat, Vec3};
use log::{debug, trace};
use relocate_geometry::{CurveEnd, Pivot};
use relocate_world::{
    AreaGeometry, AreaNodes, CullingInfo, Curve, DirtyFlags, EdgeGeometry, EndNodeGeometry,
    Entity, Lookup, NetNode, NodeGeometry, ObjectGeometry, StartNodeGeometry, Transform,
};

use crate::error::Result;
use crate::types::{POSITION_SOURCES, PositionSource, Representations, Transformable};

/// Flags written for every moved or rotated object.
pub(crate) const MOVED: DirtyFlags = DirtyFlags::UPDATED.union(DirtyFlags::BATCHES_UPDATED);

/// How a rotation treats stored orientations.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Turn {
    /// Compose the pivot's delta onto the current orientation.
    By,
    /// Replace the orientation.
    To(Quat),
}

impl Turn {
    pub(crate) fn yaw(angle: f32) -> Self {
        Self::To(Quat::from_rotation_y(angle.to_radians()))
    }

    fn apply(self, rotation: Quat, pivot: &Pivot) -> Quat {
        match self {
            Self::By => pivot.rotate(rotation),
            Self::To(q) => q,
        }
    }
}

/// Accessor for an object of any category.
///
/// Holds only the handle; all data is read through the [`Lookup`] passed to each call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EntityAccessor {
    entity: Entity,
}

impl EntityAccessor {
    /// Accessor for `entity`.
    pub const fn new(entity: Entity) -> Self {
        Self { entity }
    }

    /// The representation the position resolves from, and its value.
    pub fn position_source<L: Lookup>(&self, lookup: &L) -> Option<(PositionSource, Vec3)> {
        POSITION_SOURCES
            .iter()
            .find_map(|s| s.read(lookup, self.entity).map(|p| (*s, p)))
    }

    /// Representations the object currently carries.
    pub fn representations<L: Lookup>(&self, lookup: &L) -> Representations {
        let e = self.entity;
        let mut out = Representations::empty();
        out.set(Representations::TRANSFORM, lookup.has::<Transform>(e));
        out.set(Representations::NET_NODE, lookup.has::<NetNode>(e));
        out.set(Representations::AREA_GEOMETRY, lookup.has::<AreaGeometry>(e));
        out.set(Representations::OBJECT_GEOMETRY, lookup.has::<ObjectGeometry>(e));
        out.set(Representations::NODE_GEOMETRY, lookup.has::<NodeGeometry>(e));
        out.set(Representations::CULLING_INFO, lookup.has::<CullingInfo>(e));
        out.set(Representations::CURVE, lookup.has::<Curve>(e));
        out.set(Representations::EDGE_GEOMETRY, lookup.has::<EdgeGeometry>(e));
        out.set(
            Representations::START_NODE_GEOMETRY,
            lookup.has::<StartNodeGeometry>(e),
        );
        out.set(
            Representations::END_NODE_GEOMETRY,
            lookup.has::<EndNodeGeometry>(e),
        );
        out.set(Representations::AREA_NODES, lookup.has::<AreaNodes>(e));
        out
    }

    pub(crate) fn turn<L: Lookup>(&self, lookup: &mut L, pivot: &Pivot, turn: Turn) -> bool {
        let e = self.entity;
        if !lookup.exists(e) {
            return false;
        }
        let written = rotate_all(lookup, e, pivot, turn);
        lookup.mark_dirty(e, MOVED);
        debug!(
            "Rot.Set {e} (about {:.2}, {turn:?}): {written:?}",
            pivot.origin
        );
        true
    }
}

impl Transformable for EntityAccessor {
    fn entity(&self) -> Entity {
        self.entity
    }

    fn position<L: Lookup>(&self, lookup: &L) -> Result<Vec3> {
        match self.position_source(lookup) {
            Some((source, p)) => {
                trace!("Pos.Get {}: {source:?} ({p:.2})", self.entity);
                Ok(p)
            }
            None => {
                trace!("Pos.Get {}: not found", self.entity);
                Ok(Vec3::ZERO)
            }
        }
    }

    fn rotation<L: Lookup>(&self, lookup: &L) -> Result<Quat> {
        let e = self.entity;
        Ok(lookup
            .get::<Transform>(e)
            .map(|t| t.rotation)
            .or_else(|| lookup.get::<NetNode>(e).map(|n| n.rotation))
            .unwrap_or(Quat::IDENTITY))
    }

    fn move_by<L: Lookup>(&self, lookup: &mut L, delta: Vec3) -> Result<bool> {
        let e = self.entity;
        if !lookup.exists(e) {
            return Ok(false);
        }
        let old = self.position(lookup)?;
        let new = old + delta;
        let written = translate_all(lookup, e, new, delta);
        lookup.mark_dirty(e, MOVED);
        debug!("Pos.Set {e} ({new:.2}, delta:{delta:.2}, old:{old:.2}): {written:?}");
        Ok(true)
    }

    fn rotate_by<L: Lookup>(&self, lookup: &mut L, pivot: &Pivot) -> Result<bool> {
        Ok(self.turn(lookup, pivot, Turn::By))
    }

    fn rotate_to<L: Lookup>(&self, lookup: &mut L, angle: f32, pivot: &Pivot) -> Result<bool> {
        Ok(self.turn(lookup, pivot, Turn::yaw(angle)))
    }
}

/// Write a translation into every representation `e` carries.
///
/// Point-like data is set to `position`; everything else moves by `delta`.
pub(crate) fn translate_all<L: Lookup>(
    lookup: &mut L,
    e: Entity,
    position: Vec3,
    delta: Vec3,
) -> Representations {
    let mut written = Representations::empty();
    if let Some(a) = lookup.get_mut::<AreaGeometry>(e) {
        a.center_position = position;
        a.bounds = a.bounds.translated(delta);
        written |= Representations::AREA_GEOMETRY;
    }
    if let Some(c) = lookup.get_mut::<Curve>(e) {
        c.bezier = c.bezier.translated(delta, CurveEnd::Both);
        written |= Representations::CURVE;
    }
    if let Some(n) = lookup.get_mut::<NetNode>(e) {
        n.position = position;
        written |= Representations::NET_NODE;
    }
    if let Some(g) = lookup.get_mut::<NodeGeometry>(e) {
        g.bounds = g.bounds.translated(delta);
        written |= Representations::NODE_GEOMETRY;
    }
    if let Some(g) = lookup.get_mut::<EdgeGeometry>(e) {
        g.start = g.start.translated(delta, CurveEnd::Both);
        g.end = g.end.translated(delta, CurveEnd::Both);
        g.recompute_bounds();
        written |= Representations::EDGE_GEOMETRY;
    }
    if let Some(g) = lookup.get_mut::<EndNodeGeometry>(e) {
        g.geometry.translate(delta);
        written |= Representations::END_NODE_GEOMETRY;
    }
    if let Some(g) = lookup.get_mut::<StartNodeGeometry>(e) {
        g.geometry.translate(delta);
        written |= Representations::START_NODE_GEOMETRY;
    }
    if let Some(t) = lookup.get_mut::<Transform>(e) {
        t.position = position;
        written |= Representations::TRANSFORM;
    }
    if let Some(c) = lookup.get_mut::<CullingInfo>(e) {
        c.bounds = c.bounds.translated(delta);
        written |= Representations::CULLING_INFO;
    }
    if let Some(o) = lookup.get_mut::<ObjectGeometry>(e) {
        o.pivot = position;
        o.bounds = o.bounds.translated(delta);
        written |= Representations::OBJECT_GEOMETRY;
    }
    if let Some(nodes) = lookup.get_mut::<AreaNodes>(e) {
        for p in &mut nodes.0 {
            *p += delta;
        }
        written |= Representations::AREA_NODES;
    }
    written
}

/// Write a rotation about `pivot` into every rotatable representation `e` carries.
pub(crate) fn rotate_all<L: Lookup>(
    lookup: &mut L,
    e: Entity,
    pivot: &Pivot,
    turn: Turn,
) -> Representations {
    let mut written = Representations::empty();
    if let Some(t) = lookup.get_mut::<Transform>(e) {
        t.rotation = turn.apply(t.rotation, pivot);
        t.position = pivot.apply(t.position);
        written |= Representations::TRANSFORM;
    }
    if let Some(n) = lookup.get_mut::<NetNode>(e) {
        n.rotation = turn.apply(n.rotation, pivot);
        n.position = pivot.apply(n.position);
        written |= Representations::NET_NODE;
    }
    if let Some(a) = lookup.get_mut::<AreaGeometry>(e) {
        a.center_position = pivot.apply(a.center_position);
        written |= Representations::AREA_GEOMETRY;
    }
    if let Some(o) = lookup.get_mut::<ObjectGeometry>(e) {
        o.pivot = pivot.apply(o.pivot);
        written |= Representations::OBJECT_GEOMETRY;
    }
    if let Some(c) = lookup.get_mut::<Curve>(e) {
        c.bezier = c.bezier.rotated(pivot, CurveEnd::Both);
        written |= Representations::CURVE;
    }
    if let Some(g) = lookup.get_mut::<EdgeGeometry>(e) {
        g.start = g.start.rotated(pivot, CurveEnd::Both);
        g.end = g.end.rotated(pivot, CurveEnd::Both);
        g.recompute_bounds();
        written |= Representations::EDGE_GEOMETRY;
    }
    if let Some(g) = lookup.get_mut::<StartNodeGeometry>(e) {
        g.geometry.rotate(pivot);
        written |= Representations::START_NODE_GEOMETRY;
    }
    if let Some(g) = lookup.get_mut::<EndNodeGeometry>(e) {
        g.geometry.rotate(pivot);
        written |= Representations::END_NODE_GEOMETRY;
    }
    if let Some(nodes) = lookup.get_mut::<AreaNodes>(e) {
        for p in &mut nodes.0 {
            *p = pivot.apply(*p);
        }
        written |= Representations::AREA_NODES;
    }
    written
}

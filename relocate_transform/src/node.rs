// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Network nodes: moving a node drags the near half of every incident edge.
//!
//! ## Construction
//!
//! [`NodeCascade::new`] scans the node's [`ConnectedEdges`] once and records, for each
//! edge, whether the node is its declared start or end. Entries are discarded (and
//! logged at `warn`) when the edge is gone, has no [`Edge`] data, has a different
//! [`Owner`] than the node, or does not reference the node at either end.
//!
//! ## Cascade
//!
//! After the node's own representations are updated, each incident edge gets:
//!
//! 1. Its [`Curve`]: only the two control points adjacent to the node.
//! 2. Its [`EdgeGeometry`]: the segment adjacent to the node, which is the near half
//!    of each rail, in full; then the bounds are recomputed from the rails.
//! 3. The endpoint geometry for this end ([`StartNodeGeometry`] or [`EndNodeGeometry`]):
//!    in full, with its own bounds recomputed.
//! 4. Dirty marks on the edge and on its far endpoint.
//!
//! The far half of every curve is left untouched.

use alloc::vec::Vec;

use glam::{Quat, Vec3};
use log::{debug, warn};
use relocate_geometry::{Bezier, CurveEnd, EdgeNodeGeometry, Pivot, Segment};
use relocate_world::{
    ConnectedEdges, Curve, Edge, EdgeGeometry, EndNodeGeometry, Entity, Lookup, NetNode, Owner,
    StartNodeGeometry,
};

use crate::accessor::{EntityAccessor, MOVED, Turn, rotate_all, translate_all};
use crate::error::{Result, TransformError};
use crate::types::Transformable;

/// An edge touching the node, and which of its ends the node is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IncidentEdge {
    /// The edge.
    pub edge: Entity,
    /// Whether the node is the edge's declared start.
    pub is_start: bool,
}

impl IncidentEdge {
    /// The half of the edge's curves adjacent to the node.
    pub const fn near(&self) -> CurveEnd {
        CurveEnd::near(self.is_start)
    }
}

#[derive(Copy, Clone, Debug)]
enum Edit<'a> {
    Translate(Vec3),
    Rotate(&'a Pivot),
}

impl Edit<'_> {
    fn bezier(self, b: Bezier, end: CurveEnd) -> Bezier {
        match self {
            Self::Translate(delta) => b.translated(delta, end),
            Self::Rotate(pivot) => b.rotated(pivot, end),
        }
    }

    fn segment(self, s: Segment) -> Segment {
        match self {
            Self::Translate(delta) => s.translated(delta, CurveEnd::Both),
            Self::Rotate(pivot) => s.rotated(pivot, CurveEnd::Both),
        }
    }

    fn node_geometry(self, g: &mut EdgeNodeGeometry) {
        match self {
            Self::Translate(delta) => g.translate(delta),
            Self::Rotate(pivot) => g.rotate(pivot),
        }
    }
}

/// Accessor for a network node that keeps its incident edges attached.
///
/// Dropping the cascade releases its incident-edge list.
#[derive(Clone, Debug)]
pub struct NodeCascade {
    inner: EntityAccessor,
    edges: Vec<IncidentEdge>,
}

impl NodeCascade {
    /// Scan `node`'s connected edges and build the cascade.
    pub fn new<L: Lookup>(lookup: &L, node: Entity) -> Self {
        let owner = lookup.get::<Owner>(node).map(|o| o.owner);
        let mut edges = Vec::new();
        if let Some(connected) = lookup.get::<ConnectedEdges>(node) {
            edges.reserve(connected.0.len());
            for &edge in &connected.0 {
                let Some(declared) = lookup.get::<Edge>(edge) else {
                    warn!("Node {node}: connected edge {edge} is gone or has no Edge data");
                    continue;
                };
                if lookup.get::<Owner>(edge).map(|o| o.owner) != owner {
                    warn!("Node {node}: connected edge {edge} has a different owner");
                    continue;
                }
                let is_start = if declared.start == node {
                    true
                } else if declared.end == node {
                    false
                } else {
                    warn!(
                        "Node {node}: connected edge {edge} runs {} -> {}, skipping",
                        declared.start, declared.end
                    );
                    continue;
                };
                edges.push(IncidentEdge { edge, is_start });
            }
        }
        Self {
            inner: EntityAccessor::new(node),
            edges,
        }
    }

    /// Edges this node drags along.
    pub fn incident_edges(&self) -> &[IncidentEdge] {
        &self.edges
    }

    /// The plain accessor for the node itself.
    pub fn accessor(&self) -> &EntityAccessor {
        &self.inner
    }

    fn node<'l, L: Lookup>(&self, lookup: &'l L) -> Result<&'l NetNode> {
        let entity = self.inner.entity();
        lookup
            .get::<NetNode>(entity)
            .ok_or(TransformError::MissingComponent {
                entity,
                component: <NetNode as relocate_world::Component>::NAME,
            })
    }

    fn cascade<L: Lookup>(&self, lookup: &mut L, edit: Edit<'_>) {
        for inc in &self.edges {
            let edge = inc.edge;
            let end = inc.near();
            if let Some(c) = lookup.get_mut::<Curve>(edge) {
                c.bezier = edit.bezier(c.bezier, end);
            }
            if let Some(g) = lookup.get_mut::<EdgeGeometry>(edge) {
                if inc.is_start {
                    g.start = edit.segment(g.start);
                } else {
                    g.end = edit.segment(g.end);
                }
                g.recompute_bounds();
            }
            if inc.is_start {
                if let Some(g) = lookup.get_mut::<StartNodeGeometry>(edge) {
                    edit.node_geometry(&mut g.geometry);
                }
            } else if let Some(g) = lookup.get_mut::<EndNodeGeometry>(edge) {
                edit.node_geometry(&mut g.geometry);
            }
            let far = lookup
                .get::<Edge>(edge)
                .map(|d| if inc.is_start { d.end } else { d.start });
            lookup.mark_dirty(edge, MOVED);
            if let Some(far) = far {
                lookup.mark_dirty(far, MOVED);
            }
        }
    }

    fn turn<L: Lookup>(&self, lookup: &mut L, pivot: &Pivot, turn: Turn) -> Result<bool> {
        let node = self.inner.entity();
        if !lookup.exists(node) {
            return Ok(false);
        }
        self.node(lookup)?;
        let written = rotate_all(lookup, node, pivot, turn);
        lookup.mark_dirty(node, MOVED);
        self.cascade(lookup, Edit::Rotate(pivot));
        debug!(
            "Node.Rot {node} (about {:.2}, {turn:?}): {written:?}, edges: {}",
            pivot.origin,
            self.edges.len()
        );
        Ok(true)
    }
}

impl Transformable for NodeCascade {
    fn entity(&self) -> Entity {
        self.inner.entity()
    }

    fn position<L: Lookup>(&self, lookup: &L) -> Result<Vec3> {
        self.node(lookup).map(|n| n.position)
    }

    fn rotation<L: Lookup>(&self, lookup: &L) -> Result<Quat> {
        self.node(lookup).map(|n| n.rotation)
    }

    fn move_by<L: Lookup>(&self, lookup: &mut L, delta: Vec3) -> Result<bool> {
        let node = self.inner.entity();
        if !lookup.exists(node) {
            return Ok(false);
        }
        let old = self.position(lookup)?;
        let new = old + delta;
        let written = translate_all(lookup, node, new, delta);
        lookup.mark_dirty(node, MOVED);
        self.cascade(lookup, Edit::Translate(delta));
        debug!(
            "Node.Set {node} ({new:.2}, delta:{delta:.2}, old:{old:.2}): {written:?}, edges: {}",
            self.edges.len()
        );
        Ok(true)
    }

    fn rotate_by<L: Lookup>(&self, lookup: &mut L, pivot: &Pivot) -> Result<bool> {
        self.turn(lookup, pivot, Turn::By)
    }

    fn rotate_to<L: Lookup>(&self, lookup: &mut L, angle: f32, pivot: &Pivot) -> Result<bool> {
        self.turn(lookup, pivot, Turn::yaw(angle))
    }
}

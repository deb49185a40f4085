// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compound objects: a top-level object plus everything it references.
//!
//! ## Discovery
//!
//! [`Compound::new`] walks breadth-first from the top object through each of
//! [`REFERENCE_KINDS`]. The top object is depth 0. Every handle is visited at most
//! once, so a sub-object referenced by two parents is transformed once and a
//! reference back to the top is ignored. Finding a new handle deeper than
//! [`MAX_HIERARCHY_DEPTH`] fails with [`TransformError::DepthExceeded`].
//!
//! Each descendant is classified:
//!
//! - [`Category::NetworkNode`]: wrapped in a [`NodeCascade`] so its edges follow.
//! - [`Category::NetworkEdge`]: recorded only. Its geometry follows its endpoint nodes.
//! - [`Category::Invalid`]: skipped, together with anything only it references.
//! - Anything else: wrapped in an [`EntityAccessor`].
//!
//! ## Transforms
//!
//! A compound move applies one delta to the top object and every descendant. A compound
//! rotation builds one [`Pivot`] around the top object's current position and applies it
//! to all of them, so descendants swing around the compound rather than spinning in place.

use alloc::collections::{BTreeSet, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use glam::{Quat, Vec3};
use log::{debug, warn};
use relocate_geometry::Pivot;
use relocate_world::{Entity, Lookup};

use crate::accessor::EntityAccessor;
use crate::classify::classify;
use crate::error::{Result, TransformError};
use crate::node::NodeCascade;
use crate::types::{Category, MAX_HIERARCHY_DEPTH, REFERENCE_KINDS, Transformable};

/// The accessor specialization chosen for an object.
#[derive(Clone, Debug)]
pub enum Accessor {
    /// Plain accessor.
    Entity(EntityAccessor),
    /// Network node with its incident edges.
    Node(NodeCascade),
}

impl Accessor {
    /// Pick the specialization for `entity` from its category.
    pub fn for_entity<L: Lookup>(lookup: &L, entity: Entity) -> Self {
        match classify(lookup, entity) {
            Category::NetworkNode => Self::Node(NodeCascade::new(lookup, entity)),
            _ => Self::Entity(EntityAccessor::new(entity)),
        }
    }
}

impl Transformable for Accessor {
    fn entity(&self) -> Entity {
        match self {
            Self::Entity(a) => a.entity(),
            Self::Node(n) => n.entity(),
        }
    }

    fn position<L: Lookup>(&self, lookup: &L) -> Result<Vec3> {
        match self {
            Self::Entity(a) => a.position(lookup),
            Self::Node(n) => n.position(lookup),
        }
    }

    fn rotation<L: Lookup>(&self, lookup: &L) -> Result<Quat> {
        match self {
            Self::Entity(a) => a.rotation(lookup),
            Self::Node(n) => n.rotation(lookup),
        }
    }

    fn move_by<L: Lookup>(&self, lookup: &mut L, delta: Vec3) -> Result<bool> {
        match self {
            Self::Entity(a) => a.move_by(lookup, delta),
            Self::Node(n) => n.move_by(lookup, delta),
        }
    }

    fn rotate_by<L: Lookup>(&self, lookup: &mut L, pivot: &Pivot) -> Result<bool> {
        match self {
            Self::Entity(a) => a.rotate_by(lookup, pivot),
            Self::Node(n) => n.rotate_by(lookup, pivot),
        }
    }

    fn rotate_to<L: Lookup>(&self, lookup: &mut L, angle: f32, pivot: &Pivot) -> Result<bool> {
        match self {
            Self::Entity(a) => a.rotate_to(lookup, angle, pivot),
            Self::Node(n) => n.rotate_to(lookup, angle, pivot),
        }
    }
}

/// A descendant found during discovery.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Descendant {
    /// The descendant.
    pub entity: Entity,
    /// Its category at discovery time.
    pub category: Category,
    /// Distance from the top object.
    pub depth: usize,
}

/// A top-level object and its depth-bounded descendant set.
#[derive(Clone, Debug)]
pub struct Compound {
    parent: Accessor,
    children: Vec<EntityAccessor>,
    nodes: Vec<NodeCascade>,
    descendants: Vec<Descendant>,
}

impl Compound {
    /// Discover the descendants of `top`.
    pub fn new<L: Lookup>(lookup: &L, top: Entity) -> Result<Self> {
        let mut compound = Self::simple(lookup, top);
        let mut visited = BTreeSet::from([top]);
        let mut queue = VecDeque::from([(top, 0_usize)]);
        while let Some((entity, depth)) = queue.pop_front() {
            for kind in REFERENCE_KINDS {
                for &child in kind.targets(lookup, entity) {
                    if !visited.insert(child) {
                        continue;
                    }
                    let depth = depth + 1;
                    if depth > MAX_HIERARCHY_DEPTH {
                        return Err(TransformError::DepthExceeded {
                            top,
                            entity: child,
                            depth,
                        });
                    }
                    let category = classify(lookup, child);
                    match category {
                        Category::Invalid => {
                            warn!("Compound {top}: skipping invalid descendant {child}");
                            continue;
                        }
                        Category::NetworkNode => {
                            compound.nodes.push(NodeCascade::new(lookup, child));
                        }
                        Category::NetworkEdge => {}
                        _ => compound.children.push(EntityAccessor::new(child)),
                    }
                    compound.descendants.push(Descendant {
                        entity: child,
                        category,
                        depth,
                    });
                    queue.push_back((child, depth));
                }
            }
        }
        debug!("{compound}");
        Ok(compound)
    }

    /// Wrap only `top`, without discovering descendants.
    pub fn simple<L: Lookup>(lookup: &L, top: Entity) -> Self {
        Self {
            parent: Accessor::for_entity(lookup, top),
            children: Vec::new(),
            nodes: Vec::new(),
            descendants: Vec::new(),
        }
    }

    /// The top object's accessor.
    pub fn parent(&self) -> &Accessor {
        &self.parent
    }

    /// Non-node descendants that are transformed.
    pub fn children(&self) -> &[EntityAccessor] {
        &self.children
    }

    /// Node descendants.
    pub fn nodes(&self) -> &[NodeCascade] {
        &self.nodes
    }

    /// Every recorded descendant in discovery order, edges included.
    pub fn descendants(&self) -> &[Descendant] {
        &self.descendants
    }

    /// Resolved position of the top object.
    pub fn position<L: Lookup>(&self, lookup: &L) -> Result<Vec3> {
        self.parent.position(lookup)
    }

    /// Orientation of the top object.
    pub fn rotation<L: Lookup>(&self, lookup: &L) -> Result<Quat> {
        self.parent.rotation(lookup)
    }

    /// Yaw of the top object in degrees.
    pub fn angle<L: Lookup>(&self, lookup: &L) -> Result<f32> {
        self.parent.angle(lookup)
    }

    /// Translate the top object and every descendant by `delta`.
    ///
    /// Returns the top object's result; gone descendants are skipped.
    pub fn move_by<L: Lookup>(&self, lookup: &mut L, delta: Vec3) -> Result<bool> {
        if !lookup.exists(self.parent.entity()) {
            return Ok(false);
        }
        let moved = self.parent.move_by(lookup, delta)?;
        for child in &self.children {
            child.move_by(lookup, delta)?;
        }
        for node in &self.nodes {
            node.move_by(lookup, delta)?;
        }
        Ok(moved)
    }

    /// Translate so the top object lands on `position`.
    pub fn move_to<L: Lookup>(&self, lookup: &mut L, position: Vec3) -> Result<bool> {
        if !lookup.exists(self.parent.entity()) {
            return Ok(false);
        }
        let delta = position - self.parent.position(lookup)?;
        self.move_by(lookup, delta)
    }

    /// Turn the top object to a yaw of `angle` degrees, swinging every descendant
    /// around the top object's position by the same amount.
    pub fn rotate_to<L: Lookup>(&self, lookup: &mut L, angle: f32) -> Result<bool> {
        if !lookup.exists(self.parent.entity()) {
            return Ok(false);
        }
        let delta = angle - self.parent.angle(lookup)?;
        let pivot = Pivot::yaw(delta, self.parent.position(lookup)?);
        let turned = self.parent.rotate_to(lookup, angle, &pivot)?;
        self.rotate_descendants(lookup, &pivot)?;
        Ok(turned)
    }

    /// Yaw everything by `delta` degrees around the top object's position.
    pub fn rotate_by<L: Lookup>(&self, lookup: &mut L, delta: f32) -> Result<bool> {
        if !lookup.exists(self.parent.entity()) {
            return Ok(false);
        }
        let pivot = Pivot::yaw(delta, self.parent.position(lookup)?);
        let turned = self.parent.rotate_by(lookup, &pivot)?;
        self.rotate_descendants(lookup, &pivot)?;
        Ok(turned)
    }

    /// Move to `position`, then turn to `angle` around the new position.
    pub fn transform<L: Lookup>(&self, lookup: &mut L, position: Vec3, angle: f32) -> Result<bool> {
        if !self.move_to(lookup, position)? {
            return Ok(false);
        }
        self.rotate_to(lookup, angle)
    }

    /// One line for the compound, then one per descendant.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{self}");
        for d in &self.descendants {
            let indent = d.depth * 2;
            let _ = writeln!(out, "{:indent$}{} {:?}", "", d.entity, d.category);
        }
        out
    }

    fn rotate_descendants<L: Lookup>(&self, lookup: &mut L, pivot: &Pivot) -> Result<()> {
        for child in &self.children {
            child.rotate_by(lookup, pivot)?;
        }
        for node in &self.nodes {
            node.rotate_by(lookup, pivot)?;
        }
        Ok(())
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parent: {}, children: {}, nodes: {}",
            self.parent.entity(),
            self.children.len(),
            self.nodes.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use relocate_geometry::Bezier;
    use relocate_world::{
        ConnectedEdges, Curve, Edge, Markers, NetNode, SubAreas, SubNets, SubObjects, Transform,
        World,
    };

    fn point(world: &mut World, p: Vec3) -> Entity {
        let e = world.spawn();
        world.insert(e, Transform::from_position(p));
        world.set_markers(e, Markers::BUILDING);
        e
    }

    fn pos(world: &World, e: Entity) -> Vec3 {
        EntityAccessor::new(e).position(world).unwrap()
    }

    #[test]
    fn shared_sub_object_appears_once() {
        let mut world = World::new();
        let top = point(&mut world, Vec3::ZERO);
        let p1 = point(&mut world, Vec3::X);
        let p2 = point(&mut world, Vec3::Z);
        let shared = point(&mut world, Vec3::Y);
        world.insert(top, SubObjects(vec![p1, p2]));
        world.insert(p1, SubObjects(vec![shared]));
        world.insert(p2, SubAreas(vec![shared, top]));

        let c = Compound::new(&world, top).unwrap();
        let found: Vec<_> = c.descendants().iter().map(|d| d.entity).collect();
        assert_eq!(found, [p1, p2, shared]);
        assert_eq!(c.descendants()[2].depth, 2);

        // The shared object moves once.
        c.move_by(&mut world, Vec3::X).unwrap();
        assert_eq!(pos(&world, shared), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(pos(&world, top), Vec3::X);
    }

    #[test]
    fn depth_three_is_fine_depth_four_fails() {
        let mut world = World::new();
        let chain: Vec<Entity> = (0..5).map(|_| point(&mut world, Vec3::ZERO)).collect();
        for w in chain[..4].windows(2) {
            world.insert(w[0], SubObjects(vec![w[1]]));
        }
        let c = Compound::new(&world, chain[0]).unwrap();
        assert_eq!(c.descendants().len(), 3);

        world.insert(chain[3], SubNets(vec![chain[4]]));
        assert_eq!(
            Compound::new(&world, chain[0]).unwrap_err(),
            TransformError::DepthExceeded {
                top: chain[0],
                entity: chain[4],
                depth: 4,
            }
        );
    }

    #[test]
    fn cycles_terminate() {
        let mut world = World::new();
        let a = point(&mut world, Vec3::ZERO);
        let b = point(&mut world, Vec3::ZERO);
        world.insert(a, SubObjects(vec![b]));
        world.insert(b, SubObjects(vec![a, b]));
        let c = Compound::new(&world, a).unwrap();
        assert_eq!(c.children().len(), 1);
    }

    #[test]
    fn quarter_turn_swings_descendants_around_the_pivot() {
        let mut world = World::new();
        let pivot = Vec3::new(50.0, 0.0, 50.0);
        let top = point(&mut world, pivot);
        let child = point(&mut world, pivot + Vec3::new(10.0, 0.0, 0.0));
        world.insert(top, SubObjects(vec![child]));
        let c = Compound::new(&world, top).unwrap();

        assert_eq!(c.rotate_to(&mut world, 90.0), Ok(true));
        assert!(pos(&world, child).abs_diff_eq(pivot + Vec3::new(0.0, 0.0, -10.0), 1e-3));
        assert!(pos(&world, top).abs_diff_eq(pivot, 1e-4));
        assert!((c.angle(&world).unwrap() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn rotate_there_and_back_restores_orientations() {
        let mut world = World::new();
        let top = point(&mut world, Vec3::new(3.0, 0.0, -2.0));
        let kids: Vec<Entity> = (0..4)
            .map(|i| {
                let e = point(&mut world, Vec3::new(i as f32 * 5.0, 1.0, 2.0));
                if let Some(t) = world.get_mut::<Transform>(e) {
                    t.rotation = Quat::from_rotation_y(i as f32 * 0.7)
                        * Quat::from_rotation_x(0.1 * i as f32);
                }
                e
            })
            .collect();
        world.insert(top, SubObjects(kids.clone()));

        let n1 = world.spawn();
        let n2 = world.spawn();
        let edge = world.spawn();
        let (p1, p2) = (Vec3::new(-6.0, 0.0, 4.0), Vec3::new(8.0, 0.0, 1.0));
        let mut node = NetNode::from_position(p1);
        node.rotation = Quat::from_rotation_y(0.4);
        world.insert(n1, node);
        world.insert(n2, NetNode::from_position(p2));
        world.insert(edge, Edge { start: n1, end: n2 });
        let line = Bezier::line(p1, p2);
        world.insert(edge, Curve { bezier: line });
        world.insert(n1, ConnectedEdges(vec![edge]));
        world.insert(n2, ConnectedEdges(vec![edge]));
        world.insert(top, SubNets(vec![n1, n2, edge]));

        let c = Compound::new(&world, top).unwrap();
        let before: Vec<(Vec3, Quat)> = kids
            .iter()
            .map(|e| world.get::<Transform>(*e).map(|t| (t.position, t.rotation)).unwrap())
            .collect();
        let nodes_before = [n1, n2].map(|n| *world.get::<NetNode>(n).unwrap());

        let start_angle = c.angle(&world).unwrap();
        c.rotate_to(&mut world, start_angle + 123.0).unwrap();
        c.rotate_to(&mut world, start_angle).unwrap();

        for (e, (p, q)) in kids.iter().zip(before) {
            let t = world.get::<Transform>(*e).unwrap();
            assert!(t.rotation.abs_diff_eq(q, 1e-4) || t.rotation.abs_diff_eq(-q, 1e-4));
            assert!(t.position.abs_diff_eq(p, 1e-3));
        }
        for (n, old) in [n1, n2].into_iter().zip(nodes_before) {
            let now = world.get::<NetNode>(n).unwrap();
            let q = old.rotation;
            assert!(
                now.rotation.abs_diff_eq(q, 1e-4) || now.rotation.abs_diff_eq(-q, 1e-4),
                "{n} orientation not restored"
            );
            assert!(now.position.abs_diff_eq(old.position, 1e-3), "{n} moved");
        }
        let curve = world.get::<Curve>(edge).unwrap().bezier;
        for (now, was) in curve.points().into_iter().zip(line.points()) {
            assert!(now.abs_diff_eq(was, 1e-3), "curve point {now} != {was}");
        }
    }

    #[test]
    fn network_descendants_move_edges_once() {
        let mut world = World::new();
        let top = world.spawn();
        world.set_markers(top, Markers::STATIC | Markers::NET_OBJECT);
        world.insert(top, Transform::from_position(Vec3::ZERO));
        let n1 = world.spawn();
        let n2 = world.spawn();
        let edge = world.spawn();
        world.insert(n1, NetNode::from_position(Vec3::new(-4.0, 0.0, 0.0)));
        world.insert(n2, NetNode::from_position(Vec3::new(4.0, 0.0, 0.0)));
        world.insert(edge, Edge { start: n1, end: n2 });
        let line = Bezier::line(Vec3::new(-4.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0));
        world.insert(edge, Curve { bezier: line });
        world.insert(n1, ConnectedEdges(vec![edge]));
        world.insert(n2, ConnectedEdges(vec![edge]));
        world.insert(top, SubNets(vec![n1, edge, n2]));

        let c = Compound::new(&world, top).unwrap();
        assert_eq!(c.to_string(), "Parent: E0.1, children: 0, nodes: 2");
        assert_eq!(c.descendants()[1].category, Category::NetworkEdge);

        let delta = Vec3::new(0.0, 1.0, 7.0);
        assert_eq!(c.move_by(&mut world, delta), Ok(true));
        let moved = world.get::<Curve>(edge).unwrap().bezier;
        assert_eq!(moved.points(), line.points().map(|p| p + delta));
    }

    #[test]
    fn invalid_descendants_are_skipped() {
        let mut world = World::new();
        let top = point(&mut world, Vec3::ZERO);
        let dead = point(&mut world, Vec3::X);
        let behind = point(&mut world, Vec3::Z);
        world.set_markers(dead, Markers::DELETED);
        world.insert(dead, SubObjects(vec![behind]));
        world.insert(top, SubObjects(vec![dead]));
        let c = Compound::new(&world, top).unwrap();
        assert!(c.descendants().is_empty());
        c.move_by(&mut world, Vec3::Y).unwrap();
        assert_eq!(pos(&world, dead), Vec3::X);
        assert_eq!(pos(&world, behind), Vec3::Z);
    }

    #[test]
    fn transform_rotates_around_the_moved_position() {
        let mut world = World::new();
        let top = point(&mut world, Vec3::ZERO);
        let child = point(&mut world, Vec3::new(10.0, 0.0, 0.0));
        world.insert(top, SubObjects(vec![child]));
        let c = Compound::new(&world, top).unwrap();
        let target = Vec3::new(100.0, 0.0, 0.0);
        assert_eq!(c.transform(&mut world, target, 90.0), Ok(true));
        assert!(pos(&world, top).abs_diff_eq(target, 1e-4));
        assert!(pos(&world, child).abs_diff_eq(target + Vec3::new(0.0, 0.0, -10.0), 1e-3));
    }

    #[test]
    fn simple_wraps_only_the_top() {
        let mut world = World::new();
        let top = point(&mut world, Vec3::ZERO);
        let child = point(&mut world, Vec3::X);
        world.insert(top, SubObjects(vec![child]));
        let c = Compound::simple(&world, top);
        c.move_by(&mut world, Vec3::Y).unwrap();
        assert_eq!(pos(&world, top), Vec3::Y);
        assert_eq!(pos(&world, child), Vec3::X);
        assert_eq!(c.to_string(), "Parent: E0.1, children: 0, nodes: 0");
    }

    #[test]
    fn stale_top_is_a_no_op() {
        let mut world = World::new();
        let top = point(&mut world, Vec3::ZERO);
        let child = point(&mut world, Vec3::X);
        world.insert(top, SubObjects(vec![child]));
        let c = Compound::new(&world, top).unwrap();
        world.despawn(top);
        assert_eq!(c.move_to(&mut world, Vec3::Y), Ok(false));
        assert_eq!(c.rotate_to(&mut world, 45.0), Ok(false));
        assert_eq!(c.transform(&mut world, Vec3::Y, 45.0), Ok(false));
        assert_eq!(pos(&world, child), Vec3::X);
    }

    #[test]
    fn describe_lists_descendants() {
        let mut world = World::new();
        let top = point(&mut world, Vec3::ZERO);
        let area = world.spawn();
        world.insert(area, relocate_world::AreaNodes(vec![Vec3::ZERO]));
        world.insert(top, SubAreas(vec![area]));
        let c = Compound::new(&world, top).unwrap();
        assert_eq!(
            c.describe(),
            "Parent: E0.1, children: 1, nodes: 0\n  E1.1 Area\n"
        );
    }
}

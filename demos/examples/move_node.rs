// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragging a network node.
//!
//! Builds a three-node road, drags the middle node sideways and shows that only
//! the near halves of both roads follow, that edge bounds are rebuilt from the
//! rails, and which objects are flagged for downstream rebuilds.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p relocate_demos --example move_node`

use glam::Vec3;
use relocate_geometry::{Bezier, Segment};
use relocate_transform::{NodeCascade, Transformable};
use relocate_world::{ConnectedEdges, Curve, Edge, EdgeGeometry, Entity, Lookup, NetNode, World};

fn road(world: &mut World, a: (Entity, Vec3), b: (Entity, Vec3)) -> Entity {
    let edge = world.spawn();
    world.insert(edge, Edge { start: a.0, end: b.0 });
    world.insert(edge, Curve { bezier: Bezier::line(a.1, b.1) });
    let mid = a.1.lerp(b.1, 0.5);
    let width = Vec3::new(0.0, 0.0, 1.5);
    world.insert(
        edge,
        EdgeGeometry::new(
            Segment::around(Bezier::line(a.1, mid), width),
            Segment::around(Bezier::line(mid, b.1), width),
        ),
    );
    edge
}

fn main() {
    env_logger::init();

    let mut world = World::new();
    let points = [
        Vec3::new(-10.0, 0.0, 0.0),
        Vec3::ZERO,
        Vec3::new(10.0, 0.0, 0.0),
    ];
    let nodes: Vec<(Entity, Vec3)> = points
        .iter()
        .map(|&p| {
            let e = world.spawn();
            world.insert(e, NetNode::from_position(p));
            (e, p)
        })
        .collect();
    let west = road(&mut world, nodes[0], nodes[1]);
    let east = road(&mut world, nodes[1], nodes[2]);
    world.insert(nodes[1].0, ConnectedEdges(vec![west, east]));

    let middle = nodes[1].0;
    let cascade = NodeCascade::new(&world, middle);
    println!("{middle} has {} incident edges", cascade.incident_edges().len());

    let moved = cascade.move_by(&mut world, Vec3::new(0.0, 0.0, 4.0));
    assert_eq!(moved, Ok(true), "node should move");

    for edge in [west, east] {
        let Some(curve) = world.get::<Curve>(edge) else {
            continue;
        };
        println!("{edge}: {:?} .. {:?}", curve.bezier.a, curve.bezier.d);
        if let Some(g) = world.get::<EdgeGeometry>(edge) {
            println!("  bounds {}", g.bounds);
        }
    }

    let damage = world.commit();
    println!("updated: {:?}", damage.updated);
    assert!(damage.contains(nodes[0].0) && damage.contains(nodes[2].0));
}

// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where an object's position comes from.
//!
//! Objects carry different subsets of position data. The accessor reads the
//! highest-priority one present and writes every one it finds.
//!
//! Run:
//! - `cargo run -p relocate_demos --example accessor_sources`

use glam::Vec3;
use relocate_geometry::Bounds3;
use relocate_transform::{EntityAccessor, Transformable, classify};
use relocate_world::{AreaGeometry, AreaNodes, CullingInfo, NetNode, Transform, World};

fn main() {
    env_logger::init();

    let mut world = World::new();

    let prop = world.spawn();
    world.insert(prop, Transform::from_position(Vec3::new(1.0, 0.0, 1.0)));
    world.insert(
        prop,
        CullingInfo {
            bounds: Bounds3::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 2.0)),
        },
    );

    let junction = world.spawn();
    world.insert(junction, NetNode::from_position(Vec3::new(4.0, 0.0, 0.0)));

    let plaza = world.spawn();
    world.insert(plaza, AreaNodes(vec![Vec3::ZERO, Vec3::new(6.0, 0.0, 6.0)]));
    world.insert(
        plaza,
        AreaGeometry {
            center_position: Vec3::new(3.0, 0.0, 3.0),
            bounds: Bounds3::new(Vec3::ZERO, Vec3::new(6.0, 0.0, 6.0)),
        },
    );

    for e in [prop, junction, plaza] {
        let accessor = EntityAccessor::new(e);
        println!(
            "{e} {:?}: source {:?}, carries {:?}",
            classify(&world, e),
            accessor.position_source(&world),
            accessor.representations(&world),
        );
        let before = accessor.position(&world);
        let moved = accessor.move_by(&mut world, Vec3::new(0.0, 0.0, 10.0));
        println!("  {before:?} -> {:?} (moved: {moved:?})", accessor.position(&world));
    }
}

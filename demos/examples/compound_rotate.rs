// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotating a building with attached sub-objects.
//!
//! A building owns a sub-area and a sub-object. The whole compound is turned a
//! quarter around the building's position and then moved to a new lot; every
//! descendant keeps its offset relative to the building.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p relocate_demos --example compound_rotate`

use glam::Vec3;
use relocate_geometry::Bounds3;
use relocate_transform::{Compound, EntityAccessor, Transformable};
use relocate_world::{
    AreaGeometry, AreaNodes, Markers, ObjectGeometry, SubAreas, SubObjects, Transform, World,
};

fn main() {
    env_logger::init();

    let mut world = World::new();
    let building = world.spawn();
    world.set_markers(building, Markers::BUILDING);
    world.insert(building, Transform::from_position(Vec3::new(5.0, 0.0, 5.0)));

    let lot = world.spawn();
    let polygon = vec![
        Vec3::new(3.0, 0.0, 3.0),
        Vec3::new(7.0, 0.0, 3.0),
        Vec3::new(7.0, 0.0, 9.0),
        Vec3::new(3.0, 0.0, 9.0),
    ];
    world.insert(
        lot,
        AreaGeometry {
            center_position: Vec3::new(5.0, 0.0, 6.0),
            bounds: Bounds3::from_points(polygon.iter().copied()),
        },
    );
    world.insert(lot, AreaNodes(polygon));

    let sign = world.spawn();
    world.insert(sign, Transform::from_position(Vec3::new(8.0, 0.0, 5.0)));
    world.insert(
        sign,
        ObjectGeometry {
            bounds: Bounds3::new(Vec3::new(7.5, 0.0, 4.5), Vec3::new(8.5, 2.0, 5.5)),
            ..ObjectGeometry::default()
        },
    );

    world.insert(building, SubAreas(vec![lot]));
    world.insert(building, SubObjects(vec![sign]));

    let compound = match Compound::new(&world, building) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("cannot build compound: {err}");
            return;
        }
    };
    println!("{}", compound.describe());

    assert_eq!(compound.rotate_to(&mut world, 90.0), Ok(true));
    let sign_at = EntityAccessor::new(sign).position(&world);
    println!("sign after rotation: {sign_at:?}");

    assert_eq!(
        compound.move_to(&mut world, Vec3::new(50.0, 0.0, 50.0)),
        Ok(true)
    );
    for e in [building, lot, sign] {
        println!("{e}: {:?}", EntityAccessor::new(e).position(&world));
    }

    let damage = world.commit();
    println!("{} objects flagged", damage.updated.len());
}

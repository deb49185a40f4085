// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use glam::Vec3;
use relocate_geometry::{Bezier, Segment};
use relocate_transform::{Compound, NodeCascade, Transformable};
use relocate_world::{
    ConnectedEdges, Curve, Edge, EdgeGeometry, Entity, Lookup, Markers, NetNode, SubNets,
    Transform, World,
};

/// A `n`×`n` grid of nodes joined by edges along rows and columns, all owned by
/// one static network object. Returns the world, the owner and the centre node.
fn gen_grid_network(n: usize, spacing: f32) -> (World, Entity, Entity) {
    let mut world = World::new();
    let owner = world.spawn();
    world.set_markers(owner, Markers::STATIC | Markers::NET_OBJECT);
    world.insert(owner, Transform::from_position(Vec3::ZERO));

    let mut nodes = Vec::with_capacity(n * n);
    for z in 0..n {
        for x in 0..n {
            let e = world.spawn();
            let p = Vec3::new(x as f32 * spacing, 0.0, z as f32 * spacing);
            world.insert(e, NetNode::from_position(p));
            world.insert(e, ConnectedEdges(Vec::new()));
            nodes.push((e, p));
        }
    }

    let mut members: Vec<Entity> = nodes.iter().map(|(e, _)| *e).collect();
    let mut link = |world: &mut World, (a, pa): (Entity, Vec3), (b, pb): (Entity, Vec3)| {
        let edge = world.spawn();
        world.insert(edge, Edge { start: a, end: b });
        let centre = Bezier::line(pa, pb);
        world.insert(edge, Curve { bezier: centre });
        let mid = pa.lerp(pb, 0.5);
        let half = |from, to| Segment::around(Bezier::line(from, to), Vec3::new(0.0, 0.0, 2.0));
        world.insert(edge, EdgeGeometry::new(half(pa, mid), half(mid, pb)));
        for node in [a, b] {
            if let Some(c) = world.get_mut::<ConnectedEdges>(node) {
                c.0.push(edge);
            }
        }
        members.push(edge);
    };
    for z in 0..n {
        for x in 0..n {
            let here = nodes[z * n + x];
            if x + 1 < n {
                link(&mut world, here, nodes[z * n + x + 1]);
            }
            if z + 1 < n {
                link(&mut world, here, nodes[(z + 1) * n + x]);
            }
        }
    }
    world.insert(owner, SubNets(members));
    let centre = nodes[(n / 2) * n + n / 2].0;
    (world, owner, centre)
}

fn bench_cascade(c: &mut Criterion) {
    let (world, _, centre) = gen_grid_network(16, 10.0);
    let mut group = c.benchmark_group("node_cascade");
    group.bench_function("construct_degree_4", |b| {
        b.iter(|| black_box(NodeCascade::new(&world, centre)));
    });
    group.bench_function("move_by_degree_4", |b| {
        b.iter_batched(
            || world.clone(),
            |mut w| {
                let cascade = NodeCascade::new(&w, centre);
                black_box(cascade.move_by(&mut w, Vec3::new(1.0, 0.0, 0.5)))
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_compound(c: &mut Criterion) {
    let mut group = c.benchmark_group("compound");
    for n in [4_usize, 8, 16] {
        let (world, owner, _) = gen_grid_network(n, 10.0);
        group.bench_function(format!("discover_grid_{n}x{n}"), |b| {
            b.iter(|| black_box(Compound::new(&world, owner)));
        });
        group.bench_function(format!("transform_grid_{n}x{n}"), |b| {
            b.iter_batched(
                || (world.clone(), Compound::new(&world, owner)),
                |(mut w, compound)| {
                    let Ok(compound) = compound else {
                        return;
                    };
                    black_box(compound.transform(&mut w, Vec3::new(25.0, 0.0, -10.0), 45.0))
                        .ok();
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cascade, bench_compound);
criterion_main!(benches);

// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::Vec3;
use relocate_geometry::{Bezier, CurveEnd, Pivot, Segment};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u64 << 24) as f32) * 200.0 - 100.0
    }
    fn vec3(&mut self) -> Vec3 {
        Vec3::new(self.next_f32(), self.next_f32(), self.next_f32())
    }
    fn bezier(&mut self) -> Bezier {
        Bezier::new(self.vec3(), self.vec3(), self.vec3(), self.vec3())
    }
}

fn gen_segments(count: usize, seed: u64) -> Vec<Segment> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| Segment::new(rng.bezier(), rng.bezier()))
        .collect()
}

fn bench_bounds(c: &mut Criterion) {
    let segs = gen_segments(4096, 0xDEAD_BEEF);
    let mut group = c.benchmark_group("curve_bounds");
    group.throughput(Throughput::Elements(segs.len() as u64));
    group.bench_function("segment_bounds_4096", |b| {
        b.iter(|| {
            let mut acc = 0.0_f32;
            for s in &segs {
                acc += s.bounds().size().x;
            }
            black_box(acc)
        });
    });
    group.bench_function("near_half_translate_then_bounds_4096", |b| {
        let delta = Vec3::new(1.0, 0.5, -2.0);
        b.iter(|| {
            let mut acc = 0.0_f32;
            for s in &segs {
                acc += s.translated(delta, CurveEnd::Start).bounds().max.y;
            }
            black_box(acc)
        });
    });
    group.bench_function("rotate_both_then_bounds_4096", |b| {
        let pivot = Pivot::yaw(33.0, Vec3::new(5.0, 0.0, 5.0));
        b.iter(|| {
            let mut acc = 0.0_f32;
            for s in &segs {
                acc += s.rotated(&pivot, CurveEnd::Both).bounds().min.z;
            }
            black_box(acc)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_bounds);
criterion_main!(benches);

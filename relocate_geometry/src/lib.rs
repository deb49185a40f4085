// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relocate Geometry: curve and bounds primitives for editing placed objects.
//!
//! These are the small, stateless pieces the transform engine is built from:
//!
//! - [`Bounds3`]: a 3D axis-aligned box with union, translate, center and expand.
//! - [`Bezier`]: a cubic curve whose edits can be restricted to one half via [`CurveEnd`].
//! - [`Segment`]: a left/right pair of rails along one stretch of a network edge.
//! - [`EdgeNodeGeometry`]: endpoint-local rails plus a middle curve, with its own bounds.
//! - [`Pivot`]: a rotation delta together with the origin it turns around.
//!
//! Bounds of curved shapes are always recomputed from the final control points,
//! never shifted incrementally.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use relocate_geometry::{Bezier, CurveEnd, Segment};
//!
//! // A straight edge along +x, 4 units wide.
//! let centre = Bezier::line(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0));
//! let seg = Segment::around(centre, Vec3::new(0.0, 0.0, 2.0));
//!
//! // The start node moves: only the two control points near it follow.
//! let moved = seg.translated(Vec3::new(5.0, 0.0, 0.0), CurveEnd::Start);
//! assert_eq!(moved.left.a.x, 5.0);
//! assert_eq!(moved.left.d, seg.left.d);
//!
//! // Bounds come from the new rails.
//! let b = moved.bounds();
//! assert!(b.contains_point(moved.right.b));
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: `no_std` float math through `libm`. One of the two is required.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod math;

pub mod bezier;
pub mod bounds;
pub mod pivot;
pub mod segment;

pub use bezier::{Bezier, CurveEnd};
pub use bounds::Bounds3;
pub use pivot::Pivot;
pub use segment::{EdgeNodeGeometry, Segment};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// Deterministic xorshift for randomized checks.
    struct Rng(u64);

    impl Rng {
        fn next_f32(&mut self) -> f32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            ((x >> 40) as f32 / (1u64 << 24) as f32) * 20.0 - 10.0
        }

        fn vec3(&mut self) -> Vec3 {
            Vec3::new(self.next_f32(), self.next_f32(), self.next_f32())
        }

        fn bezier(&mut self) -> Bezier {
            Bezier::new(self.vec3(), self.vec3(), self.vec3(), self.vec3())
        }
    }

    #[test]
    fn half_edits_keep_bounds_exact_for_random_rails() {
        let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
        for _ in 0..200 {
            let seg = Segment::new(rng.bezier(), rng.bezier());
            let delta = rng.vec3();
            let pivot = Pivot::yaw(rng.next_f32() * 18.0, rng.vec3());
            for end in [CurveEnd::Start, CurveEnd::End, CurveEnd::Both] {
                let moved = seg.translated(delta, end).rotated(&pivot, end);
                let fresh = moved.left.bounds().union(moved.right.bounds());
                assert_eq!(moved.bounds(), fresh);
                let hull = Bounds3::from_points(
                    moved.left.points().into_iter().chain(moved.right.points()),
                );
                assert!(hull.expand(Vec3::splat(1e-3)).contains(&fresh));
            }
        }
    }

    #[test]
    fn curve_end_near() {
        assert_eq!(CurveEnd::near(true), CurveEnd::Start);
        assert_eq!(CurveEnd::near(false), CurveEnd::End);
    }
}

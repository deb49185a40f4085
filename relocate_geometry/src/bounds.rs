// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes in 3D.

use core::fmt;

use glam::{Vec2, Vec3};

/// Axis-aligned bounding box in 3D.
///
/// The box is closed: points on the faces are contained.
/// An inverted box (any `max` component below the matching `min`) is empty;
/// [`Bounds3::EMPTY`] is the identity for [`Bounds3::union`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3 {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Bounds3 {
    /// The empty box. Unioning anything with it yields the other operand.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// A degenerate box at the origin.
    pub const ZERO: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    /// Create a new box from min/max corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point; [`Bounds3::EMPTY`] for no points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points
            .into_iter()
            .fold(Self::EMPTY, |acc, p| acc.include_point(p))
    }

    /// The smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the box to contain `p`.
    #[must_use]
    pub fn include_point(self, p: Vec3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Shift both corners by `delta`.
    #[must_use]
    pub fn translated(self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Grow the box by `size` on every side.
    #[must_use]
    pub fn expand(self, size: Vec3) -> Self {
        Self {
            min: self.min - size,
            max: self.max + size,
        }
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Vec3 {
        self.min + (self.max - self.min) * 0.5
    }

    /// Midpoint of the box projected onto the ground plane (x, z).
    pub fn center_xz(&self) -> Vec2 {
        let c = self.center();
        Vec2::new(c.x, c.z)
    }

    /// Extent along each axis. Negative for an empty box.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Whether the box contains the point.
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.min.cmple(p).all() && p.cmple(self.max).all()
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &Self) -> bool {
        self.min.cmple(other.min).all() && other.max.cmple(self.max).all()
    }

    /// Return true if the box is inverted on any axis. Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        self.max.cmplt(self.min).any()
    }

    /// Whether both corners are within `max_abs_diff` of `other`'s corners.
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.min.abs_diff_eq(other.min, max_abs_diff)
            && self.max.abs_diff_eq(other.max, max_abs_diff)
    }
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Bounds3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.2},{:.2},{:.2} .. {:.2},{:.2},{:.2}]",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_union_identity() {
        let b = Bounds3::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 1.0, 4.0));
        assert_eq!(Bounds3::EMPTY.union(b), b);
        assert_eq!(b.union(Bounds3::EMPTY), b);
        assert!(Bounds3::EMPTY.is_empty());
        assert!(!b.is_empty());
    }

    #[test]
    fn from_points_encloses_all() {
        let pts = [
            Vec3::new(1.0, 5.0, -2.0),
            Vec3::new(-3.0, 0.0, 4.0),
            Vec3::new(2.0, -1.0, 0.0),
        ];
        let b = Bounds3::from_points(pts);
        assert_eq!(b.min, Vec3::new(-3.0, -1.0, -2.0));
        assert_eq!(b.max, Vec3::new(2.0, 5.0, 4.0));
        assert!(pts.iter().all(|p| b.contains_point(*p)));
        assert!(Bounds3::from_points([]).is_empty());
    }

    #[test]
    fn translate_center_and_expand() {
        let b = Bounds3::new(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(b.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.center_xz(), Vec2::new(1.0, 3.0));
        let t = b.translated(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(t.center(), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(t.size(), b.size());
        let e = b.expand(Vec3::ONE);
        assert!(e.contains(&b));
        assert!(!b.contains(&e));
    }
}

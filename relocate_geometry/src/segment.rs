// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rails: pairs of curves bounding a network edge's width.

use glam::Vec3;

use crate::bezier::{Bezier, CurveEnd};
use crate::bounds::Bounds3;
use crate::pivot::Pivot;

/// A left/right pair of rails along one stretch of an edge.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Segment {
    /// Left rail.
    pub left: Bezier,
    /// Right rail.
    pub right: Bezier,
}

impl Segment {
    /// Create a segment from its two rails.
    pub const fn new(left: Bezier, right: Bezier) -> Self {
        Self { left, right }
    }

    /// A segment whose rails are `centre` offset by `-offset` and `+offset`.
    pub fn around(centre: Bezier, offset: Vec3) -> Self {
        Self {
            left: centre.translated(-offset, CurveEnd::Both),
            right: centre.translated(offset, CurveEnd::Both),
        }
    }

    /// Translate the selected half of both rails.
    #[must_use]
    pub fn translated(self, delta: Vec3, end: CurveEnd) -> Self {
        Self {
            left: self.left.translated(delta, end),
            right: self.right.translated(delta, end),
        }
    }

    /// Rotate the selected half of both rails.
    #[must_use]
    pub fn rotated(self, pivot: &Pivot, end: CurveEnd) -> Self {
        Self {
            left: self.left.rotated(pivot, end),
            right: self.right.rotated(pivot, end),
        }
    }

    /// Union of both rails' bounds.
    pub fn bounds(&self) -> Bounds3 {
        self.left.bounds().union(self.right.bounds())
    }
}

/// Geometry local to one endpoint of an edge.
///
/// Its `bounds` cover only its own `left` and `right` segments, never the
/// whole edge. The `middle` curve is carried along by every edit but does not
/// contribute to the bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeNodeGeometry {
    /// Left segment.
    pub left: Segment,
    /// Right segment.
    pub right: Segment,
    /// Centre curve through the junction.
    pub middle: Bezier,
    /// Cached bounds; see [`EdgeNodeGeometry::recompute_bounds`].
    pub bounds: Bounds3,
}

impl EdgeNodeGeometry {
    /// Create endpoint geometry with freshly computed bounds.
    pub fn new(left: Segment, right: Segment, middle: Bezier) -> Self {
        let mut g = Self {
            left,
            right,
            middle,
            bounds: Bounds3::EMPTY,
        };
        g.recompute_bounds();
        g
    }

    /// Recompute `bounds` from the current rails.
    pub fn recompute_bounds(&mut self) {
        self.bounds = self.left.bounds().union(self.right.bounds());
    }

    /// Translate everything, then recompute bounds.
    pub fn translate(&mut self, delta: Vec3) {
        self.left = self.left.translated(delta, CurveEnd::Both);
        self.right = self.right.translated(delta, CurveEnd::Both);
        self.middle = self.middle.translated(delta, CurveEnd::Both);
        self.recompute_bounds();
    }

    /// Rotate everything, then recompute bounds.
    pub fn rotate(&mut self, pivot: &Pivot) {
        self.left = self.left.rotated(pivot, CurveEnd::Both);
        self.right = self.right.rotated(pivot, CurveEnd::Both);
        self.middle = self.middle.rotated(pivot, CurveEnd::Both);
        self.recompute_bounds();
    }
}

impl Default for EdgeNodeGeometry {
    fn default() -> Self {
        Self::new(Segment::default(), Segment::default(), Bezier::default())
    }
}

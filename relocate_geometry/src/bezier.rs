// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bezier curves with half-selective edits.

use glam::Vec3;

use crate::bounds::Bounds3;
use crate::math;
use crate::pivot::Pivot;

/// Which half of a curve an edit touches.
///
/// A cubic has two control points near each end: `a, b` at the start and
/// `c, d` at the end.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CurveEnd {
    /// Only `a` and `b`.
    Start,
    /// Only `c` and `d`.
    End,
    /// All four control points.
    Both,
}

impl CurveEnd {
    /// The near half for an endpoint: [`CurveEnd::Start`] when `is_start`.
    pub const fn near(is_start: bool) -> Self {
        if is_start { Self::Start } else { Self::End }
    }

    #[inline]
    const fn touches_start(self) -> bool {
        matches!(self, Self::Start | Self::Both)
    }

    #[inline]
    const fn touches_end(self) -> bool {
        matches!(self, Self::End | Self::Both)
    }
}

/// A cubic Bezier in 3D with control points `a, b, c, d`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bezier {
    /// Start point.
    pub a: Vec3,
    /// First handle.
    pub b: Vec3,
    /// Second handle.
    pub c: Vec3,
    /// End point.
    pub d: Vec3,
}

impl Bezier {
    /// Create a curve from its four control points.
    pub const fn new(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Self {
        Self { a, b, c, d }
    }

    /// A straight curve with handles at the thirds.
    pub fn line(start: Vec3, end: Vec3) -> Self {
        Self {
            a: start,
            b: start.lerp(end, 1.0 / 3.0),
            c: start.lerp(end, 2.0 / 3.0),
            d: end,
        }
    }

    /// Control points in order.
    pub const fn points(&self) -> [Vec3; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    pub fn eval(&self, t: f32) -> Vec3 {
        let mt = 1.0 - t;
        self.a * (mt * mt * mt)
            + self.b * (3.0 * mt * mt * t)
            + self.c * (3.0 * mt * t * t)
            + self.d * (t * t * t)
    }

    /// Apply `f` to the control points selected by `end`.
    #[must_use]
    pub fn map(self, end: CurveEnd, mut f: impl FnMut(Vec3) -> Vec3) -> Self {
        let mut out = self;
        if end.touches_start() {
            out.a = f(out.a);
            out.b = f(out.b);
        }
        if end.touches_end() {
            out.c = f(out.c);
            out.d = f(out.d);
        }
        out
    }

    /// Translate the selected half by `delta`.
    #[must_use]
    pub fn translated(self, delta: Vec3, end: CurveEnd) -> Self {
        self.map(end, |p| p + delta)
    }

    /// Rotate the selected half with `pivot`.
    #[must_use]
    pub fn rotated(self, pivot: &Pivot, end: CurveEnd) -> Self {
        self.map(end, |p| pivot.apply(p))
    }

    /// Exact axis-aligned bounds of the curve.
    ///
    /// Includes both end points and every interior extremum, found per axis
    /// from the roots of the derivative.
    pub fn bounds(&self) -> Bounds3 {
        let mut out = Bounds3::EMPTY.include_point(self.a).include_point(self.d);
        // B'(t) / 3 = A t^2 + B t + C per axis.
        let p = self.b - self.a;
        let q = self.c - self.b;
        let r = self.d - self.c;
        let qa = p - 2.0 * q + r;
        let qb = 2.0 * (q - p);
        let qc = p;
        for axis in 0..3 {
            for t in derivative_roots(qa[axis], qb[axis], qc[axis]).into_iter().flatten() {
                out = out.include_point(self.eval(t));
            }
        }
        out
    }
}

/// Roots of `a t^2 + b t + c` strictly inside `(0, 1)`.
fn derivative_roots(a: f32, b: f32, c: f32) -> [Option<f32>; 2] {
    const EPS: f32 = 1e-7;
    let inside = |t: f32| (t > 0.0 && t < 1.0).then_some(t);
    let negligible = |v: f32| -EPS < v && v < EPS;
    if negligible(a) {
        if negligible(b) {
            return [None, None];
        }
        return [inside(-c / b), None];
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return [None, None];
    }
    let s = math::sqrt(disc);
    [inside((-b + s) / (2.0 * a)), inside((-b - s) / (2.0 * a))]
}

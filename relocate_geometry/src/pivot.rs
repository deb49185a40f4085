// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotation about a fixed origin.

use glam::{Affine3A, Quat, Vec3};

/// A rotation delta bundled with the origin it turns around.
///
/// The matrix is `TRS(origin, delta, 1)`, so [`Pivot::apply`] maps a point `p`
/// to `origin + delta * (p - origin)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pivot {
    /// Orientation change applied by this pivot.
    pub delta: Quat,
    /// Centre of rotation.
    pub origin: Vec3,
    /// `TRS(origin, delta, 1)`.
    pub matrix: Affine3A,
}

impl Pivot {
    /// Rotation by `delta` around `origin`.
    pub fn new(delta: Quat, origin: Vec3) -> Self {
        Self {
            delta,
            origin,
            matrix: Affine3A::from_rotation_translation(delta, origin),
        }
    }

    /// Yaw (rotation about +Y) by `delta_degrees` around `origin`.
    pub fn yaw(delta_degrees: f32, origin: Vec3) -> Self {
        Self::new(Quat::from_rotation_y(delta_degrees.to_radians()), origin)
    }

    /// A pivot that leaves every point where it is.
    pub fn identity(origin: Vec3) -> Self {
        Self::new(Quat::IDENTITY, origin)
    }

    /// Rotate a point: `matrix · (p - origin)`.
    #[inline]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        self.matrix.transform_point3(p - self.origin)
    }

    /// Compose an orientation with this pivot's delta (delta applied last).
    #[inline]
    pub fn rotate(&self, rotation: Quat) -> Quat {
        (self.delta * rotation).normalize()
    }
}

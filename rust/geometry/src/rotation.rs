// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-angle rotations for aligning wall primitives
//!
//! A wall box is modelled with its long side on the reference axis (0, 0, 1).
//! Placing it between two corners means rotating that axis onto the wall
//! direction; the parallel and anti-parallel cases have no well-defined cross
//! product and are resolved explicitly here.

use crate::types::Point3D;
use nalgebra::{Isometry3, Matrix4, Rotation3, Translation3, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Tolerance below which lengths and cross products are treated as zero
pub const EPSILON: f64 = 1e-9;

/// The direction a default wall box is aligned with
pub const REFERENCE_AXIS: Point3D = Point3D::new(0.0, 0.0, 1.0);

#[inline]
pub fn reference_axis() -> Vector3<f64> {
    REFERENCE_AXIS.to_vector()
}

/// Rotation as a unit axis plus an angle in radians
///
/// `angle` is always in `[0, π]`. The axis is the zero vector only for the
/// identity rotation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AxisAngle {
    pub axis: Point3D,
    pub angle: f64,
}

impl AxisAngle {
    pub const IDENTITY: AxisAngle = AxisAngle {
        axis: Point3D::ORIGIN,
        angle: 0.0,
    };

    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.angle.abs() <= EPSILON || self.axis.to_vector().norm() <= EPSILON
    }

    /// Shortest rotation taking unit vector `from` onto unit vector `to`
    ///
    /// Parallel inputs give the identity; anti-parallel inputs give a half
    /// turn about the perpendicular of `from` closest to +Y, so a box rotated
    /// this way keeps its height axis upright.
    pub fn between(from: &Vector3<f64>, to: &Vector3<f64>) -> Self {
        // acos is undefined outside [-1, 1]; rounding can overshoot by an ulp
        let dot = from.dot(to).clamp(-1.0, 1.0);
        let cross = from.cross(to);
        let cross_norm = cross.norm();

        if cross_norm <= EPSILON {
            if dot > 0.0 {
                return Self::IDENTITY;
            }
            return Self {
                axis: Point3D::from_vector(&any_perpendicular(from)),
                angle: std::f64::consts::PI,
            };
        }

        Self {
            axis: Point3D::from_vector(&(cross / cross_norm)),
            angle: dot.acos(),
        }
    }

    /// Rotation taking the reference axis onto `direction` (a unit vector)
    #[inline]
    pub fn aligning_reference_to(direction: &Vector3<f64>) -> Self {
        Self::between(&reference_axis(), direction)
    }

    pub fn to_rotation3(&self) -> Rotation3<f64> {
        if self.is_identity() {
            return Rotation3::identity();
        }
        let axis = Unit::new_normalize(self.axis.to_vector());
        Rotation3::from_axis_angle(&axis, self.angle)
    }

    pub fn to_quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_rotation_matrix(&self.to_rotation3())
    }

    #[inline]
    pub fn rotate_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.to_rotation3() * v
    }

    /// Placement transform: rotate about the origin, then translate.
    pub fn to_matrix4(&self, translation: &Point3D) -> Matrix4<f64> {
        let isometry = Isometry3::from_parts(
            Translation3::new(translation.x, translation.y, translation.z),
            self.to_quaternion(),
        );
        isometry.to_homogeneous()
    }

    /// `(axis.x, axis.y, axis.z, angle)`, the layout scene-graph node
    /// rotations are usually set from.
    pub fn to_array(&self) -> [f64; 4] {
        [self.axis.x, self.axis.y, self.axis.z, self.angle]
    }
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Unit vector perpendicular to `v`, preferring +Y then +X
fn any_perpendicular(v: &Vector3<f64>) -> Vector3<f64> {
    let v = v.normalize();
    let candidate = if v.y.abs() < 0.9 {
        Vector3::y()
    } else {
        Vector3::x()
    };
    // Project the candidate onto the plane perpendicular to v
    (candidate - v * candidate.dot(&v)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_reference_to_x_is_quarter_turn_about_y() {
        let rotation = AxisAngle::aligning_reference_to(&Vector3::x());
        assert_relative_eq!(rotation.angle, FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(rotation.axis.to_vector(), Vector3::y(), epsilon = 1e-12);

        let rotated = rotation.rotate_vector(&reference_axis());
        assert_relative_eq!(rotated, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_is_identity() {
        let rotation = AxisAngle::aligning_reference_to(&Vector3::z());
        assert!(rotation.is_identity());
        assert_eq!(rotation, AxisAngle::IDENTITY);
        assert_eq!(rotation.to_rotation3(), Rotation3::identity());
    }

    #[test]
    fn test_anti_parallel_flips_about_y() {
        let rotation = AxisAngle::aligning_reference_to(&-Vector3::z());
        assert_relative_eq!(rotation.angle, PI);
        assert_eq!(rotation.axis, Point3D::new(0.0, 1.0, 0.0));

        let rotated = rotation.rotate_vector(&reference_axis());
        assert_relative_eq!(rotated, -Vector3::z(), epsilon = 1e-12);
        // Height axis stays vertical
        let up = rotation.rotate_vector(&Vector3::y());
        assert_relative_eq!(up, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_dot_overshoot_is_clamped() {
        // Slightly longer than unit: dot product exceeds 1.0
        let rotation = AxisAngle::between(&Vector3::z(), &Vector3::new(0.0, 0.0, 1.0 + 1e-15));
        assert!(!rotation.angle.is_nan());
        assert!(rotation.is_identity());
    }

    #[test]
    fn test_zero_axis_is_identity() {
        let rotation = AxisAngle {
            axis: Point3D::ORIGIN,
            angle: 1.0,
        };
        assert!(rotation.is_identity());
        assert_eq!(rotation.to_rotation3(), Rotation3::identity());
    }

    #[test]
    fn test_to_matrix4_rotates_then_translates() {
        let rotation = AxisAngle::aligning_reference_to(&Vector3::x());
        let m = rotation.to_matrix4(&Point3D::new(1.0, 0.0, 0.0));
        let p = m.transform_point(&nalgebra::Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p, nalgebra::Point3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_any_perpendicular() {
        let p = any_perpendicular(&Vector3::y());
        assert_relative_eq!(p.dot(&Vector3::y()), 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
    }
}

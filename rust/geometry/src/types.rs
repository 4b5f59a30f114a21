// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core value types for corner capture and wall placement

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point in meters, in the scene's local frame (simplified for serialization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const ORIGIN: Point3D = Point3D::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: &Point3<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }

    /// View the coordinates as a vector (for directions and rotation axes)
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_vector(v: &Vector3<f64>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }

    pub fn distance_to(&self, other: &Point3D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Component-wise average of two points
    pub fn midpoint(&self, other: &Point3D) -> Point3D {
        Point3D::new(
            // Halve first so huge coordinates do not overflow
            self.x / 2.0 + other.x / 2.0,
            self.y / 2.0 + other.y / 2.0,
            self.z / 2.0 + other.z / 2.0,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Point3<f64>> for Point3D {
    fn from(p: Point3<f64>) -> Self {
        Point3D::from_nalgebra(&p)
    }
}

impl From<[f64; 3]> for Point3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Point3D::new(x, y, z)
    }
}

/// Fixed dimensions of the primitives drawn for a room
///
/// Walls are boxes of `width` x `height` x segment length; corners are
/// spheres of `marker_radius`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WallDimensions {
    /// Wall thickness in meters (box X extent)
    pub width: f64,
    /// Wall height in meters (box Y extent)
    pub height: f64,
    /// Corner marker sphere radius in meters
    pub marker_radius: f64,
}

impl Default for WallDimensions {
    fn default() -> Self {
        Self {
            width: 0.1,
            height: 2.0,
            marker_radius: 0.05,
        }
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall-segment geometry builder
//!
//! Turns a pair of consecutive room corners into everything a renderer needs
//! to place a wall box between them: length, midpoint (placement origin),
//! direction and the axis-angle rotation aligning the box with that direction.

use crate::rotation::{AxisAngle, EPSILON, REFERENCE_AXIS};
use crate::types::Point3D;
use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// A wall between two consecutive corners
///
/// Segments are derived values: they are built once from their endpoints and
/// never edited afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WallSegment {
    pub start: Point3D,
    pub end: Point3D,
    /// Euclidean distance between `start` and `end`
    pub length: f64,
    /// Placement origin
    pub midpoint: Point3D,
    /// Unit direction from `start` to `end`; the reference axis when the
    /// segment has no length
    pub direction: Point3D,
    /// Rotation aligning the reference axis with `direction`
    pub rotation: AxisAngle,
}

impl WallSegment {
    /// Placement transform for a primitive modelled around the origin along
    /// the reference axis.
    pub fn placement(&self) -> Matrix4<f64> {
        self.rotation.to_matrix4(&self.midpoint)
    }

    /// Text shown above the wall
    pub fn label(&self) -> String {
        format_length_label(self.length)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length <= EPSILON
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: &Point3D, b: &Point3D) -> f64 {
    a.distance_to(b)
}

/// Build the wall joining `previous` to `current`
///
/// Coincident points produce a zero-length wall pointing along the reference
/// axis with no rotation, never NaN.
pub fn build_segment(previous: Point3D, current: Point3D) -> WallSegment {
    let (length, unit) = span(&previous, &current);
    let midpoint = previous.midpoint(&current);

    let (direction, rotation) = match unit {
        Some(direction) if length > EPSILON => (
            Point3D::from_vector(&direction),
            AxisAngle::aligning_reference_to(&direction),
        ),
        _ => (REFERENCE_AXIS, AxisAngle::IDENTITY),
    };

    WallSegment {
        start: previous,
        end: current,
        length,
        midpoint,
        direction,
        rotation,
    }
}

/// Length of `current - previous` and the unit vector along it
///
/// When the squared norm overflows, the difference is rescaled by its largest
/// component before normalizing. The length is then infinite only if the
/// true distance exceeds `f64::MAX`.
fn span(previous: &Point3D, current: &Point3D) -> (f64, Option<Vector3<f64>>) {
    let d = current.to_vector() - previous.to_vector();
    let length = d.norm();
    if length.is_finite() {
        return (length, (length > 0.0).then(|| d / length));
    }

    // Half the difference is finite for any finite endpoints
    let half = current.to_vector() / 2.0 - previous.to_vector() / 2.0;
    let scale = half.amax();
    if !scale.is_finite() || scale == 0.0 {
        return (length, None);
    }
    let scaled = half / scale;
    let norm = scaled.norm();
    (2.0 * scale * norm, Some(scaled / norm))
}

/// Build the walls of an open corner polyline, in tap order
///
/// `n` corners give `max(0, n - 1)` walls. Zero-length walls are kept.
pub fn build_segments(corners: &[Point3D]) -> Vec<WallSegment> {
    corners
        .windows(2)
        .map(|pair| build_segment(pair[0], pair[1]))
        .collect()
}

/// Length rounded to one decimal place, e.g. `3.1`
pub fn format_length(length: f64) -> String {
    format!("{:.1}", length)
}

/// Length with its unit, e.g. `3.1 m`
pub fn format_length_label(length: f64) -> String {
    format!("{} m", format_length(length))
}

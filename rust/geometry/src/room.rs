// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room model: the ordered corners a user has placed and the walls between them

use crate::error::{Error, Result};
use crate::segment::{build_segment, build_segments, WallSegment};
use crate::types::Point3D;
use serde::{Deserialize, Serialize};

/// Ordered corners and the walls joining consecutive ones
///
/// Wall `i` always joins corner `i` to corner `i + 1`. The room only grows by
/// appending corners, and is reset as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomModel {
    corners: Vec<Point3D>,
    segments: Vec<WallSegment>,
}

/// Serializable form of a room. Walls are re-derived on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomSnapshot {
    pub corners: Vec<Point3D>,
}

impl RoomModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_corners<I>(corners: I) -> Self
    where
        I: IntoIterator<Item = Point3D>,
    {
        let corners: Vec<Point3D> = corners.into_iter().collect();
        let segments = build_segments(&corners);
        Self { corners, segments }
    }

    /// Append a corner, returning the wall it closes off (if any)
    pub fn add_corner(&mut self, position: Point3D) -> Option<&WallSegment> {
        let previous = self.corners.last().copied();
        self.corners.push(position);

        let previous = previous?;
        let segment = build_segment(previous, position);
        tracing::debug!(
            corner = self.corners.len() - 1,
            distance = segment.length,
            label = %segment.label(),
            "Added wall between corners"
        );
        self.segments.push(segment);
        self.segments.last()
    }

    /// Drop every corner and wall. Returns `false` when the room was already empty.
    pub fn clear(&mut self) -> bool {
        if self.corners.is_empty() {
            return false;
        }
        tracing::debug!(
            corners = self.corners.len(),
            walls = self.segments.len(),
            "Cleared room"
        );
        self.corners.clear();
        self.segments.clear();
        true
    }

    #[inline]
    pub fn corners(&self) -> &[Point3D] {
        &self.corners
    }

    #[inline]
    pub fn segments(&self) -> &[WallSegment] {
        &self.segments
    }

    #[inline]
    pub fn last_corner(&self) -> Option<&Point3D> {
        self.corners.last()
    }

    #[inline]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    /// Total wall length of the open corner polyline
    pub fn perimeter(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum()
    }

    /// Closest stored corner within `tolerance` of `point`
    pub fn nearest_corner(&self, point: &Point3D, tolerance: f64) -> Option<(usize, &Point3D)> {
        self.corners
            .iter()
            .enumerate()
            .map(|(i, c)| (i, c, c.distance_to(point)))
            .filter(|(_, _, d)| *d <= tolerance)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(i, c, _)| (i, c))
    }

    pub fn to_snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            corners: self.corners.clone(),
        }
    }

    /// Rebuilds a room from its corners
    ///
    /// Corners must be finite and consecutive corners close enough for the
    /// wall length to be representable.
    pub fn from_snapshot(snapshot: RoomSnapshot) -> Result<Self> {
        if let Some(i) = snapshot.corners.iter().position(|c| !c.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "corner {} has non-finite coordinates",
                i
            )));
        }
        let room = Self::from_corners(snapshot.corners);
        if let Some(i) = room.segments.iter().position(|s| !s.length.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "wall {} is too long to measure",
                i
            )));
        }
        Ok(room)
    }

    /// Serializes the room corners to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: RoomSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }
}

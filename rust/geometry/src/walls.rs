// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall and corner primitives - converting a room into triangle meshes
//!
//! Each wall is a box of `width` x `height` x length modelled around the
//! origin with its long side on the reference axis, then moved into place by
//! the segment's placement transform. Corners get a small sphere marker.

use crate::mesh::Mesh;
use crate::room::RoomModel;
use crate::segment::WallSegment;
use crate::transform::apply_transform;
use crate::types::{Point3D, WallDimensions};
use nalgebra::{Point3, Vector3};

/// Longitude divisions of corner marker spheres
pub const MARKER_SEGMENTS: u32 = 12;
/// Latitude divisions of corner marker spheres
pub const MARKER_RINGS: u32 = 6;
/// Upper bounds keeping marker vertex indices well inside `u32`
pub const MAX_MARKER_SEGMENTS: u32 = 1024;
pub const MAX_MARKER_RINGS: u32 = 512;

/// Axis-aligned box centred on the origin
///
/// X extent is `width`, Y extent `height`, Z extent `length`. Faces are
/// flat-shaded: 24 vertices, 12 triangles, counter-clockwise from outside.
pub fn box_mesh(width: f64, height: f64, length: f64) -> Mesh {
    let half = Vector3::new(width / 2.0, height / 2.0, length / 2.0);
    let (x, y, z) = (Vector3::x(), Vector3::y(), Vector3::z());

    // (normal, u, v) with u x v == normal
    let faces = [
        (x, y, z),
        (-x, z, y),
        (y, z, x),
        (-y, x, z),
        (z, x, y),
        (-z, y, x),
    ];

    let mut mesh = Mesh::with_capacity(24, 36);
    for (normal, u, v) in faces {
        let center = normal.component_mul(&half);
        let du = u.component_mul(&half);
        let dv = v.component_mul(&half);

        let corner = |su: f64, sv: f64| Point3::from(center + du * su + dv * sv);
        let i0 = mesh.add_vertex(corner(-1.0, -1.0), normal);
        let i1 = mesh.add_vertex(corner(1.0, -1.0), normal);
        let i2 = mesh.add_vertex(corner(1.0, 1.0), normal);
        let i3 = mesh.add_vertex(corner(-1.0, 1.0), normal);
        mesh.add_quad(i0, i1, i2, i3);
    }

    mesh
}

/// Box for one wall, placed between the segment's endpoints
pub fn wall_mesh(segment: &WallSegment, dims: &WallDimensions) -> Mesh {
    let mut mesh = box_mesh(dims.width, dims.height, segment.length);
    apply_transform(&mut mesh, &segment.placement());
    mesh
}

/// UV sphere centred on `center`
///
/// Pole rows are fanned so no zero-area triangles are emitted. Division
/// counts are clamped to `3..=MAX_MARKER_SEGMENTS` and `2..=MAX_MARKER_RINGS`.
pub fn marker_mesh(center: &Point3D, radius: f64, segments: u32, rings: u32) -> Mesh {
    let segments = segments.clamp(3, MAX_MARKER_SEGMENTS);
    let rings = rings.clamp(2, MAX_MARKER_RINGS);
    let row = segments + 1;

    let vertex_count = (rings as usize + 1) * row as usize;
    let index_count = segments as usize * (2 * rings as usize - 2) * 3;
    let mut mesh = Mesh::with_capacity(vertex_count, index_count);

    for r in 0..=rings {
        let phi = std::f64::consts::PI * r as f64 / rings as f64;
        for s in 0..=segments {
            let theta = std::f64::consts::TAU * s as f64 / segments as f64;
            let normal = Vector3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.add_vertex(center.to_nalgebra() + normal * radius, normal);
        }
    }

    for r in 0..rings {
        for s in 0..segments {
            let i0 = r * row + s;
            let i1 = i0 + row;
            if r != 0 {
                mesh.add_triangle(i0, i0 + 1, i1 + 1);
            }
            if r != rings - 1 {
                mesh.add_triangle(i0, i1 + 1, i1);
            }
        }
    }

    mesh
}

/// Every wall of the room, in tap order, optionally followed by corner markers
pub fn room_mesh(room: &RoomModel, dims: &WallDimensions, include_markers: bool) -> Mesh {
    let walls: Vec<Mesh> = room
        .segments()
        .iter()
        .map(|segment| wall_mesh(segment, dims))
        .collect();

    let mut mesh = Mesh::new();
    mesh.merge_all(&walls);

    if include_markers {
        for corner in room.corners() {
            mesh.merge(&marker_mesh(
                corner,
                dims.marker_radius,
                MARKER_SEGMENTS,
                MARKER_RINGS,
            ));
        }
    }

    tracing::debug!(
        walls = walls.len(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Built room mesh"
    );

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::build_segment;
    use approx::assert_relative_eq;

    fn face_normal(mesh: &Mesh, tri: usize) -> Vector3<f64> {
        let p = |i: u32| {
            let i = i as usize * 3;
            Vector3::new(
                mesh.positions[i] as f64,
                mesh.positions[i + 1] as f64,
                mesh.positions[i + 2] as f64,
            )
        };
        let (a, b, c) = (
            p(mesh.indices[tri * 3]),
            p(mesh.indices[tri * 3 + 1]),
            p(mesh.indices[tri * 3 + 2]),
        );
        (b - a).cross(&(c - a))
    }

    #[test]
    fn test_box_counts_and_bounds() {
        let mesh = box_mesh(0.1, 2.0, 3.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x, -0.05);
        assert_relative_eq!(max.y, 1.0);
        assert_relative_eq!(max.z, 1.5);
    }

    #[test]
    fn test_box_winding_faces_outward() {
        let mesh = box_mesh(1.0, 1.0, 1.0);
        for tri in 0..mesh.triangle_count() {
            let n = face_normal(&mesh, tri);
            let vi = mesh.indices[tri * 3] as usize * 3;
            let stored = Vector3::new(
                mesh.normals[vi] as f64,
                mesh.normals[vi + 1] as f64,
                mesh.normals[vi + 2] as f64,
            );
            assert!(n.dot(&stored) > 0.0, "triangle {} faces inward", tri);
        }
    }

    #[test]
    fn test_wall_spans_corners() {
        let segment = build_segment(Point3D::new(0.0, 0.0, 0.0), Point3D::new(2.0, 0.0, 0.0));
        let mesh = wall_mesh(&segment, &WallDimensions::default());
        let (min, max) = mesh.bounds();

        assert_relative_eq!(min.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(max.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(min.y, -1.0, epsilon = 1e-5);
        assert_relative_eq!(max.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(max.z - min.z, 0.1, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_wall_is_finite() {
        let p = Point3D::new(1.0, 0.0, 1.0);
        let mesh = wall_mesh(&build_segment(p, p), &WallDimensions::default());
        assert_eq!(mesh.vertex_count(), 24);
        assert!(mesh.is_finite());
    }

    #[test]
    fn test_marker_sphere() {
        let center = Point3D::new(1.0, 2.0, 3.0);
        let mesh = marker_mesh(&center, 0.5, 8, 4);
        assert_eq!(mesh.vertex_count(), 5 * 9);
        assert_eq!(mesh.triangle_count(), 8 * 6);

        for chunk in mesh.positions.chunks_exact(3) {
            let d = Point3D::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64)
                .distance_to(&center);
            assert_relative_eq!(d, 0.5, epsilon = 1e-5);
        }
        for tri in 0..mesh.triangle_count() {
            assert!(face_normal(&mesh, tri).norm() > 1e-9);
        }
    }

    #[test]
    fn test_room_mesh_with_markers() {
        let room = RoomModel::from_corners([
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(2.0, 0.0, 0.0),
            Point3D::new(2.0, 0.0, 2.0),
        ]);
        let dims = WallDimensions::default();

        let walls_only = room_mesh(&room, &dims, false);
        assert_eq!(walls_only.vertex_count(), 48);

        let with_markers = room_mesh(&room, &dims, true);
        let marker = marker_mesh(
            &Point3D::ORIGIN,
            dims.marker_radius,
            MARKER_SEGMENTS,
            MARKER_RINGS,
        );
        assert_eq!(with_markers.vertex_count(), 48 + 3 * marker.vertex_count());
    }

    #[test]
    fn test_marker_divisions_are_clamped() {
        let mesh = marker_mesh(&Point3D::ORIGIN, 1.0, u32::MAX, u32::MAX);
        let row = MAX_MARKER_SEGMENTS as usize + 1;
        assert_eq!(mesh.vertex_count(), (MAX_MARKER_RINGS as usize + 1) * row);
        assert_eq!(
            mesh.triangle_count(),
            MAX_MARKER_SEGMENTS as usize * (2 * MAX_MARKER_RINGS as usize - 2)
        );

        let coarse = marker_mesh(&Point3D::ORIGIN, 1.0, 0, 0);
        assert_eq!(coarse.vertex_count(), 3 * 4);
        assert_eq!(coarse.triangle_count(), 3 * 2);
    }

    #[test]
    fn test_empty_room_mesh() {
        assert!(room_mesh(&RoomModel::new(), &WallDimensions::default(), true).is_empty());
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement transforms applied to meshes

use crate::mesh::Mesh;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Transform mesh vertices in place by a 4x4 placement matrix
///
/// Positions go through f64 before being written back; normals use the
/// inverse transpose of the linear part and are renormalized.
pub fn apply_transform(mesh: &mut Mesh, transform: &Matrix4<f64>) {
    if *transform == Matrix4::identity() {
        return;
    }

    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let p = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let t = transform.transform_point(&p);
        chunk[0] = t.x as f32;
        chunk[1] = t.y as f32;
        chunk[2] = t.z as f32;
    });

    let linear: Matrix3<f64> = transform.fixed_view::<3, 3>(0, 0).into_owned();
    let normal_matrix = linear
        .try_inverse()
        .map(|inv| inv.transpose())
        .unwrap_or(linear);

    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let n = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let t = normal_matrix * n;
        let t = t.try_normalize(1e-12).unwrap_or(t);
        chunk[0] = t.x as f32;
        chunk[1] = t.y as f32;
        chunk[2] = t.z as f32;
    });
}

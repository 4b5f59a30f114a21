// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RoomPlan Geometry
//!
//! Wall geometry for tap-to-corner room capture. Corners placed on a floor
//! plane are joined by straight walls; each wall is described by its length,
//! midpoint and the axis-angle rotation that aligns a box primitive (long side
//! on the reference axis `(0, 0, 1)`) between its two corners.
//!
//! # Usage
//!
//! ```rust
//! use roomplan_geometry::{RoomModel, Point3D, format_length};
//!
//! let mut room = RoomModel::new();
//! room.add_corner(Point3D::new(0.0, 0.0, 0.0));
//! let wall = room.add_corner(Point3D::new(2.0, 0.0, 0.0)).copied().unwrap();
//!
//! assert_eq!(wall.midpoint, Point3D::new(1.0, 0.0, 0.0));
//! assert_eq!(format_length(wall.length), "2.0");
//! ```

pub mod error;
pub mod export;
pub mod mesh;
pub mod room;
pub mod rotation;
pub mod segment;
pub mod transform;
pub mod types;
pub mod walls;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

pub use error::{Error, Result};
pub use export::{
    export_file_name, export_room_obj, list_saved_models, write_obj, MODEL_EXTENSION, MODEL_PREFIX,
};
pub use mesh::Mesh;
pub use room::{RoomModel, RoomSnapshot};
pub use rotation::{AxisAngle, EPSILON, REFERENCE_AXIS};
pub use segment::{
    build_segment, build_segments, distance, format_length, format_length_label, WallSegment,
};
pub use types::{Point3D, WallDimensions};
pub use walls::{box_mesh, marker_mesh, room_mesh, wall_mesh};

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room model export (Wavefront OBJ) and saved model listing

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::room::RoomModel;
use crate::types::WallDimensions;
use crate::walls::room_mesh;
use chrono::NaiveDateTime;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name prefix of exported room models
pub const MODEL_PREFIX: &str = "RoomModel";
/// Extension of exported room models
pub const MODEL_EXTENSION: &str = "obj";

/// `RoomModel_<yyyy-MM-dd_HH-mm-ss>.obj`
pub fn export_file_name(timestamp: &NaiveDateTime) -> String {
    format!(
        "{}_{}.{}",
        MODEL_PREFIX,
        timestamp.format("%Y-%m-%d_%H-%M-%S"),
        MODEL_EXTENSION
    )
}

/// Write a mesh as a single OBJ object
///
/// Coordinates are written as-is: the room frame is already Y-up like OBJ.
pub fn write_obj<W: Write>(writer: &mut W, mesh: &Mesh, name: &str) -> Result<()> {
    writeln!(writer, "# Generated by roomplan")?;
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    writeln!(writer, "o {}", name)?;

    for v in mesh.positions.chunks_exact(3) {
        writeln!(writer, "v {:.6} {:.6} {:.6}", v[0], v[1], v[2])?;
    }
    for n in mesh.normals.chunks_exact(3) {
        writeln!(writer, "vn {:.6} {:.6} {:.6}", n[0], n[1], n[2])?;
    }
    // OBJ indices are 1-based
    for t in mesh.indices.chunks_exact(3) {
        let (i0, i1, i2) = (t[0] + 1, t[1] + 1, t[2] + 1);
        writeln!(writer, "f {}//{} {}//{} {}//{}", i0, i0, i1, i1, i2, i2)?;
    }

    Ok(())
}

/// Export the room's walls (and optionally corner markers) into `dir`
///
/// The directory is created if needed. Returns the path of the written file.
pub fn export_room_obj(
    room: &RoomModel,
    dims: &WallDimensions,
    include_markers: bool,
    dir: &Path,
    timestamp: &NaiveDateTime,
) -> Result<PathBuf> {
    if room.segment_count() == 0 {
        return Err(Error::EmptyRoom);
    }

    let mesh = room_mesh(room, dims, include_markers);

    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(timestamp));
    let mut writer = BufWriter::new(fs::File::create(&path)?);
    write_obj(&mut writer, &mesh, MODEL_PREFIX)?;
    writer.flush()?;

    tracing::info!(
        path = %path.display(),
        walls = room.segment_count(),
        triangles = mesh.triangle_count(),
        "Exported room model"
    );

    Ok(path)
}

/// Files directly inside `dir` with the given extension (case-insensitive), sorted by name
///
/// A missing directory is not an error: it simply holds no models yet.
pub fn list_saved_models(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "Model directory does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut models = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let matches = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches {
            models.push(path);
        }
    }
    models.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    tracing::debug!(dir = %dir.display(), count = models.len(), "Listed saved models");
    Ok(models)
}

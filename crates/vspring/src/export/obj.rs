//! Wavefront OBJ export.
//!
//! Keeps the polygon structure of the mesh: side quads and cap polygons are
//! written as-is rather than triangulated.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::{SpringError, TubeMesh};

/// Write a mesh as OBJ text to the given writer.
pub fn write_obj<W: Write>(mesh: &TubeMesh, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "# vspring OBJ export")?;
    writeln!(
        writer,
        "# Vertices: {}, Faces: {}",
        mesh.num_vertices(),
        mesh.num_faces()
    )?;
    writeln!(writer, "o spring")?;

    for v in &mesh.vertices {
        writeln!(writer, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
    }

    // OBJ indices are 1-based
    for face in &mesh.faces {
        write!(writer, "f")?;
        for &i in &face.indices {
            write!(writer, " {}", i + 1)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Write a mesh to an OBJ file.
pub fn export_obj(mesh: &TubeMesh, path: impl AsRef<Path>) -> Result<(), SpringError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(mesh, &mut writer)?;
    writer.flush()?;
    log::info!("wrote OBJ to {}", path.display());
    Ok(())
}

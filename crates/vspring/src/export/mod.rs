//! Mesh file export.

pub mod obj;
pub mod stl;

use std::path::Path;

use crate::{SpringError, TubeMesh};

/// Write `mesh` to `path`, picking the format from the file extension
/// (`.stl` or `.obj`, case-insensitive).
pub fn write_mesh(mesh: &TubeMesh, path: impl AsRef<Path>) -> Result<(), SpringError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "stl" => stl::write_stl(mesh, path),
        "obj" => obj::export_obj(mesh, path),
        _ => Err(SpringError::UnsupportedFormat(ext)),
    }
}

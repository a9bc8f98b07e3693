//! Binary STL export.

use std::path::Path;

use crate::{SpringError, TubeMesh};

fn header() -> [u8; 80] {
    let mut header = [b' '; 80];
    let tag = b"vspring STL export";
    header[..tag.len()].copy_from_slice(tag);
    header
}

/// Encode a mesh as binary STL.
///
/// Faces are fan-triangulated; each triangle carries its own unit normal.
pub fn to_stl_bytes(mesh: &TubeMesh) -> Vec<u8> {
    let triangles = mesh.triangles();
    let mut data = Vec::with_capacity(84 + triangles.len() * 50);

    data.extend_from_slice(&header());
    data.extend_from_slice(&(triangles.len() as u32).to_le_bytes());

    for &tri in &triangles {
        let [v0, v1, v2] = tri.map(|i| {
            let p = mesh.vertices[i as usize];
            [p.x as f32, p.y as f32, p.z as f32]
        });

        let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
        let nx = e1[1] * e2[2] - e1[2] * e2[1];
        let ny = e1[2] * e2[0] - e1[0] * e2[2];
        let nz = e1[0] * e2[1] - e1[1] * e2[0];
        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        let normal = if len > 1e-10 {
            [nx / len, ny / len, nz / len]
        } else {
            [0.0, 0.0, 1.0]
        };

        for v in [normal, v0, v1, v2] {
            data.extend_from_slice(&v[0].to_le_bytes());
            data.extend_from_slice(&v[1].to_le_bytes());
            data.extend_from_slice(&v[2].to_le_bytes());
        }
        // Attribute byte count
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    data
}

/// Write a mesh to a binary STL file.
pub fn write_stl(mesh: &TubeMesh, path: impl AsRef<Path>) -> Result<(), SpringError> {
    let path = path.as_ref();
    std::fs::write(path, to_stl_bytes(mesh))?;
    log::info!("wrote STL to {}", path.display());
    Ok(())
}

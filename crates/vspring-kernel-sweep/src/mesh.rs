//! Polygon mesh produced by the sweep.

use std::collections::HashMap;

use vspring_kernel_math::{newell_normal, signed_tet_volume6, BoundingBox3, Point3, Vec3};

/// A planar polygon referencing mesh vertices, wound counter-clockwise when
/// seen from outside the solid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// Vertex indices in winding order.
    pub indices: Vec<u32>,
}

impl Face {
    /// Create a face from vertex indices.
    pub fn new(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the face has no vertices.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Flip the winding, and with it the normal.
    pub fn reverse(&mut self) {
        self.indices.reverse();
    }

    /// Directed boundary edges in winding order.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| (self.indices[i], self.indices[(i + 1) % n]))
    }

    /// Fan triangulation from the first vertex. Faces produced by the sweep
    /// are convex, so the fan is valid and keeps the winding.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let first = self.indices.first().copied().unwrap_or(0);
        (1..self.indices.len().saturating_sub(1))
            .map(move |i| [first, self.indices[i], self.indices[i + 1]])
    }
}

/// Tube surface: one ring of vertices per path point, quad side faces
/// between consecutive rings and polygon caps over the end rings.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeMesh {
    /// Vertex positions, ring after ring.
    pub vertices: Vec<Point3>,
    /// Side quads followed by cap polygons.
    pub faces: Vec<Face>,
    /// Vertices per ring.
    pub ring_size: usize,
    /// Number of rings (path points).
    pub ring_count: usize,
}

impl TubeMesh {
    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of polygon faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Vertices of ring `index`.
    pub fn ring(&self, index: usize) -> &[Point3] {
        let start = index * self.ring_size;
        &self.vertices[start..start + self.ring_size]
    }

    /// Positions of a face's vertices.
    pub fn face_points(&self, face: &Face) -> Vec<Point3> {
        face.indices
            .iter()
            .map(|&i| self.vertices[i as usize])
            .collect()
    }

    /// Unit outward normal of a face (Newell's method).
    pub fn face_normal(&self, face: &Face) -> Vec3 {
        let n = newell_normal(&self.face_points(face));
        n.try_normalize(1e-15).unwrap_or_else(Vec3::zeros)
    }

    /// Triangulate every face, preserving winding.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.faces.iter().flat_map(Face::triangles).collect()
    }

    /// Number of triangles [`TubeMesh::triangles`] yields.
    pub fn num_triangles(&self) -> usize {
        self.faces.iter().map(|f| f.len().saturating_sub(2)).sum()
    }

    /// Signed enclosed volume (divergence theorem).
    ///
    /// Positive for a closed mesh with outward winding. For a tube left open
    /// at one end the value is that of the surface closed by a fan at the
    /// origin, so only compare it for capped tubes.
    pub fn signed_volume(&self) -> f64 {
        let six_v: f64 = self
            .triangles()
            .iter()
            .map(|t| {
                signed_tet_volume6(
                    &self.vertices[t[0] as usize],
                    &self.vertices[t[1] as usize],
                    &self.vertices[t[2] as usize],
                )
            })
            .sum();
        six_v / 6.0
    }

    /// Total surface area.
    pub fn surface_area(&self) -> f64 {
        self.faces
            .iter()
            .map(|f| newell_normal(&self.face_points(f)).norm() / 2.0)
            .sum()
    }

    /// Axis-aligned bounding box, `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<BoundingBox3> {
        BoundingBox3::from_points(&self.vertices)
    }

    /// Undirected edges used by exactly one face, as `(min, max)` index pairs.
    pub fn boundary_edges(&self) -> Vec<(u32, u32)> {
        let mut uses: HashMap<(u32, u32), usize> = HashMap::new();
        for face in &self.faces {
            for (a, b) in face.edges() {
                *uses.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        let mut boundary: Vec<(u32, u32)> = uses
            .into_iter()
            .filter(|&(_, count)| count == 1)
            .map(|(edge, _)| edge)
            .collect();
        boundary.sort_unstable();
        boundary
    }

    /// Whether every edge is shared by at most two faces that traverse it in
    /// opposite directions (consistent orientation, no fins).
    pub fn is_consistently_oriented(&self) -> bool {
        let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
        for face in &self.faces {
            for edge in face.edges() {
                let count = directed.entry(edge).or_insert(0);
                *count += 1;
                if *count > 1 {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the surface is closed: no boundary edges and consistent
    /// orientation.
    pub fn is_closed(&self) -> bool {
        self.boundary_edges().is_empty() && self.is_consistently_oriented()
    }
}

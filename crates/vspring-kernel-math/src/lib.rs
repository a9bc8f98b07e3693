#![warn(missing_docs)]

//! Math types for the vspring kernel.
//!
//! Thin wrappers around nalgebra providing the point, vector and direction
//! types used by the helix and sweep code, plus tolerance helpers and a few
//! polygon utilities shared by the mesh builders.

use nalgebra::{Unit, Vector2, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in a 2D profile plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// Largest count a `f64` represents exactly (2^53).
pub const MAX_EXACT_COUNT: f64 = 9_007_199_254_740_992.0;

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Absolute tolerance used when checking that a real value is integral.
    pub integral: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 linear, 1e-9 integral).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        integral: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Round `value` to the nearest non-negative integer if it lies within
    /// the integral tolerance of one.
    ///
    /// Returns `None` for negative, non-finite or fractional values and for
    /// values above [`MAX_EXACT_COUNT`].
    pub fn as_count(&self, value: f64) -> Option<u64> {
        if !value.is_finite() || !(0.0..=MAX_EXACT_COUNT).contains(&value) {
            return None;
        }
        let rounded = value.round();
        if (value - rounded).abs() <= self.integral {
            Some(rounded as u64)
        } else {
            None
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl BoundingBox3 {
    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bbox = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bbox.extend(p);
        }
        Some(bbox)
    }

    /// Grow the box to contain `p`.
    pub fn extend(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Edge lengths along X, Y and Z.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Polygon normal by Newell's method.
///
/// The result follows the winding of `verts` (counter-clockwise vertices give
/// a normal pointing towards the viewer). The returned vector is not
/// normalized; its length is twice the polygon area.
pub fn newell_normal(verts: &[Point3]) -> Vec3 {
    let mut n = Vec3::zeros();
    for i in 0..verts.len() {
        let current = verts[i];
        let next = verts[(i + 1) % verts.len()];
        n.x += (current.y - next.y) * (current.z + next.z);
        n.y += (current.z - next.z) * (current.x + next.x);
        n.z += (current.x - next.x) * (current.y + next.y);
    }
    n
}

/// Signed volume of the tetrahedron `(origin, a, b, c)`, times six.
///
/// Summed over the triangles of a closed outward-wound mesh this gives six
/// times the enclosed volume.
pub fn signed_tet_volume6(a: &Point3, b: &Point3, c: &Point3) -> f64 {
    a.coords.dot(&b.coords.cross(&c.coords))
}

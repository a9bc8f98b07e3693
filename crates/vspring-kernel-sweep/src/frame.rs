//! Moving frames for orienting the cross-section along a polyline path.

use vspring_kernel_math::{Dir3, Point2, Point3, Vec3};

use crate::SweepError;

/// An orthonormal frame at a point on the path.
///
/// - **Tangent**: the local sweep direction
/// - **Normal**: first in-plane axis of the cross-section
/// - **Binormal**: tangent × normal
///
/// `(normal, binormal, tangent)` is right-handed, so a profile that is
/// counter-clockwise in `(x, y)` profile coordinates winds counter-clockwise
/// about the tangent.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepFrame {
    /// Position on the path.
    pub position: Point3,
    /// Unit tangent (along the path).
    pub tangent: Dir3,
    /// Unit normal (profile X axis).
    pub normal: Dir3,
    /// Unit binormal (profile Y axis).
    pub binormal: Dir3,
}

impl SweepFrame {
    /// Create a frame with an arbitrary but deterministic normal direction.
    pub fn with_arbitrary_normal(position: Point3, tangent: Dir3) -> Self {
        // Choose an arbitrary vector not parallel to tangent
        let arbitrary = if tangent.x.abs() < 0.9 {
            Vec3::x()
        } else {
            Vec3::y()
        };

        let normal = Dir3::new_normalize(arbitrary.cross(tangent.as_ref()));
        let binormal = Dir3::new_normalize(tangent.as_ref().cross(normal.as_ref()));

        Self {
            position,
            tangent,
            normal,
            binormal,
        }
    }

    /// Map a 2D profile point into world coordinates.
    ///
    /// Profile X maps to the normal, profile Y to the binormal.
    pub fn transform_point(&self, p: Point2) -> Point3 {
        self.position + p.x * self.normal.as_ref() + p.y * self.binormal.as_ref()
    }

    /// Express a world point in profile coordinates, dropping the tangent
    /// component.
    pub fn to_local(&self, p: &Point3) -> Point2 {
        let d = p - self.position;
        Point2::new(d.dot(self.normal.as_ref()), d.dot(self.binormal.as_ref()))
    }
}

/// Direction from the first path point towards the second.
pub fn initial_tangent(points: &[Point3]) -> Result<Dir3, SweepError> {
    if points.len() < 2 {
        return Err(SweepError::InsufficientPathLength(points.len()));
    }
    Dir3::try_new(points[1] - points[0], 1e-12).ok_or_else(|| {
        SweepError::invalid("path", "first two points coincide, no sweep direction")
    })
}

/// Unit tangent at every path point.
///
/// The endpoints use their adjacent edge direction; interior points use the
/// bisector of the incoming and outgoing edges so each ring sits in the
/// mitre plane of its corner. Zero-length edges inherit the previous edge's
/// direction.
pub fn path_tangents(points: &[Point3]) -> Result<Vec<Dir3>, SweepError> {
    let first = initial_tangent(points)?;

    let mut edges: Vec<Dir3> = Vec::with_capacity(points.len() - 1);
    for w in points.windows(2) {
        let dir = Dir3::try_new(w[1] - w[0], 1e-12)
            .unwrap_or_else(|| *edges.last().unwrap_or(&first));
        edges.push(dir);
    }

    let mut tangents = Vec::with_capacity(points.len());
    tangents.push(edges[0]);
    for w in edges.windows(2) {
        let bisector = w[0].as_ref() + w[1].as_ref();
        // A full reversal has no bisector; keep the incoming direction
        tangents.push(Dir3::try_new(bisector, 1e-12).unwrap_or(w[0]));
    }
    tangents.push(edges[edges.len() - 1]);

    Ok(tangents)
}

/// Compute rotation-minimizing frames at every path point.
///
/// The first frame uses [`SweepFrame::with_arbitrary_normal`]; the rest are
/// propagated with the double reflection method, so the profile does not
/// spin about the path as it follows the helix.
pub fn rotation_minimizing_frames(points: &[Point3]) -> Result<Vec<SweepFrame>, SweepError> {
    let tangents = path_tangents(points)?;

    let mut frames = Vec::with_capacity(points.len());
    frames.push(SweepFrame::with_arbitrary_normal(points[0], tangents[0]));

    for i in 1..points.len() {
        let prev = &frames[i - 1];
        let xi = points[i];
        let ti = tangents[i];

        // Vector from previous to current position
        let v1 = xi - prev.position;
        let c1 = v1.dot(&v1);

        if c1 < 1e-24 {
            // Coincident points - copy previous frame
            frames.push(SweepFrame {
                position: xi,
                ..prev.clone()
            });
            continue;
        }

        // Reflect previous tangent and normal across the bisecting plane
        let ri_l = prev.normal.as_ref() - (2.0 / c1) * v1.dot(prev.normal.as_ref()) * v1;
        let ti_l = prev.tangent.as_ref() - (2.0 / c1) * v1.dot(prev.tangent.as_ref()) * v1;

        // Second reflection to align with the actual tangent
        let v2 = ti.as_ref() - ti_l;
        let c2 = v2.dot(&v2);

        let ri = if c2 < 1e-24 {
            ri_l
        } else {
            ri_l - (2.0 / c2) * v2.dot(&ri_l) * v2
        };

        // Remove drift so the frame stays orthonormal over long paths
        let ri = ri - ri.dot(ti.as_ref()) * ti.as_ref();
        let normal = Dir3::new_normalize(ri);
        let binormal = Dir3::new_normalize(ti.as_ref().cross(normal.as_ref()));

        frames.push(SweepFrame {
            position: xi,
            tangent: ti,
            normal,
            binormal,
        });
    }

    Ok(frames)
}

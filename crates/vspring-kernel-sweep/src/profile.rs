//! Planar cross-section profiles.

use std::f64::consts::TAU;

use vspring_kernel_math::{newell_normal, Dir3, Point2, Point3};

use crate::frame::SweepFrame;
use crate::{require_positive, SweepError};

/// Circle resolution used when the caller does not pick one.
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 24;

/// A closed planar polygon placed in 3D, ready to be swept.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    /// Centre of the polygon; the path starts here.
    pub center: Point3,
    /// Unit normal of the polygon plane (the initial sweep direction).
    pub normal: Dir3,
    /// Polygon vertices in order, counter-clockwise about `normal`.
    pub points: Vec<Point3>,
}

impl CrossSection {
    /// Regular polygon approximating a circle of `radius` around `center`,
    /// lying in the plane perpendicular to `normal`.
    ///
    /// The first vertex sits on the normal axis of
    /// [`SweepFrame::with_arbitrary_normal`] for the same direction, which is
    /// the frame the sweep starts from.
    pub fn circle(
        center: Point3,
        normal: Dir3,
        radius: f64,
        segments: u32,
    ) -> Result<Self, SweepError> {
        require_positive("wire_radius", radius)?;
        if segments < 3 {
            return Err(SweepError::invalid(
                "circle_segments",
                format!("{segments} cannot form a polygon, at least 3 are required"),
            ));
        }

        let frame = SweepFrame::with_arbitrary_normal(center, normal);
        let n = segments as usize;
        let points = (0..n)
            .map(|i| {
                let theta = TAU * i as f64 / n as f64;
                frame.transform_point(Point2::new(radius * theta.cos(), radius * theta.sin()))
            })
            .collect();

        Ok(Self {
            center,
            normal,
            points,
        })
    }

    /// Number of polygon vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the profile has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the vertex order winds counter-clockwise about `normal`.
    pub fn is_counter_clockwise(&self) -> bool {
        newell_normal(&self.points).dot(self.normal.as_ref()) > 0.0
    }
}

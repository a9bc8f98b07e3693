//! Helix centerline sampling.

use std::f64::consts::TAU;

use vspring_kernel_math::{Dir3, Point3, Tolerance};

use crate::frame::initial_tangent;
use crate::{require_positive, SweepError};

/// A helix around the Z axis, starting on the +X axis at `z = 0`.
///
/// Sampled as:
/// ```text
/// angle(i) = 2π * (i mod segments_per_turn) / segments_per_turn
/// x(i)     = radius * cos(angle(i))
/// y(i)     = radius * sin(angle(i))
/// z(i)     = height * i / (segments_per_turn * turns)
/// ```
/// for `i` in `0..=segments_per_turn * turns`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helix {
    /// Number of full rotations. May be fractional as long as
    /// `segments_per_turn * turns` is a whole number.
    pub turns: f64,
    /// Rise from the first to the last point along Z.
    pub height: f64,
    /// Distance of the centerline from the Z axis.
    pub radius: f64,
    /// Straight segments per full rotation.
    pub segments_per_turn: u32,
}

impl Helix {
    /// Create a new helix description.
    pub fn new(turns: f64, height: f64, radius: f64, segments_per_turn: u32) -> Self {
        Self {
            turns,
            height,
            radius,
            segments_per_turn,
        }
    }

    /// Validate the parameters without sampling.
    pub fn validate(&self) -> Result<(), SweepError> {
        require_positive("turns", self.turns)?;
        require_positive("height", self.height)?;
        require_positive("spring_radius", self.radius)?;
        if self.segments_per_turn == 0 {
            return Err(SweepError::invalid("segments_per_turn", "must be at least 1"));
        }
        Ok(())
    }

    /// Number of straight segments along the whole helix.
    ///
    /// Fails when `segments_per_turn * turns` is not a whole number; the
    /// sampler never truncates.
    pub fn segment_count(&self) -> Result<usize, SweepError> {
        self.validate()?;
        let product = f64::from(self.segments_per_turn) * self.turns;
        let count = Tolerance::DEFAULT.as_count(product).ok_or_else(|| {
            SweepError::invalid(
                "turns",
                format!(
                    "segments_per_turn * turns = {product} is not a representable whole number of segments"
                ),
            )
        })?;
        usize::try_from(count).map_err(|_| {
            SweepError::invalid("turns", format!("{count} segments do not fit in memory"))
        })
    }

    /// Number of points [`Helix::path`] will produce.
    pub fn point_count(&self) -> Result<usize, SweepError> {
        self.segment_count()?
            .checked_add(1)
            .ok_or_else(|| SweepError::invalid("turns", "too many segments"))
    }

    /// Sample the centerline, both endpoints included.
    pub fn path(&self) -> Result<HelixPath, SweepError> {
        let segments = self.segment_count()?;
        if segments == 0 {
            return Err(SweepError::InsufficientPathLength(1));
        }

        let spt = self.segments_per_turn as usize;
        let points: Vec<Point3> = (0..=segments)
            .map(|i| {
                let af = (i % spt) as f64 / spt as f64;
                let angle = af * TAU;
                let z = self.height * (i as f64 / segments as f64);
                Point3::new(self.radius * angle.cos(), self.radius * angle.sin(), z)
            })
            .collect();

        log::debug!(
            "helix: {} turns, {} segments/turn -> {} points",
            self.turns,
            self.segments_per_turn,
            points.len()
        );

        Ok(HelixPath { points })
    }
}

/// Ordered centerline points produced by [`Helix::path`].
#[derive(Debug, Clone, PartialEq)]
pub struct HelixPath {
    points: Vec<Point3>,
}

impl HelixPath {
    /// The sampled points in traversal order.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no points. Never true for a sampled helix.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Direction from the first point towards the second.
    ///
    /// This is the direction the cross-section is built perpendicular to.
    pub fn initial_tangent(&self) -> Result<Dir3, SweepError> {
        initial_tangent(&self.points)
    }

    /// Take ownership of the points.
    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }
}

impl AsRef<[Point3]> for HelixPath {
    fn as_ref(&self) -> &[Point3] {
        &self.points
    }
}

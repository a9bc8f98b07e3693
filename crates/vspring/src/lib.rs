#![warn(missing_docs)]

//! vspring — parametric helical springs.
//!
//! Builds a round wire swept along a helix from six numbers and hands the
//! resulting [`TubeMesh`] back to the caller, with STL and OBJ export.
//!
//! # Example
//!
//! ```rust,no_run
//! use vspring::{generate_spring, SpringParams};
//!
//! let params = SpringParams {
//!     turns: 5.0,
//!     height: 30.0,
//!     spring_radius: 8.0,
//!     wire_radius: 1.0,
//!     ..SpringParams::default()
//! };
//! let mesh = generate_spring(&params).unwrap();
//! vspring::export::stl::write_stl(&mesh, "spring.stl").unwrap();
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod export;

pub use config::SpringConfig;
pub use vspring_kernel_math::{BoundingBox3, Point3, Vec3};
pub use vspring_kernel_sweep::{
    CancelToken, CrossSection, Face, Helix, HelixPath, SweepError, SweepOptions, TubeMesh,
    DEFAULT_CIRCLE_SEGMENTS,
};

use vspring_kernel_sweep::sweep_profile;

/// Errors returned by spring generation and export.
#[derive(Error, Debug)]
pub enum SpringError {
    /// Invalid parameters, degenerate path or cancellation.
    #[error(transparent)]
    Sweep(#[from] SweepError),

    /// The request would exceed the configured vertex budget.
    #[error("spring needs {vertices} vertices, limit is {limit}")]
    TooComplex {
        /// Vertices the request would produce.
        vertices: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// Output file extension is not a known mesh format.
    #[error("unsupported output format: {0:?}")]
    UnsupportedFormat(String),

    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

fn default_circle_segments() -> u32 {
    DEFAULT_CIRCLE_SEGMENTS
}

/// The six numbers describing a spring.
///
/// Lengths share whatever unit the caller works in. [`Default`] gives a one
/// turn spring twelve units tall and twelve units in radius with a one unit
/// wire (a foot-sized spring of inch wire when working in inches).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpringParams {
    /// Number of full rotations.
    pub turns: f64,
    /// Centerline rise from tip to tip, excluding the wire thickness.
    pub height: f64,
    /// Distance of the wire centerline from the spring axis.
    pub spring_radius: f64,
    /// Radius of the wire.
    pub wire_radius: f64,
    /// Straight segments per turn of the centerline.
    pub segments_per_turn: u32,
    /// Polygon sides around the wire. Defaults to 24 when omitted.
    #[serde(default = "default_circle_segments")]
    pub circle_segments: u32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            turns: 1.0,
            height: 12.0,
            spring_radius: 12.0,
            wire_radius: 1.0,
            segments_per_turn: 24,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }
}

impl SpringParams {
    /// The centerline described by these parameters.
    pub fn helix(&self) -> Helix {
        Helix::new(
            self.turns,
            self.height,
            self.spring_radius,
            self.segments_per_turn,
        )
    }

    /// Validate every parameter without building anything.
    pub fn validate(&self) -> Result<(), SweepError> {
        self.helix().segment_count()?;
        if !self.wire_radius.is_finite() || self.wire_radius <= 0.0 {
            return Err(SweepError::InvalidParameter {
                name: "wire_radius",
                reason: format!("{} must be a finite value > 0", self.wire_radius),
            });
        }
        if self.circle_segments < 3 {
            return Err(SweepError::InvalidParameter {
                name: "circle_segments",
                reason: format!(
                    "{} cannot form a polygon, at least 3 are required",
                    self.circle_segments
                ),
            });
        }
        Ok(())
    }

    /// Number of mesh vertices the spring will have.
    pub fn vertex_count(&self) -> Result<usize, SweepError> {
        let points = self.helix().point_count()?;
        Ok(points.saturating_mul(self.circle_segments as usize))
    }
}

/// Resource bounds applied before any geometry is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum number of mesh vertices.
    pub max_vertices: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_vertices: 5_000_000,
        }
    }
}

impl Limits {
    /// Fail with [`SpringError::TooComplex`] when `vertices` exceeds the budget.
    pub fn check(&self, vertices: usize) -> Result<(), SpringError> {
        if vertices > self.max_vertices {
            return Err(SpringError::TooComplex {
                vertices,
                limit: self.max_vertices,
            });
        }
        Ok(())
    }
}

/// Everything one spring generation needs.
#[derive(Debug, Clone, Default)]
pub struct SpringRequest {
    /// Spring shape.
    pub params: SpringParams,
    /// Resource bounds.
    pub limits: Limits,
    /// Close the trailing end of the wire as well as the start.
    pub cap_end: bool,
    /// Cooperative cancellation, checked between sweep rings.
    pub cancel: Option<CancelToken>,
}

impl SpringRequest {
    /// Request with default limits and an open trailing end.
    pub fn new(params: SpringParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Replace the resource bounds.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Cap the trailing end too.
    pub fn with_end_cap(mut self, cap_end: bool) -> Self {
        self.cap_end = cap_end;
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Generate a spring with default limits and an open trailing end.
pub fn generate_spring(params: &SpringParams) -> Result<TubeMesh, SpringError> {
    generate_spring_with(&SpringRequest::new(params.clone()))
}

/// Generate a spring mesh.
///
/// Validates the parameters, checks the vertex budget, samples the helix,
/// builds the wire cross-section at its first point and sweeps it along the
/// whole path. No partial mesh is returned on failure.
pub fn generate_spring_with(request: &SpringRequest) -> Result<TubeMesh, SpringError> {
    let params = &request.params;
    params.validate()?;

    request.limits.check(params.vertex_count()?)?;

    let path = params.helix().path()?;
    let direction = path.initial_tangent()?;
    let section = CrossSection::circle(
        path.points()[0],
        direction,
        params.wire_radius,
        params.circle_segments,
    )?;

    let options = SweepOptions {
        cap_end: request.cap_end,
        cancel: request.cancel.clone(),
    };
    let mesh = sweep_profile(path.points(), &section, &options)?;

    log::info!(
        "generated spring: {} vertices, {} faces",
        mesh.num_vertices(),
        mesh.num_faces()
    );
    Ok(mesh)
}

/// Sample only the wire centerline.
///
/// The path point count is held to the same vertex budget as a mesh.
pub fn generate_path(request: &SpringRequest) -> Result<HelixPath, SpringError> {
    let helix = request.params.helix();
    request.limits.check(helix.point_count()?)?;
    Ok(helix.path()?)
}

/// Summary of a generated mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshStats {
    /// Vertex count.
    pub vertices: usize,
    /// Polygon face count.
    pub faces: usize,
    /// Triangle count after fan triangulation.
    pub triangles: usize,
    /// Number of cross-section rings.
    pub rings: usize,
    /// Vertices per ring.
    pub ring_size: usize,
    /// Whether the surface is watertight.
    pub closed: bool,
    /// Enclosed volume, only reported for closed meshes.
    pub volume: Option<f64>,
    /// Total surface area.
    pub surface_area: f64,
    /// Bounding box min corner.
    pub bounds_min: [f64; 3],
    /// Bounding box max corner.
    pub bounds_max: [f64; 3],
}

impl MeshStats {
    /// Measure a mesh.
    pub fn from_mesh(mesh: &TubeMesh) -> Self {
        let closed = mesh.is_closed();
        let (bounds_min, bounds_max) = mesh
            .bounding_box()
            .map(|b| ([b.min.x, b.min.y, b.min.z], [b.max.x, b.max.y, b.max.z]))
            .unwrap_or(([0.0; 3], [0.0; 3]));
        Self {
            vertices: mesh.num_vertices(),
            faces: mesh.num_faces(),
            triangles: mesh.num_triangles(),
            rings: mesh.ring_count,
            ring_size: mesh.ring_size,
            closed,
            volume: closed.then(|| mesh.signed_volume()),
            surface_area: mesh.surface_area(),
            bounds_min,
            bounds_max,
        }
    }
}

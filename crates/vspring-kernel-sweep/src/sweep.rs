//! Sweep operation: carry a cross-section along a path to build a tube.

use vspring_kernel_math::{Point2, Point3, Tolerance};

use crate::cancel::CancelToken;
use crate::frame::{initial_tangent, rotation_minimizing_frames};
use crate::mesh::{Face, TubeMesh};
use crate::profile::CrossSection;
use crate::SweepError;

/// Options for the sweep operation.
#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Close the trailing end with a cap polygon. Default: `false`, the tube
    /// is open at the end of the path.
    pub cap_end: bool,
    /// Checked before every ring; when set the sweep stops with
    /// [`SweepError::Cancelled`].
    pub cancel: Option<CancelToken>,
}

impl SweepOptions {
    /// Options that also cap the trailing end.
    pub fn capped() -> Self {
        Self {
            cap_end: true,
            ..Default::default()
        }
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn check_cancelled(&self) -> Result<(), SweepError> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(SweepError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Sweep a circular wire of `wire_radius` along `path`.
///
/// The circle is centred on `path[0]` and perpendicular to the direction
/// from `path[0]` to `path[1]`.
///
/// # Errors
///
/// * [`SweepError::InsufficientPathLength`] if `path` has fewer than 2 points
/// * [`SweepError::InvalidParameter`] if `wire_radius <= 0`, if
///   `circle_segments < 3` or if the first two points coincide
/// * [`SweepError::Cancelled`] if the options' token fires
pub fn sweep_tube(
    path: &[Point3],
    wire_radius: f64,
    circle_segments: u32,
    options: &SweepOptions,
) -> Result<TubeMesh, SweepError> {
    let direction = initial_tangent(path)?;
    let section = CrossSection::circle(path[0], direction, wire_radius, circle_segments)?;
    sweep_profile(path, &section, options)
}

/// Sweep a planar cross-section along `path`.
///
/// The section must be centred on `path[0]` and lie in the plane
/// perpendicular to the first path edge. The returned mesh has one ring of
/// `section.len()` vertices per path point, `section.len()` quads between
/// each pair of consecutive rings, a start cap whose normal points back
/// along the path and, if requested, an end cap.
pub fn sweep_profile(
    path: &[Point3],
    section: &CrossSection,
    options: &SweepOptions,
) -> Result<TubeMesh, SweepError> {
    if path.len() < 2 {
        return Err(SweepError::InsufficientPathLength(path.len()));
    }
    if section.len() < 3 {
        return Err(SweepError::invalid(
            "circle_segments",
            format!("{} cannot form a polygon, at least 3 are required", section.len()),
        ));
    }

    let frames = rotation_minimizing_frames(path)?;
    let start = &frames[0];

    let tol = Tolerance::DEFAULT;
    let scale = section
        .points
        .iter()
        .map(|p| (p - section.center).norm())
        .fold(1.0, f64::max);
    if (section.center - start.position).norm() > tol.linear * scale {
        return Err(SweepError::invalid(
            "cross_section",
            "not centred on the first path point",
        ));
    }
    if section.normal.dot(start.tangent.as_ref()).abs() < 1.0 - 1e-9 {
        return Err(SweepError::invalid(
            "cross_section",
            "not perpendicular to the first path edge",
        ));
    }

    // Profile in the start frame's coordinates, wound counter-clockwise about
    // the tangent so the side quads face outward.
    let mut profile: Vec<Point2> = section.points.iter().map(|p| start.to_local(p)).collect();
    if signed_area(&profile) < 0.0 {
        log::debug!("sweep: cross-section winds clockwise about the path, reordering");
        profile.reverse();
    }

    let ring_size = profile.len();
    let ring_count = path.len();
    log::debug!(
        "sweep: {} rings x {} vertices, cap_end = {}",
        ring_count,
        ring_size,
        options.cap_end
    );

    let mut vertices = Vec::with_capacity(ring_count * ring_size);
    for (ring_idx, frame) in frames.iter().enumerate() {
        if let Err(err) = options.check_cancelled() {
            log::warn!("sweep: cancelled after {ring_idx} of {ring_count} rings");
            return Err(err);
        }
        log::trace!("sweep: ring {ring_idx} at {:?}", frame.position);
        vertices.extend(profile.iter().map(|p| frame.transform_point(*p)));
    }

    let index = |ring: usize, k: usize| (ring * ring_size + k % ring_size) as u32;

    let n_caps = 1 + usize::from(options.cap_end);
    let mut faces = Vec::with_capacity((ring_count - 1) * ring_size + n_caps);

    // Lateral quads (winding for outward normal):
    // (this ring, k) -> (this ring, k+1) -> (next ring, k+1) -> (next ring, k)
    for ring in 0..ring_count - 1 {
        for k in 0..ring_size {
            faces.push(Face::new(vec![
                index(ring, k),
                index(ring, k + 1),
                index(ring + 1, k + 1),
                index(ring + 1, k),
            ]));
        }
    }

    let mut mesh = TubeMesh {
        vertices,
        faces,
        ring_size,
        ring_count,
    };

    // Base cap over the first ring. Built in ring order its normal follows
    // the sweep direction; it must face backward.
    let mut base = Face::new((0..ring_size).map(|k| index(0, k)).collect());
    if mesh.face_normal(&base).dot(start.tangent.as_ref()) > 0.0 {
        base.reverse();
    }
    mesh.faces.push(base);

    if options.cap_end {
        let last = ring_count - 1;
        let end_tangent = frames[last].tangent;
        let mut end = Face::new((0..ring_size).map(|k| index(last, k)).collect());
        if mesh.face_normal(&end).dot(end_tangent.as_ref()) < 0.0 {
            end.reverse();
        }
        mesh.faces.push(end);
    }

    Ok(mesh)
}

/// Shoelace area of a 2D polygon; positive when counter-clockwise.
fn signed_area(poly: &[Point2]) -> f64 {
    let n = poly.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = poly[i];
            let b = poly[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Helix;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use vspring_kernel_math::{Dir3, Vec3};

    fn straight_path(length: f64, samples: usize) -> Vec<Point3> {
        (0..samples)
            .map(|i| Point3::new(0.0, 0.0, length * i as f64 / (samples - 1) as f64))
            .collect()
    }

    fn reference_path() -> Vec<Point3> {
        Helix::new(1.0, 12.0, 12.0, 24).path().unwrap().into_points()
    }

    #[test]
    fn test_reference_spring_vertex_count() {
        let path = reference_path();
        let tube = sweep_tube(&path, 1.0, 24, &SweepOptions::default()).unwrap();
        assert_eq!(tube.num_vertices(), 24 * path.len());
        assert_eq!(tube.ring_count, 25);
        assert_eq!(tube.ring_size, 24);
        // 24 quads per segment plus the base cap
        assert_eq!(tube.num_faces(), 24 * 24 + 1);
    }

    #[test]
    fn test_first_ring_is_the_cross_section() {
        let path = reference_path();
        let tube = sweep_tube(&path, 1.0, 24, &SweepOptions::default()).unwrap();
        let center = Point3::new(12.0, 0.0, 0.0);
        let t0 = initial_tangent(&path).unwrap();
        let section = CrossSection::circle(center, t0, 1.0, 24).unwrap();
        for (v, p) in tube.ring(0).iter().zip(&section.points) {
            assert_relative_eq!(*v, *p, epsilon = 1e-12);
            assert_relative_eq!((v - center).norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_every_ring_is_a_perpendicular_circle() {
        let path = Helix::new(3.0, 15.0, 5.0, 12).path().unwrap();
        let tube = sweep_tube(path.points(), 0.5, 16, &SweepOptions::default()).unwrap();
        let frames = rotation_minimizing_frames(path.points()).unwrap();
        for (i, frame) in frames.iter().enumerate() {
            for v in tube.ring(i) {
                let d = v - frame.position;
                assert_relative_eq!(d.norm(), 0.5, epsilon = 1e-9);
                assert!(d.dot(frame.tangent.as_ref()).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_open_tube_is_closed_except_trailing_ring() {
        let path = reference_path();
        let tube = sweep_tube(&path, 1.0, 24, &SweepOptions::default()).unwrap();
        assert!(tube.is_consistently_oriented());

        let boundary = tube.boundary_edges();
        assert_eq!(boundary.len(), 24);
        let last_ring = (24 * 24) as u32..(25 * 24) as u32;
        for (a, b) in boundary {
            assert!(last_ring.contains(&a) && last_ring.contains(&b));
        }
    }

    #[test]
    fn test_capped_tube_is_closed() {
        let path = reference_path();
        let tube = sweep_tube(&path, 1.0, 24, &SweepOptions::capped()).unwrap();
        assert!(tube.is_closed());
        assert_eq!(tube.num_vertices(), 24 * 25);
        assert_eq!(tube.num_faces(), 24 * 24 + 2);
    }

    #[test]
    fn test_base_cap_faces_backward() {
        let path = reference_path();
        let tube = sweep_tube(&path, 1.0, 24, &SweepOptions::default()).unwrap();
        let base = tube.faces.last().unwrap();
        assert_eq!(base.len(), 24);
        let n = tube.face_normal(base);
        let t0 = initial_tangent(&path).unwrap();
        assert_relative_eq!(n.dot(t0.as_ref()), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_side_faces_point_outward() {
        let path = Helix::new(2.0, 8.0, 6.0, 24).path().unwrap();
        let tube = sweep_tube(path.points(), 1.0, 12, &SweepOptions::default()).unwrap();
        let frames = rotation_minimizing_frames(path.points()).unwrap();
        let quads = (tube.ring_count - 1) * tube.ring_size;
        for (i, face) in tube.faces[..quads].iter().enumerate() {
            let ring = i / tube.ring_size;
            let pts = tube.face_points(face);
            let centroid = Point3::from(pts.iter().map(|p| p.coords).sum::<Vec3>() / 4.0);
            let axis_mid = Point3::from(
                (frames[ring].position.coords + frames[ring + 1].position.coords) / 2.0,
            );
            let outward = centroid - axis_mid;
            assert!(tube.face_normal(face).dot(&outward) > 0.0, "face {i} points inward");
        }
    }

    #[test]
    fn test_straight_capped_volume() {
        let n = 64;
        let tube = sweep_tube(&straight_path(10.0, 5), 1.0, n, &SweepOptions::capped()).unwrap();
        // Regular n-gon area times length
        let area = 0.5 * n as f64 * (2.0 * PI / n as f64).sin();
        assert_relative_eq!(tube.signed_volume(), area * 10.0, epsilon = 1e-9);
        assert!(tube.is_closed());
    }

    #[test]
    fn test_helix_capped_volume_close_to_ideal() {
        // Tube volume ≈ cross-section area × centerline length
        let path = Helix::new(2.0, 10.0, 8.0, 96).path().unwrap();
        let tube = sweep_tube(path.points(), 0.5, 48, &SweepOptions::capped()).unwrap();
        let length: f64 = path.points().windows(2).map(|w| (w[1] - w[0]).norm()).sum();
        let ideal = PI * 0.25 * length;
        let vol = tube.signed_volume();
        assert!(vol > 0.0);
        assert!((vol - ideal).abs() / ideal < 0.02, "volume {vol}, expected ~{ideal}");
    }

    #[test]
    fn test_clockwise_section_is_reordered() {
        let path = straight_path(4.0, 3);
        let t0 = initial_tangent(&path).unwrap();
        let mut section = CrossSection::circle(path[0], t0, 1.0, 8).unwrap();
        section.points.reverse();
        assert!(!section.is_counter_clockwise());

        let tube = sweep_profile(&path, &section, &SweepOptions::capped()).unwrap();
        assert!(tube.is_closed());
        assert!(tube.signed_volume() > 0.0);
    }

    #[test]
    fn test_opposite_section_normal_is_accepted() {
        let path = straight_path(4.0, 3);
        let flipped = Dir3::new_normalize(-Vec3::z());
        let section = CrossSection::circle(path[0], flipped, 1.0, 8).unwrap();
        let tube = sweep_profile(&path, &section, &SweepOptions::capped()).unwrap();
        assert!(tube.signed_volume() > 0.0);
    }

    #[test]
    fn test_misplaced_section_is_rejected() {
        let path = straight_path(4.0, 3);
        let off_center =
            CrossSection::circle(Point3::new(1.0, 0.0, 0.0), Dir3::new_normalize(Vec3::z()), 1.0, 8)
                .unwrap();
        assert!(matches!(
            sweep_profile(&path, &off_center, &SweepOptions::default()),
            Err(SweepError::InvalidParameter { name: "cross_section", .. })
        ));

        let tilted = CrossSection::circle(
            Point3::origin(),
            Dir3::new_normalize(Vec3::new(1.0, 0.0, 1.0)),
            1.0,
            8,
        )
        .unwrap();
        assert!(matches!(
            sweep_profile(&path, &tilted, &SweepOptions::default()),
            Err(SweepError::InvalidParameter { name: "cross_section", .. })
        ));
    }

    #[test]
    fn test_degenerate_inputs() {
        let path = reference_path();
        assert!(matches!(
            sweep_tube(&path, 0.0, 24, &SweepOptions::default()),
            Err(SweepError::InvalidParameter { name: "wire_radius", .. })
        ));
        assert!(matches!(
            sweep_tube(&path, 1.0, 2, &SweepOptions::default()),
            Err(SweepError::InvalidParameter { name: "circle_segments", .. })
        ));
        assert_eq!(
            sweep_tube(&path[..1], 1.0, 24, &SweepOptions::default()),
            Err(SweepError::InsufficientPathLength(1))
        );
        assert!(matches!(
            sweep_tube(&[Point3::origin(), Point3::origin()], 1.0, 24, &SweepOptions::default()),
            Err(SweepError::InvalidParameter { name: "path", .. })
        ));
    }

    #[test]
    fn test_cancelled_sweep_returns_no_mesh() {
        let token = CancelToken::new();
        token.cancel();
        let options = SweepOptions::default().with_cancel(token);
        assert_eq!(
            sweep_tube(&reference_path(), 1.0, 24, &options),
            Err(SweepError::Cancelled)
        );
    }

    #[test]
    fn test_inputs_not_mutated_and_deterministic() {
        let path = reference_path();
        let copy = path.clone();
        let a = sweep_tube(&path, 1.0, 24, &SweepOptions::default()).unwrap();
        let b = sweep_tube(&path, 1.0, 24, &SweepOptions::default()).unwrap();
        assert_eq!(path, copy);
        assert_eq!(a, b);
    }
}

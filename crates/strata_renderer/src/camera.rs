//! Pinhole camera with a look-at basis.

use glam::DVec3;
use strata_math::{Ray, Vec3, Vec3Ext};

/// Basis vectors are unit length and pairwise orthogonal to within this.
pub(crate) const ORTHONORMAL_TOLERANCE: f64 = 1e-7;

/// Below this squared length the forward/up cross product is considered
/// degenerate (camera looking straight up or down).
const PARALLEL_EPSILON: f64 = 1e-12;

/// Camera for generating one ray per pixel.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position; every primary ray starts here
    pub position: Vec3,
    /// Field of view across the image width, in radians
    pub fov: f32,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,

    // Orthonormal basis, recomputed by look_at()
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Create a camera at the origin looking down +Z, 640x480, 120° fov.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            fov: 120.0_f32.to_radians(),
            width: 640,
            height: 480,
            forward: Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set field of view (radians).
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Set camera position. The basis is kept; call `look_at` afterwards.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Point the camera at `target`.
    ///
    /// forward = normalize(target - position), right = forward × world up,
    /// up = right × forward, all computed in f64. When forward is parallel to
    /// world up, world -Z stands in as the reference so the basis stays
    /// defined. A target equal to the position leaves the basis untouched.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = (target - self.position).as_dvec3();
        if forward.length_squared() == 0.0 {
            log::warn!("look_at target equals camera position {:?}; basis unchanged", self.position);
            return;
        }
        let forward = forward.normalize();

        let mut right = forward.cross(DVec3::Y);
        if right.length_squared() < PARALLEL_EPSILON {
            log::debug!("Camera looking along world up; using -Z as reference");
            right = forward.cross(DVec3::NEG_Z);
        }
        let right = right.normalize();
        let up = right.cross(forward).normalize();

        self.forward = forward.as_vec3();
        self.right = right.as_vec3();
        self.up = up.as_vec3();

        debug_assert!(
            basis_error(self.forward, self.right, self.up) < ORTHONORMAL_TOLERANCE,
            "camera basis is not orthonormal"
        );
    }

    /// Direction the camera looks along.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Image-right direction.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Image-up direction.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// World-space distance between neighbouring pixel rays at unit focal length.
    pub fn pixel_step(&self) -> f32 {
        2.0 * (self.fov / 2.0).tan() / self.width as f32
    }

    /// Normalized primary ray through pixel (`row`, `col`).
    pub fn primary_ray(&self, row: u32, col: u32) -> Ray {
        let step = self.pixel_step();
        let (half_w, half_h) = self.half_extent();
        let direction = self.forward
            + self.up * (step * (row as f32 - half_h))
            + self.right * (step * (col as f32 - half_w));
        Ray::new(self.position, direction.normalize_precise())
    }

    /// Unnormalized direction of the first pixel in `row` and the per-column
    /// increment. Walking a row adds the increment instead of recomputing the
    /// full formula per pixel.
    pub(crate) fn row_start(&self, row: u32) -> (Vec3, Vec3) {
        let step = self.pixel_step();
        let dx = self.right * step;
        let dy = self.up * step;
        let (half_w, half_h) = self.half_extent();
        let first = self.forward + dy * (row as f32 - half_h) - dx * half_w;
        (first, dx)
    }

    fn half_extent(&self) -> (f32, f32) {
        (
            self.width.saturating_sub(1) as f32 * 0.5,
            self.height.saturating_sub(1) as f32 * 0.5,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Largest deviation from unit length or orthogonality, measured in f64.
pub(crate) fn basis_error(forward: Vec3, right: Vec3, up: Vec3) -> f64 {
    let (f, r, u) = (forward.as_dvec3(), right.as_dvec3(), up.as_dvec3());
    [
        (f.length() - 1.0).abs(),
        (r.length() - 1.0).abs(),
        (u.length() - 1.0).abs(),
        f.dot(r).abs(),
        f.dot(u).abs(),
        r.dot(u).abs(),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_point(rng: &mut StdRng) -> Vec3 {
        Vec3::new(
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
        )
    }

    #[test]
    fn test_default_basis() {
        let camera = Camera::new();
        assert_eq!(camera.forward(), Vec3::Z);
        assert_eq!(camera.right(), Vec3::X);
        assert_eq!(camera.up(), Vec3::Y);
        assert_eq!((camera.width, camera.height), (640, 480));
    }

    #[test]
    fn test_look_down_negative_z() {
        let mut camera = Camera::new();
        camera.look_at(Vec3::new(0.0, 0.0, -10.0));

        assert_eq!(camera.forward(), Vec3::NEG_Z);
        assert_eq!(camera.right(), Vec3::X);
        assert_eq!(camera.up(), Vec3::Y);
    }

    #[test]
    fn test_look_at_is_orthonormal() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut camera = Camera::new();

        for _ in 0..1000 {
            camera.position = random_point(&mut rng);
            let target = random_point(&mut rng);
            camera.look_at(target);

            let err = basis_error(camera.forward(), camera.right(), camera.up());
            assert!(err < ORTHONORMAL_TOLERANCE, "basis error {err}");

            let expected = (target - camera.position).normalize();
            assert!((camera.forward() - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_look_straight_down_uses_fallback() {
        let mut camera = Camera::new().with_position(Vec3::new(0.0, 50.0, 0.0));
        camera.look_at(Vec3::new(0.0, -10.0, 0.0));

        assert_eq!(camera.forward(), Vec3::NEG_Y);
        assert!(basis_error(camera.forward(), camera.right(), camera.up()) < ORTHONORMAL_TOLERANCE);
        assert!(camera.right().is_finite() && camera.up().is_finite());
    }

    #[test]
    fn test_look_at_own_position_keeps_basis() {
        let mut camera = Camera::new().with_position(Vec3::ONE);
        camera.look_at(Vec3::ONE);
        assert_eq!(camera.forward(), Vec3::Z);
    }

    #[test]
    fn test_pixel_step() {
        let camera = Camera::new()
            .with_resolution(100, 50)
            .with_fov(90.0_f32.to_radians());
        assert!((camera.pixel_step() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_center_ray_is_forward() {
        let mut camera = Camera::new().with_resolution(9, 7);
        camera.look_at(Vec3::new(3.0, 1.0, 4.0));

        let ray = camera.primary_ray(3, 4);
        assert_eq!(ray.origin, camera.position);
        assert!((ray.direction - camera.forward()).length() < 1e-6);
    }

    #[test]
    fn test_primary_rays_are_unit_length() {
        let mut camera = Camera::new().with_resolution(32, 24);
        camera.look_at(Vec3::new(-2.0, 5.0, 1.0));

        for row in [0, 11, 23] {
            for col in [0, 16, 31] {
                let d = camera.primary_ray(row, col).direction;
                assert!((d.length() - 1.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_row_walk_matches_primary_rays() {
        let mut camera = Camera::new().with_resolution(16, 8);
        camera.look_at(Vec3::new(1.0, -2.0, 6.0));

        let (mut direction, dx) = camera.row_start(5);
        for col in 0..camera.width {
            let walked = direction.normalize_precise();
            let direct = camera.primary_ray(5, col).direction;
            assert!((walked - direct).length() < 1e-5);
            direction += dx;
        }
    }
}

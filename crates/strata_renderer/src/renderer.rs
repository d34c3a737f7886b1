//! Frame rendering.
//!
//! One ray per pixel, no sampling. Rows are independent: each reads the
//! shared scene and writes its own slice of the framebuffer, so rayon can hand
//! them to worker threads without any locking.

use std::time::Instant;

use rayon::prelude::*;
use strata_core::{Scene, DEFAULT_MAX_DEPTH};
use strata_math::{Ray, Vec3Ext};

use crate::Camera;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum reflection depth per primary ray
    pub max_depth: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Dense RGB8 image, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Framebuffer {
    /// Bytes per pixel.
    pub const CHANNELS: usize = 3;

    /// Create a framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * Self::CHANNELS],
        }
    }

    /// Bytes in one row.
    pub fn stride(&self) -> usize {
        self.width as usize * Self::CHANNELS
    }

    /// Get the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} frame",
            self.width,
            self.height
        );
        let i = y as usize * self.stride() + x as usize * Self::CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// One row of RGB bytes.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {y} outside frame of height {}", self.height);
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }
}

/// Render the scene as seen by `camera`.
///
/// Rows are distributed over the rayon thread pool. The scene must not be
/// edited while this runs, which `&Scene` already guarantees.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> Framebuffer {
    let mut frame = Framebuffer::new(camera.width, camera.height);
    if frame.data.is_empty() {
        return frame;
    }

    let start = Instant::now();
    let stride = frame.stride();
    frame
        .data
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(row, pixels)| render_row(camera, scene, config, row as u32, pixels));

    log::debug!(
        "Rendered {}x{} ({} primitives) in {:?}",
        camera.width,
        camera.height,
        scene.len(),
        start.elapsed()
    );
    frame
}

/// Render one row into `pixels` (`width * 3` bytes).
///
/// Each traced color is written premultiplied by its alpha, so a ray that
/// hits nothing comes out black.
pub fn render_row(camera: &Camera, scene: &Scene, config: &RenderConfig, row: u32, pixels: &mut [u8]) {
    let (mut direction, dx) = camera.row_start(row);

    for pixel in pixels.chunks_exact_mut(Framebuffer::CHANNELS) {
        let ray = Ray::new(camera.position, direction.normalize_precise());
        let color = scene.trace_with_depth(&ray, config.max_depth);
        pixel.copy_from_slice(&color.premultiplied_rgb());
        direction += dx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{Checkerboard, Color, Sphere};
    use strata_math::Vec3;

    fn plane_below_camera() -> (Camera, Scene, Checkerboard) {
        let plane = Checkerboard::new(-10.0, 0.5);
        let mut scene = Scene::new();
        scene.add(plane);

        let mut camera = Camera::new()
            .with_resolution(9, 7)
            .with_fov(90.0_f32.to_radians())
            .with_position(Vec3::new(0.0, 50.0, 0.0));
        camera.look_at(Vec3::new(0.0, -10.0, 0.0));

        (camera, scene, plane)
    }

    #[test]
    fn test_framebuffer_layout() {
        let mut frame = Framebuffer::new(4, 2);
        assert_eq!(frame.data.len(), 4 * 2 * 3);
        assert_eq!(frame.stride(), 12);

        frame.data[12 + 3..12 + 6].copy_from_slice(&[1, 2, 3]);
        assert_eq!(frame.pixel(1, 1), [1, 2, 3]);
        assert_eq!(frame.row(1)[3..6], [1u8, 2, 3]);
    }

    #[test]
    #[should_panic]
    fn test_pixel_out_of_range_panics() {
        Framebuffer::new(4, 2).pixel(4, 0);
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_range_panics() {
        Framebuffer::new(4, 2).row(2);
    }

    #[test]
    fn test_empty_scene_renders_black() {
        let camera = Camera::new().with_resolution(8, 4);
        let frame = render(&camera, &Scene::new(), &RenderConfig::default());

        assert_eq!((frame.width, frame.height), (8, 4));
        assert!(frame.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_sized_frame() {
        let camera = Camera::new().with_resolution(0, 10);
        let frame = render(&camera, &Scene::new(), &RenderConfig::default());
        assert!(frame.data.is_empty());
    }

    #[test]
    fn test_plane_center_pixel() {
        let (camera, scene, _) = plane_below_camera();
        let frame = render(&camera, &scene, &RenderConfig::default());

        // Straight down onto (0, -10, 0): pattern value 0.875, fully opaque
        assert_eq!(frame.pixel(4, 3), [0, 255, 0]);
    }

    #[test]
    fn test_plane_corner_pixels_follow_perspective() {
        let (camera, scene, plane) = plane_below_camera();
        let frame = render(&camera, &scene, &RenderConfig::default());
        let center = frame.pixel(4, 3);

        for (x, y) in [(0, 0), (8, 0), (0, 6), (8, 6)] {
            let ray = camera.primary_ray(y, x);
            let t = (plane.height() - ray.origin.y) / ray.direction.y;
            let p = ray.at(t);
            let alpha = (ray.direction.y.abs() * 255.0) as u8;
            let expected = plane.pattern_color(p.x, p.z).with_alpha(alpha).premultiplied_rgb();

            let got = frame.pixel(x, y);
            for c in 0..3 {
                let diff = (got[c] as i32 - expected[c] as i32).abs();
                assert!(diff <= 2, "pixel ({x}, {y}) = {got:?}, expected {expected:?}");
            }
            // Oblique rays see the plane as translucent
            assert_ne!(got, center);
        }
    }

    #[test]
    fn test_parallel_render_matches_sequential() {
        let mut scene = Scene::new();
        scene.add(Checkerboard::new(-10.0, 0.5).with_reflectivity(191));
        scene.add(Checkerboard::new(10.0, 2.0));
        scene.add(Sphere::new(Vec3::ZERO, 4.0, Color::new(0, 0, 255, 127)).with_mirror(127));

        let mut camera = Camera::new()
            .with_resolution(24, 16)
            .with_position(Vec3::new(10.0, 3.0, 30.0));
        camera.look_at(Vec3::ZERO);
        let config = RenderConfig::default();

        let frame = render(&camera, &scene, &config);

        let mut expected = Framebuffer::new(24, 16);
        let stride = expected.stride();
        for (row, pixels) in expected.data.chunks_mut(stride).enumerate() {
            render_row(&camera, &scene, &config, row as u32, pixels);
        }
        assert_eq!(frame, expected);
        assert!(frame.data.iter().any(|&b| b != 0));
    }
}

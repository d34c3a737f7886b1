//! Strata Renderer - pinhole camera, frame rendering and image output.
//!
//! The camera turns pixels into rays, the scene from `strata_core` turns
//! rays into colors, and rows of the frame are rendered in parallel with
//! rayon.

mod camera;
mod output;
mod renderer;

pub use camera::Camera;
pub use output::{save, write_ppm, ImageFormat, OutputError};
pub use renderer::{render, render_row, Framebuffer, RenderConfig};

/// Re-export the engine types callers need alongside the renderer
pub use strata_core::{Color, Scene};
pub use strata_math::{Ray, Vec3};

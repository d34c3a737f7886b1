// Re-export glam for convenience
pub use glam::*;

// Strata math types
mod ray;
mod vector;
pub use ray::Ray;
pub use vector::Vec3Ext;

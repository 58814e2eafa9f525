// Re-export glam for convenience
pub use glam::*;

// kiln math types
mod aabb;
mod interval;
mod orbit;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use orbit::{OrbitCamera, TransformSet};
pub use ray::Ray;

/// Determinant of the 2x2 matrix with columns `a` and `b`.
#[inline]
pub fn det2(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

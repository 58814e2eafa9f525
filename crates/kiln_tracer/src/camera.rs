use kiln_math::{Ray, Vec3};

pub const MIN_FOV_DEGREES: f32 = 10.0;
pub const MAX_FOV_DEGREES: f32 = 179.99;

/// Pinhole camera looking down -Z with +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    fov_degrees: f32,
    tan_half_fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(30.0)
    }
}

impl Camera {
    /// Camera at the origin with the given vertical field of view.
    pub fn new(fov_degrees: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            fov_degrees: 0.0,
            tan_half_fov: 0.0,
        };
        camera.set_fov(fov_degrees);
        camera
    }

    /// Set the field of view, clamped to the supported range.
    pub fn set_fov(&mut self, fov_degrees: f32) {
        let fov = if fov_degrees.is_nan() {
            MIN_FOV_DEGREES
        } else {
            fov_degrees.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES)
        };
        self.fov_degrees = fov;
        self.tan_half_fov = (fov.to_radians() * 0.5).tan();
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Primary ray through the center of pixel (`x`, `row`).
    ///
    /// Row 0 is the top of the image.
    pub fn generate_ray(&self, width: u32, height: u32, x: u32, row: u32) -> Ray {
        let y = height.saturating_sub(1).saturating_sub(row);
        let aspect = width as f32 / height as f32;

        let x_ndc = (x as f32 + 0.5) / width as f32 * 2.0 - 1.0;
        let y_ndc = (y as f32 + 0.5) / height as f32 * 2.0 - 1.0;

        Ray::normalized(
            self.position,
            Vec3::new(
                x_ndc * aspect * self.tan_half_fov,
                y_ndc * self.tan_half_fov,
                -1.0,
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fov_clamped() {
        assert_eq!(Camera::new(5.0).fov_degrees(), MIN_FOV_DEGREES);
        assert_eq!(Camera::new(180.0).fov_degrees(), MAX_FOV_DEGREES);
        assert_eq!(Camera::new(30.0).fov_degrees(), 30.0);
    }

    #[test]
    fn test_center_ray_looks_down_neg_z() {
        let camera = Camera::default();
        // Odd size puts a pixel center exactly on the axis
        let ray = camera.generate_ray(5, 5, 2, 2);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-6);
        assert_eq!(ray.origin, Vec3::ZERO);
    }

    #[test]
    fn test_row_zero_is_top() {
        let camera = Camera::new(60.0);
        let top = camera.generate_ray(8, 4, 0, 0);
        let bottom = camera.generate_ray(8, 4, 0, 3);
        assert!(top.direction.y > 0.0);
        assert!(bottom.direction.y < 0.0);
        assert!(top.direction.x < 0.0);
        assert!((top.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_edge_angle_matches_fov() {
        let camera = Camera::new(90.0);
        // Pixel centers approach but never reach the frustum edge
        let ray = camera.generate_ray(1000, 1000, 500, 0);
        let angle = ray.direction.y.atan2(-ray.direction.z).to_degrees();
        assert!(angle < 45.0 && angle > 44.9);
    }
}

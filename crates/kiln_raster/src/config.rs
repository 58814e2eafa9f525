use kiln_core::RowOrder;
use serde::{Deserialize, Serialize};

use crate::framebuffer::ClearState;
use crate::rasterize::PixelCenter;

/// Rasterizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Clear values applied at the start of every frame
    pub clear: ClearState,

    /// Coverage sample position inside a pixel
    pub pixel_center: PixelCenter,

    /// Straight-alpha blending (off = replace)
    pub blend: bool,

    /// Orbit camera radius around the origin
    pub orbit_radius: f32,

    /// Orbit camera height above the origin
    pub orbit_height: f32,

    /// Orbit angle advance per frame, in radians
    pub orbit_step: f32,

    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,

    pub near: f32,
    pub far: f32,

    /// Row direction of the copy-out buffer
    pub row_order: RowOrder,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            clear: ClearState::default(),
            pixel_center: PixelCenter::Corner,
            blend: true,
            orbit_radius: 2.5,
            orbit_height: 2.0,
            orbit_step: 0.025,
            fov_y_degrees: 90.0,
            near: 1.0,
            far: 1000.0,
            row_order: RowOrder::TopDown,
        }
    }
}

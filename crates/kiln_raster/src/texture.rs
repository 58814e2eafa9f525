//! Point-sampled RGBA textures for the pixel shader.

use kiln_math::{Vec2, Vec4};

use crate::error::{RasterError, RasterResult};

/// An in-memory texture.
///
/// Texels are linear RGBA, row-major, row 0 at the top (v = 1).
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<Vec4>,
}

impl Texture {
    /// Create a texture from texel data.
    pub fn new(width: u32, height: u32, texels: Vec<Vec4>) -> RasterResult<Self> {
        let expected = width as usize * height as usize;
        if expected == 0 || texels.len() != expected {
            return Err(RasterError::TextureSize {
                width,
                height,
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Procedural checkerboard of `cells` x `cells` squares on a `size` x `size` grid.
    pub fn checker(size: u32, cells: u32, a: Vec4, b: Vec4) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let texels = (0..size)
            .flat_map(|y| (0..size).map(move |x| ((x / cell) + (y / cell)) % 2 == 0))
            .map(|even| if even { a } else { b })
            .collect();
        Self {
            width: size,
            height: size,
            texels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texels(&self) -> &[Vec4] {
        &self.texels
    }

    /// Nearest texel at `uv`, wrapping outside [0, 1).
    ///
    /// (0, 0) is the bottom-left corner.
    pub fn sample(&self, uv: Vec2) -> Vec4 {
        let u = uv.x.rem_euclid(1.0);
        let v = uv.y.rem_euclid(1.0);

        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = (((1.0 - v) * self.height as f32) as u32).min(self.height - 1);

        self.texel(x, y)
    }

    fn texel(&self, x: u32, y: u32) -> Vec4 {
        let idx = (y * self.width + x) as usize;
        self.texels.get(idx).copied().unwrap_or(Vec4::ONE)
    }
}

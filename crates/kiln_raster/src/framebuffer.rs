//! Color, depth and stencil planes.

use kiln_math::Vec4;
use serde::{Deserialize, Serialize};

use crate::error::{RasterError, RasterResult};

/// How the color plane is reset each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearColor {
    Solid(Vec4),
    /// `base` with red replaced by `row * scale / height` (debug gradient).
    RowGradient { base: Vec4, scale: f32 },
}

impl Default for ClearColor {
    fn default() -> Self {
        ClearColor::RowGradient {
            base: Vec4::new(0.0, 0.0, 0.0, 1.0),
            scale: 0.2,
        }
    }
}

/// Clear values for all three planes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearState {
    pub color: ClearColor,
    pub depth: f32,
    pub stencil: u8,
}

impl Default for ClearState {
    fn default() -> Self {
        Self {
            color: ClearColor::default(),
            depth: 1.0,
            stencil: 0,
        }
    }
}

/// Frame buffers owned by one rasterizer. Row 0 is the top of the image.
#[derive(Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pub color: Vec<Vec4>,
    pub depth: Vec<f32>,
    pub stencil: Vec<u8>,
}

fn alloc_plane<T: Clone>(len: usize, value: T) -> RasterResult<Vec<T>> {
    let mut plane = Vec::new();
    plane.try_reserve_exact(len)?;
    plane.resize(len, value);
    Ok(plane)
}

impl FrameBuffer {
    /// Allocate all planes. Fails on zero size or when memory runs out.
    pub fn new(width: u32, height: u32) -> RasterResult<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroSize { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            color: alloc_plane(len, Vec4::ZERO)?,
            depth: alloc_plane(len, 1.0)?,
            stencil: alloc_plane(len, 0)?,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    pub fn color_at(&self, x: u32, y: u32) -> Option<Vec4> {
        self.index(x, y).map(|i| self.color[i])
    }

    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    pub fn stencil_at(&self, x: u32, y: u32) -> Option<u8> {
        self.index(x, y).map(|i| self.stencil[i])
    }

    /// Reset every plane.
    pub fn clear(&mut self, state: &ClearState) {
        let width = self.width as usize;
        match state.color {
            ClearColor::Solid(c) => self.color.fill(c),
            ClearColor::RowGradient { base, scale } => {
                let height = self.height as f32;
                for (h, row) in self.color.chunks_exact_mut(width).enumerate() {
                    let mut c = base;
                    c.x = h as f32 * scale / height;
                    row.fill(c);
                }
            }
        }
        self.depth.fill(state.depth);
        self.stencil.fill(state.stencil);
    }
}

//! Triangle scan conversion.
//!
//! Triangles arrive in normalized device coordinates (x, y in [-1, 1], +y up)
//! and leave as fragments addressed in frame buffer pixels (row 0 at the
//! top). Both windings rasterize.

use kiln_math::{det2, Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::vertex::{Index, V2F, MIN_CLIP_W};

/// Determinants below this magnitude mark a degenerate triangle.
pub const DEGENERATE_EPSILON: f32 = 1e-8;

/// Where inside a pixel the coverage sample is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelCenter {
    /// Sample at the pixel's lower-left corner (`x`).
    #[default]
    Corner,
    /// Sample at the pixel's center (`x + 0.5`).
    Center,
}

impl PixelCenter {
    #[inline]
    fn offset(self) -> f32 {
        match self {
            PixelCenter::Corner => 0.0,
            PixelCenter::Center => 0.5,
        }
    }
}

/// Target dimensions and sampling convention for scan conversion.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_center: PixelCenter,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_center: PixelCenter) -> Self {
        Self {
            width,
            height,
            pixel_center,
        }
    }

    /// NDC position of the sample in pixel column `x`, NDC row `y` (bottom up).
    #[inline]
    pub fn sample_point(&self, x: u32, y: u32) -> Vec2 {
        let o = self.pixel_center.offset();
        Vec2::new(
            (x as f32 + o) * 2.0 / self.width as f32 - 1.0,
            (y as f32 + o) * 2.0 / self.height as f32 - 1.0,
        )
    }

    /// Half-open pixel range covering `[min, max]` in NDC along one axis.
    fn pixel_span(min: f32, max: f32, size: u32) -> (u32, u32) {
        let to_pixel = |ndc: f32| (ndc * 0.5 + 0.5) * size as f32;
        let lo = to_pixel(min).floor().clamp(0.0, size as f32) as u32;
        let hi = to_pixel(max).ceil().clamp(0.0, size as f32) as u32;
        (lo, hi)
    }
}

/// A covered sample, ready for shading and merge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub x: u32,
    /// Frame buffer row (0 = top).
    pub y: u32,
    pub z: f32,
    pub color: Vec4,
    pub uv: Vec2,
    pub stencil_ref: Option<u8>,
}

/// Edge setup for one screen-space triangle.
#[derive(Debug, Clone, Copy)]
pub struct TriangleSetup {
    a: Vec2,
    ab: Vec2,
    ac: Vec2,
    inv_det: f32,
}

impl TriangleSetup {
    /// `None` when the triangle is degenerate.
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Option<Self> {
        let ab = b - a;
        let ac = c - a;
        let det = det2(ab, ac);
        if det.abs() < DEGENERATE_EPSILON {
            return None;
        }
        Some(Self {
            a,
            ab,
            ac,
            inv_det: 1.0 / det,
        })
    }

    /// Barycentric `(u, v)`; `u` weights `b`, `v` weights `c`.
    #[inline]
    pub fn barycentric(&self, p: Vec2) -> (f32, f32) {
        let pa = p - self.a;
        let u = det2(pa, self.ac) * self.inv_det;
        let v = det2(self.ab, pa) * self.inv_det;
        (u, v)
    }

    #[inline]
    pub fn is_inside(u: f32, v: f32) -> bool {
        !(u < 0.0 || v < 0.0 || u > 1.0 || u + v > 1.0)
    }
}

/// Scan-convert one triangle, appending fragments to `out`.
///
/// Returns the number of fragments emitted. Degenerate triangles and those
/// with a vertex on or behind the eye plane emit nothing.
pub fn rasterize_triangle(
    [a, b, c]: [&V2F; 3],
    viewport: &Viewport,
    stencil_ref: Option<u8>,
    out: &mut Vec<Fragment>,
) -> usize {
    if a.clip_w() <= MIN_CLIP_W || b.clip_w() <= MIN_CLIP_W || c.clip_w() <= MIN_CLIP_W {
        return 0;
    }
    let Some(setup) = TriangleSetup::new(a.ndc(), b.ndc(), c.ndc()) else {
        return 0;
    };

    let min = a.ndc().min(b.ndc()).min(c.ndc());
    let max = a.ndc().max(b.ndc()).max(c.ndc());
    let (x_min, x_max) = Viewport::pixel_span(min.x, max.x, viewport.width);
    let (y_min, y_max) = Viewport::pixel_span(min.y, max.y, viewport.height);

    let before = out.len();
    for y in y_min..y_max {
        for x in x_min..x_max {
            let (u, v) = setup.barycentric(viewport.sample_point(x, y));
            if !TriangleSetup::is_inside(u, v) {
                continue;
            }
            let w = 1.0 - u - v;

            let inv_w = a.inv_w * w + b.inv_w * u + c.inv_w * v;
            let uv_over_w = a.texcoord_over_w * w + b.texcoord_over_w * u + c.texcoord_over_w * v;

            out.push(Fragment {
                x,
                y: viewport.height - y - 1,
                z: a.depth() * w + b.depth() * u + c.depth() * v,
                color: a.color * w + b.color * u + c.color * v,
                uv: if inv_w != 0.0 { uv_over_w / inv_w } else { Vec2::ZERO },
                stencil_ref,
            });
        }
    }
    out.len() - before
}

/// Scan-convert every triangle of an index buffer.
///
/// Triangles referencing a missing vertex are skipped.
pub fn rasterize(
    vertices: &[V2F],
    indices: &[Index],
    viewport: &Viewport,
    stencil_ref: Option<u8>,
    out: &mut Vec<Fragment>,
) -> usize {
    let mut emitted = 0;
    for tri in indices.chunks_exact(3) {
        let (Some(a), Some(b), Some(c)) = (
            vertices.get(tri[0] as usize),
            vertices.get(tri[1] as usize),
            vertices.get(tri[2] as usize),
        ) else {
            log::warn!("Skipping triangle {:?}: index out of range", tri);
            continue;
        };
        emitted += rasterize_triangle([a, b, c], viewport, stencil_ref, out);
    }
    emitted
}

//! Vertex, index and mesh tables, plus the post-vertex-shader vertex.

use bytemuck::{Pod, Zeroable};
use kiln_math::{Vec2, Vec4};

use crate::error::{RasterError, RasterResult};

/// Index into a vertex table. Three consecutive indices make a triangle.
pub type Index = u8;

/// Model-space vertex as authored in a mesh table.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub texcoord: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec4, color: Vec4, texcoord: Vec2) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            texcoord: texcoord.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec4 {
        Vec4::from_array(self.position)
    }

    #[inline]
    pub fn color(&self) -> Vec4 {
        Vec4::from_array(self.color)
    }

    #[inline]
    pub fn texcoord(&self) -> Vec2 {
        Vec2::from_array(self.texcoord)
    }
}

pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
pub const YELLOW: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);
pub const GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
pub const BLUE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);

/// A flat triangle list: vertex table plus index buffer.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<Index>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<Index>) -> Self {
        if indices.len() % 3 != 0 {
            log::warn!(
                "Mesh has {} indices, ignoring the trailing {}",
                indices.len(),
                indices.len() % 3
            );
        }
        Self { vertices, indices }
    }

    /// The demo quad in the z = 0 plane.
    ///
    /// Corners go red (-,-), yellow (-,+), green (+,+), blue (+,-).
    pub fn quad(size: f32) -> Self {
        let corner = |x: f32, y: f32, color: Vec4, uv: Vec2| {
            Vertex::new(Vec4::new(x * size, y * size, 0.0, 1.0), color, uv)
        };
        Self::new(
            vec![
                corner(-1.0, -1.0, RED, Vec2::new(0.0, 0.0)),
                corner(-1.0, 1.0, YELLOW, Vec2::new(0.0, 1.0)),
                corner(1.0, 1.0, GREEN, Vec2::new(1.0, 1.0)),
                corner(1.0, -1.0, BLUE, Vec2::new(1.0, 0.0)),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    /// Number of complete triangles in the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index triples of every complete triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [Index; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Reject index buffers that reach past the vertex table.
    pub fn validate(&self) -> RasterResult<()> {
        match self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.vertices.len())
        {
            Some(&index) => Err(RasterError::IndexOutOfRange {
                index,
                vertex_count: self.vertices.len(),
            }),
            None => Ok(()),
        }
    }
}

/// A vertex after the vertex shader.
///
/// `position` holds x, y, z already divided by w, with the undivided clip w
/// kept in the last lane. Texcoords are pre-divided by w for
/// perspective-correct interpolation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct V2F {
    pub position: Vec4,
    pub inv_w: f32,
    pub color: Vec4,
    pub texcoord_over_w: Vec2,
}

/// Clip w at or below this is on or behind the eye plane.
pub const MIN_CLIP_W: f32 = 1e-6;

impl V2F {
    /// Apply the perspective divide to a clip-space vertex.
    pub fn from_clip(clip: Vec4, color: Vec4, texcoord: Vec2) -> Self {
        let w = clip.w;
        let inv_w = if w.abs() > MIN_CLIP_W { 1.0 / w } else { 0.0 };
        Self {
            position: Vec4::new(clip.x * inv_w, clip.y * inv_w, clip.z * inv_w, w),
            inv_w,
            color,
            texcoord_over_w: texcoord * inv_w,
        }
    }

    /// Screen-normalized x, y.
    #[inline]
    pub fn ndc(&self) -> Vec2 {
        self.position.truncate().truncate()
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.position.z
    }

    #[inline]
    pub fn clip_w(&self) -> f32 {
        self.position.w
    }
}

//! Vertex and pixel shading stages.

use std::sync::Arc;

use kiln_math::{Mat4, Vec4};

use crate::rasterize::Fragment;
use crate::texture::Texture;
use crate::vertex::{Vertex, V2F};

/// Transform `vertices` by `mvp` and apply the perspective divide.
///
/// `out` is cleared and refilled so its allocation carries across frames.
pub fn vertex_shader(vertices: &[Vertex], mvp: Mat4, out: &mut Vec<V2F>) {
    out.clear();
    out.extend(
        vertices
            .iter()
            .map(|v| V2F::from_clip(mvp * v.position(), v.color(), v.texcoord())),
    );
}

/// Per-fragment shading function for a draw call.
#[derive(Clone, Debug)]
pub enum PixelShader {
    /// Interpolated vertex color times `tint`.
    Flat { tint: Vec4 },
    /// Texture sample at the fragment's UV, times vertex color and `tint`.
    Textured { texture: Arc<Texture>, tint: Vec4 },
}

impl Default for PixelShader {
    fn default() -> Self {
        PixelShader::Flat { tint: Vec4::ONE }
    }
}

impl PixelShader {
    pub fn flat(tint: Vec4) -> Self {
        PixelShader::Flat { tint }
    }

    pub fn textured(texture: Arc<Texture>) -> Self {
        PixelShader::Textured {
            texture,
            tint: Vec4::ONE,
        }
    }

    #[inline]
    pub fn shade(&self, fragment: &Fragment) -> Vec4 {
        match self {
            PixelShader::Flat { tint } => fragment.color * *tint,
            PixelShader::Textured { texture, tint } => {
                texture.sample(fragment.uv) * fragment.color * *tint
            }
        }
    }
}

/// Replace every fragment's color with the shader output.
pub fn pixel_shader(shader: &PixelShader, fragments: &mut [Fragment]) {
    for fragment in fragments.iter_mut() {
        fragment.color = shader.shade(fragment);
    }
}

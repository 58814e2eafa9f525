//! kiln raster - a software rasterizer.
//!
//! The classic fixed pipeline, stage by stage:
//!
//! - **ClearBuffer**: reset color (solid or debug row gradient), depth and stencil
//! - **VertexShader**: model → clip space, perspective divide, keep `1/w`
//! - **Rasterization**: bounding box scan with barycentric coverage,
//!   perspective-correct texcoords, no back-face culling
//! - **PixelShader**: flat tint or point-sampled texture
//! - **OutputMerge**: alpha → scissor → stencil → depth → blend
//!
//! [`Rasterizer`] owns the frame buffers and scratch storage and implements
//! [`kiln_core::FrameSource`].

pub mod config;
pub mod error;
pub mod framebuffer;
pub mod merge;
pub mod pipeline;
pub mod rasterize;
pub mod scissor;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use config::RasterConfig;
pub use error::{RasterError, RasterResult};
pub use framebuffer::{ClearColor, ClearState, FrameBuffer};
pub use merge::{merge_fragment, output_merge, MergeOutcome, MergeStats, ALPHA_CUTOFF};
pub use pipeline::{DrawCall, Rasterizer};
pub use rasterize::{rasterize, rasterize_triangle, Fragment, PixelCenter, TriangleSetup, Viewport};
pub use scissor::{ScissorRect, ScissorStack};
pub use shader::{pixel_shader, vertex_shader, PixelShader};
pub use texture::Texture;
pub use vertex::{Index, Mesh, Vertex, V2F};

//! kiln tracer - a recursive ray tracer.
//!
//! - **Camera**: pinhole primary rays, one per pixel center
//! - **Scene**: objects indexed by an octree, point lights, an ambient term
//!   and a light that orbits one step per frame
//! - **Trace**: direct lighting with shadow rays, mirror reflection and
//!   refraction blended by a Fresnel term, bounded by a depth limit
//! - **Present**: a fixed grid of tiles rendered on a dedicated rayon pool
//!
//! [`RayTracer`] owns everything and implements [`kiln_core::FrameSource`].

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
mod mesh_data;
pub mod object;
pub mod octree;
pub mod renderer;
pub mod scene;
pub mod tile;
pub mod trace;

pub use camera::Camera;
pub use config::TracerConfig;
pub use error::{TracerError, TracerResult};
pub use geometry::{intersect_box, intersect_plane, intersect_sphere, intersect_triangle, Roots};
pub use object::{HitInfo, Material, SceneObject, Shape};
pub use octree::{NodeId, ObjectId, SceneNode, SceneTree, MAX_LEVEL};
pub use renderer::RayTracer;
pub use scene::{Light, Scene, SceneConfig};
pub use tile::{generate_tiles, render_tile, validate_tiles, Tile, TileGrid};
pub use trace::{direct_lighting, trace, TraceConfig};

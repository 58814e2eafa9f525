//! The rasterizer: owns the frame buffers and runs the stage chain.
//!
//! Each frame: ClearBuffer, then per draw call VertexShader, Rasterization,
//! PixelShader and OutputMerge.

use kiln_core::{copy_point_sampled, CopyResult, CopyTarget, FrameSource};
use kiln_math::{Mat4, OrbitCamera, TransformSet, Vec3};

use crate::config::RasterConfig;
use crate::error::{RasterError, RasterResult};
use crate::framebuffer::FrameBuffer;
use crate::merge::{output_merge, MergeStats};
use crate::rasterize::{rasterize, Fragment, Viewport};
use crate::scissor::{ScissorRect, ScissorStack};
use crate::shader::{pixel_shader, vertex_shader, PixelShader};
use crate::vertex::{Mesh, V2F};

/// One mesh drawn with its own world transform and fixed-function state.
#[derive(Clone, Debug)]
pub struct DrawCall {
    pub mesh: Mesh,
    pub world: Mat4,
    pub shader: PixelShader,
    /// Stencil reference carried by every fragment of this draw
    pub stencil_ref: Option<u8>,
    /// Pushed before the draw, popped after
    pub scissor: Option<ScissorRect>,
}

impl DrawCall {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            world: Mat4::IDENTITY,
            shader: PixelShader::default(),
            stencil_ref: None,
            scissor: None,
        }
    }

    pub fn with_world(mut self, world: Mat4) -> Self {
        self.world = world;
        self
    }

    pub fn with_shader(mut self, shader: PixelShader) -> Self {
        self.shader = shader;
        self
    }

    pub fn with_stencil(mut self, reference: u8) -> Self {
        self.stencil_ref = Some(reference);
        self
    }

    pub fn with_scissor(mut self, rect: ScissorRect) -> Self {
        self.scissor = Some(rect);
        self
    }
}

/// Software rasterizer with a fixed output size.
pub struct Rasterizer {
    config: RasterConfig,
    frame: FrameBuffer,
    camera: OrbitCamera,
    transforms: TransformSet,
    draws: Vec<DrawCall>,
    scissors: ScissorStack,

    // Per-frame scratch, reused across frames
    shaded_vertices: Vec<V2F>,
    fragments: Vec<Fragment>,

    last_stats: MergeStats,
    frame_count: u64,
}

impl Rasterizer {
    /// Allocate frame buffers and set up the orbit camera.
    pub fn new(width: u32, height: u32, config: RasterConfig) -> RasterResult<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroSize { width, height });
        }
        let mut frame = FrameBuffer::new(width, height)?;
        frame.clear(&config.clear);

        let mut camera = OrbitCamera::new(
            config.orbit_radius,
            config.orbit_height,
            width as f32 / height as f32,
        );
        camera.step = config.orbit_step;
        camera.fov_y = config.fov_y_degrees.to_radians();
        camera.near = config.near;
        camera.far = config.far;

        let transforms =
            TransformSet::new(Mat4::IDENTITY, camera.view_matrix(), camera.projection_matrix());

        log::info!("Rasterizer created: {}x{}", width, height);

        Ok(Self {
            config,
            frame,
            camera,
            transforms,
            draws: Vec::new(),
            scissors: ScissorStack::new(),
            shaded_vertices: Vec::new(),
            fragments: Vec::new(),
            last_stats: MergeStats::default(),
            frame_count: 0,
        })
    }

    /// The demo scene: one quad squashed by a (2, 0.2, 0) world scale.
    pub fn demo(width: u32, height: u32, config: RasterConfig) -> RasterResult<Self> {
        let mut rasterizer = Self::new(width, height, config)?;
        rasterizer.add_draw(
            DrawCall::new(Mesh::quad(1.0)).with_world(Mat4::from_scale(Vec3::new(2.0, 0.2, 0.0))),
        )?;
        Ok(rasterizer)
    }

    /// Queue a draw call for every subsequent frame.
    pub fn add_draw(&mut self, draw: DrawCall) -> RasterResult<()> {
        draw.mesh.validate()?;
        if draw.mesh.indices.len() % 3 != 0 {
            log::warn!("Draw call mesh has a partial trailing triangle");
        }
        self.draws.push(draw);
        Ok(())
    }

    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }

    /// Push a frame-wide scissor rectangle.
    pub fn push_scissor(&mut self, rect: ScissorRect) {
        self.scissors.push(rect);
    }

    pub fn pop_scissor(&mut self) -> Option<ScissorRect> {
        self.scissors.pop()
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn transforms(&self) -> &TransformSet {
        &self.transforms
    }

    /// Merge counters from the last frame.
    pub fn last_stats(&self) -> MergeStats {
        self.last_stats
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Render one frame with explicit view and projection, leaving the orbit alone.
    pub fn render_with(&mut self, view: Mat4, projection: Mat4) {
        self.transforms.set_view(view);
        self.transforms.set_projection(projection);
        self.draw_frame();
    }

    fn draw_frame(&mut self) {
        self.frame.clear(&self.config.clear);

        let viewport = Viewport::new(
            self.frame.width(),
            self.frame.height(),
            self.config.pixel_center,
        );
        let mut stats = MergeStats::default();

        for draw in &self.draws {
            self.transforms.set_world(draw.world);
            if let Some(rect) = draw.scissor {
                self.scissors.push(rect);
            }

            vertex_shader(
                &draw.mesh.vertices,
                self.transforms.model_view_projection,
                &mut self.shaded_vertices,
            );

            self.fragments.clear();
            rasterize(
                &self.shaded_vertices,
                &draw.mesh.indices,
                &viewport,
                draw.stencil_ref,
                &mut self.fragments,
            );

            pixel_shader(&draw.shader, &mut self.fragments);
            stats += output_merge(&self.fragments, &self.scissors, self.config.blend, &mut self.frame);

            if draw.scissor.is_some() {
                self.scissors.pop();
            }
        }

        self.last_stats = stats;
        self.frame_count += 1;
        log::debug!(
            "Raster frame {}: {} fragments, {} written",
            self.frame_count,
            stats.total(),
            stats.written
        );
    }
}

impl FrameSource for Rasterizer {
    fn dimensions(&self) -> (u32, u32) {
        (self.frame.width(), self.frame.height())
    }

    /// Advance the orbit one step and draw.
    fn render(&mut self) {
        self.camera.advance();
        self.transforms.set_view(self.camera.view_matrix());
        self.transforms.set_projection(self.camera.projection_matrix());
        self.draw_frame();
    }

    fn copy_buffer(&self, target: &mut CopyTarget<'_>) -> CopyResult<()> {
        let frame = &self.frame;
        copy_point_sampled(
            frame.width(),
            frame.height(),
            self.config.row_order,
            target,
            |x, y| frame.color_at(x, y).unwrap_or_default().truncate(),
        )
    }
}

//! The ray tracer: owns the scene, the canvas and the tile workers.

use std::time::Instant;

use kiln_core::{copy_point_sampled, CopyResult, CopyTarget, FrameSource};
use kiln_math::Vec3;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::config::TracerConfig;
use crate::error::{TracerError, TracerResult};
use crate::scene::Scene;
use crate::tile::{generate_tiles, render_tile, validate_tiles, Tile};

/// Ray tracer with a fixed output size.
pub struct RayTracer {
    width: u32,
    height: u32,
    config: TracerConfig,
    scene: Scene,
    camera: Camera,
    tiles: Vec<Tile>,
    pool: rayon::ThreadPool,
    /// Top-down, row-major
    canvas: Vec<Vec3>,
    frame_count: u64,
}

impl RayTracer {
    /// Build the demo scene, the tile layout and one worker per tile.
    pub fn new(width: u32, height: u32, config: TracerConfig) -> TracerResult<Self> {
        let scene = Scene::demo(&config.scene);
        Self::with_scene(width, height, config, scene)
    }

    /// Same as [`RayTracer::new`] with a caller-built scene.
    pub fn with_scene(
        width: u32,
        height: u32,
        config: TracerConfig,
        scene: Scene,
    ) -> TracerResult<Self> {
        if width == 0 || height == 0 {
            return Err(TracerError::ZeroSize { width, height });
        }

        let tiles = generate_tiles(width, height, config.tiles)?;
        validate_tiles(&tiles, width, height)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(tiles.len())
            .thread_name(|i| format!("kiln-tile-{i}"))
            .build()?;

        let camera = Camera::new(config.fov_degrees);
        if camera.fov_degrees() != config.fov_degrees {
            log::warn!(
                "Field of view {} clamped to {}",
                config.fov_degrees,
                camera.fov_degrees()
            );
        }

        log::info!(
            "RayTracer created: {}x{}, {} tiles, {} objects",
            width,
            height,
            tiles.len(),
            scene.tree.len()
        );

        Ok(Self {
            width,
            height,
            canvas: vec![config.trace.background; width as usize * height as usize],
            config,
            scene,
            camera,
            tiles,
            pool,
            frame_count: 0,
        })
    }

    /// Trace every tile in parallel and write the results into the canvas.
    ///
    /// Returns once all tiles are done.
    pub fn present(&mut self) {
        let start = Instant::now();
        let (width, height) = (self.width, self.height);
        let scene = &self.scene;
        let camera = &self.camera;
        let trace_config = &self.config.trace;
        let tiles = &self.tiles;

        let results: Vec<Vec<Vec3>> = self.pool.install(|| {
            tiles
                .par_iter()
                .map(|tile| render_tile(tile, scene, camera, width, height, trace_config))
                .collect()
        });

        for (tile, colors) in tiles.iter().zip(results) {
            let tile_width = tile.width as usize;
            for (local_row, row) in colors.chunks_exact(tile_width).enumerate() {
                let offset = (tile.y as usize + local_row) * width as usize + tile.x as usize;
                self.canvas[offset..offset + tile_width].copy_from_slice(row);
            }
        }

        self.frame_count += 1;
        log::debug!(
            "Traced frame {} in {:.1} ms",
            self.frame_count,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Canvas color at (`x`, `row`), row 0 at the top.
    pub fn pixel(&self, x: u32, row: u32) -> Option<Vec3> {
        if x >= self.width || row >= self.height {
            return None;
        }
        self.canvas
            .get(row as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl FrameSource for RayTracer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Clear, move the light, trace.
    fn render(&mut self) {
        self.canvas.fill(self.config.trace.background);
        self.scene.update();
        self.present();
    }

    fn copy_buffer(&self, target: &mut CopyTarget<'_>) -> CopyResult<()> {
        let width = self.width as usize;
        copy_point_sampled(
            self.width,
            self.height,
            self.config.row_order,
            target,
            |x, y| self.canvas[y as usize * width + x as usize],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneConfig;
    use crate::tile::TileGrid;
    use crate::trace::trace;
    use kiln_core::RowOrder;

    fn small_config() -> TracerConfig {
        TracerConfig {
            tiles: TileGrid { rows: 2, cols: 3 },
            ..TracerConfig::default()
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            RayTracer::new(0, 10, TracerConfig::default()),
            Err(TracerError::ZeroSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let config = TracerConfig {
            tiles: TileGrid { rows: 2, cols: 0 },
            ..TracerConfig::default()
        };
        assert!(matches!(
            RayTracer::new(8, 8, config),
            Err(TracerError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_present_matches_serial_trace() {
        let mut tracer = RayTracer::new(17, 11, small_config()).unwrap();
        tracer.present();
        assert_eq!(tracer.frame_count(), 1);

        let camera = *tracer.camera();
        for row in 0..11 {
            for x in 0..17 {
                let ray = camera.generate_ray(17, 11, x, row);
                let expected = trace(tracer.scene(), &ray, 0, &tracer.config().trace);
                assert_eq!(tracer.pixel(x, row), Some(expected));
            }
        }
        assert_eq!(tracer.pixel(17, 0), None);
    }

    #[test]
    fn test_render_moves_light() {
        let mut tracer = RayTracer::new(8, 6, small_config()).unwrap();
        let before = tracer.scene().lights[0].position;
        tracer.render();
        tracer.render();
        assert_ne!(tracer.scene().lights[0].position, before);
        assert!((tracer.scene().light_phase() - 0.51).abs() < 1e-5);
        assert_eq!(tracer.frame_count(), 2);
    }

    #[test]
    fn test_empty_scene_is_background() {
        let config = TracerConfig {
            scene: SceneConfig {
                spheres: false,
                cuboid: false,
                pyramid: false,
                walls: false,
                ..SceneConfig::default()
            },
            ..small_config()
        };
        let mut tracer = RayTracer::new(6, 4, config).unwrap();
        tracer.render();
        for row in 0..4 {
            for x in 0..6 {
                assert_eq!(tracer.pixel(x, row), Some(Vec3::ZERO));
            }
        }
    }

    #[test]
    fn test_copy_buffer_row_order() {
        let mut tracer = RayTracer::new(4, 4, small_config()).unwrap();
        tracer.present();
        let top = kiln_core::color_to_bgr(tracer.pixel(0, 0).unwrap());
        let bottom = kiln_core::color_to_bgr(tracer.pixel(0, 3).unwrap());

        let mut bytes = vec![0u8; 4 * 4 * 3];
        tracer
            .copy_buffer(&mut CopyTarget::packed(&mut bytes, 4, 4))
            .unwrap();
        assert_eq!(bytes[0..3], top);
        assert_eq!(bytes[36..39], bottom);

        tracer.config.row_order = RowOrder::BottomUp;
        tracer
            .copy_buffer(&mut CopyTarget::packed(&mut bytes, 4, 4))
            .unwrap();
        assert_eq!(bytes[0..3], bottom);
    }

    #[test]
    fn test_copy_buffer_rejects_narrow_pitch() {
        let tracer = RayTracer::new(4, 4, small_config()).unwrap();
        let mut bytes = vec![0u8; 64];
        assert!(matches!(
            tracer.copy_buffer(&mut CopyTarget::new(&mut bytes, 4, 4, 6)),
            Err(kiln_core::CopyError::PitchTooSmall { pitch: 6, width: 4 })
        ));
    }
}

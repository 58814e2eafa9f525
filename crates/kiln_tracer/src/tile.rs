//! Tile partitioning for parallel present.
//!
//! The image is cut into a fixed grid of rectangles that are rendered
//! independently and written back to disjoint parts of the canvas.

use kiln_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::{TracerError, TracerResult};
use crate::scene::Scene;
use crate::trace::{trace, TraceConfig};

/// A rectangular region of the image. `y` counts rows from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in dispatch order
    pub index: usize,
}

impl Tile {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Rows × columns of the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileGrid {
    pub rows: u32,
    pub cols: u32,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self { rows: 2, cols: 4 }
    }
}

impl TileGrid {
    pub fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split an image into at most `grid.rows * grid.cols` tiles, row-major.
///
/// Segments are rounded up and clamped to the image so a remainder row or
/// column is always covered. Tiles that would start past the edge are dropped.
pub fn generate_tiles(width: u32, height: u32, grid: TileGrid) -> TracerResult<Vec<Tile>> {
    if grid.is_empty() {
        return Err(TracerError::InvalidGrid {
            rows: grid.rows,
            cols: grid.cols,
        });
    }

    let x_seg = width.div_ceil(grid.cols);
    let y_seg = height.div_ceil(grid.rows);

    let mut tiles = Vec::with_capacity(grid.len());
    for row in 0..grid.rows {
        let y_start = row * y_seg;
        let y_end = ((row + 1) * y_seg).min(height);
        if y_start >= y_end {
            continue;
        }
        for col in 0..grid.cols {
            let x_start = col * x_seg;
            let x_end = ((col + 1) * x_seg).min(width);
            if x_start >= x_end {
                continue;
            }
            let index = tiles.len();
            tiles.push(Tile::new(x_start, y_start, x_end - x_start, y_end - y_start, index));
        }
    }
    Ok(tiles)
}

/// Check that `tiles` cover every pixel of the image exactly once.
pub fn validate_tiles(tiles: &[Tile], width: u32, height: u32) -> TracerResult<()> {
    let mut covered = vec![false; width as usize * height as usize];
    for tile in tiles {
        for y in tile.y..tile.y + tile.height {
            for x in tile.x..tile.x + tile.width {
                if x >= width || y >= height {
                    return Err(TracerError::TileOverlap { x, y });
                }
                let slot = &mut covered[y as usize * width as usize + x as usize];
                if *slot {
                    return Err(TracerError::TileOverlap { x, y });
                }
                *slot = true;
            }
        }
    }

    match covered.iter().position(|&c| !c) {
        Some(i) => Err(TracerError::TileGap {
            x: (i % width as usize) as u32,
            y: (i / width as usize) as u32,
        }),
        None => Ok(()),
    }
}

/// Trace every pixel of `tile`, returning row-major colors for the tile only.
pub fn render_tile(
    tile: &Tile,
    scene: &Scene,
    camera: &Camera,
    image_width: u32,
    image_height: u32,
    config: &TraceConfig,
) -> Vec<Vec3> {
    let mut colors = Vec::with_capacity(tile.pixel_count());
    for row in tile.y..tile.y + tile.height {
        for x in tile.x..tile.x + tile.width {
            let ray = camera.generate_ray(image_width, image_height, x, row);
            colors.push(trace(scene, &ray, 0, config));
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_default_grid_even_split() {
        let tiles = generate_tiles(800, 600, TileGrid::default()).unwrap();
        assert_eq!(tiles.len(), 8);
        assert!(tiles.iter().all(|t| t.width == 200 && t.height == 300));
        assert_eq!(tiles[5].x, 200);
        assert_eq!(tiles[5].y, 300);
        assert!(tiles.iter().enumerate().all(|(i, t)| t.index == i));
        validate_tiles(&tiles, 800, 600).unwrap();
    }

    #[test]
    fn test_remainder_is_covered() {
        let tiles = generate_tiles(803, 601, TileGrid::default()).unwrap();
        validate_tiles(&tiles, 803, 601).unwrap();
        let last = tiles.last().unwrap();
        assert_eq!(last.x + last.width, 803);
        assert_eq!(last.y + last.height, 601);
    }

    #[test]
    fn test_small_image_drops_empty_tiles() {
        // Three columns are enough for three pixels
        let tiles = generate_tiles(3, 1, TileGrid::default()).unwrap();
        assert_eq!(tiles.len(), 3);
        validate_tiles(&tiles, 3, 1).unwrap();
    }

    #[test]
    fn test_zero_grid_rejected() {
        let grid = TileGrid { rows: 0, cols: 4 };
        assert!(matches!(
            generate_tiles(10, 10, grid),
            Err(TracerError::InvalidGrid { rows: 0, cols: 4 })
        ));
    }

    #[test]
    fn test_random_grids_cover_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let width = rng.gen_range(1..200);
            let height = rng.gen_range(1..200);
            let grid = TileGrid {
                rows: rng.gen_range(1..12),
                cols: rng.gen_range(1..12),
            };
            let tiles = generate_tiles(width, height, grid).unwrap();
            assert!(tiles.len() <= grid.len());
            validate_tiles(&tiles, width, height).unwrap();
        }
    }

    #[test]
    fn test_validate_catches_overlap_and_gap() {
        let overlap = [Tile::new(0, 0, 3, 2, 0), Tile::new(2, 0, 2, 2, 1)];
        assert!(matches!(
            validate_tiles(&overlap, 4, 2),
            Err(TracerError::TileOverlap { x: 2, y: 0 })
        ));

        let gap = [Tile::new(0, 0, 2, 2, 0), Tile::new(3, 0, 1, 2, 1)];
        assert!(matches!(
            validate_tiles(&gap, 4, 2),
            Err(TracerError::TileGap { x: 2, y: 0 })
        ));
    }

    #[test]
    fn test_render_tile_size() {
        let scene = Scene::demo(&crate::scene::SceneConfig::default());
        let camera = Camera::default();
        let tile = Tile::new(4, 2, 3, 2, 0);
        let colors = render_tile(&tile, &scene, &camera, 16, 8, &TraceConfig::default());
        assert_eq!(colors.len(), 6);
        assert!(colors
            .iter()
            .all(|c| c.min_element() >= 0.0 && c.max_element() <= 1.0));
    }
}

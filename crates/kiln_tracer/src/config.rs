use kiln_core::RowOrder;
use serde::{Deserialize, Serialize};

use crate::scene::SceneConfig;
use crate::tile::TileGrid;
use crate::trace::TraceConfig;

/// Ray tracer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    pub trace: TraceConfig,

    /// Tile grid; one worker thread per tile
    pub tiles: TileGrid,

    /// Vertical field of view in degrees, clamped to [10, 179.99]
    pub fov_degrees: f32,

    /// Row direction of the copy-out buffer
    pub row_order: RowOrder,

    pub scene: SceneConfig,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            trace: TraceConfig::default(),
            tiles: TileGrid::default(),
            fov_degrees: 30.0,
            row_order: RowOrder::TopDown,
            scene: SceneConfig::default(),
        }
    }
}

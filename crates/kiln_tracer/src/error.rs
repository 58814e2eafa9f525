use thiserror::Error;

/// Errors that can occur while building or driving the ray tracer.
#[derive(Error, Debug)]
pub enum TracerError {
    #[error("Invalid frame size {width}x{height}")]
    ZeroSize { width: u32, height: u32 },

    #[error("Invalid tile grid {rows}x{cols}")]
    InvalidGrid { rows: u32, cols: u32 },

    #[error("Pixel ({x}, {y}) is covered by more than one tile")]
    TileOverlap { x: u32, y: u32 },

    #[error("Pixel ({x}, {y}) is not covered by any tile")]
    TileGap { x: u32, y: u32 },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type TracerResult<T> = Result<T, TracerError>;

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur while building or driving the rasterizer.
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Invalid frame size {width}x{height}")]
    ZeroSize { width: u32, height: u32 },

    #[error("Failed to allocate frame buffers: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u8, vertex_count: usize },

    #[error("Texture {width}x{height} needs {expected} texels, got {actual}")]
    TextureSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type RasterResult<T> = Result<T, RasterError>;

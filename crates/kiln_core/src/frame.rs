//! The render trigger seam shared by the rasterizer and the ray tracer.

use crate::copy::{CopyResult, CopyTarget};

/// A renderer that produces one frame per call to [`FrameSource::render`].
///
/// Animation state (camera orbit, light orbit) lives inside the implementor
/// and advances by a fixed step on every call.
pub trait FrameSource: Send {
    /// Internal resolution in pixels, fixed for the lifetime of the source.
    fn dimensions(&self) -> (u32, u32);

    /// Advance one frame.
    fn render(&mut self);

    /// Copy the last rendered frame into `target` with point sampling.
    fn copy_buffer(&self, target: &mut CopyTarget<'_>) -> CopyResult<()>;
}

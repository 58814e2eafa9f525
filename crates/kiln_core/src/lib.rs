//! kiln core - the pieces both renderers share.
//!
//! This crate provides:
//!
//! - **Color helpers**: clamping and float → byte conversion
//! - **Copy-out**: point-sampled resampling of a render target into a
//!   3-byte-per-pixel B, G, R destination buffer
//! - **`FrameSource`**: the "advance one frame" seam both pipelines implement
//! - **`RenderThread`**: a background render loop with a single-slot handoff
//!
//! # Example
//!
//! ```ignore
//! use kiln_core::{CopyTarget, FrameSource, RenderThread};
//!
//! let thread = RenderThread::spawn(tracer)?;
//! let mut canvas = vec![0u8; pitch * height];
//! if thread.try_copy(&mut canvas, pitch)? {
//!     // blit canvas to the window
//! }
//! ```

pub mod color;
pub mod copy;
pub mod frame;
pub mod render_thread;

// Re-export commonly used types
pub use color::{clamp_color, color_to_bgr, color_to_byte};
pub use copy::{copy_point_sampled, CopyError, CopyResult, CopyTarget, RowOrder};
pub use frame::FrameSource;
pub use render_thread::{RenderThread, RenderThreadError, RenderThreadResult};

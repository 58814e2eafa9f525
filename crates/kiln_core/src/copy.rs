//! Point-sampled copy-out from an internal render target to a byte buffer.
//!
//! This is the only handoff to a presentation layer. The destination is a
//! 24-bit bitmap: 3 bytes per pixel in B, G, R order, rows `pitch` bytes apart.

use kiln_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::color_to_bgr;

/// Errors that can occur while copying a frame out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    #[error("Empty copy: source {src_width}x{src_height}, destination {dst_width}x{dst_height}")]
    EmptyImage {
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    },

    #[error("Pitch {pitch} is smaller than a {width} pixel row ({} bytes)", width * 3)]
    PitchTooSmall { pitch: usize, width: u32 },

    #[error("Destination holds {actual} bytes, {required} required")]
    DestinationTooSmall { required: usize, actual: usize },
}

pub type CopyResult<T> = Result<T, CopyError>;

/// Row direction of the destination buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrder {
    /// Destination row 0 is the top of the image (screen order).
    #[default]
    TopDown,
    /// Destination row 0 is the bottom of the image (bottom-up bitmap).
    BottomUp,
}

/// A destination byte buffer with its pixel dimensions and row pitch.
pub struct CopyTarget<'a> {
    pub bytes: &'a mut [u8],
    pub width: u32,
    pub height: u32,
    pub pitch: usize,
}

impl<'a> CopyTarget<'a> {
    pub fn new(bytes: &'a mut [u8], width: u32, height: u32, pitch: usize) -> Self {
        Self {
            bytes,
            width,
            height,
            pitch,
        }
    }

    /// A tightly packed target, `pitch = width * 3`.
    pub fn packed(bytes: &'a mut [u8], width: u32, height: u32) -> Self {
        Self::new(bytes, width, height, width as usize * 3)
    }

    /// Number of bytes the target must hold: every full row but the last, plus the last row's pixels.
    pub fn required_len(&self) -> usize {
        if self.height == 0 {
            return 0;
        }
        self.pitch * (self.height as usize - 1) + self.width as usize * 3
    }

    /// Check pitch and length against the pixel dimensions.
    pub fn validate(&self) -> CopyResult<()> {
        if self.pitch < self.width as usize * 3 {
            return Err(CopyError::PitchTooSmall {
                pitch: self.pitch,
                width: self.width,
            });
        }
        let required = self.required_len();
        if self.bytes.len() < required {
            return Err(CopyError::DestinationTooSmall {
                required,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }
}

/// Nearest-neighbour source coordinate for destination coordinate `d`.
#[inline]
fn nearest(d: u32, dst_size: u32, src_size: u32) -> u32 {
    let s = (d as f32 / dst_size as f32 * src_size as f32 + 0.5) as u32;
    s.min(src_size - 1)
}

/// Resample a `src_width` x `src_height` image into `target`.
///
/// `sample(x, y)` returns the source color with row 0 at the top.
pub fn copy_point_sampled<F>(
    src_width: u32,
    src_height: u32,
    order: RowOrder,
    target: &mut CopyTarget<'_>,
    sample: F,
) -> CopyResult<()>
where
    F: Fn(u32, u32) -> Vec3,
{
    if src_width == 0 || src_height == 0 || target.width == 0 || target.height == 0 {
        return Err(CopyError::EmptyImage {
            src_width,
            src_height,
            dst_width: target.width,
            dst_height: target.height,
        });
    }
    target.validate()?;

    for h in 0..target.height {
        let v = nearest(h, target.height, src_height);
        let row = match order {
            RowOrder::TopDown => h,
            RowOrder::BottomUp => target.height - 1 - h,
        } as usize;
        let row_start = row * target.pitch;

        for w in 0..target.width {
            let u = nearest(w, target.width, src_width);
            let index = row_start + w as usize * 3;
            target.bytes[index..index + 3].copy_from_slice(&color_to_bgr(sample(u, v)));
        }
    }

    Ok(())
}

//! Output merge: the per-fragment test chain and blend.
//!
//! Order is fixed: alpha, scissor, stencil, depth, then blend. The first
//! failing test discards the fragment.

use std::ops::AddAssign;

use crate::framebuffer::FrameBuffer;
use crate::rasterize::Fragment;
use crate::scissor::ScissorStack;

/// Fragments with alpha below this are discarded.
pub const ALPHA_CUTOFF: f32 = 0.001;

/// What happened to a single fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Written,
    Clipped,
    AlphaRejected,
    ScissorRejected,
    StencilRejected,
    DepthRejected,
}

/// Per-frame merge counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub written: usize,
    pub clipped: usize,
    pub alpha_rejected: usize,
    pub scissor_rejected: usize,
    pub stencil_rejected: usize,
    pub depth_rejected: usize,
}

impl MergeStats {
    pub fn record(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Written => self.written += 1,
            MergeOutcome::Clipped => self.clipped += 1,
            MergeOutcome::AlphaRejected => self.alpha_rejected += 1,
            MergeOutcome::ScissorRejected => self.scissor_rejected += 1,
            MergeOutcome::StencilRejected => self.stencil_rejected += 1,
            MergeOutcome::DepthRejected => self.depth_rejected += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.written
            + self.clipped
            + self.alpha_rejected
            + self.scissor_rejected
            + self.stencil_rejected
            + self.depth_rejected
    }
}

impl AddAssign for MergeStats {
    fn add_assign(&mut self, rhs: Self) {
        self.written += rhs.written;
        self.clipped += rhs.clipped;
        self.alpha_rejected += rhs.alpha_rejected;
        self.scissor_rejected += rhs.scissor_rejected;
        self.stencil_rejected += rhs.stencil_rejected;
        self.depth_rejected += rhs.depth_rejected;
    }
}

/// Run one fragment through the test chain and write it if it survives.
pub fn merge_fragment(
    fragment: &Fragment,
    scissors: &ScissorStack,
    blend: bool,
    frame: &mut FrameBuffer,
) -> MergeOutcome {
    let Some(index) = frame.index(fragment.x, fragment.y) else {
        return MergeOutcome::Clipped;
    };

    if fragment.color.w < ALPHA_CUTOFF {
        return MergeOutcome::AlphaRejected;
    }

    if !scissors.passes(fragment.x, fragment.y) {
        return MergeOutcome::ScissorRejected;
    }

    if let Some(reference) = fragment.stencil_ref {
        if reference <= frame.stencil[index] {
            return MergeOutcome::StencilRejected;
        }
        frame.stencil[index] = reference;
    }

    let z = fragment.z;
    if !(z >= 0.0 && z < frame.depth[index]) {
        return MergeOutcome::DepthRejected;
    }
    frame.depth[index] = z;

    let src = fragment.color;
    let dst = &mut frame.color[index];
    if blend {
        // Straight alpha; destination alpha is kept
        let rgb = dst.truncate().lerp(src.truncate(), src.w);
        *dst = rgb.extend(dst.w);
    } else {
        *dst = src;
    }
    MergeOutcome::Written
}

/// Merge a batch of shaded fragments in order.
pub fn output_merge(
    fragments: &[Fragment],
    scissors: &ScissorStack,
    blend: bool,
    frame: &mut FrameBuffer,
) -> MergeStats {
    let mut stats = MergeStats::default();
    for fragment in fragments {
        stats.record(merge_fragment(fragment, scissors, blend, frame));
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::{ClearColor, ClearState};
    use crate::scissor::ScissorRect;
    use kiln_math::{Vec2, Vec4};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn cleared(width: u32, height: u32) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height).unwrap();
        fb.clear(&ClearState {
            color: ClearColor::Solid(Vec4::new(0.0, 0.0, 0.0, 1.0)),
            depth: 1.0,
            stencil: 0,
        });
        fb
    }

    fn frag(x: u32, y: u32, z: f32, color: Vec4) -> Fragment {
        Fragment {
            x,
            y,
            z,
            color,
            uv: Vec2::ZERO,
            stencil_ref: None,
        }
    }

    #[test]
    fn test_alpha_test_runs_first() {
        let mut fb = cleared(2, 2);
        let mut scissors = ScissorStack::new();
        scissors.push(ScissorRect::new(1, 1, 1, 1));

        let mut f = frag(0, 0, 0.5, Vec4::new(1.0, 0.0, 0.0, 0.0005));
        f.stencil_ref = Some(1);
        assert_eq!(merge_fragment(&f, &scissors, true, &mut fb), MergeOutcome::AlphaRejected);
        // Stencil never touched
        assert_eq!(fb.stencil_at(0, 0), Some(0));
    }

    #[test]
    fn test_scissor_before_stencil() {
        let mut fb = cleared(4, 4);
        let mut scissors = ScissorStack::new();
        scissors.push(ScissorRect::new(2, 2, 2, 2));

        let mut outside = frag(0, 0, 0.5, Vec4::ONE);
        outside.stencil_ref = Some(5);
        assert_eq!(merge_fragment(&outside, &scissors, false, &mut fb), MergeOutcome::ScissorRejected);
        assert_eq!(fb.stencil_at(0, 0), Some(0));

        let mut inside = frag(3, 3, 0.5, Vec4::ONE);
        inside.stencil_ref = Some(5);
        assert_eq!(merge_fragment(&inside, &scissors, false, &mut fb), MergeOutcome::Written);
        assert_eq!(fb.stencil_at(3, 3), Some(5));
    }

    #[test]
    fn test_stencil_strictly_greater_then_stores() {
        let mut fb = cleared(1, 1);
        let scissors = ScissorStack::new();

        let mut f = frag(0, 0, 0.9, Vec4::ONE);
        f.stencil_ref = Some(3);
        assert_eq!(merge_fragment(&f, &scissors, false, &mut fb), MergeOutcome::Written);
        assert_eq!(fb.stencil_at(0, 0), Some(3));

        // Equal reference fails even though it is nearer
        f.z = 0.1;
        assert_eq!(merge_fragment(&f, &scissors, false, &mut fb), MergeOutcome::StencilRejected);

        // A passing stencil is stored even when depth then fails
        f.stencil_ref = Some(4);
        f.z = 0.95;
        assert_eq!(merge_fragment(&f, &scissors, false, &mut fb), MergeOutcome::DepthRejected);
        assert_eq!(fb.stencil_at(0, 0), Some(4));

        // No reference skips the stencil test entirely
        let plain = frag(0, 0, 0.5, Vec4::ONE);
        assert_eq!(merge_fragment(&plain, &scissors, false, &mut fb), MergeOutcome::Written);
    }

    #[test]
    fn test_depth_rejects_negative_and_equal() {
        let mut fb = cleared(1, 1);
        let scissors = ScissorStack::new();
        assert_eq!(
            merge_fragment(&frag(0, 0, -0.01, Vec4::ONE), &scissors, false, &mut fb),
            MergeOutcome::DepthRejected
        );
        assert_eq!(
            merge_fragment(&frag(0, 0, 1.0, Vec4::ONE), &scissors, false, &mut fb),
            MergeOutcome::DepthRejected
        );
        assert_eq!(
            merge_fragment(&frag(0, 0, f32::NAN, Vec4::ONE), &scissors, false, &mut fb),
            MergeOutcome::DepthRejected
        );
        assert_eq!(
            merge_fragment(&frag(0, 0, 0.0, Vec4::ONE), &scissors, false, &mut fb),
            MergeOutcome::Written
        );
        assert_eq!(fb.depth_at(0, 0), Some(0.0));
    }

    #[test]
    fn test_depth_monotonicity() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut fb = cleared(4, 4);
        let scissors = ScissorStack::new();
        let mut expected = [1.0f32; 16];

        let fragments: Vec<Fragment> = (0..500)
            .map(|_| {
                let x = rng.gen_range(0..4);
                let y = rng.gen_range(0..4);
                frag(x, y, rng.gen_range(-0.2..1.2), Vec4::ONE)
            })
            .collect();
        for f in &fragments {
            if f.z >= 0.0 {
                let i = (f.y * 4 + f.x) as usize;
                expected[i] = expected[i].min(f.z);
            }
        }

        let stats = output_merge(&fragments, &scissors, true, &mut fb);
        assert_eq!(stats.total(), 500);
        for (stored, want) in fb.depth.iter().zip(expected) {
            assert_eq!(*stored, want);
            assert!(*stored <= 1.0);
        }
    }

    #[test]
    fn test_blend_straight_alpha_keeps_dst_alpha() {
        let mut fb = cleared(1, 1);
        fb.color[0] = Vec4::new(0.0, 0.0, 1.0, 0.25);
        let scissors = ScissorStack::new();

        let f = frag(0, 0, 0.5, Vec4::new(1.0, 0.0, 0.0, 0.5));
        merge_fragment(&f, &scissors, true, &mut fb);
        assert_eq!(fb.color[0], Vec4::new(0.5, 0.0, 0.5, 0.25));
    }

    #[test]
    fn test_replace_without_blend() {
        let mut fb = cleared(1, 1);
        let scissors = ScissorStack::new();
        let f = frag(0, 0, 0.5, Vec4::new(1.0, 0.0, 0.0, 0.5));
        merge_fragment(&f, &scissors, false, &mut fb);
        assert_eq!(fb.color[0], Vec4::new(1.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn test_out_of_bounds_clipped() {
        let mut fb = cleared(2, 2);
        let scissors = ScissorStack::new();
        assert_eq!(
            merge_fragment(&frag(2, 0, 0.5, Vec4::ONE), &scissors, false, &mut fb),
            MergeOutcome::Clipped
        );
    }
}

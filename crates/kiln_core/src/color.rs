//! Color clamping and byte conversion.

use kiln_math::Vec3;

/// Clamp every channel to [0, 1].
///
/// Applying it twice gives the same result as applying it once.
#[inline]
pub fn clamp_color(color: Vec3) -> Vec3 {
    color.clamp(Vec3::ZERO, Vec3::ONE)
}

/// Convert a linear channel value to a byte, clamping out-of-range input.
///
/// NaN maps to 0.
#[inline]
pub fn color_to_byte(value: f32) -> u8 {
    let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    (clamped * 255.0 + 0.5) as u8
}

/// Convert an RGB color to the B, G, R byte triple used by the copy-out.
#[inline]
pub fn color_to_bgr(color: Vec3) -> [u8; 3] {
    [
        color_to_byte(color.z),
        color_to_byte(color.y),
        color_to_byte(color.x),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_idempotent() {
        let samples = [
            Vec3::new(-1.0, 0.5, 2.0),
            Vec3::new(0.0, 1.0, 0.25),
            Vec3::new(10.0, -10.0, 0.999),
        ];
        for c in samples {
            let once = clamp_color(c);
            assert_eq!(clamp_color(once), once);
            assert!(once.min_element() >= 0.0 && once.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_color_to_byte_range() {
        assert_eq!(color_to_byte(0.0), 0);
        assert_eq!(color_to_byte(1.0), 255);
        assert_eq!(color_to_byte(-3.0), 0);
        assert_eq!(color_to_byte(7.5), 255);
        assert_eq!(color_to_byte(f32::NAN), 0);
        assert_eq!(color_to_byte(0.5), 128);
    }

    #[test]
    fn test_color_to_bgr_order() {
        let bgr = color_to_bgr(Vec3::new(1.0, 0.0, 0.5));
        assert_eq!(bgr, [128, 0, 255]);
    }
}

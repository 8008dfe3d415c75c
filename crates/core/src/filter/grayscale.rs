use crate::shared::constants::RGBA_CHANNELS;

// BT.601 luma weights in 8-bit fixed point (77 + 150 + 29 = 256),
// matching OpenCV's RGBA2GRAY rounding to within one level.
const LUMA_R: u32 = 77;
const LUMA_G: u32 = 150;
const LUMA_B: u32 = 29;

/// Convert RGBA pixels to single-channel intensity. Alpha is ignored.
pub fn rgba_to_gray(rgba: &[u8], gray: &mut [u8]) {
    debug_assert_eq!(rgba.len(), gray.len() * RGBA_CHANNELS);
    for (px, out) in rgba.chunks_exact(RGBA_CHANNELS).zip(gray.iter_mut()) {
        let lum =
            LUMA_R * u32::from(px[0]) + LUMA_G * u32::from(px[1]) + LUMA_B * u32::from(px[2]);
        *out = ((lum + 128) >> 8) as u8;
    }
}

/// Expand single-channel intensity to opaque RGBA.
pub fn gray_to_rgba(gray: &[u8], rgba: &mut [u8]) {
    debug_assert_eq!(rgba.len(), gray.len() * RGBA_CHANNELS);
    for (&v, px) in gray.iter().zip(rgba.chunks_exact_mut(RGBA_CHANNELS)) {
        px[0] = v;
        px[1] = v;
        px[2] = v;
        px[3] = 255;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn gray_of(r: u8, g: u8, b: u8) -> u8 {
        let rgba = [r, g, b, 255];
        let mut gray = [0u8];
        rgba_to_gray(&rgba, &mut gray);
        gray[0]
    }

    #[rstest]
    #[case([0, 0, 0], 0)]
    #[case([255, 255, 255], 255)]
    #[case([255, 0, 0], 77)]
    #[case([0, 255, 0], 149)]
    #[case([0, 0, 255], 29)]
    #[case([128, 128, 128], 128)]
    fn test_luma_weights(#[case] rgb: [u8; 3], #[case] expected: u8) {
        assert_eq!(gray_of(rgb[0], rgb[1], rgb[2]), expected);
    }

    #[test]
    fn test_alpha_does_not_affect_luma() {
        let opaque = [200u8, 50, 50, 255];
        let transparent = [200u8, 50, 50, 0];
        let mut a = [0u8];
        let mut b = [0u8];
        rgba_to_gray(&opaque, &mut a);
        rgba_to_gray(&transparent, &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_gray_to_rgba_replicates_and_sets_opaque() {
        let gray = [0u8, 128, 255];
        let mut rgba = [0u8; 12];
        gray_to_rgba(&gray, &mut rgba);
        assert_eq!(rgba, [0, 0, 0, 255, 128, 128, 128, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn test_multi_pixel_conversion() {
        // red then white
        let rgba = [255u8, 0, 0, 255, 255, 255, 255, 255];
        let mut gray = [0u8; 2];
        rgba_to_gray(&rgba, &mut gray);
        assert_eq!(gray, [77, 255]);
    }
}

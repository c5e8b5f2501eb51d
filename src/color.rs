//! Per-pixel color-matrix math for the color stage.
//!
//! A [`ColorMatrix`] is a 5×5 affine transform over the homogeneous channel
//! vector (R, G, B, A, 1), row-vector convention: `out = v · M`. Channels are
//! normalized to [0, 1] before the multiply and clamped back to [0, 255]
//! after — no wraparound. The alpha row/column is identity in both stock
//! matrices, so neither adjustment ever touches alpha.
//!
//! Reimplemented as explicit matrix multiplication rather than delegating to
//! a platform graphics API.

use image::RgbaImage;

/// Luminance weights used by the saturation matrix (ITU-R-like weighting).
const R_WEIGHT: f32 = 0.3086;
const G_WEIGHT: f32 = 0.6094;
const B_WEIGHT: f32 = 0.0820;

/// A 5×5 affine color transform. Pure value type; constructed fresh per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f32; 5]; 5]);

impl ColorMatrix {
    pub fn identity() -> Self {
        let mut m = [[0.0; 5]; 5];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        ColorMatrix(m)
    }

    /// Brightness/contrast matrix: contrast scales the RGB diagonal, the
    /// brightness delta (`brightness - 1.0`) rides in the translation row.
    /// Alpha stays on the identity.
    pub fn brightness_contrast(brightness: f32, contrast: f32) -> Self {
        let b = brightness - 1.0;
        let mut m = Self::identity().0;
        for channel in 0..3 {
            m[channel][channel] = contrast;
            m[4][channel] = b;
        }
        ColorMatrix(m)
    }

    /// Saturation matrix built from the luminance weights.
    ///
    /// s = 1 is the identity; s = 0 collapses every channel to luminance
    /// gray; s = -1 complements colors relative to luminance. The range is
    /// conceptually [-1, +1] but deliberately not enforced.
    pub fn saturation(s: f32) -> Self {
        let a = (1.0 - s) * R_WEIGHT + s;
        let b = (1.0 - s) * R_WEIGHT;
        let c = (1.0 - s) * R_WEIGHT;
        let d = (1.0 - s) * G_WEIGHT;
        let e = (1.0 - s) * G_WEIGHT + s;
        let f = (1.0 - s) * G_WEIGHT;
        let g = (1.0 - s) * B_WEIGHT;
        let h = (1.0 - s) * B_WEIGHT;
        let i = (1.0 - s) * B_WEIGHT + s;
        ColorMatrix([
            [a, b, c, 0.0, 0.0],
            [d, e, f, 0.0, 0.0],
            [g, h, i, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Transform one RGBA8 pixel through the matrix.
    pub fn transform(&self, pixel: [u8; 4]) -> [u8; 4] {
        let v = [
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
            pixel[3] as f32 / 255.0,
            1.0,
        ];

        let mut out = [0u8; 4];
        for (channel, slot) in out.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (i, value) in v.iter().enumerate() {
                acc += value * self.0[i][channel];
            }
            *slot = (acc * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        out
    }

    /// Apply the matrix to every pixel of the buffer in place.
    pub fn apply(&self, image: &mut RgbaImage) {
        for pixel in image.pixels_mut() {
            pixel.0 = self.transform(pixel.0);
        }
    }
}

/// Apply the gamma curve `v' = v^(1/gamma)` to the RGB channels in place.
///
/// gamma = 1 is the identity. Alpha is left untouched. Evaluated through a
/// 256-entry lookup table since the curve only depends on the channel value.
pub fn apply_gamma(image: &mut RgbaImage, gamma: f32) {
    if gamma == 1.0 {
        return;
    }
    let exponent = 1.0 / gamma;
    let mut lut = [0u8; 256];
    for (v, slot) in lut.iter_mut().enumerate() {
        let normalized = v as f32 / 255.0;
        *slot = (normalized.powf(exponent) * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    for pixel in image.pixels_mut() {
        pixel.0[0] = lut[pixel.0[0] as usize];
        pixel.0[1] = lut[pixel.0[1] as usize];
        pixel.0[2] = lut[pixel.0[2] as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn diff(a: u8, b: u8) -> i32 {
        (a as i32 - b as i32).abs()
    }

    #[test]
    fn identity_matrix_preserves_pixels() {
        let m = ColorMatrix::identity();
        assert_eq!(m.transform([10, 200, 30, 128]), [10, 200, 30, 128]);
    }

    #[test]
    fn bcg_neutral_parameters_are_identity() {
        let m = ColorMatrix::brightness_contrast(1.0, 1.0);
        for px in [[0, 0, 0, 255], [255, 255, 255, 0], [17, 99, 201, 42]] {
            let out = m.transform(px);
            for i in 0..4 {
                assert!(diff(out[i], px[i]) <= 1, "{out:?} vs {px:?}");
            }
        }
    }

    #[test]
    fn brightness_shifts_channels_up() {
        let m = ColorMatrix::brightness_contrast(1.4, 1.0);
        let out = m.transform([100, 100, 100, 200]);
        // 100/255 + 0.4 = 0.792 → 202
        assert!(diff(out[0], 202) <= 1);
        assert_eq!(out[3], 200);
    }

    #[test]
    fn contrast_scales_channels() {
        let m = ColorMatrix::brightness_contrast(1.0, 0.5);
        let out = m.transform([200, 200, 200, 255]);
        assert!(diff(out[0], 100) <= 1);
    }

    #[test]
    fn bcg_clamps_instead_of_wrapping() {
        let m = ColorMatrix::brightness_contrast(3.0, 1.0);
        assert_eq!(m.transform([200, 200, 200, 255]), [255, 255, 255, 255]);
        let m = ColorMatrix::brightness_contrast(-2.0, 1.0);
        assert_eq!(m.transform([50, 50, 50, 255]), [0, 0, 0, 255]);
    }

    #[test]
    fn saturation_one_is_identity() {
        let m = ColorMatrix::saturation(1.0);
        for px in [[255, 0, 0, 255], [12, 230, 88, 77]] {
            let out = m.transform(px);
            for i in 0..4 {
                assert!(diff(out[i], px[i]) <= 1, "{out:?} vs {px:?}");
            }
        }
    }

    #[test]
    fn saturation_zero_collapses_to_luminance_gray() {
        let m = ColorMatrix::saturation(0.0);
        let out = m.transform([255, 0, 0, 255]);
        // Pure red → rWeight on every channel: 0.3086 * 255 ≈ 79
        assert!(diff(out[0], 79) <= 1);
        assert_eq!(out[0], out[1]);
        assert_eq!(out[1], out[2]);
        assert_eq!(out[3], 255);
    }

    #[test]
    fn saturation_negative_one_complements_relative_to_luminance() {
        let m = ColorMatrix::saturation(-1.0);
        let out = m.transform([255, 0, 0, 255]);
        // Per the matrix with s = -1: red contribution to its own channel is
        // 2*rW - 1 < 0 (clamps to 0), to green/blue it is 2*rW ≈ 0.617 → 157.
        assert_eq!(out[0], 0);
        assert!(diff(out[1], 157) <= 1);
        assert!(diff(out[2], 157) <= 1);
        // Not a literal inversion, which would be (0, 255, 255)
        assert!(out[1] < 250);
    }

    #[test]
    fn matrix_apply_never_touches_alpha() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([90, 140, 20, 123]));
        ColorMatrix::brightness_contrast(1.7, 0.4).apply(&mut img);
        ColorMatrix::saturation(-0.5).apply(&mut img);
        for pixel in img.pixels() {
            assert_eq!(pixel.0[3], 123);
        }
    }

    #[test]
    fn gamma_one_is_identity() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([33, 66, 99, 210]));
        apply_gamma(&mut img, 1.0);
        assert_eq!(img.get_pixel(0, 0).0, [33, 66, 99, 210]);
    }

    #[test]
    fn gamma_above_one_brightens_midtones() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([64, 64, 64, 255]));
        apply_gamma(&mut img, 2.0);
        let out = img.get_pixel(0, 0).0;
        // (64/255)^0.5 ≈ 0.501 → 127
        assert!(diff(out[0], 127) <= 1);
        assert_eq!(out[3], 255);
    }

    #[test]
    fn gamma_preserves_black_and_white() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        apply_gamma(&mut img, 2.2);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]);
    }
}

//! Rounded-corner masking with border stroke and optional drop shadow.
//!
//! A linear four-step pipeline over one source buffer:
//!
//! 1. build the rounded clip path (effective radius = 2 × requested);
//! 2. stroke an inset border path on a clone of the source;
//! 3. composite that clone over a back-color canvas, masked by the path,
//!    replacing the square corners with flat back color;
//! 4. optionally render a path-gradient shadow on an enlarged canvas and
//!    composite the card over it.
//!
//! The doubled radius and the 1px border inset are visual-tuning constants,
//! not contracts.

use crate::geometry::{RoundedRect, blend_over, lerp};
use image::{Rgba, RgbaImage};

/// Shadow fill: dark gray at alpha 180, held from 10% depth to the center.
const SHADOW_COLOR: Rgba<u8> = Rgba([169, 169, 169, 180]);
/// Relative depth at which the gradient reaches full shadow color.
const SHADOW_RAMP: f32 = 0.1;

/// Everything the composite stage needs for one call. Consumed per call; no
/// independent lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedMaskSpec {
    /// Requested corner radius in pixels; doubled before use. Zero or
    /// negative degenerates to a plain rectangle — never an error.
    pub radius: i32,
    /// Fill for the clipped corners and any shadow canvas.
    pub back_color: Rgba<u8>,
    /// Border stroke width; 0 disables the border pass.
    pub border_width: u32,
    pub border_color: Rgba<u8>,
    /// Render the drop shadow on an enlarged canvas.
    pub shadow: bool,
    /// Canvas growth (both axes) and shadow displacement, in pixels.
    pub shadow_offset: u32,
}

impl Default for RoundedMaskSpec {
    fn default() -> Self {
        RoundedMaskSpec {
            radius: 0,
            back_color: Rgba([255, 255, 255, 255]),
            border_width: 0,
            border_color: Rgba([0, 0, 0, 255]),
            shadow: false,
            shadow_offset: 15,
        }
    }
}

/// Run the composite stage, producing a new buffer. Dimensions match the
/// source, plus `shadow_offset` on each axis when the shadow is enabled.
pub fn round_corners(source: &RgbaImage, spec: &RoundedMaskSpec) -> RgbaImage {
    let (width, height) = source.dimensions();
    let effective_radius = spec.radius.max(0).saturating_mul(2) as f32;
    let clip = RoundedRect::new(0.0, 0.0, width as f32, height as f32, effective_radius);

    let bordered = stroke_border(source, &clip, spec);
    let card = composite_over_back(&bordered, &clip, spec.back_color);

    if !spec.shadow {
        return card;
    }
    shadow_composite(&card, &clip, spec)
}

/// Step 2: clone the source and stroke the inset border path, clipped to the
/// outer path. The inset is 1px per side with the corner diameter reduced
/// by 2, i.e. the path radius drops by 1.
fn stroke_border(source: &RgbaImage, clip: &RoundedRect, spec: &RoundedMaskSpec) -> RgbaImage {
    let mut out = source.clone();
    if spec.border_width == 0 {
        return out;
    }
    let border_path = clip.inset(1.0);
    let stroke_width = spec.border_width as f32;

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let stroke = border_path.stroke_coverage(px, py, stroke_width);
        if stroke > 0.0 {
            let masked = stroke * clip.coverage(px, py);
            *pixel = blend_over(*pixel, spec.border_color, masked);
        }
    }
    out
}

/// Step 3: fill a same-size canvas with the back color and draw the bordered
/// image masked by the clip path. Square corners outside the path end up as
/// flat back color.
fn composite_over_back(bordered: &RgbaImage, clip: &RoundedRect, back: Rgba<u8>) -> RgbaImage {
    let (width, height) = bordered.dimensions();
    let mut out = RgbaImage::from_pixel(width, height, back);

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let coverage = clip.coverage(x as f32 + 0.5, y as f32 + 0.5);
        if coverage > 0.0 {
            *pixel = blend_over(*pixel, *bordered.get_pixel(x, y), coverage);
        }
    }
    out
}

/// Step 4: enlarge the canvas by the shadow offset, fill with back color,
/// paint the gradient shadow under a path displaced by the offset, then
/// composite the card at the origin masked by its own path. The gradient
/// shows as a halo along the right and bottom edges of the card.
fn shadow_composite(card: &RgbaImage, clip: &RoundedRect, spec: &RoundedMaskSpec) -> RgbaImage {
    let (width, height) = card.dimensions();
    let offset = spec.shadow_offset;
    let mut out = RgbaImage::from_pixel(width + offset, height + offset, spec.back_color);

    let shadow_path = RoundedRect::new(
        offset as f32,
        offset as f32,
        width as f32,
        height as f32,
        clip.radius,
    );
    let depth_scale = shadow_path.max_inner_distance();

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let coverage = shadow_path.coverage(px, py);
        if coverage > 0.0 {
            let depth = (-shadow_path.signed_distance(px, py)).max(0.0) / depth_scale;
            *pixel = blend_over(*pixel, shadow_gradient(depth), coverage);
        }
    }

    for (x, y, pixel) in card.enumerate_pixels() {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let coverage = clip.coverage(px, py);
        if coverage > 0.0 {
            let dst = out.get_pixel_mut(x, y);
            *dst = blend_over(*dst, *pixel, coverage);
        }
    }
    out
}

/// Gradient color at a normalized interior depth (0 at the path edge, 1 at
/// the deepest interior point): transparent at the edge, ramping to the
/// shadow gray over the first 10% of depth and clamped beyond.
fn shadow_gradient(depth: f32) -> Rgba<u8> {
    let transparent = Rgba([SHADOW_COLOR.0[0], SHADOW_COLOR.0[1], SHADOW_COLOR.0[2], 0]);
    if depth <= 0.0 {
        transparent
    } else if depth < SHADOW_RAMP {
        lerp(transparent, SHADOW_COLOR, depth / SHADOW_RAMP)
    } else {
        SHADOW_COLOR
    }
}

//! Self-contained 2D geometry primitives for the composite stage.
//!
//! The rounded-rectangle clip path is expressed as a signed-distance
//! function rather than an arc-segment path: the distance gives us exact
//! containment tests, a one-pixel antialiased coverage ramp, stroke
//! evaluation (distance to the path edge), and the normalized interior depth
//! the shadow gradient runs on. No platform rendering surface involved.

use image::Rgba;

/// An axis-aligned rectangle with circular corners of a single radius.
///
/// `radius == 0` degenerates to a plain rectangle. Coordinates are in pixel
/// space; a pixel is sampled at its center (x + 0.5, y + 0.5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

impl RoundedRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Self {
        // An oversized radius degenerates the SDF; cap at the inradius.
        let radius = radius.clamp(0.0, width.min(height) / 2.0);
        RoundedRect {
            x,
            y,
            width,
            height,
            radius,
        }
    }

    /// Shrink the rectangle by `d` on every side, reducing the corner radius
    /// by the same amount (corner diameter shrinks by `2d`).
    pub fn inset(&self, d: f32) -> Self {
        RoundedRect::new(
            self.x + d,
            self.y + d,
            (self.width - 2.0 * d).max(0.0),
            (self.height - 2.0 * d).max(0.0),
            (self.radius - d).max(0.0),
        )
    }

    /// Signed distance from a point to the path: negative inside, zero on
    /// the edge, positive outside.
    pub fn signed_distance(&self, px: f32, py: f32) -> f32 {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let cx = self.x + half_w;
        let cy = self.y + half_h;

        let qx = (px - cx).abs() - (half_w - self.radius);
        let qy = (py - cy).abs() - (half_h - self.radius);

        let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
        let inside = qx.max(qy).min(0.0);
        outside + inside - self.radius
    }

    /// Antialiased coverage of the path at a pixel center: 1 fully inside,
    /// 0 fully outside, with a one-pixel ramp across the edge.
    pub fn coverage(&self, px: f32, py: f32) -> f32 {
        (0.5 - self.signed_distance(px, py)).clamp(0.0, 1.0)
    }

    /// Coverage of a stroked outline of the path, `width` pixels thick,
    /// centered on the edge.
    pub fn stroke_coverage(&self, px: f32, py: f32, width: f32) -> f32 {
        let dist = self.signed_distance(px, py).abs();
        (width / 2.0 + 0.5 - dist).clamp(0.0, 1.0)
    }

    /// Largest distance any interior point can be from the edge (the
    /// inradius). Normalizes the shadow gradient's depth axis.
    pub fn max_inner_distance(&self) -> f32 {
        (self.width.min(self.height) / 2.0).max(1.0)
    }
}

/// Source-over composite of `src` onto `dst`, with `src`'s alpha scaled by
/// `coverage` (0..=1).
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let alpha = (src.0[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return dst;
    }
    let mut out = [0u8; 4];
    for i in 0..3 {
        let blended = src.0[i] as f32 * alpha + dst.0[i] as f32 * (1.0 - alpha);
        out[i] = blended.round().clamp(0.0, 255.0) as u8;
    }
    let dst_a = dst.0[3] as f32 / 255.0;
    let out_a = alpha + dst_a * (1.0 - alpha);
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Linear interpolation between two colors, channel-wise, `t` in 0..=1.
pub fn lerp(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = (a.0[i] as f32 + (b.0[i] as f32 - a.0[i] as f32) * t).round() as u8;
    }
    Rgba(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_deep_inside() {
        let r = RoundedRect::new(0.0, 0.0, 100.0, 60.0, 10.0);
        assert!(r.signed_distance(50.0, 30.0) < -20.0);
    }

    #[test]
    fn far_outside_is_positive() {
        let r = RoundedRect::new(0.0, 0.0, 100.0, 60.0, 10.0);
        assert!(r.signed_distance(200.0, 30.0) > 90.0);
    }

    #[test]
    fn edge_midpoint_is_on_path() {
        let r = RoundedRect::new(0.0, 0.0, 100.0, 60.0, 10.0);
        // Middle of the left edge, away from any corner
        assert!(r.signed_distance(0.0, 30.0).abs() < 1e-4);
    }

    #[test]
    fn square_corner_is_clipped_when_rounded() {
        let r = RoundedRect::new(0.0, 0.0, 100.0, 100.0, 20.0);
        // The literal corner point lies outside the rounded path
        assert!(r.signed_distance(0.5, 0.5) > 0.0);
        assert_eq!(r.coverage(0.5, 0.5), 0.0);
    }

    #[test]
    fn zero_radius_keeps_the_corner() {
        let r = RoundedRect::new(0.0, 0.0, 100.0, 100.0, 0.0);
        assert!(r.signed_distance(0.5, 0.5) < 0.0);
        assert_eq!(r.coverage(1.5, 1.5), 1.0);
    }

    #[test]
    fn radius_is_capped_at_inradius() {
        let r = RoundedRect::new(0.0, 0.0, 40.0, 20.0, 500.0);
        assert_eq!(r.radius, 10.0);
    }

    #[test]
    fn inset_shrinks_rect_and_radius() {
        let r = RoundedRect::new(0.0, 0.0, 100.0, 60.0, 10.0).inset(1.0);
        assert_eq!(r.x, 1.0);
        assert_eq!(r.width, 98.0);
        assert_eq!(r.height, 58.0);
        assert_eq!(r.radius, 9.0);
    }

    #[test]
    fn stroke_covers_the_edge_band() {
        let r = RoundedRect::new(0.0, 0.0, 100.0, 60.0, 10.0);
        assert_eq!(r.stroke_coverage(0.0, 30.0, 4.0), 1.0);
        assert_eq!(r.stroke_coverage(50.0, 30.0, 4.0), 0.0);
    }

    #[test]
    fn blend_full_coverage_opaque_src_replaces_dst() {
        let out = blend_over(Rgba([0, 0, 0, 255]), Rgba([200, 100, 50, 255]), 1.0);
        assert_eq!(out, Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn blend_zero_coverage_keeps_dst() {
        let dst = Rgba([10, 20, 30, 255]);
        assert_eq!(blend_over(dst, Rgba([200, 100, 50, 255]), 0.0), dst);
    }

    #[test]
    fn blend_half_alpha_mixes() {
        let out = blend_over(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 255]), 0.5);
        assert!((out.0[0] as i32 - 128).abs() <= 1);
        assert_eq!(out.0[3], 255);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgba([0, 0, 0, 0]);
        let b = Rgba([255, 200, 100, 255]);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
    }
}

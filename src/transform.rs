//! Pure calculation functions for the geometric stage.
//!
//! All functions here are testable without any I/O or pixel buffers: the
//! EXIF tag → flip/rotate mapping and the aspect-preserving fit math.

/// Upright correction derived from an EXIF orientation tag.
///
/// Rotations are clockwise. The flip, when present, is horizontal and is
/// applied after the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Upright,
    FlipHorizontal,
    Rotate180,
    Rotate180FlipH,
    Rotate90FlipH,
    Rotate90,
    Rotate270FlipH,
    Rotate270,
}

impl Orientation {
    /// Map an EXIF orientation tag (1-8) to the correction that displays the
    /// image upright. Tag 1, or anything out of range, needs no correction.
    pub fn from_exif_tag(tag: u8) -> Self {
        match tag {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::Rotate180FlipH,
            5 => Orientation::Rotate90FlipH,
            6 => Orientation::Rotate90,
            7 => Orientation::Rotate270FlipH,
            8 => Orientation::Rotate270,
            _ => Orientation::Upright,
        }
    }
}

/// Compute dimensions that fit within `(max_w, max_h)` preserving aspect.
///
/// Returns `None` when the image already fits — resize must then be a no-op
/// (the pipeline never upscales). Otherwise the scale factor is the smaller
/// of the two axis ratios and both dimensions are truncated, each at least 1.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> Option<(u32, u32)> {
    if width <= max_w && height <= max_h {
        return None;
    }

    let ratio_x = max_w as f64 / width as f64;
    let ratio_y = max_h as f64 / height as f64;
    let ratio = ratio_x.min(ratio_y);

    let new_w = ((width as f64 * ratio) as u32).max(1);
    let new_h = ((height as f64 * ratio) as u32).max(1);
    Some((new_w, new_h))
}

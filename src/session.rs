//! The pipeline session: one owned RGBA buffer, transformed in sequence.
//!
//! A [`PipelineSession`] exclusively owns the current raster buffer. Every
//! stage either mutates it in place or swaps in a freshly allocated buffer;
//! the previous one drops synchronously, so no two stages ever alias a
//! buffer. Sessions are single-threaded by design — a host wanting to
//! process images concurrently runs one session per image.

use crate::color::{ColorMatrix, apply_gamma};
use crate::compose::{RoundedMaskSpec, round_corners};
use crate::error::{PipelineError, Result};
use crate::exif;
use crate::transform::{Orientation, fit_within};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Conventional JPEG quality when the caller does not pick one.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// A single image-processing session.
pub struct PipelineSession {
    image: RgbaImage,
    /// EXIF orientation tag (2-8) recorded at load, consumed on first use.
    orientation: Option<u8>,
}

impl PipelineSession {
    /// Load and decode an image file, recording any embedded orientation
    /// tag. Fails with `NotFound` for a missing path and `Decode` for bytes
    /// that are not a supported raster format.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PipelineError::NotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(&bytes, path)
    }

    /// Decode an image from in-memory encoded bytes.
    pub fn load_from_memory(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes, Path::new("<memory>"))
    }

    fn decode(bytes: &[u8], context: &Path) -> Result<Self> {
        let decoded =
            image::load_from_memory(bytes).map_err(|source| PipelineError::Decode {
                path: context.to_path_buf(),
                source,
            })?;
        let orientation = exif::orientation_from_bytes(bytes).filter(|&tag| tag >= 2);
        Ok(PipelineSession {
            image: decoded.to_rgba8(),
            orientation,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The pending orientation tag, if the loaded file carried one that
    /// still needs applying.
    pub fn orientation(&self) -> Option<u8> {
        self.orientation
    }

    /// Borrow the current pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.image
    }

    /// Apply the recorded orientation correction so the image displays
    /// upright, consuming the tag. No-op when the tag is absent. Runs at
    /// most once per session, always before any resize.
    pub fn normalize_orientation(&mut self) {
        let Some(tag) = self.orientation.take() else {
            return;
        };
        let current = &self.image;
        self.image = match Orientation::from_exif_tag(tag) {
            Orientation::Upright => return,
            Orientation::FlipHorizontal => imageops::flip_horizontal(current),
            Orientation::Rotate180 => imageops::rotate180(current),
            Orientation::Rotate180FlipH => imageops::flip_horizontal(&imageops::rotate180(current)),
            Orientation::Rotate90 => imageops::rotate90(current),
            Orientation::Rotate90FlipH => imageops::flip_horizontal(&imageops::rotate90(current)),
            Orientation::Rotate270 => imageops::rotate270(current),
            Orientation::Rotate270FlipH => imageops::flip_horizontal(&imageops::rotate270(current)),
        };
    }

    /// Aspect-preserving resize bounded by `(max_w, max_h)`.
    ///
    /// Applies any pending orientation correction first, then shrinks with
    /// Lanczos3 resampling. Never upscales: an image already within bounds
    /// keeps its dimensions.
    pub fn resize(&mut self, max_w: u32, max_h: u32) {
        self.normalize_orientation();
        let (width, height) = self.image.dimensions();
        if let Some((new_w, new_h)) = fit_within(width, height, max_w, max_h) {
            self.image = imageops::resize(&self.image, new_w, new_h, FilterType::Lanczos3);
        }
    }

    /// Adjust brightness, contrast and gamma. A factor of 1.0 for each is
    /// the identity. Alpha is never altered.
    pub fn adjust_bcg(&mut self, brightness: f32, contrast: f32, gamma: f32) {
        ColorMatrix::brightness_contrast(brightness, contrast).apply(&mut self.image);
        apply_gamma(&mut self.image, gamma);
    }

    /// Adjust saturation via the luminance-weighted color matrix: 1.0 is
    /// the identity, 0.0 full grayscale, -1.0 complements relative to
    /// luminance. The range is not validated. Alpha is never altered.
    pub fn adjust_saturation(&mut self, saturation: f32) {
        ColorMatrix::saturation(saturation).apply(&mut self.image);
    }

    /// Run the rounded-corner composite stage, replacing the buffer. With a
    /// shadow the canvas grows by `shadow_offset` on each axis.
    pub fn round_corners(&mut self, spec: &RoundedMaskSpec) {
        self.image = round_corners(&self.image, spec);
    }

    /// Encode as JPEG at the given quality (clamped to 1-100). Alpha is
    /// dropped: JPEG output is opaque RGB.
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        let rgb = DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
        let mut bytes = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
        rgb.write_with_encoder(encoder)
            .map_err(|source| PipelineError::Encode {
                path: PathBuf::from("<memory>"),
                source,
            })?;
        Ok(bytes)
    }

    /// Encode as PNG — lossless, alpha-preserving.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        self.image
            .write_to(&mut bytes, ImageFormat::Png)
            .map_err(|source| PipelineError::Encode {
                path: PathBuf::from("<memory>"),
                source,
            })?;
        Ok(bytes.into_inner())
    }

    /// Encode as JPEG and write to `path`, overwriting any existing file.
    pub fn save_as_jpeg(&self, path: &Path, quality: u8) -> Result<()> {
        let bytes = self.encode_jpeg(quality).map_err(|err| match err {
            PipelineError::Encode { source, .. } => PipelineError::Encode {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        std::fs::write(path, bytes).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Encode as PNG and write to `path`, overwriting any existing file.
    pub fn save_as_png(&self, path: &Path) -> Result<()> {
        let bytes = self.encode_png().map_err(|err| match err {
            PipelineError::Encode { source, .. } => PipelineError::Encode {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        std::fs::write(path, bytes).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

//! # Photocard
//!
//! A CPU-side raster-image pipeline: load a bitmap, run a sequence of
//! geometric and color transforms over one owned buffer, and re-encode the
//! result. Built for producing web-ready photo "cards" — upright, bounded
//! in size, tone-adjusted, with optionally rounded corners and a soft drop
//! shadow.
//!
//! # Architecture: One Buffer, Four Stages
//!
//! A [`session::PipelineSession`] owns exactly one RGBA buffer. Stages run
//! in caller-chosen order after load and each either mutates the buffer in
//! place or atomically swaps in a new one (the old buffer drops
//! synchronously — ownership transfer makes aliasing impossible):
//!
//! ```text
//! load → [orientation + resize] → [color matrix + gamma] → [corners/shadow] → encode
//! ```
//!
//! Everything is synchronous, single-threaded, and allocation-bounded by
//! pixel count. Hosts wanting parallelism run independent sessions.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | The pipeline session — owns the buffer, runs the stages, encodes JPEG/PNG |
//! | [`transform`] | Pure dimension math: EXIF tag → flip/rotate mapping, aspect-preserving fit |
//! | [`color`] | 5×5 color-matrix algebra: brightness/contrast, saturation, gamma LUT |
//! | [`geometry`] | Rounded-rectangle path as a signed-distance function, coverage, blending |
//! | [`compose`] | Corner rounding, border stroke, and path-gradient drop shadow |
//! | [`exif`] | Minimal EXIF orientation reader (JPEG APP1 + TIFF IFD, tag 0x0112) |
//! | [`ops`] | Path-in/path-out helpers: thumbnail and in-place web-size variants |
//! | [`error`] | Error taxonomy with the offending path attached |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Pixel Math (No Platform Graphics API)
//!
//! The color matrices and the rounded-corner/shadow compositor are explicit
//! per-pixel arithmetic over the raw buffer. Decoding, resampling and
//! encoding use the `image` crate's pure-Rust codecs, so the binary has no
//! system dependencies — no GDI, no Cairo, no ImageMagick.
//!
//! ## Signed-Distance Paths Over Arc Segments
//!
//! The rounded clip path is a signed-distance function rather than a list
//! of arc segments: one formula yields containment, a one-pixel antialias
//! ramp, stroke distance for the border, and the normalized interior depth
//! the shadow gradient runs on.
//!
//! ## No Silent Degradation
//!
//! Load and save failures carry the offending path and surface immediately.
//! A transform either completes or the session errors — it never hands back
//! the untransformed image as if it had succeeded.

pub mod color;
pub mod compose;
pub mod error;
pub mod exif;
pub mod geometry;
pub mod ops;
pub mod session;
pub mod transform;

pub use compose::RoundedMaskSpec;
pub use error::{PipelineError, Result};
pub use session::{DEFAULT_JPEG_QUALITY, PipelineSession};

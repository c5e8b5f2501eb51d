//! High-level path-in/path-out helpers.
//!
//! Thin wrappers that run a whole session for the two common jobs: a
//! thumbnail file next to a source image, and an in-place "web size" rewrite
//! of oversized files. Output format follows the target extension: `png`
//! saves lossless PNG, anything else JPEG at the default quality.

use crate::error::Result;
use crate::session::{DEFAULT_JPEG_QUALITY, PipelineSession};
use std::path::Path;

fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

fn save_by_extension(session: &PipelineSession, target: &Path) -> Result<()> {
    if has_png_extension(target) {
        session.save_as_png(target)
    } else {
        session.save_as_jpeg(target, DEFAULT_JPEG_QUALITY)
    }
}

/// Generate a thumbnail for `source` at `target`, bounded by
/// `(max_w, max_h)`. Skips work entirely when the target already exists.
pub fn generate_thumb(source: &Path, target: &Path, max_w: u32, max_h: u32) -> Result<()> {
    if target.exists() {
        return Ok(());
    }
    let mut session = PipelineSession::load(source)?;
    session.resize(max_w, max_h);
    save_by_extension(&session, target)
}

/// Shrink an image file in place when it exceeds `max_bytes`.
///
/// Files at or under the threshold are left untouched and their current
/// dimensions returned. Oversized files are resized within
/// `(target_w, target_h)` and re-encoded over the source path. Returns the
/// resulting dimensions either way.
pub fn generate_web_image(
    source: &Path,
    max_bytes: u64,
    target_w: u32,
    target_h: u32,
) -> Result<(u32, u32)> {
    let mut session = PipelineSession::load(source)?;

    let file_len = std::fs::metadata(source)
        .map_err(|err| crate::error::PipelineError::Io {
            path: source.to_path_buf(),
            source: err,
        })?
        .len();
    if file_len <= max_bytes {
        return Ok(session.dimensions());
    }

    session.resize(target_w, target_h);
    save_by_extension(&session, source)?;
    Ok(session.dimensions())
}

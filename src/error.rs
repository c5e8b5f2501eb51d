//! Error taxonomy for the pipeline.
//!
//! Every failure carries the offending path so callers can report which file
//! broke without threading extra context themselves. There is no retry layer:
//! load/save are local, deterministic operations with no transient-failure
//! class.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source path does not exist at load time.
    #[error("source not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Source bytes are not a recognized raster format.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Target format unsupported or the encoder itself failed.
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Reading or writing the file failed.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type used throughout the pipeline.
pub type Result<T> = std::result::Result<T, PipelineError>;

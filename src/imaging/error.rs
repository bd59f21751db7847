//! Error taxonomy for the resampling core.
//!
//! Every variant is a caller/configuration error detected before any pixel
//! work starts. Resampling itself is pure and cannot fail halfway.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResizeError {
    #[error(
        "unknown kernel '{0}' (expected nearest, bilinear, bicubic, mitchell, lanczos2 or lanczos3)"
    )]
    UnknownKernel(String),
    #[error("invalid source dimensions {width}x{height}: both must be at least 1")]
    InvalidSourceDimensions { width: u32, height: u32 },
    #[error(
        "invalid target dimensions {width}x{height}: both must be at least 1 and the raster must fit in memory"
    )]
    InvalidTargetDimensions { width: u32, height: u32 },
    #[error("unsupported raster format: {0}")]
    UnsupportedRasterFormat(String),
}

/// Result type for resampling operations.
pub type Result<T> = std::result::Result<T, ResizeError>;

//! Codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the decoder/encoder pair the pipeline
//! depends on: bytes in, [`Raster`] plus [`Format`] tag out, and back.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` below.

use super::raster::Raster;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Corrupt input: {0}")]
    CorruptInput(String),
}

/// Width and height of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Encoded container format, as detected on decode or requested for encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Jpeg,
    Png,
    Gif,
    Tiff,
    WebP,
    Bmp,
}

impl Format {
    pub const ALL: [Format; 6] = [
        Format::Jpeg,
        Format::Png,
        Format::Gif,
        Format::Tiff,
        Format::WebP,
        Format::Bmp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Format::Jpeg => "jpeg",
            Format::Png => "png",
            Format::Gif => "gif",
            Format::Tiff => "tiff",
            Format::WebP => "webp",
            Format::Bmp => "bmp",
        }
    }
}

impl FromStr for Format {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let name = match lower.as_str() {
            "jpg" => "jpeg",
            "tif" => "tiff",
            other => other,
        };
        Format::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| BackendError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for codec backends.
///
/// `Sync` so a single backend can be shared by concurrent callers.
pub trait ImageBackend: Sync {
    /// Detect the format of `bytes` and decode them into a raster.
    fn decode(&self, bytes: &[u8]) -> Result<(Raster, Format), BackendError>;

    /// Encode `raster` in `format`.
    fn encode(&self, raster: &Raster, format: Format) -> Result<Vec<u8>, BackendError>;
}

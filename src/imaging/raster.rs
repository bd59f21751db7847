//! In-memory raster exchanged between decoder, resampler, and encoder.
//!
//! A [`Raster`] is validated once, at construction, and is never mutated
//! afterwards. Samples are stored row-major, channel-interleaved, with either
//! 8 or 16 bits per channel.

use super::backend::Dimensions;
use super::error::{ResizeError, Result};

/// Largest supported channel count (RGBA).
pub const MAX_CHANNELS: u8 = 4;

/// Bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    Eight,
    Sixteen,
}

impl BitDepth {
    pub fn bytes_per_channel(self) -> usize {
        match self {
            BitDepth::Eight => 1,
            BitDepth::Sixteen => 2,
        }
    }
}

/// Channel samples, one element per channel per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
}

impl Samples {
    pub fn bit_depth(&self) -> BitDepth {
        match self {
            Samples::U8(_) => BitDepth::Eight,
            Samples::U16(_) => BitDepth::Sixteen,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Samples::U8(s) => s.len(),
            Samples::U16(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_u8(&self) -> Option<&[u8]> {
        match self {
            Samples::U8(s) => Some(s),
            Samples::U16(_) => None,
        }
    }

    pub fn as_u16(&self) -> Option<&[u16]> {
        match self {
            Samples::U16(s) => Some(s),
            Samples::U8(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: u8,
    samples: Samples,
}

impl Raster {
    /// Build a raster, checking dimensions, channel count, and buffer length.
    pub fn new(width: u32, height: u32, channels: u8, samples: Samples) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ResizeError::InvalidSourceDimensions { width, height });
        }
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(ResizeError::UnsupportedRasterFormat(format!(
                "{channels} channels (expected 1 to {MAX_CHANNELS})"
            )));
        }
        let expected = width as usize * height as usize * channels as usize;
        if samples.len() != expected {
            return Err(ResizeError::UnsupportedRasterFormat(format!(
                "buffer holds {} samples, {width}x{height}x{channels} needs {expected}",
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    pub fn from_u8(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, channels, Samples::U8(data))
    }

    pub fn from_u16(width: u32, height: u32, channels: u8, data: Vec<u16>) -> Result<Self> {
        Self::new(width, height, channels, Samples::U16(data))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.samples.bit_depth()
    }

    /// Buffer size in bytes: width × height × channels × bytes-per-channel.
    pub fn byte_len(&self) -> usize {
        self.samples.len() * self.bit_depth().bytes_per_channel()
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }
}

//! Pure calculation functions for output dimensions and scale factors.
//!
//! All functions here are pure and testable without any I/O or images.

use super::error::{ResizeError, Result};
use super::raster::MAX_CHANNELS;

/// Fit `source` inside a `max_width` × `max_height` box, preserving aspect ratio.
///
/// A bound of 0 means "unset":
/// - both unset → the source dimensions are returned unchanged
/// - one unset → only the other bound constrains the scale
/// - both set → the tighter of the two ratios wins, so neither bound is exceeded
///
/// Upscaling is not prevented: a box larger than the source yields a larger
/// target. Each resulting dimension is rounded and never drops below 1.
///
/// # Examples
/// ```
/// # use thumbfit::imaging::plan_dimensions;
/// assert_eq!(plan_dimensions(100, 50, 40, 40).unwrap(), (40, 20));
/// assert_eq!(plan_dimensions(100, 50, 0, 40).unwrap(), (80, 40));
/// ```
pub fn plan_dimensions(
    source_width: u32,
    source_height: u32,
    max_width: u32,
    max_height: u32,
) -> Result<(u32, u32)> {
    if source_width == 0 || source_height == 0 {
        return Err(ResizeError::InvalidSourceDimensions {
            width: source_width,
            height: source_height,
        });
    }

    let width_ratio = max_width as f64 / source_width as f64;
    let height_ratio = max_height as f64 / source_height as f64;

    let scale = match (max_width, max_height) {
        (0, 0) => return Ok((source_width, source_height)),
        (_, 0) => width_ratio,
        (0, _) => height_ratio,
        _ => width_ratio.min(height_ratio),
    };

    Ok((
        scaled_dimension(source_width, scale),
        scaled_dimension(source_height, scale),
    ))
}

fn scaled_dimension(length: u32, scale: f64) -> u32 {
    let scaled = (length as f64 * scale).round();
    if scaled < 1.0 {
        1
    } else if scaled > u32::MAX as f64 {
        u32::MAX
    } else {
        scaled as u32
    }
}

/// Whether a `width` × `height` buffer of the widest sample type (RGBA `f32`)
/// can be indexed at all.
fn addressable((width, height): (u32, u32)) -> bool {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(MAX_CHANNELS as usize * size_of::<f32>()))
        .is_some_and(|bytes| bytes <= isize::MAX as usize)
}

/// Source and target dimensions for one resize call, with derived scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePlan {
    pub source: (u32, u32),
    pub target: (u32, u32),
}

impl ScalePlan {
    pub fn new(source: (u32, u32), target: (u32, u32)) -> Result<Self> {
        if source.0 == 0 || source.1 == 0 {
            return Err(ResizeError::InvalidSourceDimensions {
                width: source.0,
                height: source.1,
            });
        }
        if target.0 == 0 || target.1 == 0 || !addressable(target) {
            return Err(ResizeError::InvalidTargetDimensions {
                width: target.0,
                height: target.1,
            });
        }
        Ok(Self { source, target })
    }

    /// Source pixels per target pixel horizontally (`sw / tw`).
    pub fn scale_x(&self) -> f64 {
        self.source.0 as f64 / self.target.0 as f64
    }

    /// Source pixels per target pixel vertically (`sh / th`).
    pub fn scale_y(&self) -> f64 {
        self.source.1 as f64 / self.target.1 as f64
    }

    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }
}

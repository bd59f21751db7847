//! High-level image operations.
//!
//! These functions combine the dimension calculations with the resampler.
//! They take parameters, compute the target size, and produce a new raster.

use super::calculations::{ScalePlan, plan_dimensions};
use super::error::Result;
use super::params::ResizeParams;
use super::raster::Raster;
use super::resample::resample;
use std::borrow::Cow;

/// Compute the thumbnail size for `source` under `params`.
///
/// The box fit comes from [`plan_dimensions`]; when `params.enlarge` is off
/// and the fit would grow the image, the source size is kept instead.
pub fn plan_thumbnail(source: (u32, u32), params: &ResizeParams) -> Result<(u32, u32)> {
    let (width, height) = plan_dimensions(
        source.0,
        source.1,
        params.bounds.max_width,
        params.bounds.max_height,
    )?;

    if !params.enlarge && (width > source.0 || height > source.1) {
        tracing::debug!(
            "keeping {}x{}: fit to {}x{} would enlarge",
            source.0,
            source.1,
            width,
            height
        );
        return Ok(source);
    }

    Ok((width, height))
}

/// Create a thumbnail of `source`.
///
/// Returns the source itself (borrowed) when the planned size equals the
/// source size, otherwise a freshly resampled raster.
pub fn create_thumbnail<'a>(source: &'a Raster, params: &ResizeParams) -> Result<Cow<'a, Raster>> {
    let (width, height) = plan_thumbnail((source.width(), source.height()), params)?;
    let plan = ScalePlan::new((source.width(), source.height()), (width, height))?;

    if plan.is_identity() {
        return Ok(Cow::Borrowed(source));
    }

    resample(source, width, height, params.kernel).map(Cow::Owned)
}

//! Image resampling: separable convolution with precomputed weights.
//!
//! | Operation | Where |
//! |---|---|
//! | **Kernel weights** | [`Kernel`] (closed enum, radius + weight function) |
//! | **Box fit** | [`plan_dimensions`] |
//! | **Weight tables** | [`ContributionTable`], one per axis |
//! | **Resample** | [`resample`] (two passes on rayon, nearest in one) |
//! | **Decode / encode** | [`ImageBackend`] + [`RustBackend`] (`image` crate) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Kernel / Contributions / Resample**: the pixel work
//! - **Parameters**: Data structures describing a resize request
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + resampling

pub mod backend;
mod calculations;
pub mod contributions;
mod error;
mod kernel;
pub mod operations;
mod params;
pub mod raster;
mod resample;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, Format, ImageBackend};
pub use calculations::{ScalePlan, plan_dimensions};
pub use contributions::{Contribution, ContributionTable};
pub use error::ResizeError;
pub use kernel::Kernel;
pub use operations::{create_thumbnail, plan_thumbnail};
pub use params::{Bounds, ResizeParams};
pub use raster::{BitDepth, Raster, Samples};
pub use resample::resample;
pub use rust_backend::RustBackend;

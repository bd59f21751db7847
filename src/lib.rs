//! # Thumbfit
//!
//! Shrink (or grow) an image to fit a bounding box, preserving its aspect
//! ratio, with a choice of interpolation kernel.
//!
//! # Pipeline
//!
//! ```text
//! --in  ─read─▶ bytes ─decode─▶ Raster ─plan─▶ (W, H) ─resample─▶ Raster ─encode─▶ bytes ─write─▶ --out
//! ```
//!
//! Decoding and encoding go through the `image` crate. Everything between is
//! this crate's own code: a box-fit planner and a separable two-pass
//! resampler that spreads rows across a rayon pool.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Kernels, dimension planning, contribution tables, the resampler, codec backend |
//! | [`process`] | Pipeline driver: decode → plan → resample → encode |
//! | [`input`] | `--in` / `--out` resolution: stdin/stdout, files, `file:` and `http(s):` URLs |
//! | [`config`] | Optional `thumbfit.toml` loading, defaults, validation, thread count |
//!
//! # Design Decisions
//!
//! ## Separable Resampling
//!
//! A 2-D kernel of radius `r` costs `(2r)²` taps per output pixel. Resampling
//! one axis at a time costs `2 · 2r`. Weights for each axis are computed once
//! per resize into a [`imaging::ContributionTable`] and reused for every row
//! or column. Sample values are accumulated in `f32` and the intermediate
//! image is kept unclamped, so negative lobes from the second pass can cancel
//! ringing from the first. Only the final store rounds and clamps.
//!
//! ## Edge Handling
//!
//! Near the border a kernel footprint extends past the image. Those taps are
//! folded onto the nearest edge sample and the weights renormalized to sum to
//! one, so a uniform image stays uniform all the way to its corners.
//!
//! ## Row Parallelism
//!
//! Each pass writes disjoint output rows, so the destination buffer is split
//! with `par_chunks_mut` and rayon's work stealing balances the load. No
//! locks, no shared mutable state. The pool size comes from
//! `[processing] max_threads` or `--threads`, clamped to the core count.
//!
//! ## Stdout Is for Pixels
//!
//! Output defaults to stdout so thumbfit composes in shell pipelines. All
//! logging therefore goes to stderr via `tracing`.

pub mod config;
pub mod imaging;
pub mod input;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;

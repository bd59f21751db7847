//! Separable two-pass resampler.
//!
//! ```text
//! source (sw × sh)  ──horizontal table──▶  intermediate (tw × sh, f32)
//! intermediate      ──vertical table────▶  output (tw × th)
//! ```
//!
//! Both passes run on the rayon pool. Every worker owns a disjoint row slice
//! of the buffer it writes and only reads from immutable inputs, so no
//! locking is involved and results do not depend on scheduling. The output
//! raster is returned only after both passes have joined.
//!
//! The intermediate buffer keeps unclamped `f32` sums. Clamping to the
//! channel range and rounding happen once, when the final sample is stored.
//!
//! [`Kernel::Nearest`] skips the tables entirely: each output pixel copies
//! the closest source pixel in a single pass.

use super::calculations::ScalePlan;
use super::contributions::ContributionTable;
use super::error::Result;
use super::kernel::Kernel;
use super::raster::{Raster, Samples};
use rayon::prelude::*;
use std::time::Instant;

/// Channel sample type the resampler can read and write.
trait Sample: Copy + Default + Send + Sync {
    /// Largest channel value, as the accumulator type.
    const CEILING: f32;

    fn to_f32(self) -> f32;

    /// Round and clamp an accumulated value into range.
    fn from_f32(value: f32) -> Self;
}

impl Sample for u8 {
    const CEILING: f32 = u8::MAX as f32;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value.round().clamp(0.0, Self::CEILING) as u8
    }
}

impl Sample for u16 {
    const CEILING: f32 = u16::MAX as f32;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value.round().clamp(0.0, Self::CEILING) as u16
    }
}

/// Geometry shared by both passes.
#[derive(Debug, Clone, Copy)]
struct Layout {
    source_width: usize,
    source_height: usize,
    target_width: usize,
    target_height: usize,
    channels: usize,
}

/// Resample `source` to `target_width` × `target_height` with `kernel`.
///
/// The source is only read; a new raster is allocated for the result.
/// Fails with `InvalidTargetDimensions` if either target dimension is 0.
pub fn resample(
    source: &Raster,
    target_width: u32,
    target_height: u32,
    kernel: Kernel,
) -> Result<Raster> {
    let plan = ScalePlan::new(
        (source.width(), source.height()),
        (target_width, target_height),
    )?;
    let layout = Layout {
        source_width: plan.source.0 as usize,
        source_height: plan.source.1 as usize,
        target_width: plan.target.0 as usize,
        target_height: plan.target.1 as usize,
        channels: source.channels() as usize,
    };

    tracing::debug!(
        kernel = %kernel,
        scale_x = plan.scale_x(),
        scale_y = plan.scale_y(),
        "resampling {}x{} -> {}x{}",
        layout.source_width,
        layout.source_height,
        layout.target_width,
        layout.target_height
    );

    let samples = match source.samples() {
        Samples::U8(src) => Samples::U8(resample_plane(src, layout, kernel)),
        Samples::U16(src) => Samples::U16(resample_plane(src, layout, kernel)),
    };

    Raster::new(target_width, target_height, source.channels(), samples)
}

fn resample_plane<T: Sample>(src: &[T], layout: Layout, kernel: Kernel) -> Vec<T> {
    if kernel == Kernel::Nearest {
        return nearest(src, layout);
    }

    let started = Instant::now();
    let horizontal = ContributionTable::build(kernel, layout.source_width, layout.target_width);
    let vertical = ContributionTable::build(kernel, layout.source_height, layout.target_height);
    tracing::debug!(
        horizontal_taps = horizontal.taps(),
        vertical_taps = vertical.taps(),
        "contribution tables built in {:?}",
        started.elapsed()
    );

    let intermediate = horizontal_pass(src, layout, &horizontal);
    let out = vertical_pass(&intermediate, layout, &vertical);
    tracing::debug!("two-pass convolution finished in {:?}", started.elapsed());
    out
}

/// Pass 1: one intermediate row per source row.
fn horizontal_pass<T: Sample>(src: &[T], layout: Layout, table: &ContributionTable) -> Vec<f32> {
    let ch = layout.channels;
    let src_stride = layout.source_width * ch;
    let dst_stride = layout.target_width * ch;
    let mut intermediate = vec![0.0f32; dst_stride * layout.source_height];

    intermediate
        .par_chunks_mut(dst_stride)
        .zip(src.par_chunks(src_stride))
        .for_each(|(dst_row, src_row)| {
            for (px, contribution) in dst_row.chunks_exact_mut(ch).zip(table.entries()) {
                for (index, weight) in contribution.pairs() {
                    let sample = &src_row[index * ch..(index + 1) * ch];
                    for (acc, &s) in px.iter_mut().zip(sample) {
                        *acc += s.to_f32() * weight;
                    }
                }
            }
        });

    intermediate
}

/// Pass 2: one output row per vertical table entry, blending whole
/// intermediate rows so every column is filtered with the same weights.
fn vertical_pass<T: Sample>(
    intermediate: &[f32],
    layout: Layout,
    table: &ContributionTable,
) -> Vec<T> {
    let stride = layout.target_width * layout.channels;
    let mut dst = vec![T::default(); stride * layout.target_height];

    dst.par_chunks_mut(stride)
        .zip(table.entries().par_iter())
        .for_each(|(dst_row, contribution)| {
            let mut acc = vec![0.0f32; stride];
            for (index, weight) in contribution.pairs() {
                let src_row = &intermediate[index * stride..(index + 1) * stride];
                for (a, &s) in acc.iter_mut().zip(src_row) {
                    *a += s * weight;
                }
            }
            for (d, a) in dst_row.iter_mut().zip(acc) {
                *d = T::from_f32(a);
            }
        });

    dst
}

/// Closest source index for each of `target_len` outputs: `round(c)`, clamped.
fn nearest_indices(source_len: usize, target_len: usize) -> Vec<usize> {
    let scale = source_len as f64 / target_len as f64;
    let last = source_len as f64 - 1.0;
    (0..target_len)
        .map(|o| {
            let center = (o as f64 + 0.5) * scale - 0.5;
            center.round().clamp(0.0, last) as usize
        })
        .collect()
}

fn nearest<T: Sample>(src: &[T], layout: Layout) -> Vec<T> {
    let ch = layout.channels;
    let src_stride = layout.source_width * ch;
    let dst_stride = layout.target_width * ch;
    let columns = nearest_indices(layout.source_width, layout.target_width);
    let rows = nearest_indices(layout.source_height, layout.target_height);
    let mut dst = vec![T::default(); dst_stride * layout.target_height];

    dst.par_chunks_mut(dst_stride)
        .zip(rows.par_iter())
        .for_each(|(dst_row, &sy)| {
            let src_row = &src[sy * src_stride..(sy + 1) * src_stride];
            for (px, &sx) in dst_row.chunks_exact_mut(ch).zip(&columns) {
                px.copy_from_slice(&src_row[sx * ch..(sx + 1) * ch]);
            }
        });

    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::error::ResizeError;
    use crate::test_helpers::*;

    // =========================================================================
    // Pinned outputs
    // =========================================================================

    #[test]
    fn bilinear_4x4_to_2x2_pinned() {
        // Columns 0, 64, 128, 192 in every row.
        // Horizontal weights: [1/2, 3/8, 1/8] from 0 and [1/8, 3/8, 1/2] from 1.
        let src = gray8(4, 4, |x, _| (x * 64) as u8);
        let out = resample(&src, 2, 2, Kernel::Bilinear).unwrap();
        assert_eq!(out.samples().as_u8().unwrap(), &[40, 152, 40, 152]);
    }

    #[test]
    fn bilinear_4x4_to_2x2_pinned_vertical() {
        let src = gray8(4, 4, |_, y| (y * 64) as u8);
        let out = resample(&src, 2, 2, Kernel::Bilinear).unwrap();
        assert_eq!(out.samples().as_u8().unwrap(), &[40, 40, 152, 152]);
    }

    #[test]
    fn nearest_4x4_to_2x2_pinned() {
        // Centres land at 0.5 and 2.5, which round to 1 and 3.
        let src = gray8(4, 4, |x, y| (y * 4 + x) as u8);
        let out = resample(&src, 2, 2, Kernel::Nearest).unwrap();
        assert_eq!(out.samples().as_u8().unwrap(), &[5, 7, 13, 15]);
    }

    #[test]
    fn nearest_2x1_to_4x1_duplicates() {
        let src = gray8(2, 1, |x, _| (x * 100 + 10) as u8);
        let out = resample(&src, 4, 1, Kernel::Nearest).unwrap();
        assert_eq!(out.samples().as_u8().unwrap(), &[10, 10, 110, 110]);
    }

    #[test]
    fn bicubic_4x1_to_2x1_pinned() {
        // Weights [1/2, 111/256, 29/256, -3/64] and the mirror image.
        let src = gray8(4, 1, |x, _| [10, 60, 200, 120][x as usize]);
        let out = resample(&src, 2, 1, Kernel::Bicubic).unwrap();
        assert_eq!(out.samples().as_u8().unwrap(), &[48, 153]);
    }

    #[test]
    fn bicubic_negative_lobe_clamps_to_zero() {
        // Second output is -3/64 * 255 before the store; the first is exactly 127.5.
        let src = gray8(4, 1, |x, _| if x == 0 { 255 } else { 0 });
        let out = resample(&src, 2, 1, Kernel::Bicubic).unwrap();
        assert_eq!(out.samples().as_u8().unwrap(), &[128, 0]);
    }

    #[test]
    fn store_rounds_and_saturates_per_depth() {
        assert_eq!(u8::from_f32(-11.95), 0);
        assert_eq!(u8::from_f32(127.5), 128);
        assert_eq!(u8::from_f32(255.4), 255);
        assert_eq!(u8::from_f32(300.0), 255);
        assert_eq!(u16::from_f32(-1.0), 0);
        assert_eq!(u16::from_f32(1234.4), 1234);
        assert_eq!(u16::from_f32(70000.0), u16::MAX);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    #[test]
    fn nearest_only_selects_existing_values() {
        let src = rgba8(13, 7, |x, y| {
            [(x * 19) as u8, (y * 31) as u8, ((x + y) * 7) as u8, 200]
        });
        let existing = pixel_set(&src);
        for (w, h) in [(5, 3), (26, 14), (13, 7), (1, 1), (40, 2)] {
            let out = resample(&src, w, h, Kernel::Nearest).unwrap();
            for px in pixel_set(&out) {
                assert!(existing.contains(&px), "{w}x{h} invented {px:?}");
            }
        }
    }

    #[test]
    fn uniform_color_preserved_by_every_kernel() {
        let color = [12u8, 200, 99, 255];
        for kernel in Kernel::ALL {
            for (sw, sh, tw, th) in [(9, 9, 3, 3), (100, 37, 13, 5), (5, 5, 17, 11), (7, 3, 7, 3)] {
                let src = rgba8(sw, sh, |_, _| color);
                let out = resample(&src, tw, th, kernel).unwrap();
                assert_uniform_u8(&out, &color);
            }
        }
    }

    #[test]
    fn uniform_color_preserved_at_sixteen_bits() {
        let color = [65535u16, 0, 31337];
        for kernel in Kernel::ALL {
            let src = rgb16(31, 17, |_, _| color);
            let out = resample(&src, 8, 5, kernel).unwrap();
            for px in out.samples().as_u16().unwrap().chunks_exact(3) {
                assert_eq!(px, &color, "{kernel}");
            }
        }
    }

    #[test]
    fn identity_for_interpolating_kernels() {
        let src = rgba8(11, 6, |x, y| [(x * 23) as u8, (y * 40) as u8, (x ^ y) as u8, 255]);
        for kernel in [
            Kernel::Nearest,
            Kernel::Bilinear,
            Kernel::Bicubic,
            Kernel::Lanczos2,
            Kernel::Lanczos3,
        ] {
            let out = resample(&src, 11, 6, kernel).unwrap();
            assert_eq!(out, src, "{kernel}");
        }
    }

    #[test]
    fn mitchell_identity_is_close() {
        // Mitchell is not interpolating, so a smooth ramp comes back within a
        // level or two rather than bit-exact.
        let src = gray8(16, 16, |x, y| (x * 8 + y * 4) as u8);
        let out = resample(&src, 16, 16, Kernel::Mitchell).unwrap();
        let max_diff = src
            .samples()
            .as_u8()
            .unwrap()
            .iter()
            .zip(out.samples().as_u8().unwrap())
            .map(|(&a, &b)| (a as i32 - b as i32).abs())
            .max()
            .unwrap();
        assert!(max_diff <= 2, "max diff {max_diff}");
    }

    #[test]
    fn ringing_is_clamped_not_wrapped() {
        // A hard step overshoots with every kernel that has a negative lobe.
        // Values must saturate at 0 and 255 on the two plateaus.
        let src = gray8(16, 1, |x, _| if x < 8 { 0 } else { 255 });
        for kernel in [
            Kernel::Bicubic,
            Kernel::Mitchell,
            Kernel::Lanczos2,
            Kernel::Lanczos3,
        ] {
            let out = resample(&src, 40, 1, kernel).unwrap();
            let s = out.samples().as_u8().unwrap();
            assert!(s[..10].iter().all(|&v| v == 0), "{kernel}: {s:?}");
            assert!(s[30..].iter().all(|&v| v == 255), "{kernel}: {s:?}");
        }
    }

    #[test]
    fn sixteen_bit_ringing_saturates() {
        let src = Raster::from_u16(
            8,
            1,
            1,
            vec![0, 0, 0, 0, u16::MAX, u16::MAX, u16::MAX, u16::MAX],
        )
        .unwrap();
        let out = resample(&src, 24, 1, Kernel::Lanczos3).unwrap();
        let s = out.samples().as_u16().unwrap();
        assert_eq!(s[0], 0);
        assert_eq!(s[23], u16::MAX);
    }

    #[test]
    fn channels_are_filtered_independently() {
        let src = rgba8(6, 6, |x, _| [(x * 40) as u8, 255 - (x * 40) as u8, 77, 255]);
        let out = resample(&src, 3, 3, Kernel::Lanczos3).unwrap();
        for px in out.samples().as_u8().unwrap().chunks_exact(4) {
            assert_eq!(px[2], 77);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn output_has_requested_shape() {
        let src = gray_alpha8(10, 4, |x, y| [(x + y) as u8, 255]);
        let out = resample(&src, 3, 9, Kernel::Mitchell).unwrap();
        assert_eq!((out.width(), out.height(), out.channels()), (3, 9, 2));
        assert_eq!(out.byte_len(), 3 * 9 * 2);
    }

    #[test]
    fn source_is_left_untouched() {
        let src = rgba8(8, 8, |x, y| [(x * 30) as u8, (y * 30) as u8, 0, 255]);
        let before = src.clone();
        let _ = resample(&src, 3, 5, Kernel::Bicubic).unwrap();
        assert_eq!(src, before);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let src = rgba8(97, 61, |x, y| {
            [(x * 7 + y) as u8, (y * 3) as u8, (x * y) as u8, (x + 100) as u8]
        });
        let a = resample(&src, 31, 20, Kernel::Lanczos3).unwrap();
        let b = resample(&src, 31, 20, Kernel::Lanczos3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_target_dimension_fails() {
        let src = gray8(4, 4, |_, _| 0);
        assert_eq!(
            resample(&src, 0, 2, Kernel::Bilinear),
            Err(ResizeError::InvalidTargetDimensions {
                width: 0,
                height: 2
            })
        );
        assert!(resample(&src, 2, 0, Kernel::Nearest).is_err());
    }

    #[test]
    fn single_pixel_source_fills_target() {
        let src = rgba8(1, 1, |_, _| [1, 2, 3, 4]);
        for kernel in Kernel::ALL {
            let out = resample(&src, 5, 3, kernel).unwrap();
            assert_uniform_u8(&out, &[1, 2, 3, 4]);
        }
    }

    #[test]
    fn nearest_indices_clamp_to_edges() {
        assert_eq!(nearest_indices(2, 4), vec![0, 0, 1, 1]);
        assert_eq!(nearest_indices(4, 2), vec![1, 3]);
        assert_eq!(nearest_indices(5, 1), vec![2]);
    }
}

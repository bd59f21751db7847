//! Shared test utilities for the thumbfit test suite.
//!
//! Raster fixture builders and pixel assertions used by the imaging and
//! pipeline tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let src = rgba8(8, 8, |x, y| [x as u8, y as u8, 0, 255]);
//! let out = resample(&src, 4, 4, Kernel::Bilinear).unwrap();
//! assert_uniform_u8(&out, &[0, 0, 0, 255]);
//! ```

use crate::imaging::Raster;
use std::collections::HashSet;

// =========================================================================
// Fixture builders
// =========================================================================

fn build8<const N: usize>(w: u32, h: u32, f: impl Fn(u32, u32) -> [u8; N]) -> Raster {
    let mut data = Vec::with_capacity(w as usize * h as usize * N);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&f(x, y));
        }
    }
    Raster::from_u8(w, h, N as u8, data).unwrap()
}

/// Single-channel 8-bit raster from a per-pixel function.
pub fn gray8(w: u32, h: u32, f: impl Fn(u32, u32) -> u8) -> Raster {
    build8(w, h, |x, y| [f(x, y)])
}

/// Gray + alpha 8-bit raster.
pub fn gray_alpha8(w: u32, h: u32, f: impl Fn(u32, u32) -> [u8; 2]) -> Raster {
    build8(w, h, f)
}

/// RGBA 8-bit raster.
pub fn rgba8(w: u32, h: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Raster {
    build8(w, h, f)
}

/// RGB 16-bit raster.
pub fn rgb16(w: u32, h: u32, f: impl Fn(u32, u32) -> [u16; 3]) -> Raster {
    let mut data = Vec::with_capacity(w as usize * h as usize * 3);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&f(x, y));
        }
    }
    Raster::from_u16(w, h, 3, data).unwrap()
}

// =========================================================================
// Assertions: panic with the offending pixel on failure
// =========================================================================

/// Distinct pixels of an 8-bit raster.
pub fn pixel_set(raster: &Raster) -> HashSet<Vec<u8>> {
    let samples = raster.samples().as_u8().expect("8-bit raster");
    samples
        .chunks_exact(raster.channels() as usize)
        .map(<[u8]>::to_vec)
        .collect()
}

/// Assert every pixel of an 8-bit raster equals `expected`.
pub fn assert_uniform_u8(raster: &Raster, expected: &[u8]) {
    assert_eq!(raster.channels() as usize, expected.len(), "channel count");
    let samples = raster.samples().as_u8().expect("8-bit raster");
    for (i, px) in samples.chunks_exact(expected.len()).enumerate() {
        let (x, y) = (i as u32 % raster.width(), i as u32 / raster.width());
        assert_eq!(px, expected, "pixel ({x}, {y}) of {}", raster.dimensions());
    }
}

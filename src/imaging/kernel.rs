//! Interpolation kernels.
//!
//! The set is closed: [`Kernel`] is a plain enum and each variant maps to a
//! support radius and a weight function. Nothing is looked up at runtime.
//!
//! | Kernel | Radius | Weight |
//! |---|---|---|
//! | `nearest` | 0.5 | box |
//! | `bilinear` | 1 | triangle, `1 - |x|` |
//! | `bicubic` | 2 | cubic convolution, B=0, C=0.5 (Catmull-Rom) |
//! | `mitchell` | 2 | cubic convolution, B=C=1/3 (Mitchell-Netravali) |
//! | `lanczos2` | 2 | `sinc(x) * sinc(x/2)` |
//! | `lanczos3` | 3 | `sinc(x) * sinc(x/3)` |

use super::error::ResizeError;
use serde::Deserialize;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Named interpolation kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Kernel {
    #[default]
    Nearest,
    Bilinear,
    Bicubic,
    Mitchell,
    Lanczos2,
    Lanczos3,
}

impl Kernel {
    pub const ALL: [Kernel; 6] = [
        Kernel::Nearest,
        Kernel::Bilinear,
        Kernel::Bicubic,
        Kernel::Mitchell,
        Kernel::Lanczos2,
        Kernel::Lanczos3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kernel::Nearest => "nearest",
            Kernel::Bilinear => "bilinear",
            Kernel::Bicubic => "bicubic",
            Kernel::Mitchell => "mitchell",
            Kernel::Lanczos2 => "lanczos2",
            Kernel::Lanczos3 => "lanczos3",
        }
    }

    /// Support radius in source-pixel units, before any downscale widening.
    pub fn radius(self) -> f64 {
        match self {
            Kernel::Nearest => 0.5,
            Kernel::Bilinear => 1.0,
            Kernel::Bicubic | Kernel::Mitchell | Kernel::Lanczos2 => 2.0,
            Kernel::Lanczos3 => 3.0,
        }
    }

    /// Evaluate the kernel at distance `x`. Zero outside `[-radius, radius]`.
    pub fn weight(self, x: f64) -> f64 {
        match self {
            Kernel::Nearest => {
                if x.abs() <= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            Kernel::Bilinear => (1.0 - x.abs()).max(0.0),
            Kernel::Bicubic => cubic_bc(0.0, 0.5, x),
            Kernel::Mitchell => cubic_bc(1.0 / 3.0, 1.0 / 3.0, x),
            Kernel::Lanczos2 => lanczos(2.0, x),
            Kernel::Lanczos3 => lanczos(3.0, x),
        }
    }
}

/// Two-piece cubic convolution parameterised by B and C.
fn cubic_bc(b: f64, c: f64, x: f64) -> f64 {
    let a = x.abs();
    let k = if a < 1.0 {
        (12.0 - 9.0 * b - 6.0 * c) * a.powi(3) + (-18.0 + 12.0 * b + 6.0 * c) * a.powi(2)
            + (6.0 - 2.0 * b)
    } else if a < 2.0 {
        (-b - 6.0 * c) * a.powi(3)
            + (6.0 * b + 30.0 * c) * a.powi(2)
            + (-12.0 * b - 48.0 * c) * a
            + (8.0 * b + 24.0 * c)
    } else {
        0.0
    };
    k / 6.0
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let a = x * PI;
        a.sin() / a
    }
}

fn lanczos(taps: f64, x: f64) -> f64 {
    if x.abs() < taps {
        sinc(x) * sinc(x / taps)
    } else {
        0.0
    }
}

impl FromStr for Kernel {
    type Err = ResizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kernel::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| ResizeError::UnknownKernel(s.to_string()))
    }
}

impl TryFrom<String> for Kernel {
    type Error = ResizeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

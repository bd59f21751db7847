//! Parameter types for resize operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the pipeline driver (which reads flags and config) and
//! [`operations`](super::operations) (which plans and resamples).
//!
//! ## Types
//!
//! - [`Bounds`]: Maximum output box; 0 on an axis means unbounded.
//! - [`ResizeParams`]: Bounds, kernel, and whether enlarging is allowed.

use super::kernel::Kernel;

/// Maximum output width and height. A 0 leaves that axis unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub max_width: u32,
    pub max_height: u32,
}

impl Bounds {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    pub fn is_unbounded(self) -> bool {
        self.max_width == 0 && self.max_height == 0
    }
}

/// Full specification for one thumbnail resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams {
    pub bounds: Bounds,
    pub kernel: Kernel,
    /// Allow the output to exceed the source size when the box is larger.
    pub enlarge: bool,
}

impl Default for ResizeParams {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            kernel: Kernel::default(),
            enlarge: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_are_unbounded() {
        assert!(Bounds::default().is_unbounded());
        assert!(!Bounds::new(10, 0).is_unbounded());
    }

    #[test]
    fn default_params_enlarge_with_nearest() {
        let p = ResizeParams::default();
        assert!(p.enlarge);
        assert_eq!(p.kernel, Kernel::Nearest);
    }
}

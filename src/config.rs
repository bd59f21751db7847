//! Configuration file support.
//!
//! All settings can come from a TOML file passed with `--config`. Command-line
//! flags override file values; missing keys fall back to stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! kernel = "nearest"   # nearest, bilinear, bicubic, mitchell, lanczos2, lanczos3
//! max_width = 0        # Maximum output width (0 = unbounded)
//! max_height = 0       # Maximum output height (0 = unbounded)
//! enlarge = true       # Allow output larger than the source
//! # format = "png"     # Output format; defaults to the input's format
//!
//! [processing]
//! # max_threads = 4    # Resampling threads (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early. An unknown kernel name is
//! reported as [`ResizeError::UnknownKernel`](crate::imaging::ResizeError).

use crate::imaging::{Bounds, Format, Kernel, ResizeParams};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Resize settings loaded from a config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Interpolation kernel.
    pub kernel: Kernel,
    /// Maximum output width; 0 leaves the width unconstrained.
    pub max_width: u32,
    /// Maximum output height; 0 leaves the height unconstrained.
    pub max_height: u32,
    /// Whether a bounding box larger than the source may upscale it.
    pub enlarge: bool,
    /// Output format override. `None` re-encodes in the input's format.
    pub format: Option<Format>,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            kernel: Kernel::default(),
            max_width: 0,
            max_height: 0,
            enlarge: true,
            format: None,
            processing: ProcessingConfig::default(),
        }
    }
}

impl ResizeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn resize_params(&self) -> ResizeParams {
        ResizeParams {
            bounds: Bounds::new(self.max_width, self.max_height),
            kernel: self.kernel,
            enlarge: self.enlarge,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Upper bound on resampling threads.
    /// When absent, all CPU cores are used. Larger values are clamped down.
    pub max_threads: Option<usize>,
}

impl ProcessingConfig {
    /// Thread count for the resampling pool.
    ///
    /// - `None` → every available core
    /// - `Some(n)` → `min(n, cores)`; callers may restrict, never oversubscribe
    pub fn worker_threads(&self) -> usize {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        match self.max_threads {
            Some(n) => n.clamp(1, cores),
            None => cores,
        }
    }
}

/// Parse a config from TOML text and validate it.
pub fn parse_config(text: &str) -> Result<ResizeConfig, ConfigError> {
    let config: ResizeConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load a config file, or stock defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<ResizeConfig, ConfigError> {
    match path {
        Some(path) => parse_config(&fs::read_to_string(path)?),
        None => Ok(ResizeConfig::default()),
    }
}

/// A documented config file with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r#"# thumbfit configuration
# All options are optional - defaults shown below.

# Interpolation kernel: nearest, bilinear, bicubic, mitchell, lanczos2, lanczos3
kernel = "nearest"

# Bounding box for the output. 0 leaves an axis unconstrained; with both at 0
# the image keeps its size.
max_width = 0
max_height = 0

# Allow the output to be larger than the source when the box is bigger.
enlarge = true

# Output format (jpeg, png, gif, tiff, webp, bmp). Defaults to the input's.
# format = "png"

[processing]
# Resampling threads. Omit to use every CPU core; larger values are clamped.
# max_threads = 4
"#
}

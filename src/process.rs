//! Thumbnail pipeline driver.
//!
//! Takes encoded image bytes and produces encoded thumbnail bytes:
//!
//! ```text
//! bytes ─decode─▶ Raster ─plan─▶ target size ─resample─▶ Raster ─encode─▶ bytes
//! ```
//!
//! The codec is injected through [`ImageBackend`] so the driver can be tested
//! with a mock that never touches a real decoder. When the planned size equals
//! the source size the decoded raster is re-encoded without resampling.

use crate::imaging::{
    BackendError, Dimensions, Format, ImageBackend, ResizeError, ResizeParams, create_thumbnail,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Image codec failed: {0}")]
    Backend(#[from] BackendError),
    #[error("Resize failed: {0}")]
    Resize(#[from] ResizeError),
}

/// What to do with one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResizeRequest {
    pub params: ResizeParams,
    /// Output format; `None` re-encodes in the decoded format.
    pub format: Option<Format>,
}

/// Encoded thumbnail plus what happened to produce it.
#[derive(Debug)]
pub struct ProcessResult {
    pub bytes: Vec<u8>,
    pub format: Format,
    pub source: Dimensions,
    pub target: Dimensions,
}

pub fn process(
    backend: &impl ImageBackend,
    bytes: &[u8],
    request: &ResizeRequest,
) -> Result<ProcessResult, ProcessError> {
    let (raster, decoded_format) = backend.decode(bytes)?;
    let source = raster.dimensions();
    let bounds = request.params.bounds;

    tracing::info!(
        "Resizing a {} to maximum {} x {}",
        decoded_format,
        bounds.max_width,
        bounds.max_height
    );
    if bounds.is_unbounded() {
        tracing::debug!("no bounds given, re-encoding at source size");
    }

    let thumbnail = create_thumbnail(&raster, &request.params)?;
    let target = thumbnail.dimensions();
    tracing::info!(
        source = %source,
        target = %target,
        kernel = %request.params.kernel,
        "planned thumbnail"
    );

    let format = request.format.unwrap_or(decoded_format);
    let bytes = backend.encode(&thumbnail, format)?;

    Ok(ProcessResult {
        bytes,
        format,
        source,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::{Bounds, Kernel};
    use crate::test_helpers::*;

    fn request(max_width: u32, max_height: u32) -> ResizeRequest {
        ResizeRequest {
            params: ResizeParams {
                bounds: Bounds::new(max_width, max_height),
                kernel: Kernel::Bilinear,
                enlarge: true,
            },
            format: None,
        }
    }

    #[test]
    fn resizes_and_reencodes_in_decoded_format() {
        let backend = MockBackend::with_raster(rgba8(100, 50, |_, _| [1, 2, 3, 4]), Format::Jpeg);

        let result = process(&backend, b"fake jpeg bytes", &request(40, 40)).unwrap();

        assert_eq!(result.format, Format::Jpeg);
        assert_eq!(result.bytes, b"jpeg");
        assert_eq!((result.source.width, result.source.height), (100, 50));
        assert_eq!((result.target.width, result.target.height), (40, 20));
        assert_eq!(
            backend.get_operations(),
            vec![
                RecordedOp::Decode { len: 15 },
                RecordedOp::Encode {
                    width: 40,
                    height: 20,
                    channels: 4,
                    format: Format::Jpeg
                },
            ]
        );
    }

    #[test]
    fn format_override_wins() {
        let backend = MockBackend::with_raster(gray8(10, 10, |_, _| 0), Format::Gif);
        let mut req = request(5, 5);
        req.format = Some(Format::Png);

        let result = process(&backend, b"GIF89a", &req).unwrap();

        assert_eq!(result.format, Format::Png);
        assert_eq!(result.bytes, b"png");
    }

    #[test]
    fn unbounded_passes_raster_through() {
        let backend = MockBackend::with_raster(gray8(7, 3, |x, _| x as u8), Format::Png);

        let result = process(&backend, b"png", &request(0, 0)).unwrap();

        assert_eq!(result.source, result.target);
        assert!(matches!(
            backend.get_operations()[1],
            RecordedOp::Encode {
                width: 7,
                height: 3,
                ..
            }
        ));
    }

    #[test]
    fn no_enlarge_keeps_source_size() {
        let backend = MockBackend::with_raster(gray8(10, 5, |_, _| 9), Format::Png);
        let mut req = request(100, 0);
        req.params.enlarge = false;

        let result = process(&backend, b"png", &req).unwrap();

        assert_eq!((result.target.width, result.target.height), (10, 5));
    }

    #[test]
    fn oversized_target_is_a_resize_error() {
        let backend = MockBackend::with_raster(gray8(10, 5, |_, _| 0), Format::Png);

        let result = process(&backend, b"png", &request(u32::MAX, 0));

        assert!(matches!(
            result,
            Err(ProcessError::Resize(ResizeError::InvalidTargetDimensions { .. }))
        ));
        assert_eq!(backend.get_operations().len(), 1);
    }

    #[test]
    fn decode_failure_propagates() {
        let backend = MockBackend::new();
        let result = process(&backend, b"", &request(10, 10));
        assert!(matches!(
            result,
            Err(ProcessError::Backend(BackendError::CorruptInput(_)))
        ));
        // Nothing encoded after a failed decode
        assert_eq!(backend.get_operations(), vec![RecordedOp::Decode { len: 0 }]);
    }
}

//! Pure Rust codec backend built on the `image` crate.
//!
//! ## Format mapping
//!
//! | [`Format`] | Decode | Encode |
//! |---|---|---|
//! | JPEG | yes | 8-bit RGB or gray (alpha dropped) |
//! | PNG | yes | any layout, 8 or 16 bit |
//! | GIF | yes | 8-bit RGBA |
//! | TIFF | yes | 8/16-bit gray, RGB, RGBA |
//! | WebP | yes | 8-bit, lossless |
//! | BMP | yes | 8-bit |
//!
//! Decoded images keep their channel layout and bit depth. Float images are
//! converted to 16-bit RGBA since the resampler works on integer samples.

use super::backend::{BackendError, Format, ImageBackend};
use super::raster::{Raster, Samples};
use image::{
    ColorType, DynamicImage, GrayAlphaImage, GrayImage, ImageBuffer, ImageError, ImageReader,
    Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage,
};
use std::io::Cursor;

/// Codec backend using the `image` crate decoders and encoders.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn format_from_image(format: image::ImageFormat) -> Option<Format> {
    match format {
        image::ImageFormat::Jpeg => Some(Format::Jpeg),
        image::ImageFormat::Png => Some(Format::Png),
        image::ImageFormat::Gif => Some(Format::Gif),
        image::ImageFormat::Tiff => Some(Format::Tiff),
        image::ImageFormat::WebP => Some(Format::WebP),
        image::ImageFormat::Bmp => Some(Format::Bmp),
        _ => None,
    }
}

fn image_format(format: Format) -> image::ImageFormat {
    match format {
        Format::Jpeg => image::ImageFormat::Jpeg,
        Format::Png => image::ImageFormat::Png,
        Format::Gif => image::ImageFormat::Gif,
        Format::Tiff => image::ImageFormat::Tiff,
        Format::WebP => image::ImageFormat::WebP,
        Format::Bmp => image::ImageFormat::Bmp,
    }
}

/// Input is already in memory, so read failures mean truncated data.
fn decode_error(e: ImageError) -> BackendError {
    match e {
        ImageError::Unsupported(e) => BackendError::UnsupportedFormat(e.to_string()),
        other => BackendError::CorruptInput(other.to_string()),
    }
}

fn encode_error(e: ImageError) -> BackendError {
    match e {
        ImageError::IoError(e) => BackendError::Io(e),
        other => BackendError::UnsupportedFormat(other.to_string()),
    }
}

/// Move decoded pixels into a [`Raster`] without changing layout or depth.
fn raster_from_image(img: DynamicImage) -> Result<Raster, BackendError> {
    let (width, height) = (img.width(), img.height());
    let raster = match img {
        DynamicImage::ImageLuma8(buf) => Raster::from_u8(width, height, 1, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => Raster::from_u8(width, height, 2, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => Raster::from_u8(width, height, 3, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => Raster::from_u8(width, height, 4, buf.into_raw()),
        DynamicImage::ImageLuma16(buf) => Raster::from_u16(width, height, 1, buf.into_raw()),
        DynamicImage::ImageLumaA16(buf) => Raster::from_u16(width, height, 2, buf.into_raw()),
        DynamicImage::ImageRgb16(buf) => Raster::from_u16(width, height, 3, buf.into_raw()),
        DynamicImage::ImageRgba16(buf) => Raster::from_u16(width, height, 4, buf.into_raw()),
        other => Raster::from_u16(width, height, 4, other.to_rgba16().into_raw()),
    };
    raster.map_err(|e| BackendError::CorruptInput(e.to_string()))
}

/// Wrap raster samples back into the matching `image` buffer type.
fn image_from_raster(raster: &Raster) -> Result<DynamicImage, BackendError> {
    let (w, h) = (raster.width(), raster.height());
    let img = match (raster.samples(), raster.channels()) {
        (Samples::U8(s), 1) => GrayImage::from_raw(w, h, s.clone()).map(DynamicImage::ImageLuma8),
        (Samples::U8(s), 2) => {
            GrayAlphaImage::from_raw(w, h, s.clone()).map(DynamicImage::ImageLumaA8)
        }
        (Samples::U8(s), 3) => RgbImage::from_raw(w, h, s.clone()).map(DynamicImage::ImageRgb8),
        (Samples::U8(s), 4) => RgbaImage::from_raw(w, h, s.clone()).map(DynamicImage::ImageRgba8),
        (Samples::U16(s), 1) => ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w, h, s.clone())
            .map(DynamicImage::ImageLuma16),
        (Samples::U16(s), 2) => ImageBuffer::<LumaA<u16>, Vec<u16>>::from_raw(w, h, s.clone())
            .map(DynamicImage::ImageLumaA16),
        (Samples::U16(s), 3) => ImageBuffer::<Rgb<u16>, Vec<u16>>::from_raw(w, h, s.clone())
            .map(DynamicImage::ImageRgb16),
        (Samples::U16(s), 4) => ImageBuffer::<Rgba<u16>, Vec<u16>>::from_raw(w, h, s.clone())
            .map(DynamicImage::ImageRgba16),
        _ => None,
    };
    img.ok_or_else(|| {
        BackendError::UnsupportedFormat(format!(
            "{} channel raster cannot be encoded",
            raster.channels()
        ))
    })
}

/// Convert to a color type the target encoder accepts.
fn encodable(img: DynamicImage, format: Format) -> DynamicImage {
    let color = img.color();
    match format {
        Format::Png => img,
        Format::Tiff => match color {
            ColorType::La8 => DynamicImage::ImageRgba8(img.to_rgba8()),
            ColorType::La16 => DynamicImage::ImageRgba16(img.to_rgba16()),
            _ => img,
        },
        Format::Jpeg => {
            if color.has_color() {
                DynamicImage::ImageRgb8(img.to_rgb8())
            } else {
                DynamicImage::ImageLuma8(img.to_luma8())
            }
        }
        Format::Gif => DynamicImage::ImageRgba8(img.to_rgba8()),
        Format::WebP | Format::Bmp => {
            if color.has_alpha() {
                DynamicImage::ImageRgba8(img.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(img.to_rgb8())
            }
        }
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, bytes: &[u8]) -> Result<(Raster, Format), BackendError> {
        let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let format = reader
            .format()
            .ok_or_else(|| BackendError::UnsupportedFormat("unrecognized image data".into()))?;
        let format = format_from_image(format).ok_or_else(|| {
            BackendError::UnsupportedFormat(format!("{format:?} input is not supported"))
        })?;
        let img = reader.decode().map_err(decode_error)?;
        Ok((raster_from_image(img)?, format))
    }

    fn encode(&self, raster: &Raster, format: Format) -> Result<Vec<u8>, BackendError> {
        let img = encodable(image_from_raster(raster)?, format);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image_format(format))
            .map_err(encode_error)?;
        Ok(out.into_inner())
    }
}

//! Still image normalization: orientation flattening, rotation correction,
//! proportional resize and encoding.

use crate::config::{OutputFormat, PickerConfig, ResizeBounds};
use image::metadata::Orientation;
use image::{
    codecs::jpeg::JpegEncoder, imageops, imageops::FilterType, DynamicImage, GenericImageView,
    ImageDecoder, ImageFormat, ImageReader, Rgba, RgbaImage,
};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::io::Cursor;

/// Error type for image processing operations
#[derive(Debug)]
pub enum ProcessingError {
    Decode(String),
    Encode(String),
    EmptyImage,
}

impl std::fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingError::Decode(msg) => write!(f, "Image decode error: {}", msg),
            ProcessingError::Encode(msg) => write!(f, "Image encode error: {}", msg),
            ProcessingError::EmptyImage => write!(f, "Image has no pixels"),
        }
    }
}

impl std::error::Error for ProcessingError {}

/// Upper bound for buffers allocated by [`rotate`], in bytes
const MAX_CANVAS_BYTES: u64 = 1 << 30;

/// Decodes encoded picker output and bakes its EXIF orientation into the pixels
pub fn decode_oriented(bytes: &[u8]) -> Result<DynamicImage, ProcessingError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ProcessingError::Decode(format!("Failed to guess format: {}", e)))?;
    let mut decoder = reader
        .into_decoder()
        .map_err(|e| ProcessingError::Decode(format!("Unsupported image: {}", e)))?;

    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);

    let mut img = DynamicImage::from_decoder(decoder)
        .map_err(|e| ProcessingError::Decode(format!("Failed to decode image: {}", e)))?;

    if !matches!(orientation, Orientation::NoTransforms) {
        log::debug!("Applying EXIF orientation {:?}", orientation);
        img.apply_orientation(orientation);
    }

    Ok(img)
}

/// Rotates clockwise by `radians` into the integral bounding box of the
/// rotated image. The result is always a freshly rasterized RGBA buffer, so a
/// full turn flattens the image without changing what it shows.
///
/// Empty images and canvases that cannot be allocated return the input as is.
pub fn rotate(img: &DynamicImage, radians: f64) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 || !radians.is_finite() {
        log::warn!(
            "Skipping rotation of {}x{} image by {}",
            width,
            height,
            radians
        );
        return img.clone();
    }

    let turns = radians / FRAC_PI_2;
    let quarter = turns.round();
    if (turns - quarter).abs() < 1e-9 {
        let rgba = img.to_rgba8();
        let rotated = match (quarter as i64).rem_euclid(4) {
            1 => imageops::rotate90(&rgba),
            2 => imageops::rotate180(&rgba),
            3 => imageops::rotate270(&rgba),
            _ => rgba,
        };
        return DynamicImage::ImageRgba8(rotated);
    }

    let (sin, cos) = radians.sin_cos();
    let (src_w, src_h) = (width as f64, height as f64);
    let out_w = (src_w * cos.abs() + src_h * sin.abs() - 1e-6).ceil();
    let out_h = (src_w * sin.abs() + src_h * cos.abs() - 1e-6).ceil();

    let Some((out_w, out_h)) = canvas_size(out_w, out_h) else {
        log::warn!(
            "Rotation canvas for {}x{} image too large, returning input",
            width,
            height
        );
        return img.clone();
    };

    let src = img.to_rgba8();
    let (src_cx, src_cy) = (src_w / 2.0, src_h / 2.0);
    let (dst_cx, dst_cy) = (out_w as f64 / 2.0, out_h as f64 / 2.0);

    let canvas = RgbaImage::from_fn(out_w, out_h, |x, y| {
        let dx = x as f64 + 0.5 - dst_cx;
        let dy = y as f64 + 0.5 - dst_cy;
        let sx = cos * dx + sin * dy + src_cx;
        let sy = -sin * dx + cos * dy + src_cy;
        if sx >= 0.0 && sy >= 0.0 && sx < src_w && sy < src_h {
            *src.get_pixel(sx as u32, sy as u32)
        } else {
            Rgba([0, 0, 0, 0])
        }
    });

    DynamicImage::ImageRgba8(canvas)
}

fn canvas_size(width: f64, height: f64) -> Option<(u32, u32)> {
    if !(width >= 1.0 && height >= 1.0) || width > u32::MAX as f64 || height > u32::MAX as f64 {
        return None;
    }
    let (w, h) = (width as u32, height as u32);
    let bytes = (w as u64).checked_mul(h as u64)?.checked_mul(4)?;
    (bytes <= MAX_CANVAS_BYTES).then_some((w, h))
}

/// Scales in two sequential steps: first by width, then, using the possibly
/// already reduced height, by height. Sizes within bounds are untouched.
pub fn scaled_size(width: f64, height: f64, bounds: &ResizeBounds) -> (f64, f64) {
    let (mut width, mut height) = (width, height);

    if width > bounds.max_width {
        let ratio = bounds.max_width / width;
        width *= ratio;
        height *= ratio;
    }

    if height > bounds.max_height {
        let ratio = bounds.max_height / height;
        width *= ratio;
        height *= ratio;
    }

    (width, height)
}

/// [`scaled_size`] rounded to whole pixels, never below 1x1 and never past
/// the whole-pixel part of a bound
pub fn scaled_pixel_size(width: u32, height: u32, bounds: &ResizeBounds) -> (u32, u32) {
    let (w, h) = scaled_size(width as f64, height as f64, bounds);
    let w = w.round().min(bounds.max_width.floor());
    let h = h.round().min(bounds.max_height.floor());
    ((w as u32).max(1), (h as u32).max(1))
}

/// Resizes `img` to fit `bounds`; images already within bounds come back unchanged
pub fn resize_within(img: DynamicImage, bounds: &ResizeBounds) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img;
    }

    let (new_width, new_height) = scaled_pixel_size(width, height, bounds);
    if (new_width, new_height) == (width, height) {
        return img;
    }

    log::debug!(
        "Resizing {}x{} -> {}x{}",
        width,
        height,
        new_width,
        new_height
    );
    img.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

/// Full normalization pass applied to every picked still image
pub fn normalize(img: DynamicImage, config: &PickerConfig) -> DynamicImage {
    let flattened = rotate(&img, TAU);
    resize_within(flattened, &config.resize_bounds)
}

/// True when at least one pixel is not fully opaque
pub fn has_transparency(img: &DynamicImage) -> bool {
    if !img.color().has_alpha() {
        return false;
    }
    img.pixels().any(|(_, _, px)| px.0[3] < u8::MAX)
}

/// Encodes `img` according to `format`, returning the bytes and the format used
pub fn encode(
    img: &DynamicImage,
    format: OutputFormat,
) -> Result<(Vec<u8>, ImageFormat), ProcessingError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(ProcessingError::EmptyImage);
    }

    let format = match format {
        OutputFormat::Auto if has_transparency(img) => OutputFormat::Png,
        OutputFormat::Auto => OutputFormat::Jpeg {
            quality: OutputFormat::default_jpeg_quality(),
        },
        other => other,
    };

    let mut buffer = Cursor::new(Vec::new());
    let image_format = match format {
        OutputFormat::Jpeg { quality } => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, quality))
                .map_err(|e| ProcessingError::Encode(format!("Failed to write JPEG: {}", e)))?;
            ImageFormat::Jpeg
        }
        OutputFormat::Png | OutputFormat::Auto => {
            img.write_to(&mut buffer, ImageFormat::Png)
                .map_err(|e| ProcessingError::Encode(format!("Failed to write PNG: {}", e)))?;
            ImageFormat::Png
        }
        OutputFormat::WebP => {
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            rgba.write_to(&mut buffer, ImageFormat::WebP)
                .map_err(|e| ProcessingError::Encode(format!("Failed to write WebP: {}", e)))?;
            ImageFormat::WebP
        }
    };

    Ok((buffer.into_inner(), image_format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn bounds() -> ResizeBounds {
        ResizeBounds::new(1500.0, 2000.0)
    }

    fn opaque(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([10, 120, 200]),
        ))
    }

    #[test]
    fn test_scaled_size_width_exceeds() {
        assert_eq!(scaled_size(3000.0, 1000.0, &bounds()), (1500.0, 500.0));
        assert_eq!(scaled_pixel_size(3000, 1000, &bounds()), (1500, 500));
    }

    #[test]
    fn test_scaled_size_height_exceeds() {
        let (w, h) = scaled_size(1000.0, 3000.0, &bounds());
        assert!((w - 666.666).abs() < 0.01);
        assert!((h - 2000.0).abs() < 1e-9);
        assert_eq!(scaled_pixel_size(1000, 3000, &bounds()), (667, 2000));
    }

    #[test]
    fn test_scaled_size_both_exceed() {
        // Width step: 3000x4000 * 0.5 = 1500x2000, height step is then a no-op
        assert_eq!(scaled_pixel_size(3000, 4000, &bounds()), (1500, 2000));
        // Width step: 6000x9000 * 0.25 = 1500x2250; height step: * 2000/2250
        assert_eq!(scaled_pixel_size(6000, 9000, &bounds()), (1333, 2000));
    }

    #[test]
    fn test_scaled_size_is_sequential_not_min_ratio() {
        // Width step already brings height under its bound, so only one ratio applies
        let tight = ResizeBounds::new(100.0, 100.0);
        assert_eq!(scaled_pixel_size(400, 300, &tight), (100, 75));
        // Never grows an image
        assert_eq!(scaled_pixel_size(20, 10, &tight), (20, 10));
    }

    #[test]
    fn test_scaled_never_exceeds_bounds() {
        let b = bounds();
        for (w, h) in [(4000, 10), (10, 9000), (5000, 5000), (1501, 2001), (1, 1)] {
            let (nw, nh) = scaled_pixel_size(w, h, &b);
            assert!(nw as f64 <= b.max_width, "{}x{} -> {}x{}", w, h, nw, nh);
            assert!(nh as f64 <= b.max_height, "{}x{} -> {}x{}", w, h, nw, nh);
        }
    }

    #[test]
    fn test_fractional_bounds_are_not_exceeded() {
        let b = ResizeBounds::new(100.5, 100.5);
        assert_eq!(scaled_pixel_size(101, 50, &b), (100, 50));
        assert_eq!(scaled_pixel_size(50, 101, &b), (50, 100));

        let b = ResizeBounds::new(333.3, 200.9);
        for (w, h) in [(1000, 601), (334, 100), (999, 999), (400, 201)] {
            let (nw, nh) = scaled_pixel_size(w, h, &b);
            assert!(nw as f64 <= b.max_width, "{}x{} -> {}x{}", w, h, nw, nh);
            assert!(nh as f64 <= b.max_height, "{}x{} -> {}x{}", w, h, nw, nh);
        }

        let resized = resize_within(opaque(101, 50), &ResizeBounds::new(100.5, 100.5));
        assert_eq!(resized.dimensions(), (100, 50));
    }

    #[test]
    fn test_resize_within_bounds_is_unchanged() {
        let img = opaque(120, 80);
        let resized = resize_within(img.clone(), &bounds());
        assert_eq!(resized.dimensions(), (120, 80));
        assert_eq!(resized.as_bytes(), img.as_bytes());
    }

    #[test]
    fn test_resize_within_is_idempotent() {
        let small = ResizeBounds::new(50.0, 40.0);
        let once = resize_within(opaque(200, 100), &small);
        assert_eq!(once.dimensions(), (50, 25));
        let twice = resize_within(once.clone(), &small);
        assert_eq!(twice.dimensions(), once.dimensions());
        assert_eq!(twice.as_bytes(), once.as_bytes());
    }

    #[test]
    fn test_full_turn_keeps_dimensions_and_alpha() {
        let mut rgba = RgbaImage::from_pixel(7, 3, Rgba([255, 0, 0, 255]));
        rgba.put_pixel(2, 1, Rgba([0, 255, 0, 40]));
        let img = DynamicImage::ImageRgba8(rgba);

        let rotated = rotate(&img, 2.0 * PI);
        assert_eq!(rotated.dimensions(), (7, 3));
        assert_eq!(rotated.get_pixel(2, 1), Rgba([0, 255, 0, 40]));
        assert_eq!(rotated.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_quarter_turn_swaps_dimensions() {
        let img = opaque(4, 2);
        assert_eq!(rotate(&img, FRAC_PI_2).dimensions(), (2, 4));
        assert_eq!(rotate(&img, PI).dimensions(), (4, 2));
        assert_eq!(rotate(&img, -FRAC_PI_2).dimensions(), (2, 4));
    }

    #[test]
    fn test_quarter_turn_is_clockwise() {
        let mut rgba = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        rgba.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        let rotated = rotate(&DynamicImage::ImageRgba8(rgba), FRAC_PI_2);
        // Left pixel ends up on top
        assert_eq!(rotated.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(rotated.get_pixel(0, 1), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_arbitrary_angle_uses_bounding_box() {
        let img = opaque(10, 10);
        let rotated = rotate(&img, PI / 4.0);
        // 10 * sqrt(2) = 14.14
        assert_eq!(rotated.dimensions(), (15, 15));
        // Corners fall outside the source and stay transparent
        assert_eq!(rotated.get_pixel(0, 0)[3], 0);
        assert_eq!(rotated.get_pixel(7, 7)[3], 255);
    }

    #[test]
    fn test_empty_image_is_returned_unchanged() {
        let img = DynamicImage::new_rgba8(0, 0);
        let rotated = rotate(&img, 2.0 * PI);
        assert_eq!(rotated.dimensions(), (0, 0));
        assert_eq!(resize_within(img, &bounds()).dimensions(), (0, 0));
    }

    #[test]
    fn test_normalize_resizes_after_rotation() {
        let config = PickerConfig {
            resize_bounds: ResizeBounds::new(30.0, 40.0),
            ..PickerConfig::default()
        };
        let normalized = normalize(opaque(60, 20), &config);
        assert_eq!(normalized.dimensions(), (30, 10));
    }

    #[test]
    fn test_encode_auto_picks_png_for_transparency() {
        let mut rgba = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        rgba.put_pixel(0, 0, Rgba([1, 2, 3, 0]));
        let (_, format) = encode(&DynamicImage::ImageRgba8(rgba), OutputFormat::Auto).unwrap();
        assert_eq!(format, ImageFormat::Png);

        let solid = rotate(&opaque(4, 4), TAU);
        let (bytes, format) = encode(&solid, OutputFormat::Auto).unwrap();
        assert_eq!(format, ImageFormat::Jpeg);
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_then_decode_keeps_size() {
        let (bytes, _) = encode(&opaque(9, 5), OutputFormat::Png).unwrap();
        let decoded = decode_oriented(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (9, 5));
    }

    #[test]
    fn test_encode_empty_is_error() {
        let result = encode(&DynamicImage::new_rgb8(0, 0), OutputFormat::Png);
        assert!(matches!(result, Err(ProcessingError::EmptyImage)));
    }

    #[test]
    fn test_decode_garbage_is_error() {
        let result = decode_oriented(b"definitely not an image");
        assert!(matches!(result, Err(ProcessingError::Decode(_))));
    }
}

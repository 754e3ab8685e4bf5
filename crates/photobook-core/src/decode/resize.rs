//! Resampling to an exact print size.

use super::{DecodeError, DecodedImage, FilterType};

/// Resample an image to exact dimensions.
///
/// The aspect ratio is not preserved; callers pass a crop that already has
/// the target shape.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for a zero target dimension and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// declared size.
pub fn resize(
    image: DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width == width && image.height == height {
        return Ok(image);
    }

    let rgb_image = image
        .into_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_downsample() {
        let resized = resize(gradient(100, 50), 50, 25, FilterType::Lanczos3).unwrap();
        assert_eq!((resized.width, resized.height), (50, 25));
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_upsample() {
        let resized = resize(gradient(50, 25), 120, 60, FilterType::CatmullRom).unwrap();
        assert_eq!((resized.width, resized.height), (120, 60));
    }

    #[test]
    fn test_stretches_to_requested_shape() {
        let resized = resize(gradient(100, 100), 30, 90, FilterType::Lanczos3).unwrap();
        assert_eq!((resized.width, resized.height), (30, 90));
    }

    #[test]
    fn test_same_size_returns_input() {
        let img = gradient(40, 20);
        let resized = resize(img.clone(), 40, 20, FilterType::Lanczos3).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_flat_colour_survives_resampling() {
        let img = DecodedImage::filled(64, 64, [200, 100, 50]);
        let resized = resize(img, 17, 9, FilterType::Lanczos3).unwrap();
        for px in resized.pixels.chunks_exact(3) {
            assert_eq!(px, &[200, 100, 50]);
        }
    }

    #[test]
    fn test_zero_dimensions_error() {
        assert!(resize(gradient(10, 10), 0, 5, FilterType::Lanczos3).is_err());
        assert!(resize(gradient(10, 10), 5, 0, FilterType::Lanczos3).is_err());
    }
}

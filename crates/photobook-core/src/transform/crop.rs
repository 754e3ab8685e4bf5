//! Pixel cropping.
//!
//! Crop rectangles come from [`crate::geometry::calculate_crop`] in
//! fractional pixels. Each edge is rounded to the nearest whole pixel
//! independently, so a crop's pixel size can differ from its fractional size
//! by one.

use crate::decode::DecodedImage;
use crate::CropRect;

/// Whole-pixel bounds of a crop: `(left, top, right, bottom)`, right/bottom
/// exclusive.
///
/// Edges are clamped to the image and the result is at least 1x1.
pub fn pixel_bounds(rect: &CropRect, width: u32, height: u32) -> (u32, u32, u32, u32) {
    let round_to = |v: f64, max: u32| v.round().clamp(0.0, max as f64) as u32;

    let left = round_to(rect.x, width.saturating_sub(1));
    let top = round_to(rect.y, height.saturating_sub(1));
    let right = round_to(rect.x + rect.width, width).max(left + 1);
    let bottom = round_to(rect.y + rect.height, height).max(top + 1);

    (left, top, right, bottom)
}

/// Copy the region covered by `rect` into a new image.
pub fn apply_crop(image: &DecodedImage, rect: &CropRect) -> DecodedImage {
    let (left, top, right, bottom) = pixel_bounds(rect, image.width, image.height);

    if left == 0 && top == 0 && right == image.width && bottom == image.height {
        return image.clone();
    }

    let out_width = right - left;
    let out_height = bottom - top;
    let src_stride = image.width as usize * 3;
    let row_len = out_width as usize * 3;

    let mut output = Vec::with_capacity(row_len * out_height as usize);
    for y in top..bottom {
        let start = y as usize * src_stride + left as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage::new(out_width, out_height, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::calculate_crop;
    use proptest::prelude::*;

    proptest! {
        /// Property: Crops from the solver always produce a valid buffer
        /// within the source bounds.
        #[test]
        fn prop_solver_crops_are_valid(
            (width, height) in (1u32..=120, 1u32..=120),
            (cell_w, cell_h) in (1u32..=50, 1u32..=50),
            (fx, fy) in (0.0f64..=1.0, 0.0f64..=1.0),
            zoom in 1.0f64..=3.0,
        ) {
            let img = DecodedImage::filled(width, height, [7, 7, 7]);
            let crop = calculate_crop(
                width as f64, height as f64, cell_w as f64, cell_h as f64, fx, fy, zoom,
            );
            let result = apply_crop(&img, &crop);

            prop_assert!(result.width >= 1 && result.width <= width);
            prop_assert!(result.height >= 1 && result.height <= height);
            prop_assert_eq!(
                result.pixels.len(),
                (result.width * result.height * 3) as usize
            );
        }

        /// Property: Rounded size is within one pixel of the fractional size.
        #[test]
        fn prop_rounding_within_one_pixel(
            (width, height) in (10u32..=500, 10u32..=500),
            (fx, fy) in (0.0f64..=1.0, 0.0f64..=1.0),
            zoom in 1.0f64..=3.0,
        ) {
            let crop = calculate_crop(width as f64, height as f64, 3.0, 2.0, fx, fy, zoom);
            let (left, top, right, bottom) = pixel_bounds(&crop, width, height);
            prop_assert!(((right - left) as f64 - crop.width).abs() <= 1.0);
            prop_assert!(((bottom - top) as f64 - crop.height).abs() <= 1.0);
        }
    }
}

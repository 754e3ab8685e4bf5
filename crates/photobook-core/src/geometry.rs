//! Crop geometry: from user intent (focal point, zoom) to pixel rectangles.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in source-image pixels, origin at the top-left
//! - Focal points are normalized (0.0 to 1.0) relative to image dimensions
//! - Cell sizes are only used for their aspect ratio, so any unit works
//!
//! # Algorithm
//!
//! 1. Find the "cover box": the largest rectangle with the cell's aspect ratio
//!    that fits inside the image.
//! 2. Shrink it by the zoom factor (zoom 2.0 = half width, half height).
//! 3. Center it on the focal point.
//! 4. Slide it back inside the image if it pokes out of an edge.

use crate::{CropRect, MM_PER_INCH};

/// Restrict `value` to `[min, max]`.
///
/// `min <= max` is a precondition. Unlike [`f64::clamp`] this does not panic
/// when it is violated; `max` wins.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    max.min(min.max(value))
}

/// Calculate the crop rectangle for an image shown in a cell.
///
/// # Arguments
///
/// * `img_w`, `img_h` - Source image size in pixels
/// * `cell_w`, `cell_h` - Target shape (only the ratio matters)
/// * `focal_x`, `focal_y` - Focal point (0.0 to 1.0)
/// * `zoom` - Magnification, 1.0 = exact cover fit
///
/// # Behavior
///
/// - The result always has the aspect ratio `cell_w / cell_h`
/// - For `zoom >= 1.0` the result lies entirely inside the image
/// - A focal point near an edge does not move the crop past the edge; the box
///   is slid back in, so the focal point is no longer centered
/// - For `zoom < 1.0` the box can be larger than the image and is only
///   position-clamped; callers must keep zoom at or above 1.0
pub fn calculate_crop(
    img_w: f64,
    img_h: f64,
    cell_w: f64,
    cell_h: f64,
    focal_x: f64,
    focal_y: f64,
    zoom: f64,
) -> CropRect {
    let img_ar = img_w / img_h;
    let cell_ar = cell_w / cell_h;

    let (base_w, base_h) = if img_ar > cell_ar {
        // Image is relatively wider: height is the constraint
        (img_h * cell_ar, img_h)
    } else {
        (img_w, img_w / cell_ar)
    };

    let width = base_w / zoom;
    let height = base_h / zoom;

    let focal_px_x = focal_x * img_w;
    let focal_px_y = focal_y * img_h;

    let x = clamp(focal_px_x - width / 2.0, 0.0, img_w - width);
    let y = clamp(focal_px_y - height / 2.0, 0.0, img_h - height);

    CropRect {
        x,
        y,
        width,
        height,
    }
}

/// Pixel density of a crop once printed at `print_width_mm`.
///
/// Only used as a quality diagnostic.
pub fn calculate_effective_dpi(crop_width_px: f64, print_width_mm: f64) -> f64 {
    crop_width_px / (print_width_mm / MM_PER_INCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_inverted_bounds_prefers_max() {
        assert_eq!(clamp(3.0, 0.0, -2.0), -2.0);
    }

    #[test]
    fn test_wide_image_square_cell() {
        // 6000x4000 into a square: height-constrained 4000x4000, centered
        let crop = calculate_crop(6000.0, 4000.0, 100.0, 100.0, 0.5, 0.5, 1.0);
        assert_eq!(crop.width, 4000.0);
        assert_eq!(crop.height, 4000.0);
        assert_eq!(crop.x, 1000.0);
        assert_eq!(crop.y, 0.0);
    }

    #[test]
    fn test_tall_image_wide_cell() {
        // 3000x4000 into a 2:1 cell: width-constrained 3000x1500
        let crop = calculate_crop(3000.0, 4000.0, 200.0, 100.0, 0.5, 0.5, 1.0);
        assert_eq!(crop.width, 3000.0);
        assert_eq!(crop.height, 1500.0);
        assert_eq!(crop.x, 0.0);
        assert_eq!(crop.y, 1250.0);
    }

    #[test]
    fn test_zoom_halves_the_box() {
        let crop = calculate_crop(4000.0, 4000.0, 1.0, 1.0, 0.5, 0.5, 2.0);
        assert_eq!(crop.width, 2000.0);
        assert_eq!(crop.height, 2000.0);
        assert_eq!(crop.x, 1000.0);
        assert_eq!(crop.y, 1000.0);
    }

    #[test]
    fn test_focal_point_follows_subject() {
        let crop = calculate_crop(4000.0, 4000.0, 1.0, 1.0, 0.25, 0.75, 2.0);
        assert_eq!(crop.x, 0.0);
        assert_eq!(crop.y, 2000.0);
    }

    #[test]
    fn test_focal_point_at_corner_is_clamped() {
        let crop = calculate_crop(6000.0, 4000.0, 1.0, 1.0, 1.0, 0.0, 1.0);
        // Box slides left until its right edge touches the image edge
        assert_eq!(crop.x, 2000.0);
        assert_eq!(crop.y, 0.0);
        assert!(crop.fits_within(6000.0, 4000.0));
    }

    #[test]
    fn test_same_aspect_ratio_takes_whole_image() {
        let crop = calculate_crop(730.0, 598.0, 730.0, 598.0, 0.5, 0.5, 1.0);
        assert!((crop.width - 730.0).abs() < EPS);
        assert!((crop.height - 598.0).abs() < EPS);
        assert!(crop.x.abs() < EPS);
        assert!(crop.y.abs() < EPS);
    }

    #[test]
    fn test_zoom_below_one_is_only_position_clamped() {
        let crop = calculate_crop(100.0, 100.0, 1.0, 1.0, 0.5, 0.5, 0.5);
        assert_eq!(crop.width, 200.0);
        // clamp(-50, 0, -100) -> -100
        assert_eq!(crop.x, -100.0);
        assert!(!crop.fits_within(100.0, 100.0));
    }

    #[test]
    fn test_effective_dpi() {
        // 3000 px across 254mm (10 inches) = 300 dpi
        assert!((calculate_effective_dpi(3000.0, 254.0) - 300.0).abs() < EPS);
        assert!((calculate_effective_dpi(1000.0, 254.0) - 100.0).abs() < EPS);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

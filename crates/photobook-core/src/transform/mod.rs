//! Pixel-space transforms applied to decoded images.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in source pixels, origin at the top-left corner
//! - Fractional edges are rounded to whole pixels when the copy is made

mod crop;

pub use crop::{apply_crop, pixel_bounds};

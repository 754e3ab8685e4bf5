//! PDF canvas collaborator.
//!
//! Layout code draws through the [`Canvas`] trait so it can be exercised
//! without producing a file. [`PdfCanvas`] is the real implementation, built
//! on `lopdf`.
//!
//! Positions are millimetres from the bottom-left corner of the page; font
//! sizes and text widths are PDF points.

mod canvas;
mod font;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;
use crate::encode::EncodeError;
use crate::{PlacementRect, MM_PER_INCH};

pub use canvas::PdfCanvas;
pub use font::StandardFont;

/// PDF points per inch.
pub const PT_PER_INCH: f64 = 72.0;

pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_INCH / MM_PER_INCH
}

pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_INCH / PT_PER_INCH
}

/// Errors raised while drawing or writing a PDF.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image embedding failed: {0}")]
    Encode(#[from] EncodeError),

    /// Text was drawn before any font was selected.
    #[error("No font selected")]
    NoFont,
}

/// An 8-bit RGB fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to 0.0-1.0 for the `rg` operator.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// How page images are compressed inside the PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageEncoding {
    /// Lossless zlib of the raw RGB samples.
    #[default]
    Flate,
    /// Baseline JPEG at the given quality.
    Jpeg { quality: u8 },
}

/// A drawing surface made of fixed-size pages.
pub trait Canvas {
    /// Draw `image` stretched to fill `rect`.
    fn draw_image(&mut self, image: &DecodedImage, rect: &PlacementRect)
        -> Result<(), CanvasError>;

    fn set_fill_color(&mut self, color: Rgb);

    fn set_font(&mut self, font: StandardFont, size_pt: f64);

    /// Width of `text` in points.
    fn measure_text_width(&self, text: &str, font: StandardFont, size_pt: f64) -> f64 {
        font.text_width(text, size_pt)
    }

    /// Push the graphics state: transform, fill colour and font.
    fn save_state(&mut self);

    fn restore_state(&mut self);

    fn translate(&mut self, x_mm: f64, y_mm: f64);

    /// Rotate the coordinate system counter-clockwise.
    fn rotate(&mut self, degrees: f64);

    /// Draw `text` with its baseline starting at the given point.
    fn draw_text(&mut self, x_mm: f64, y_mm: f64, text: &str) -> Result<(), CanvasError>;

    /// Finish the current page and start a new one.
    fn show_page(&mut self) -> Result<(), CanvasError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
        assert!((pt_to_mm(72.0) - 25.4).abs() < 1e-9);
        assert!((pt_to_mm(mm_to_pt(356.0)) - 356.0).abs() < 1e-9);
    }

    #[test]
    fn test_rgb_to_unit() {
        assert_eq!(Rgb::WHITE.to_unit(), [1.0, 1.0, 1.0]);
        assert_eq!(Rgb::new(0, 0, 0).to_unit(), [0.0, 0.0, 0.0]);
        assert_eq!(Rgb::new(51, 102, 255).to_unit(), [0.2, 0.4, 1.0]);
    }

    #[test]
    fn test_image_encoding_serde() {
        let flate: ImageEncoding = serde_json::from_str("\"flate\"").unwrap();
        assert_eq!(flate, ImageEncoding::Flate);
        let jpeg: ImageEncoding = serde_json::from_str(r#"{"jpeg": {"quality": 90}}"#).unwrap();
        assert_eq!(jpeg, ImageEncoding::Jpeg { quality: 90 });
    }
}

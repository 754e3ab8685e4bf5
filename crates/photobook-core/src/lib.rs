//! Photobook Core - crop and layout engine for print-ready photobooks
//!
//! This crate turns an album description (pages of rows or columns of image
//! cells, each with a focal point and zoom) into fixed-size raster crops placed
//! on PDF canvases: one pipeline for the interior pages and one for the
//! back/spine/front cover spread.
//!
//! # Module Structure
//!
//! - `geometry` - crop rectangle solver and effective DPI
//! - `spine` - paper page count to spine width lookup
//! - `album` - typed album model built from `album.json`
//! - `render` - per-cell crop, resample and draw
//! - `layout` - row/column walk for interior pages
//! - `cover` - three-panel cover spread
//! - `decode`, `transform`, `encode` - image collaborator
//! - `pdf` - PDF canvas collaborator
//! - `driver` - whole-document generation

pub mod album;
pub mod config;
pub mod cover;
pub mod decode;
pub mod diagnostics;
pub mod driver;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod pdf;
pub mod render;
pub mod spine;
pub mod transform;

#[cfg(test)]
mod testing;

pub use album::{Album, AlbumError, Cell, Column, LayoutAxis, Page, Row};
pub use config::{ConfigError, CoverConfig, PhotobookConfig, PrintConfig};
pub use cover::{CoverComposer, CoverLayout, CoverSide};
pub use diagnostics::{Diagnostics, Warning};
pub use driver::{generate_cover, generate_interior, load_album_folder, RunReport};
pub use error::PhotobookError;
pub use geometry::{calculate_crop, calculate_effective_dpi, clamp};
pub use layout::{layout_page, CellPlacement, PageLayoutEngine};
pub use pdf::{Canvas, PdfCanvas};
pub use render::{CellRenderer, RenderSettings};
pub use spine::{
    calculate_paper_pages, calculate_total_width, SpineError, SpineTable, SpineTableError,
};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Normalized point of interest within a source image.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FocalPoint {
    /// Horizontal position (0.0 = left edge, 1.0 = right edge)
    pub x: f64,
    /// Vertical position (0.0 = top edge, 1.0 = bottom edge)
    pub y: f64,
}

impl Default for FocalPoint {
    fn default() -> Self {
        Self::CENTER
    }
}

impl FocalPoint {
    /// The image center, used when a cell declares no focal point.
    pub const CENTER: FocalPoint = FocalPoint { x: 0.5, y: 0.5 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Crop rectangle in source-image pixel space.
///
/// Produced by [`calculate_crop`]; for any zoom >= 1 it lies entirely inside
/// the source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Check that the rectangle lies inside an image of the given size.
    pub fn fits_within(&self, img_w: f64, img_h: f64) -> bool {
        const EPS: f64 = 1e-9;
        self.x >= -EPS
            && self.y >= -EPS
            && self.x + self.width <= img_w + EPS
            && self.y + self.height <= img_h + EPS
    }
}

/// Placement of a drawn image on a canvas, in millimetres.
///
/// The origin is the bottom-left corner of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacementRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Pixel size of this rectangle when rasterized at `dpi`.
    ///
    /// Never returns a zero dimension.
    pub fn pixel_size(&self, dpi: f64) -> (u32, u32) {
        let w = (self.width / MM_PER_INCH * dpi).round().max(1.0) as u32;
        let h = (self.height / MM_PER_INCH * dpi).round().max(1.0) as u32;
        (w, h)
    }
}

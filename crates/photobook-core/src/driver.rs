//! Whole-document generation.
//!
//! Each driver validates everything it can before touching an image, draws
//! into an in-memory [`PdfCanvas`], and only writes the output file once every
//! page has been drawn. A fatal error therefore never leaves a partial PDF
//! behind.

use std::path::Path;

use crate::album::Album;
use crate::config::{CoverConfig, PrintConfig};
use crate::cover::CoverComposer;
use crate::decode::ImageLoader;
use crate::diagnostics::Diagnostics;
use crate::error::PhotobookError;
use crate::layout::PageLayoutEngine;
use crate::pdf::{Canvas, PdfCanvas};

/// Album description file inside an album folder.
pub const ALBUM_FILE: &str = "album.json";
/// Default interior output file name.
pub const INTERIOR_FILE: &str = "photobook.pdf";
/// Default cover output file name.
pub const COVER_FILE: &str = "cover.pdf";

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub pages_rendered: usize,
    /// Everything recorded along the way, in order.
    pub diagnostics: Diagnostics,
}

/// Read and parse `album.json` from an album folder.
pub fn load_album_folder(folder: &Path, config: &PrintConfig) -> Result<Album, PhotobookError> {
    if !folder.is_dir() {
        return Err(PhotobookError::NotADirectory(folder.to_path_buf()));
    }

    let album_path = folder.join(ALBUM_FILE);
    if !album_path.is_file() {
        return Err(PhotobookError::AlbumNotFound(folder.to_path_buf()));
    }

    log::info!("Loading album from: {}", album_path.display());
    let text = std::fs::read_to_string(&album_path)?;
    let album = Album::from_json_str(&text, &config.column_layouts).map_err(|source| {
        PhotobookError::InvalidAlbum {
            path: album_path.clone(),
            source,
        }
    })?;

    log::info!(
        "Album version: {}",
        album.version.as_deref().unwrap_or("unknown")
    );
    log::info!("Pages: {}", album.pages.len());
    Ok(album)
}

/// Render the interior pages (all but the first and last) to `output`.
pub fn generate_interior<L: ImageLoader + ?Sized>(
    album: &Album,
    loader: &L,
    config: &PrintConfig,
    output: &Path,
) -> Result<RunReport, PhotobookError> {
    let pages = album.interior_pages();
    if pages.is_empty() {
        return Err(PhotobookError::NoInteriorPages);
    }

    log::info!("Generating PDF: {}", output.display());
    log::info!(
        "Page size: {}x{}mm, margins: {}mm, scale factor: {:.4} mm/px",
        config.page_width_mm,
        config.page_height_mm,
        config.margin_mm,
        config.scale_factor()
    );

    let mut canvas = PdfCanvas::new(config.page_width_mm, config.page_height_mm)
        .with_encoding(config.image_encoding);
    let mut diagnostics = Diagnostics::new();

    let engine = PageLayoutEngine::new(config, loader);
    let rendered = engine.render_pages(&mut canvas, pages, &mut diagnostics)?;
    canvas.show_page()?;
    canvas.save(output)?;

    log::info!("PDF generated successfully: {}", output.display());
    Ok(RunReport {
        pages_rendered: rendered,
        diagnostics,
    })
}

/// Render the cover spread with `year` on the spine to `output`.
pub fn generate_cover<L: ImageLoader + ?Sized>(
    album: &Album,
    year: &str,
    loader: &L,
    config: &CoverConfig,
    output: &Path,
) -> Result<RunReport, PhotobookError> {
    let mut diagnostics = Diagnostics::new();
    let composer = CoverComposer::new(config, loader);
    let plan = composer.plan(album, year, &mut diagnostics)?;

    let mut canvas = PdfCanvas::new(plan.layout.total_width_mm, plan.layout.height_mm)
        .with_encoding(config.image_encoding);
    composer.draw(&mut canvas, &plan, &mut diagnostics)?;
    canvas.show_page()?;
    canvas.save(output)?;

    log::info!("Cover PDF generated successfully: {}", output.display());
    Ok(RunReport {
        pages_rendered: 1,
        diagnostics,
    })
}

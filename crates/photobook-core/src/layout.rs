//! Interior page layout.
//!
//! Editor sizes are converted to millimetres with a single scale factor
//! (print area width over editor page width) and walked from the top-left of
//! the printable area. Gutters separate neighbours only; there is none after
//! the last row, column or cell. PDF space has its origin at the bottom-left,
//! so a cell whose top edge is `offset` mm below the printable area's top sits
//! at `y = page_height - margin - offset - cell_height`.

use crate::album::{Cell, LayoutAxis, Page};
use crate::config::PrintConfig;
use crate::decode::{DecodeError, ImageLoader};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::PhotobookError;
use crate::pdf::Canvas;
use crate::render::{CellRenderer, RenderError};
use crate::PlacementRect;

/// Where one cell lands on the printed page.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPlacement<'p> {
    pub cell: &'p Cell,
    /// Cell size in editor pixels; sets the crop's aspect ratio
    pub ui_size: (f64, f64),
    pub rect: PlacementRect,
}

/// Compute the placement of every cell on `page`, placeholders included.
pub fn layout_page<'p>(page: &'p Page, config: &PrintConfig) -> Vec<CellPlacement<'p>> {
    let scale = config.scale_factor();
    let gutter = config.gutter_mm();
    let top = config.page_height_mm - config.margin_mm;
    let mut placements = Vec::new();

    match &page.axis {
        LayoutAxis::Rows(rows) => {
            let mut y_offset = 0.0;
            for (row_idx, row) in rows.iter().enumerate() {
                let height_mm = row.height * scale;
                let mut x_offset = 0.0;

                for (cell_idx, cell) in row.cells.iter().enumerate() {
                    let width_ui = cell.width.unwrap_or(config.ui_page_width);
                    let width_mm = width_ui * scale;

                    placements.push(CellPlacement {
                        cell,
                        ui_size: (width_ui, row.height),
                        rect: PlacementRect::new(
                            config.margin_mm + x_offset,
                            top - y_offset - height_mm,
                            width_mm,
                            height_mm,
                        ),
                    });

                    x_offset += width_mm;
                    if cell_idx + 1 < row.cells.len() {
                        x_offset += gutter;
                    }
                }

                y_offset += height_mm;
                if row_idx + 1 < rows.len() {
                    y_offset += gutter;
                }
            }
        }
        LayoutAxis::Columns(columns) => {
            let mut x_offset = 0.0;
            for (col_idx, column) in columns.iter().enumerate() {
                let width_mm = column.width * scale;
                let mut y_offset = 0.0;

                for (cell_idx, cell) in column.cells.iter().enumerate() {
                    let height_ui = cell.height.unwrap_or(config.ui_page_height);
                    let height_mm = height_ui * scale;

                    placements.push(CellPlacement {
                        cell,
                        ui_size: (column.width, height_ui),
                        rect: PlacementRect::new(
                            config.margin_mm + x_offset,
                            top - y_offset - height_mm,
                            width_mm,
                            height_mm,
                        ),
                    });

                    y_offset += height_mm;
                    if cell_idx + 1 < column.cells.len() {
                        y_offset += gutter;
                    }
                }

                x_offset += width_mm;
                if col_idx + 1 < columns.len() {
                    x_offset += gutter;
                }
            }
        }
    }

    placements
}

/// Renders interior pages onto a canvas.
pub struct PageLayoutEngine<'a, L: ImageLoader + ?Sized> {
    config: &'a PrintConfig,
    renderer: CellRenderer<'a, L>,
}

impl<'a, L: ImageLoader + ?Sized> PageLayoutEngine<'a, L> {
    pub fn new(config: &'a PrintConfig, loader: &'a L) -> Self {
        Self {
            config,
            renderer: CellRenderer::new(loader, config.render_settings()),
        }
    }

    /// Draw every cell with an image on the current canvas page.
    ///
    /// Missing image files are recorded and skipped. Returns the number of
    /// images drawn.
    pub fn render_page<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        page: &Page,
        diagnostics: &mut Diagnostics,
    ) -> Result<usize, PhotobookError> {
        let mut drawn = 0;

        for placement in layout_page(page, self.config) {
            let Some(reference) = placement.cell.image.as_deref() else {
                continue;
            };

            match self.renderer.render(
                canvas,
                reference,
                placement.cell,
                placement.ui_size,
                &placement.rect,
                diagnostics,
            ) {
                Ok(()) => drawn += 1,
                Err(RenderError::Decode(DecodeError::NotFound(path))) => {
                    diagnostics.push(Warning::ImageNotFound {
                        reference: reference.to_string(),
                        path,
                    });
                }
                Err(RenderError::Decode(source)) => {
                    return Err(PhotobookError::Image {
                        reference: reference.to_string(),
                        source,
                    });
                }
                Err(RenderError::Canvas(e)) => return Err(e.into()),
            }
        }

        Ok(drawn)
    }

    /// Render `pages` in order, one canvas page each.
    ///
    /// A page break separates consecutive pages; the last page is left open
    /// for the caller to finish.
    pub fn render_pages<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        pages: &[Page],
        diagnostics: &mut Diagnostics,
    ) -> Result<usize, PhotobookError> {
        for (idx, page) in pages.iter().enumerate() {
            log::info!(
                "Processing page {}/{} (layout: {})",
                idx + 1,
                pages.len(),
                page.layout
            );
            if idx > 0 {
                canvas.show_page()?;
            }
            let drawn = self.render_page(canvas, page, diagnostics)?;
            log::debug!("Page '{}': {drawn} image(s) drawn", page.id);
        }
        Ok(pages.len())
    }
}

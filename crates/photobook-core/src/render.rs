//! Per-cell rendering.
//!
//! A cell is drawn in five steps: load the source, solve the crop for the
//! cell's editor aspect ratio, check the effective print resolution, cut the
//! crop out, and resample it to exactly the pixels the placement needs at the
//! output DPI. Only one full-size source image is alive at a time; it is
//! dropped as soon as the crop has been copied out.

use thiserror::Error;

use crate::decode::{resize, DecodeError, DecodedImage, FilterType, ImageLoader};
use crate::diagnostics::{Diagnostics, Warning};
use crate::geometry::{calculate_crop, calculate_effective_dpi};
use crate::pdf::{Canvas, CanvasError};
use crate::transform::apply_crop;
use crate::{Cell, PlacementRect};

/// Resampling settings shared by both pipelines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Resolution the crop is resampled to
    pub output_dpi: f64,
    /// Effective DPI below which a warning is recorded
    pub min_dpi: f64,
    pub filter: FilterType,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// A resampled crop ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub image: DecodedImage,
    pub rect: PlacementRect,
    pub effective_dpi: f64,
}

/// Turns cells into drawn images.
pub struct CellRenderer<'a, L: ImageLoader + ?Sized> {
    loader: &'a L,
    settings: RenderSettings,
}

impl<'a, L: ImageLoader + ?Sized> CellRenderer<'a, L> {
    pub fn new(loader: &'a L, settings: RenderSettings) -> Self {
        Self { loader, settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Crop and resample `reference` for a cell of `ui_size` editor pixels
    /// placed at `rect`.
    ///
    /// Records a [`Warning::LowResolution`] when the crop is too small for
    /// the placement. A missing file is returned as
    /// [`DecodeError::NotFound`]; whether that is fatal is up to the caller.
    pub fn prepare(
        &self,
        reference: &str,
        cell: &Cell,
        ui_size: (f64, f64),
        rect: &PlacementRect,
        diagnostics: &mut Diagnostics,
    ) -> Result<DrawCommand, DecodeError> {
        let source = self.loader.load(reference)?;
        let (img_w, img_h) = source.size_f64();

        let crop = calculate_crop(
            img_w,
            img_h,
            ui_size.0,
            ui_size.1,
            cell.focal_point.x,
            cell.focal_point.y,
            cell.zoom,
        );

        let effective_dpi = calculate_effective_dpi(crop.width, rect.width);
        if effective_dpi < self.settings.min_dpi {
            diagnostics.push(Warning::LowResolution {
                reference: reference.to_string(),
                effective_dpi,
                minimum_dpi: self.settings.min_dpi,
            });
        }

        let cropped = apply_crop(&source, &crop);
        drop(source);

        let (out_w, out_h) = rect.pixel_size(self.settings.output_dpi);
        let image = resize(cropped, out_w, out_h, self.settings.filter)?;
        log::debug!(
            "{reference}: {:.0}x{:.0} crop -> {out_w}x{out_h} px at {effective_dpi:.0} DPI",
            crop.width,
            crop.height
        );

        Ok(DrawCommand {
            image,
            rect: *rect,
            effective_dpi,
        })
    }

    /// [`prepare`](Self::prepare) the cell and draw it on `canvas`.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        reference: &str,
        cell: &Cell,
        ui_size: (f64, f64),
        rect: &PlacementRect,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), RenderError> {
        let command = self.prepare(reference, cell, ui_size, rect, diagnostics)?;
        canvas.draw_image(&command.image, &command.rect)?;
        Ok(())
    }
}

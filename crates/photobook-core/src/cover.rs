//! Cover spread composition.
//!
//! The cover is one landscape page: back panel on the left, then the spine,
//! then the front panel. The front photo wraps around the spine, so the two
//! panels split the spread unevenly:
//!
//! ```text
//! back  = (W - S) / 2        front = (W + S) / 2
//! |<------ back ------>|<--S-->|<----------- front ---------->|
//!                      ^ spine_x           (front includes S)
//! ```
//!
//! Both panels run the full height including bleed. The label is drawn white,
//! rotated to read bottom to top, centered on the spine.

use std::fmt;

use crate::album::{Album, Cell, Page};
use crate::config::CoverConfig;
use crate::decode::{DecodeError, ImageLoader};
use crate::diagnostics::Diagnostics;
use crate::error::PhotobookError;
use crate::pdf::{pt_to_mm, Canvas};
use crate::render::{CellRenderer, RenderError};
use crate::spine::{calculate_paper_pages, SpineError};
use crate::PlacementRect;

/// Which album page a cover panel comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSide {
    /// First album page
    Front,
    /// Last album page
    Back,
}

impl fmt::Display for CoverSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverSide::Front => write!(f, "Front cover page (first page)"),
            CoverSide::Back => write!(f, "Back cover page (last page)"),
        }
    }
}

/// Resolved spread dimensions, all in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverLayout {
    pub album_pages: usize,
    pub paper_pages: u32,
    pub spine_mm: u32,
    pub total_width_mm: f64,
    pub height_mm: f64,
    pub back_width_mm: f64,
    pub front_width_mm: f64,
}

impl CoverLayout {
    /// Size the spread for an album of `album_pages` pages.
    ///
    /// Page counts outside the spine table are clamped with a warning; a
    /// count that falls in a gap of the table is an error.
    pub fn resolve(
        album_pages: usize,
        config: &CoverConfig,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, SpineError> {
        let paper_pages = calculate_paper_pages(album_pages);
        let spine_mm = config.spine_table.get_spine_width(paper_pages, diagnostics)?;
        let total_width_mm = config.total_width_mm(spine_mm);
        let spine = spine_mm as f64;

        Ok(Self {
            album_pages,
            paper_pages,
            spine_mm,
            total_width_mm,
            height_mm: config.total_height_mm,
            back_width_mm: (total_width_mm - spine) / 2.0,
            front_width_mm: (total_width_mm + spine) / 2.0,
        })
    }

    /// Left edge of the spine, where the front panel starts.
    pub fn spine_x(&self) -> f64 {
        self.back_width_mm
    }

    pub fn back_rect(&self) -> PlacementRect {
        PlacementRect::new(0.0, 0.0, self.back_width_mm, self.height_mm)
    }

    pub fn front_rect(&self) -> PlacementRect {
        PlacementRect::new(self.spine_x(), 0.0, self.front_width_mm, self.height_mm)
    }

    pub fn spine_center(&self) -> (f64, f64) {
        (
            self.spine_x() + self.spine_mm as f64 / 2.0,
            self.height_mm / 2.0,
        )
    }
}

/// Pick the single image cell of a cover page.
pub fn cover_cell(page: &Page, side: CoverSide) -> Result<&Cell, PhotobookError> {
    let cells = page.cell_count();
    if cells != 1 {
        return Err(PhotobookError::InvalidCoverPage {
            side,
            cells,
            layout: page.layout.clone(),
        });
    }
    page.first_image_cell().ok_or(PhotobookError::NoCoverImage { side })
}

/// A validated cover, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverPlan<'a> {
    pub layout: CoverLayout,
    pub front: &'a Cell,
    pub back: &'a Cell,
    pub year: String,
}

/// Draws the cover spread.
pub struct CoverComposer<'a, L: ImageLoader + ?Sized> {
    config: &'a CoverConfig,
    renderer: CellRenderer<'a, L>,
}

impl<'a, L: ImageLoader + ?Sized> CoverComposer<'a, L> {
    pub fn new(config: &'a CoverConfig, loader: &'a L) -> Self {
        Self {
            config,
            renderer: CellRenderer::new(loader, config.render_settings()),
        }
    }

    /// Validate the album and resolve the spread size without drawing.
    pub fn plan<'album>(
        &self,
        album: &'album Album,
        year: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<CoverPlan<'album>, PhotobookError> {
        if year.trim().is_empty() {
            return Err(PhotobookError::EmptyYear);
        }

        let layout = CoverLayout::resolve(album.pages.len(), self.config, diagnostics)?;
        log::info!(
            "Album pages: {}, paper pages: {}, spine: {}mm",
            layout.album_pages,
            layout.paper_pages,
            layout.spine_mm
        );
        log::info!(
            "Cover {}mm x {}mm (back {}mm | front {}mm)",
            layout.total_width_mm,
            layout.height_mm,
            layout.back_width_mm,
            layout.front_width_mm
        );

        let front_page = album.front_cover().ok_or(PhotobookError::NoCoverImage {
            side: CoverSide::Front,
        })?;
        let back_page = album.back_cover().ok_or(PhotobookError::NoCoverImage {
            side: CoverSide::Back,
        })?;

        Ok(CoverPlan {
            layout,
            front: cover_cell(front_page, CoverSide::Front)?,
            back: cover_cell(back_page, CoverSide::Back)?,
            year: year.to_string(),
        })
    }

    /// Draw both panels and the spine label on the current canvas page.
    pub fn draw<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        plan: &CoverPlan<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), PhotobookError> {
        let panels = [
            (CoverSide::Back, plan.back, plan.layout.back_rect()),
            (CoverSide::Front, plan.front, plan.layout.front_rect()),
        ];

        for (side, cell, rect) in panels {
            let Some(reference) = cell.image.as_deref() else {
                return Err(PhotobookError::NoCoverImage { side });
            };
            log::info!("Processing {side}: {reference}");

            // The panel itself sets the crop's aspect ratio
            let result = self.renderer.render(
                canvas,
                reference,
                cell,
                (rect.width, rect.height),
                &rect,
                diagnostics,
            );
            match result {
                Ok(()) => {}
                Err(RenderError::Decode(DecodeError::NotFound(_))) => {
                    return Err(PhotobookError::CoverImageNotFound {
                        side,
                        reference: reference.to_string(),
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

        self.draw_spine_label(canvas, &plan.layout, &plan.year)
    }

    fn draw_spine_label<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        layout: &CoverLayout,
        text: &str,
    ) -> Result<(), PhotobookError> {
        let font = self.config.spine_font;
        let size_pt = self.config.spine_font_size_pt;
        let (center_x, center_y) = layout.spine_center();

        canvas.set_fill_color(self.config.spine_text_color);
        canvas.set_font(font, size_pt);
        canvas.save_state();
        canvas.translate(center_x, center_y);
        canvas.rotate(90.0);

        // A third of the font size below the baseline centers digits optically
        let width_mm = pt_to_mm(canvas.measure_text_width(text, font, size_pt));
        canvas.draw_text(-width_mm / 2.0, -pt_to_mm(size_pt) / 3.0, text)?;
        canvas.restore_state();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::album::{LayoutAxis, Row};
    use crate::diagnostics::Warning;
    use crate::pdf::{Rgb, StandardFont};
    use crate::testing::{Command, MemoryLoader, RecordingCanvas};

    fn fast_config() -> CoverConfig {
        CoverConfig {
            output_dpi: 5.0,
            ..CoverConfig::default()
        }
    }

    fn single(reference: &str) -> Page {
        Page::new(
            reference,
            "1",
            LayoutAxis::Rows(vec![Row {
                height: 598.0,
                cells: vec![Cell {
                    width: Some(730.0),
                    ..Cell::with_image(reference)
                }],
            }]),
        )
    }

    fn album(page_count: usize) -> Album {
        let mut pages = vec![single("front.jpg")];
        for i in 0..page_count.saturating_sub(2) {
            pages.push(single(&format!("p{i}.jpg")));
        }
        pages.push(single("back.jpg"));
        Album {
            version: None,
            pages,
        }
    }

    fn loader() -> MemoryLoader {
        MemoryLoader::new()
            .with("front.jpg", 300, 200)
            .with("back.jpg", 200, 300)
    }

    #[test]
    fn test_small_album_clamps_to_minimum_spine() {
        let mut diagnostics = Diagnostics::new();
        let layout = CoverLayout::resolve(40, &CoverConfig::default(), &mut diagnostics).unwrap();

        assert_eq!(layout.paper_pages, 19);
        assert_eq!(layout.spine_mm, 6);
        assert_eq!(layout.total_width_mm, 758.0);
        assert_eq!(layout.back_width_mm, 376.0);
        assert_eq!(layout.front_width_mm, 382.0);
        assert_eq!(layout.spine_x(), 376.0);
        assert_eq!(layout.spine_center(), (379.0, 167.5));
        assert!(matches!(
            diagnostics.warnings(),
            [Warning::PageCountBelowTable { paper_pages: 19, .. }]
        ));
    }

    #[test]
    fn test_panels_cover_whole_spread() {
        // 102 album pages -> 50 paper pages -> 8mm spine
        let layout =
            CoverLayout::resolve(102, &CoverConfig::default(), &mut Diagnostics::new()).unwrap();
        assert_eq!(layout.spine_mm, 8);
        assert_eq!(layout.total_width_mm, 760.0);
        assert_eq!(layout.back_width_mm + layout.front_width_mm, 760.0);
        assert_eq!(layout.front_width_mm - layout.back_width_mm, 8.0);

        let front = layout.front_rect();
        assert_eq!(front.x + front.width, layout.total_width_mm);
        assert_eq!(front.height, 335.0);
    }

    #[test]
    fn test_spine_table_gap_is_fatal() {
        // 72 album pages -> 35 paper pages, between 34 and 36
        let err = CoverLayout::resolve(72, &CoverConfig::default(), &mut Diagnostics::new())
            .unwrap_err();
        assert_eq!(err, SpineError::Unresolved(35));
    }

    #[test]
    fn test_cover_page_with_two_cells_is_fatal() {
        let config = fast_config();
        let loader = loader();
        let composer = CoverComposer::new(&config, &loader);

        let mut album = album(50);
        album.pages[0] = Page::new(
            "front",
            "2",
            LayoutAxis::Rows(vec![Row {
                height: 598.0,
                cells: vec![Cell::with_image("a.jpg"), Cell::with_image("b.jpg")],
            }]),
        );

        let err = composer
            .plan(&album, "2024", &mut Diagnostics::new())
            .unwrap_err();
        assert!(matches!(
            err,
            PhotobookError::InvalidCoverPage {
                side: CoverSide::Front,
                cells: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_cover_page_without_image_is_fatal() {
        let config = fast_config();
        let loader = loader();
        let composer = CoverComposer::new(&config, &loader);

        let mut album = album(50);
        let last = album.pages.len() - 1;
        album.pages[last] = Page::new(
            "back",
            "1",
            LayoutAxis::Rows(vec![Row {
                height: 598.0,
                cells: vec![Cell::empty()],
            }]),
        );

        let err = composer
            .plan(&album, "2024", &mut Diagnostics::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "No image found on Back cover page (last page)");
    }

    #[test]
    fn test_empty_year_is_fatal() {
        let config = fast_config();
        let loader = loader();
        let composer = CoverComposer::new(&config, &loader);

        for year in ["", "   "] {
            let err = composer
                .plan(&album(50), year, &mut Diagnostics::new())
                .unwrap_err();
            assert!(matches!(err, PhotobookError::EmptyYear));
        }
    }

    #[test]
    fn test_missing_cover_image_is_fatal() {
        let config = fast_config();
        let loader = MemoryLoader::new().with("back.jpg", 200, 300);
        let composer = CoverComposer::new(&config, &loader);
        let album = album(50);
        let mut diagnostics = Diagnostics::new();

        let plan = composer.plan(&album, "2024", &mut diagnostics).unwrap();
        let err = composer
            .draw(&mut RecordingCanvas::default(), &plan, &mut diagnostics)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cover image not found on Front cover page (first page): front.jpg"
        );
    }

    #[test]
    fn test_draw_sequence() {
        let config = fast_config();
        let loader = loader();
        let composer = CoverComposer::new(&config, &loader);
        let album = album(50);
        let mut diagnostics = Diagnostics::new();
        let mut canvas = RecordingCanvas::default();

        let plan = composer.plan(&album, "2024", &mut diagnostics).unwrap();
        composer.draw(&mut canvas, &plan, &mut diagnostics).unwrap();

        let layout = &plan.layout;
        let images = canvas.images();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].2, layout.back_rect());
        assert_eq!(images[1].2, layout.front_rect());

        let text_width = pt_to_mm(StandardFont::HelveticaBold.text_width("2024", 28.0));
        let (cx, cy) = layout.spine_center();
        assert_eq!(
            canvas.commands[2..],
            [
                Command::FillColor(Rgb::WHITE),
                Command::Font(StandardFont::HelveticaBold, 28.0),
                Command::Save,
                Command::Translate(cx, cy),
                Command::Rotate(90.0),
                Command::Text {
                    x: -text_width / 2.0,
                    y: -pt_to_mm(28.0) / 3.0,
                    text: "2024".to_string(),
                },
                Command::Restore,
            ]
        );
    }

    #[test]
    fn test_cover_images_get_resolution_check() {
        let config = fast_config();
        let loader = loader();
        let composer = CoverComposer::new(&config, &loader);
        let album = album(50);
        let mut diagnostics = Diagnostics::new();

        let plan = composer.plan(&album, "2024", &mut diagnostics).unwrap();
        composer
            .draw(&mut RecordingCanvas::default(), &plan, &mut diagnostics)
            .unwrap();

        // A few hundred pixels across a 380mm panel
        assert_eq!(diagnostics.low_resolution_count(), 2);
    }
}

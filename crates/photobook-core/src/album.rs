//! Album description model.
//!
//! `album.json` is written by the editor and loosely typed: cells carry
//! optional fields whose meaning depends on whether the page is laid out in
//! rows or columns. It is read into private serde structs, then converted once
//! into the typed model below, where:
//!
//! - each page is either rows or columns ([`LayoutAxis`]), decided here
//! - focal point and zoom defaults are already applied
//! - every extent the layout divides by is known to be positive
//!
//! The first and last page of an album are its front and back cover; the
//! pages in between are the interior.

use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;

use crate::FocalPoint;

/// Zoom applied when a cell declares none.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Errors in an album description.
#[derive(Debug, Error)]
pub enum AlbumError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// A size the layout depends on is zero, negative or not a number.
    #[error("Page '{page}': {what} must be a positive number, got {value}")]
    InvalidExtent {
        page: String,
        what: &'static str,
        value: f64,
    },

    /// Zoom below 1.0 would make the crop larger than the photo.
    #[error("Page '{page}': zoom must be at least 1.0, got {value}")]
    InvalidZoom { page: String, value: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCell {
    width: Option<f64>,
    height: Option<f64>,
    path: Option<String>,
    focal_point: Option<FocalPoint>,
    zoom: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    height: f64,
    #[serde(default)]
    cells: Vec<RawCell>,
}

#[derive(Debug, Deserialize)]
struct RawColumn {
    width: f64,
    #[serde(default)]
    cells: Vec<RawCell>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    id: String,
    #[serde(default)]
    layout: String,
    #[serde(default)]
    rows: Vec<RawRow>,
    #[serde(default)]
    columns: Vec<RawColumn>,
}

#[derive(Debug, Deserialize)]
struct RawAlbum {
    photobook_version: Option<String>,
    pages: Vec<RawPage>,
}

/// One image slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Declared width in UI pixels (row layouts).
    pub width: Option<f64>,
    /// Declared height in UI pixels (column layouts).
    pub height: Option<f64>,
    /// Image reference relative to the album folder; `None` for a placeholder.
    pub image: Option<String>,
    pub focal_point: FocalPoint,
    pub zoom: f64,
}

impl Cell {
    /// A placeholder cell with no image.
    pub fn empty() -> Self {
        Self {
            width: None,
            height: None,
            image: None,
            focal_point: FocalPoint::CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }

    /// A cell showing `image` centered at zoom 1.
    pub fn with_image(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            ..Self::empty()
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// Cells laid out left to right, all sharing the row's height.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Height in UI pixels
    pub height: f64,
    pub cells: Vec<Cell>,
}

/// Cells stacked top to bottom, all sharing the column's width.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Width in UI pixels
    pub width: f64,
    pub cells: Vec<Cell>,
}

/// How a page's cells are arranged.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutAxis {
    Rows(Vec<Row>),
    Columns(Vec<Column>),
}

/// One album page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: String,
    /// Editor layout tag, e.g. `"1"`, `"2"` or `"1-2"`
    pub layout: String,
    pub axis: LayoutAxis,
    /// Cells declared in the source across both rows and columns.
    declared_cells: usize,
}

impl Page {
    pub fn new(id: impl Into<String>, layout: impl Into<String>, axis: LayoutAxis) -> Self {
        let declared_cells = match &axis {
            LayoutAxis::Rows(rows) => rows.iter().map(|r| r.cells.len()).sum(),
            LayoutAxis::Columns(columns) => columns.iter().map(|c| c.cells.len()).sum(),
        };
        Self {
            id: id.into(),
            layout: layout.into(),
            axis,
            declared_cells,
        }
    }

    /// All cells on the page in layout order.
    pub fn cells(&self) -> Box<dyn Iterator<Item = &Cell> + '_> {
        match &self.axis {
            LayoutAxis::Rows(rows) => Box::new(rows.iter().flat_map(|r| r.cells.iter())),
            LayoutAxis::Columns(columns) => Box::new(columns.iter().flat_map(|c| c.cells.iter())),
        }
    }

    /// Number of cells the source declared, including any in an ignored
    /// second collection.
    pub fn cell_count(&self) -> usize {
        self.declared_cells
    }

    /// The first cell that carries an image.
    pub fn first_image_cell(&self) -> Option<&Cell> {
        self.cells().find(|c| c.has_image())
    }
}

/// A whole photobook.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub version: Option<String>,
    pub pages: Vec<Page>,
}

impl Album {
    /// Parse `album.json` text.
    ///
    /// `column_layouts` decides the axis of pages that declare both rows and
    /// columns: a column layout tag selects the columns, anything else the
    /// rows.
    pub fn from_json_str(
        text: &str,
        column_layouts: &BTreeSet<String>,
    ) -> Result<Self, AlbumError> {
        let raw: RawAlbum = serde_json::from_str(text)?;
        let pages = raw
            .pages
            .into_iter()
            .map(|page| convert_page(page, column_layouts))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            version: raw.photobook_version,
            pages,
        })
    }

    /// Pages printed inside the book: all but the first and the last.
    pub fn interior_pages(&self) -> &[Page] {
        if self.pages.len() > 2 {
            &self.pages[1..self.pages.len() - 1]
        } else {
            &[]
        }
    }

    /// Source page of the front cover.
    pub fn front_cover(&self) -> Option<&Page> {
        self.pages.first()
    }

    /// Source page of the back cover.
    pub fn back_cover(&self) -> Option<&Page> {
        self.pages.last()
    }
}

fn convert_page(raw: RawPage, column_layouts: &BTreeSet<String>) -> Result<Page, AlbumError> {
    let declared_cells = raw.rows.iter().map(|r| r.cells.len()).sum::<usize>()
        + raw.columns.iter().map(|c| c.cells.len()).sum::<usize>();

    let use_columns = match (raw.rows.is_empty(), raw.columns.is_empty()) {
        (_, true) => false,
        (true, false) => true,
        (false, false) => {
            let columns = column_layouts.contains(&raw.layout);
            log::warn!(
                "Page '{}' declares both rows and columns; using {}",
                raw.id,
                if columns { "columns" } else { "rows" }
            );
            columns
        }
    };

    let page_id = raw.id;
    let axis = if use_columns {
        let columns = raw
            .columns
            .into_iter()
            .map(|c| {
                Ok(Column {
                    width: positive(&page_id, "column width", c.width)?,
                    cells: convert_cells(&page_id, c.cells)?,
                })
            })
            .collect::<Result<Vec<_>, AlbumError>>()?;
        LayoutAxis::Columns(columns)
    } else {
        let rows = raw
            .rows
            .into_iter()
            .map(|r| {
                Ok(Row {
                    height: positive(&page_id, "row height", r.height)?,
                    cells: convert_cells(&page_id, r.cells)?,
                })
            })
            .collect::<Result<Vec<_>, AlbumError>>()?;
        LayoutAxis::Rows(rows)
    };

    Ok(Page {
        id: page_id,
        layout: raw.layout,
        axis,
        declared_cells,
    })
}

fn convert_cells(page: &str, cells: Vec<RawCell>) -> Result<Vec<Cell>, AlbumError> {
    cells
        .into_iter()
        .map(|raw| {
            let zoom = raw.zoom.unwrap_or(DEFAULT_ZOOM);
            if !(zoom >= 1.0) {
                return Err(AlbumError::InvalidZoom {
                    page: page.to_string(),
                    value: zoom,
                });
            }
            Ok(Cell {
                width: raw.width.map(|w| positive(page, "cell width", w)).transpose()?,
                height: raw.height.map(|h| positive(page, "cell height", h)).transpose()?,
                image: raw.path.filter(|p| !p.is_empty()),
                focal_point: raw.focal_point.unwrap_or_default(),
                zoom,
            })
        })
        .collect()
}

fn positive(page: &str, what: &'static str, value: f64) -> Result<f64, AlbumError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AlbumError::InvalidExtent {
            page: page.to_string(),
            what,
            value,
        })
    }
}

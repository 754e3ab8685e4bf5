//! Print product configuration.
//!
//! Defaults describe the current product: a 356x296mm landscape book designed
//! in a 730x598 pixel editor, and its 335mm tall cover spread (19mm bleed on
//! every side, already part of the cover sizes). Every field can be overridden
//! from a JSON file; missing fields keep their defaults. A loaded file is
//! validated before use.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::error::PhotobookError;
use crate::pdf::{ImageEncoding, Rgb, StandardFont};
use crate::render::RenderSettings;
use crate::spine::{calculate_total_width, SpineTable};

/// Errors from reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A size or resolution is zero, negative or not a number.
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// A spacing or threshold is negative or not a number.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    /// The margins consume the whole page.
    #[error("Margins of {margin_mm}mm leave no printable area on a {width_mm}x{height_mm}mm page")]
    NoPrintArea {
        width_mm: f64,
        height_mm: f64,
        margin_mm: f64,
    },

    /// The base cover width leaves no room for the panels beside the spine.
    #[error("Cover width {width_mm}mm is not wider than its {spine_mm}mm base spine")]
    NoCoverPanels { width_mm: f64, spine_mm: u32 },

    #[error("JPEG quality must be 1-100, got {0}")]
    JpegQuality(u8),
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn check_encoding(encoding: ImageEncoding) -> Result<(), ConfigError> {
    match encoding {
        ImageEncoding::Jpeg { quality } if !(1..=100).contains(&quality) => {
            Err(ConfigError::JpegQuality(quality))
        }
        _ => Ok(()),
    }
}

/// Interior page geometry and output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Editor page width in UI pixels
    pub ui_page_width: f64,
    /// Editor page height in UI pixels
    pub ui_page_height: f64,
    /// Spacing between cells in UI pixels
    pub ui_gutter: f64,
    /// Printed page width in mm
    pub page_width_mm: f64,
    /// Printed page height in mm
    pub page_height_mm: f64,
    /// Margin on every side in mm (bleed allowance)
    pub margin_mm: f64,
    /// Resolution images are resampled to
    pub output_dpi: f64,
    /// Effective DPI below which a warning is recorded
    pub min_dpi: f64,
    /// Layout tags whose pages are laid out in columns
    pub column_layouts: BTreeSet<String>,
    pub filter: FilterType,
    pub image_encoding: ImageEncoding,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            ui_page_width: 730.0,
            ui_page_height: 598.0,
            ui_gutter: 7.0,
            page_width_mm: 356.0,
            page_height_mm: 296.0,
            margin_mm: 2.0,
            output_dpi: 300.0,
            min_dpi: 200.0,
            column_layouts: ["1-1", "1-2", "2-1"]
                .into_iter()
                .map(String::from)
                .collect(),
            filter: FilterType::default(),
            image_encoding: ImageEncoding::default(),
        }
    }
}

impl PrintConfig {
    /// Printable width inside the margins (mm).
    pub fn print_area_width(&self) -> f64 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Printable height inside the margins (mm).
    pub fn print_area_height(&self) -> f64 {
        self.page_height_mm - 2.0 * self.margin_mm
    }

    /// Millimetres per UI pixel.
    pub fn scale_factor(&self) -> f64 {
        self.print_area_width() / self.ui_page_width
    }

    /// Gutter between cells (mm).
    pub fn gutter_mm(&self) -> f64 {
        self.ui_gutter * self.scale_factor()
    }

    pub fn is_column_layout(&self, layout: &str) -> bool {
        self.column_layouts.contains(layout)
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            output_dpi: self.output_dpi,
            min_dpi: self.min_dpi,
            filter: self.filter,
        }
    }

    /// Reject values that would make the page geometry degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("print.ui_page_width", self.ui_page_width)?;
        positive("print.ui_page_height", self.ui_page_height)?;
        non_negative("print.ui_gutter", self.ui_gutter)?;
        positive("print.page_width_mm", self.page_width_mm)?;
        positive("print.page_height_mm", self.page_height_mm)?;
        non_negative("print.margin_mm", self.margin_mm)?;
        positive("print.output_dpi", self.output_dpi)?;
        non_negative("print.min_dpi", self.min_dpi)?;

        if self.print_area_width() <= 0.0 || self.print_area_height() <= 0.0 {
            return Err(ConfigError::NoPrintArea {
                width_mm: self.page_width_mm,
                height_mm: self.page_height_mm,
                margin_mm: self.margin_mm,
            });
        }
        check_encoding(self.image_encoding)
    }
}

/// Cover spread geometry and spine label style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    /// Spread height including bleed (mm)
    pub total_height_mm: f64,
    /// Spread width including bleed for the reference spine (mm)
    pub base_total_width_mm: f64,
    /// Spine width the base width was measured with (mm)
    pub base_spine_mm: u32,
    pub spine_table: SpineTable,
    pub spine_font: StandardFont,
    /// 28pt is roughly 10mm tall text
    pub spine_font_size_pt: f64,
    pub spine_text_color: Rgb,
    pub output_dpi: f64,
    pub min_dpi: f64,
    pub filter: FilterType,
    pub image_encoding: ImageEncoding,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            total_height_mm: 335.0,
            base_total_width_mm: 758.0,
            base_spine_mm: 6,
            spine_table: SpineTable::default(),
            spine_font: StandardFont::HelveticaBold,
            spine_font_size_pt: 28.0,
            spine_text_color: Rgb::WHITE,
            output_dpi: 300.0,
            min_dpi: 200.0,
            filter: FilterType::default(),
            image_encoding: ImageEncoding::default(),
        }
    }
}

impl CoverConfig {
    /// Spread width for a given spine width (mm).
    pub fn total_width_mm(&self, spine_mm: u32) -> f64 {
        calculate_total_width(spine_mm, self.base_total_width_mm, self.base_spine_mm)
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            output_dpi: self.output_dpi,
            min_dpi: self.min_dpi,
            filter: self.filter,
        }
    }

    /// Reject values that would make the spread degenerate.
    ///
    /// The spine table validates itself while it is deserialized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("cover.total_height_mm", self.total_height_mm)?;
        positive("cover.base_total_width_mm", self.base_total_width_mm)?;
        positive("cover.spine_font_size_pt", self.spine_font_size_pt)?;
        positive("cover.output_dpi", self.output_dpi)?;
        non_negative("cover.min_dpi", self.min_dpi)?;

        if self.base_total_width_mm <= self.base_spine_mm as f64 {
            return Err(ConfigError::NoCoverPanels {
                width_mm: self.base_total_width_mm,
                spine_mm: self.base_spine_mm,
            });
        }
        check_encoding(self.image_encoding)
    }
}

/// Complete configuration for both pipelines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotobookConfig {
    pub print: PrintConfig,
    pub cover: CoverConfig,
}

impl PhotobookConfig {
    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, PhotobookError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text).map_err(|source| PhotobookError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse and validate configuration JSON.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.print.validate()?;
        config.cover.validate()?;
        Ok(config)
    }
}

//! Recoverable warnings collected during a run.
//!
//! Nothing here interrupts processing. Components push structured
//! [`Warning`] records into a caller-owned [`Diagnostics`] sink, which also
//! forwards each one to the `log` facade as it arrives. The caller reports a
//! summary at the end of the run.

use std::fmt;
use std::path::PathBuf;

/// A non-fatal problem found while generating a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// A cell references an image file that does not exist; the cell is skipped.
    ImageNotFound { reference: String, path: PathBuf },

    /// A crop has fewer pixels per inch than recommended at its print size.
    LowResolution {
        reference: String,
        effective_dpi: f64,
        minimum_dpi: f64,
    },

    /// The album is thinner than the spine table covers.
    PageCountBelowTable {
        paper_pages: u32,
        minimum_pages: u32,
        spine_mm: u32,
    },

    /// The album is thicker than the spine table covers.
    PageCountAboveTable {
        paper_pages: u32,
        maximum_pages: u32,
        spine_mm: u32,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ImageNotFound { reference, .. } => {
                write!(f, "Image not found: {reference}")
            }
            Warning::LowResolution {
                reference,
                effective_dpi,
                minimum_dpi,
            } => write!(
                f,
                "Low DPI: {reference} at {effective_dpi:.0} DPI (min recommended: {minimum_dpi:.0})"
            ),
            Warning::PageCountBelowTable {
                paper_pages,
                minimum_pages,
                spine_mm,
            } => write!(
                f,
                "{paper_pages} paper pages is below minimum ({minimum_pages}). Using {spine_mm}mm spine."
            ),
            Warning::PageCountAboveTable {
                paper_pages,
                maximum_pages,
                spine_mm,
            } => write!(
                f,
                "{paper_pages} paper pages exceeds maximum ({maximum_pages}). Using {spine_mm}mm spine."
            ),
        }
    }
}

/// Ordered collection of warnings for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it.
    pub fn push(&mut self, warning: Warning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of low-resolution warnings.
    pub fn low_resolution_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, Warning::LowResolution { .. }))
            .count()
    }

    /// Number of cells skipped because their image was missing.
    pub fn missing_image_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, Warning::ImageNotFound { .. }))
            .count()
    }
}

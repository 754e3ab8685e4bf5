//! Spine width resolution.
//!
//! A printed book's spine thickness depends on how many sheets of paper it
//! holds. The printer publishes a table of page-count ranges; this module maps
//! an album to its spine width and the resulting cover width.
//!
//! # Policy
//!
//! - Inside a range: the range's width
//! - Below the first range: the smallest width, with a warning
//! - Above the last range: the largest width, with a warning
//! - Between two ranges (a gap in the table): fatal [`SpineError`]

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostics::{Diagnostics, Warning};

/// Album pages that are not printed on interior paper (front and back cover).
pub const COVER_PAGE_COUNT: usize = 2;

/// Errors from spine width lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpineError {
    /// The page count falls between two ranges of the table.
    #[error("Cannot determine spine width for {0} paper pages")]
    Unresolved(u32),

    /// The table has no entries at all.
    #[error("Spine table is empty")]
    EmptyTable,
}

/// Errors from building a spine table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpineTableError {
    #[error("Spine range {min_pages}-{max_pages} is empty")]
    EmptyRange { min_pages: u32, max_pages: u32 },

    #[error("Spine ranges {first_min}-{first_max} and {second_min}-{second_max} overlap")]
    Overlap {
        first_min: u32,
        first_max: u32,
        second_min: u32,
        second_max: u32,
    },
}

/// One row of the spine table: an inclusive paper page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpineRange {
    pub min_pages: u32,
    pub max_pages: u32,
    pub spine_mm: u32,
}

impl SpineRange {
    pub const fn new(min_pages: u32, max_pages: u32, spine_mm: u32) -> Self {
        Self {
            min_pages,
            max_pages,
            spine_mm,
        }
    }

    #[inline]
    pub fn contains(&self, paper_pages: u32) -> bool {
        (self.min_pages..=self.max_pages).contains(&paper_pages)
    }
}

/// The printer's published spine table.
pub const DEFAULT_SPINE_TABLE: [SpineRange; 14] = [
    SpineRange::new(24, 34, 6),
    SpineRange::new(36, 46, 7),
    SpineRange::new(48, 60, 8),
    SpineRange::new(62, 70, 9),
    SpineRange::new(72, 82, 10),
    SpineRange::new(84, 98, 11),
    SpineRange::new(100, 114, 12),
    SpineRange::new(116, 126, 13),
    SpineRange::new(128, 138, 14),
    SpineRange::new(140, 154, 15),
    SpineRange::new(156, 170, 16),
    SpineRange::new(172, 186, 17),
    SpineRange::new(188, 196, 18),
    SpineRange::new(200, 200, 19),
];

/// Result of a table lookup, before any warning is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpineLookup {
    /// The page count is inside a range.
    Exact(u32),
    /// Below the table; clamped to the smallest width.
    ClampedLow { spine_mm: u32, minimum_pages: u32 },
    /// Above the table; clamped to the largest width.
    ClampedHigh { spine_mm: u32, maximum_pages: u32 },
}

impl SpineLookup {
    pub fn spine_mm(&self) -> u32 {
        match *self {
            SpineLookup::Exact(mm) => mm,
            SpineLookup::ClampedLow { spine_mm, .. } => spine_mm,
            SpineLookup::ClampedHigh { spine_mm, .. } => spine_mm,
        }
    }
}

/// Ordered, disjoint spine ranges.
///
/// Deserialization goes through [`SpineTable::new`], so a table read from a
/// configuration file is sorted and checked like one built in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SpineRange>", into = "Vec<SpineRange>")]
pub struct SpineTable {
    ranges: Vec<SpineRange>,
}

impl Default for SpineTable {
    fn default() -> Self {
        Self {
            ranges: DEFAULT_SPINE_TABLE.to_vec(),
        }
    }
}

impl TryFrom<Vec<SpineRange>> for SpineTable {
    type Error = SpineTableError;

    fn try_from(ranges: Vec<SpineRange>) -> Result<Self, Self::Error> {
        Self::new(ranges)
    }
}

impl From<SpineTable> for Vec<SpineRange> {
    fn from(table: SpineTable) -> Self {
        table.ranges
    }
}

impl SpineTable {
    /// Build a table; ranges are sorted by their lower bound and must not
    /// overlap.
    pub fn new(mut ranges: Vec<SpineRange>) -> Result<Self, SpineTableError> {
        if let Some(r) = ranges.iter().find(|r| r.min_pages > r.max_pages) {
            return Err(SpineTableError::EmptyRange {
                min_pages: r.min_pages,
                max_pages: r.max_pages,
            });
        }

        ranges.sort_by_key(|r| r.min_pages);
        if let Some(pair) = ranges.windows(2).find(|w| w[1].min_pages <= w[0].max_pages) {
            return Err(SpineTableError::Overlap {
                first_min: pair[0].min_pages,
                first_max: pair[0].max_pages,
                second_min: pair[1].min_pages,
                second_max: pair[1].max_pages,
            });
        }

        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[SpineRange] {
        &self.ranges
    }

    /// Look up the spine width for a paper page count.
    pub fn lookup(&self, paper_pages: u32) -> Result<SpineLookup, SpineError> {
        if let Some(range) = self.ranges.iter().find(|r| r.contains(paper_pages)) {
            return Ok(SpineLookup::Exact(range.spine_mm));
        }

        let (first, last) = match (self.ranges.first(), self.ranges.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(SpineError::EmptyTable),
        };

        if paper_pages < first.min_pages {
            return Ok(SpineLookup::ClampedLow {
                spine_mm: first.spine_mm,
                minimum_pages: first.min_pages,
            });
        }
        if paper_pages > last.max_pages {
            return Ok(SpineLookup::ClampedHigh {
                spine_mm: last.spine_mm,
                maximum_pages: last.max_pages,
            });
        }

        Err(SpineError::Unresolved(paper_pages))
    }

    /// Spine width in mm, recording a warning when the count was clamped.
    pub fn get_spine_width(
        &self,
        paper_pages: u32,
        diagnostics: &mut Diagnostics,
    ) -> Result<u32, SpineError> {
        let lookup = self.lookup(paper_pages)?;
        match lookup {
            SpineLookup::Exact(_) => {}
            SpineLookup::ClampedLow {
                spine_mm,
                minimum_pages,
            } => diagnostics.push(Warning::PageCountBelowTable {
                paper_pages,
                minimum_pages,
                spine_mm,
            }),
            SpineLookup::ClampedHigh {
                spine_mm,
                maximum_pages,
            } => diagnostics.push(Warning::PageCountAboveTable {
                paper_pages,
                maximum_pages,
                spine_mm,
            }),
        }
        Ok(lookup.spine_mm())
    }
}

/// Number of printed paper pages for an album.
///
/// The two cover pages are removed, and each sheet carries two album pages
/// (recto/verso). Albums with fewer than two pages have no paper pages.
pub fn calculate_paper_pages(album_page_count: usize) -> u32 {
    (album_page_count.saturating_sub(COVER_PAGE_COUNT) / 2) as u32
}

/// Total cover width for a spine width.
///
/// The cover grows by exactly the spine's difference from the reference
/// spine the base width was measured with.
pub fn calculate_total_width(spine_mm: u32, base_total_width_mm: f64, base_spine_mm: u32) -> f64 {
    base_total_width_mm + (spine_mm as f64 - base_spine_mm as f64)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

//! Fatal errors that abort a generation run.
//!
//! Recoverable problems are not errors; see [`crate::diagnostics`].

use std::path::PathBuf;

use thiserror::Error;

use crate::album::AlbumError;
use crate::config::ConfigError;
use crate::cover::CoverSide;
use crate::decode::DecodeError;
use crate::pdf::CanvasError;
use crate::spine::SpineError;

/// Error types for document generation.
#[derive(Debug, Error)]
pub enum PhotobookError {
    /// The image folder does not exist or is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The image folder has no `album.json`.
    #[error("album.json not found in {0}")]
    AlbumNotFound(PathBuf),

    /// `album.json` is not a valid album description.
    #[error("Invalid album description {path}: {source}")]
    InvalidAlbum {
        path: PathBuf,
        #[source]
        source: AlbumError,
    },

    /// A configuration file could not be parsed or holds unusable values.
    #[error("Invalid configuration {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    /// The album only has cover pages.
    #[error("Album has no interior pages (only cover pages)")]
    NoInteriorPages,

    /// A cover page does not hold exactly one cell.
    #[error(
        "{side} must have exactly 1 cell (layout '1'), but has {cells} cells (layout '{layout}'). \
         Cover pages must use a single full-page image."
    )]
    InvalidCoverPage {
        side: CoverSide,
        cells: usize,
        layout: String,
    },

    /// A cover page's only cell has no image.
    #[error("No image found on {side}")]
    NoCoverImage { side: CoverSide },

    /// A cover image file does not exist.
    #[error("Cover image not found on {side}: {reference}")]
    CoverImageNotFound { side: CoverSide, reference: String },

    /// The spine label is empty.
    #[error("Year cannot be empty")]
    EmptyYear,

    #[error(transparent)]
    Spine(#[from] SpineError),

    #[error("Failed to load image {reference}: {source}")]
    Image {
        reference: String,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_cover_page_display() {
        let err = PhotobookError::InvalidCoverPage {
            side: CoverSide::Front,
            cells: 2,
            layout: "2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Front cover page (first page) must have exactly 1 cell (layout '1'), but has 2 cells \
             (layout '2'). Cover pages must use a single full-page image."
        );
    }

    #[test]
    fn test_spine_error_is_transparent() {
        let err = PhotobookError::from(SpineError::Unresolved(35));
        assert_eq!(err.to_string(), "Cannot determine spine width for 35 paper pages");
    }

    #[test]
    fn test_not_a_directory_display() {
        let err = PhotobookError::NotADirectory(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "Not a directory: /nope");
    }
}

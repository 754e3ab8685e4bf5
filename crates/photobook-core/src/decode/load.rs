//! Image loading with EXIF orientation and transparency handling.
//!
//! Every image leaves this module upright and opaque: phone photos tagged
//! with an EXIF rotation are turned the right way up, and any alpha channel is
//! composited over white so transparent areas print as paper, not black.

use std::io::Cursor;
use std::path::PathBuf;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader, RgbImage};

use super::{DecodeError, DecodedImage, Orientation};

/// Source of decoded images, addressed by the references stored in the album.
pub trait ImageLoader {
    /// Load and decode an image.
    ///
    /// Returns `DecodeError::NotFound` when the reference does not resolve to
    /// an existing file, so callers can tell a missing photo from a broken one.
    fn load(&self, reference: &str) -> Result<DecodedImage, DecodeError>;
}

/// Loads images relative to an album folder.
#[derive(Debug, Clone)]
pub struct FolderImageLoader {
    root: PathBuf,
}

impl FolderImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute location of a reference.
    pub fn resolve(&self, reference: &str) -> PathBuf {
        self.root.join(reference)
    }
}

impl ImageLoader for FolderImageLoader {
    fn load(&self, reference: &str) -> Result<DecodedImage, DecodeError> {
        let path = self.resolve(reference);
        if !path.is_file() {
            return Err(DecodeError::NotFound(path));
        }
        let bytes = std::fs::read(&path).map_err(|e| DecodeError::IoError(e.to_string()))?;
        decode_image(&bytes)
    }
}

/// Decode JPEG or PNG bytes into an upright, opaque RGB image.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let upright = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgb_image(flatten_on_white(upright)))
}

/// Read the EXIF orientation tag.
///
/// Returns `Orientation::Normal` if there is no EXIF data or no orientation.
pub fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Convert to 8-bit RGB, compositing any transparency over opaque white.
pub fn flatten_on_white(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);
    for (src, dst) in rgba.pixels().zip(out.pixels_mut()) {
        let [r, g, b, a] = src.0;
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        dst.0 = [blend(r), blend(g), blend(b)];
    }
    out
}

//! Image loading pipeline.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG photos
//! - Applying EXIF orientation so phone photos are upright
//! - Flattening transparency onto white
//! - Resampling to an exact print size
//!
//! All operations are synchronous. Decoded buffers are owned values and are
//! released when they go out of scope.

mod load;
mod resize;
mod types;

pub use load::{decode_image, extract_orientation, flatten_on_white, FolderImageLoader, ImageLoader};
pub use resize::resize;
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};

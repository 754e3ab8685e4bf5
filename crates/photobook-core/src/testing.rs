//! Test doubles for the image loader and the canvas.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::decode::{DecodeError, DecodedImage, ImageLoader};
use crate::pdf::{Canvas, CanvasError, Rgb, StandardFont};
use crate::PlacementRect;

/// Serves images from memory by reference.
#[derive(Default)]
pub struct MemoryLoader {
    images: HashMap<String, DecodedImage>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reference: &str, width: u32, height: u32) -> Self {
        self.images.insert(
            reference.to_string(),
            DecodedImage::filled(width, height, [128, 128, 128]),
        );
        self
    }
}

impl ImageLoader for MemoryLoader {
    fn load(&self, reference: &str) -> Result<DecodedImage, DecodeError> {
        self.images
            .get(reference)
            .cloned()
            .ok_or_else(|| DecodeError::NotFound(PathBuf::from(reference)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Image {
        width: u32,
        height: u32,
        rect: PlacementRect,
    },
    FillColor(Rgb),
    Font(StandardFont, f64),
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Text { x: f64, y: f64, text: String },
    ShowPage,
}

/// Records every drawing call.
#[derive(Default)]
pub struct RecordingCanvas {
    pub commands: Vec<Command>,
}

impl RecordingCanvas {
    pub fn images(&self) -> Vec<(u32, u32, PlacementRect)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Image {
                    width,
                    height,
                    rect,
                } => Some((*width, *height, *rect)),
                _ => None,
            })
            .collect()
    }

    pub fn page_breaks(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::ShowPage))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_image(
        &mut self,
        image: &DecodedImage,
        rect: &PlacementRect,
    ) -> Result<(), CanvasError> {
        self.commands.push(Command::Image {
            width: image.width,
            height: image.height,
            rect: *rect,
        });
        Ok(())
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.commands.push(Command::FillColor(color));
    }

    fn set_font(&mut self, font: StandardFont, size_pt: f64) {
        self.commands.push(Command::Font(font, size_pt));
    }

    fn save_state(&mut self) {
        self.commands.push(Command::Save);
    }

    fn restore_state(&mut self) {
        self.commands.push(Command::Restore);
    }

    fn translate(&mut self, x_mm: f64, y_mm: f64) {
        self.commands.push(Command::Translate(x_mm, y_mm));
    }

    fn rotate(&mut self, degrees: f64) {
        self.commands.push(Command::Rotate(degrees));
    }

    fn draw_text(&mut self, x_mm: f64, y_mm: f64, text: &str) -> Result<(), CanvasError> {
        self.commands.push(Command::Text {
            x: x_mm,
            y: y_mm,
            text: text.to_string(),
        });
        Ok(())
    }

    fn show_page(&mut self) -> Result<(), CanvasError> {
        self.commands.push(Command::ShowPage);
        Ok(())
    }
}

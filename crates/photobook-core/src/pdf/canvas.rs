//! `lopdf`-backed canvas.
//!
//! Pages are assembled in memory. Each image is compressed and added to the
//! document as soon as it is drawn, so the caller can drop its pixels right
//! away. Nothing touches the filesystem until [`PdfCanvas::save`].

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::{mm_to_pt, Canvas, CanvasError, ImageEncoding, Rgb, StandardFont};
use crate::decode::DecodedImage;
use crate::encode::encode_jpeg;
use crate::PlacementRect;

type FontState = Option<(StandardFont, f64)>;

#[derive(Default)]
struct PageState {
    operations: Vec<Operation>,
    images: Vec<(String, ObjectId)>,
    fonts: BTreeSet<StandardFont>,
}

/// A PDF document whose pages all share one size.
pub struct PdfCanvas {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    font_ids: BTreeMap<StandardFont, ObjectId>,
    width_pt: f32,
    height_pt: f32,
    encoding: ImageEncoding,
    page: PageState,
    font: FontState,
    font_stack: Vec<FontState>,
}

impl PdfCanvas {
    /// Create a canvas with pages of the given size in millimetres.
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();

        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            font_ids: BTreeMap::new(),
            width_pt: mm_to_pt(width_mm) as f32,
            height_pt: mm_to_pt(height_mm) as f32,
            encoding: ImageEncoding::default(),
            page: PageState::default(),
            font: None,
            font_stack: Vec::new(),
        }
    }

    pub fn with_encoding(mut self, encoding: ImageEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Number of finished pages.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Write the document to `path`.
    pub fn save(self, path: &Path) -> Result<(), CanvasError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize the document, finishing the current page if it has content.
    pub fn write_to<W: Write>(mut self, writer: &mut W) -> Result<(), CanvasError> {
        if !self.page.operations.is_empty() {
            self.show_page()?;
        }

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self
            .document
            .add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        self.document.trailer.set("Root", catalog_id);

        self.document.save_to(writer)?;
        Ok(())
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.page.operations.push(Operation::new(operator, operands));
    }

    fn embed_image(&mut self, image: &DecodedImage) -> Result<ObjectId, CanvasError> {
        let (data, filter) = match self.encoding {
            ImageEncoding::Flate => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(&image.pixels)?;
                (encoder.finish()?, "FlateDecode")
            }
            ImageEncoding::Jpeg { quality } => (encode_jpeg(image, quality)?, "DCTDecode"),
        };

        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width as i64,
            "Height" => image.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => filter,
        };
        Ok(self.document.add_object(Stream::new(dict, data)))
    }

    fn font_id(&mut self, font: StandardFont) -> ObjectId {
        if let Some(id) = self.font_ids.get(&font) {
            return *id;
        }
        let id = self.document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        self.font_ids.insert(font, id);
        id
    }
}

/// Latin-1 bytes for a standard font string; other characters become `?`.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

impl Canvas for PdfCanvas {
    fn draw_image(
        &mut self,
        image: &DecodedImage,
        rect: &PlacementRect,
    ) -> Result<(), CanvasError> {
        let id = self.embed_image(image)?;
        let name = format!("Im{}", self.page.images.len() + 1);
        self.page.images.push((name.clone(), id));

        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                (mm_to_pt(rect.width) as f32).into(),
                0.into(),
                0.into(),
                (mm_to_pt(rect.height) as f32).into(),
                (mm_to_pt(rect.x) as f32).into(),
                (mm_to_pt(rect.y) as f32).into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
        Ok(())
    }

    fn set_fill_color(&mut self, color: Rgb) {
        let [r, g, b] = color.to_unit();
        self.push("rg", vec![r.into(), g.into(), b.into()]);
    }

    fn set_font(&mut self, font: StandardFont, size_pt: f64) {
        self.font = Some((font, size_pt));
    }

    fn save_state(&mut self) {
        self.push("q", vec![]);
        self.font_stack.push(self.font);
    }

    fn restore_state(&mut self) {
        match self.font_stack.pop() {
            Some(font) => {
                self.push("Q", vec![]);
                self.font = font;
            }
            None => log::warn!("Unbalanced restore_state ignored"),
        }
    }

    fn translate(&mut self, x_mm: f64, y_mm: f64) {
        self.push(
            "cm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                (mm_to_pt(x_mm) as f32).into(),
                (mm_to_pt(y_mm) as f32).into(),
            ],
        );
    }

    fn rotate(&mut self, degrees: f64) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.push(
            "cm",
            vec![
                (cos as f32).into(),
                (sin as f32).into(),
                (-sin as f32).into(),
                (cos as f32).into(),
                0.into(),
                0.into(),
            ],
        );
    }

    fn draw_text(&mut self, x_mm: f64, y_mm: f64, text: &str) -> Result<(), CanvasError> {
        let (font, size_pt) = self.font.ok_or(CanvasError::NoFont)?;
        self.page.fonts.insert(font);

        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![
                Object::Name(font.resource_name().as_bytes().to_vec()),
                (size_pt as f32).into(),
            ],
        );
        self.push(
            "Td",
            vec![
                (mm_to_pt(x_mm) as f32).into(),
                (mm_to_pt(y_mm) as f32).into(),
            ],
        );
        self.push(
            "Tj",
            vec![Object::String(encode_text(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
        Ok(())
    }

    fn show_page(&mut self) -> Result<(), CanvasError> {
        let page = std::mem::take(&mut self.page);
        self.font = None;
        self.font_stack.clear();

        let content = Content {
            operations: page.operations,
        };
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content.encode()?)?;
        let compressed = encoder.finish()?;
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed));

        let mut xobjects = Dictionary::new();
        for (name, id) in page.images {
            xobjects.set(name, id);
        }
        let mut fonts = Dictionary::new();
        for font in page.fonts {
            let id = self.font_id(font);
            fonts.set(font.resource_name(), id);
        }

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.width_pt.into(), self.height_pt.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => xobjects,
                "Font" => fonts,
            },
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        log::debug!("Finished PDF page {}", self.page_ids.len());
        Ok(())
    }
}

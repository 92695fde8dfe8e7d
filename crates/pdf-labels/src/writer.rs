//! PDF output
//!
//! Each sheet becomes one page holding a single full-page RGB image, sized so
//! the image prints at the resolution it was rendered at.

use image::RgbImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::constants::px_to_pt;
use crate::render::SheetSink;
use crate::types::{LabelError, Result};

/// Incremental PDF builder that takes sheets one at a time.
///
/// Sheets are compressed into the document as they arrive; the PDF bytes only
/// exist once [`PdfSheetWriter::finish`] succeeds.
pub struct PdfSheetWriter {
    doc: Document,
    pages_id: ObjectId,
    page_refs: Vec<Object>,
    dpi: f64,
}

impl PdfSheetWriter {
    pub fn new(dpi: f64) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_refs: Vec::new(),
            dpi,
        }
    }

    /// Pages written so far
    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Append `sheet` as the next page
    pub fn push_sheet(&mut self, sheet: RgbImage) -> Result<()> {
        let (width_px, height_px) = sheet.dimensions();
        let width_pt = px_to_pt(width_px, self.dpi) as f32;
        let height_pt = px_to_pt(height_px, self.dpi) as f32;

        let mut image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width_px as i64,
                "Height" => height_px as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            sheet.into_raw(),
        );
        image.compress()?;
        let image_id = self.doc.add_object(image);

        let content = format!("q {} 0 0 {} 0 0 cm /Im0 Do Q\n", width_pt, height_pt);
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width_pt),
                Object::Real(height_pt),
            ],
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    "Im0" => image_id,
                },
            },
            "Contents" => content_id,
        });
        self.page_refs.push(Object::Reference(page_id));
        Ok(())
    }

    /// Close the page tree and serialize the document
    pub fn finish(mut self) -> Result<Vec<u8>> {
        if self.page_refs.is_empty() {
            return Err(LabelError::EmptyDocument);
        }

        let count = self.page_refs.len() as i64;
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_refs,
            "Count" => count,
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let info_id = self.doc.add_object(dictionary! {
            "Producer" => Object::string_literal("pdf-labels"),
        });
        self.doc.trailer.set("Info", info_id);

        let mut writer = Vec::new();
        self.doc.save_to(&mut writer)?;
        Ok(writer)
    }
}

impl SheetSink for PdfSheetWriter {
    fn accept(&mut self, sheet: RgbImage) -> Result<()> {
        self.push_sheet(sheet)
    }
}

/// Serialize `sheets` in order into one PDF; the first sheet becomes page 1.
pub fn write_pdf(sheets: &[RgbImage], dpi: f64) -> Result<Vec<u8>> {
    let mut writer = PdfSheetWriter::new(dpi);
    for sheet in sheets {
        writer.push_sheet(sheet.clone())?;
    }
    writer.finish()
}

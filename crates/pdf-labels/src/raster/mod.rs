//! Source document rasterization
//!
//! The pipeline only depends on the [`Rasterizer`] trait: anything that can
//! turn a page range of a PDF into RGB rasters at a given resolution.

mod cache;
#[cfg(all(feature = "pdfium", not(target_arch = "wasm32")))]
mod pdfium;

pub use cache::{CachingRasterizer, SourceFingerprint};
#[cfg(all(feature = "pdfium", not(target_arch = "wasm32")))]
pub use pdfium::PdfiumRasterizer;

use image::RgbImage;
use lopdf::Document;

use crate::types::{LabelError, Result};

/// Planning information available without rasterizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub page_count: usize,
}

/// Turns PDF pages into rasters.
///
/// Page numbers are 1-based and ranges are inclusive. Implementations return
/// exactly one raster per page, in page order.
pub trait Rasterizer {
    /// Number of pages in `document`
    fn page_count(&self, document: &[u8]) -> Result<usize>;

    fn metadata(&self, document: &[u8]) -> Result<DocumentMetadata> {
        Ok(DocumentMetadata {
            page_count: self.page_count(document)?,
        })
    }

    /// Rasterize pages `first_page..=last_page` at `dpi`
    fn rasterize(
        &mut self,
        document: &[u8],
        first_page: usize,
        last_page: usize,
        dpi: f64,
    ) -> Result<Vec<RgbImage>>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for Box<R> {
    fn page_count(&self, document: &[u8]) -> Result<usize> {
        (**self).page_count(document)
    }

    fn metadata(&self, document: &[u8]) -> Result<DocumentMetadata> {
        (**self).metadata(document)
    }

    fn rasterize(
        &mut self,
        document: &[u8],
        first_page: usize,
        last_page: usize,
        dpi: f64,
    ) -> Result<Vec<RgbImage>> {
        (**self).rasterize(document, first_page, last_page, dpi)
    }
}

/// Read the page count by parsing the PDF structure, without rendering.
pub fn read_metadata(document: &[u8]) -> Result<DocumentMetadata> {
    let doc = Document::load_mem(document).map_err(|e| LabelError::SourceDecode(e.to_string()))?;
    Ok(DocumentMetadata {
        page_count: doc.get_pages().len(),
    })
}

/// Check a 1-based inclusive range against the document length
pub(crate) fn check_page_range(first_page: usize, last_page: usize, page_count: usize) -> Result<()> {
    if first_page == 0 || first_page > last_page || last_page > page_count {
        return Err(LabelError::InvalidConfiguration(format!(
            "Page range {}..={} is outside 1..={}",
            first_page, last_page, page_count
        )));
    }
    Ok(())
}

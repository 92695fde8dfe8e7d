use image::{DynamicImage, RgbImage, RgbaImage};
use pdfium_render::prelude::*;
use std::path::PathBuf;

use super::{Rasterizer, check_page_range};
use crate::constants::POINTS_PER_INCH;
use crate::types::{LabelError, Result};

/// Rasterizer backed by the pdfium library.
///
/// Pdfium is bound per call, so the rasterizer itself holds no library
/// handle and can move freely between threads.
#[derive(Debug, Clone, Default)]
pub struct PdfiumRasterizer {
    library_dir: Option<PathBuf>,
}

impl PdfiumRasterizer {
    /// Use `vendor/pdfium/lib` under the working directory, then the system library
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the pdfium library found in `dir` before trying the defaults
    pub fn with_library_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: Some(dir.into()),
        }
    }

    fn bind(&self) -> Result<Pdfium> {
        let vendor_dir = std::env::current_dir().ok().map(|mut p| {
            p.push("vendor/pdfium/lib");
            p
        });

        for dir in self.library_dir.iter().chain(vendor_dir.iter()) {
            if !dir.exists() {
                continue;
            }
            match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)) {
                Ok(binding) => return Ok(Pdfium::new(binding)),
                Err(e) => log::debug!("Could not bind pdfium in {}: {}", dir.display(), e),
            }
        }

        Pdfium::bind_to_system_library()
            .map(Pdfium::new)
            .map_err(|e| LabelError::SourceDecode(format!("pdfium library unavailable: {}", e)))
    }
}

fn decode_error(e: PdfiumError) -> LabelError {
    LabelError::SourceDecode(e.to_string())
}

impl Rasterizer for PdfiumRasterizer {
    fn page_count(&self, document: &[u8]) -> Result<usize> {
        let pdfium = self.bind()?;
        let doc = pdfium
            .load_pdf_from_byte_slice(document, None)
            .map_err(decode_error)?;
        Ok(doc.pages().len() as usize)
    }

    fn rasterize(
        &mut self,
        document: &[u8],
        first_page: usize,
        last_page: usize,
        dpi: f64,
    ) -> Result<Vec<RgbImage>> {
        let pdfium = self.bind()?;
        let doc = pdfium
            .load_pdf_from_byte_slice(document, None)
            .map_err(decode_error)?;
        let pages = doc.pages();
        check_page_range(first_page, last_page, pages.len() as usize)?;

        let config = PdfRenderConfig::new().scale_page_by_factor((dpi / POINTS_PER_INCH) as f32);

        let mut rasters = Vec::with_capacity(last_page - first_page + 1);
        for page_number in first_page..=last_page {
            let page = pages.get((page_number - 1) as u16).map_err(decode_error)?;
            let bitmap = page.render_with_config(&config).map_err(decode_error)?;

            let width = bitmap.width() as u32;
            let height = bitmap.height() as u32;
            let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes().to_vec())
                .ok_or_else(|| {
                    LabelError::SourceDecode(format!(
                        "page {} rendered to a malformed {}x{} bitmap",
                        page_number, width, height
                    ))
                })?;
            rasters.push(DynamicImage::ImageRgba8(rgba).to_rgb8());
        }

        log::debug!(
            "Rasterized pages {}..={} at {} dpi",
            first_page,
            last_page,
            dpi
        );
        Ok(rasters)
    }
}

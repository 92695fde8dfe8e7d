#![allow(dead_code)]

use image::{Rgb, RgbImage};
use lopdf::{Dictionary, Document, Object, Stream};
use pdf_labels::*;

/// In-memory rasterizer: page `n` renders as a solid color unique to `n`.
///
/// The document bytes are ignored; the page count comes from `pages`.
pub struct SyntheticRasterizer {
    pub pages: usize,
    pub width: u32,
    pub height: u32,
    /// Every window requested, in order
    pub windows: Vec<(usize, usize)>,
    /// Fail any window that includes this page
    pub fail_on_page: Option<usize>,
    /// Return one raster fewer than requested
    pub short_windows: bool,
}

impl SyntheticRasterizer {
    pub fn new(pages: usize, width: u32, height: u32) -> Self {
        Self {
            pages,
            width,
            height,
            windows: Vec::new(),
            fail_on_page: None,
            short_windows: false,
        }
    }

    /// Rasters sized to the effective label area, so compositing is lossless
    pub fn for_options(pages: usize, options: &LabelSheetOptions) -> Self {
        let geometry = pdf_labels::layout::resolve_geometry(options).unwrap();
        Self::new(
            pages,
            geometry.effective_width_px,
            geometry.effective_height_px,
        )
    }

    pub fn largest_window(&self) -> usize {
        self.windows
            .iter()
            .map(|(first, last)| last - first + 1)
            .max()
            .unwrap_or(0)
    }
}

impl Rasterizer for SyntheticRasterizer {
    fn page_count(&self, _document: &[u8]) -> Result<usize> {
        Ok(self.pages)
    }

    fn rasterize(
        &mut self,
        _document: &[u8],
        first_page: usize,
        last_page: usize,
        _dpi: f64,
    ) -> Result<Vec<RgbImage>> {
        self.windows.push((first_page, last_page));

        if let Some(page) = self.fail_on_page {
            if (first_page..=last_page).contains(&page) {
                return Err(LabelError::SourceDecode(format!("page {} is corrupt", page)));
            }
        }

        let mut rasters: Vec<RgbImage> = (first_page..=last_page)
            .map(|page| RgbImage::from_pixel(self.width, self.height, page_color(page)))
            .collect();
        if self.short_windows {
            rasters.pop();
        }
        Ok(rasters)
    }
}

/// Distinct, never-white color for page `page` (1-based, up to 200 pages)
pub fn page_color(page: usize) -> Rgb<u8> {
    Rgb([(page % 200) as u8, ((page * 3) % 200) as u8, 100])
}

/// Small letter sheet: 255x330 px with 78x72 px cells in a 3x4 grid
pub fn small_options() -> LabelSheetOptions {
    let mut options = LabelSheetOptions::default();
    options.dpi = 30.0;
    options.preview_dpi = 30.0;
    options
}

/// Pixel at the middle of cell `local` on a sheet
pub fn cell_center(sheet: &RgbImage, options: &LabelSheetOptions, local: usize) -> Rgb<u8> {
    let geometry = pdf_labels::layout::resolve_geometry(options).unwrap();
    let (x, y) = geometry.origin(local);
    *sheet.get_pixel(
        (x + i64::from(geometry.cell_width_px / 2)) as u32,
        (y + i64::from(geometry.cell_height_px / 2)) as u32,
    )
}

pub fn create_test_pdf(num_pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

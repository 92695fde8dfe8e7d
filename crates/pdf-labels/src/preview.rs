//! Single-sheet previews
//!
//! Previews render at the preview resolution and never go through the
//! batched pipeline: they touch at most one sheet's worth of pages.

use image::RgbImage;

use crate::constants::guide_width_px;
use crate::layout::resolve_geometry;
use crate::options::LabelSheetOptions;
use crate::raster::Rasterizer;
use crate::render::{SheetAssembler, compose_for_cell};
use crate::types::*;

/// Render page 1 of `document` at the start position on a sheet with guides.
///
/// The start position wraps onto the first sheet, so the preview is always a
/// single canvas even when the run would begin on a later sheet.
pub fn render_preview<R>(
    rasterizer: &mut R,
    document: &[u8],
    options: &LabelSheetOptions,
) -> Result<RgbImage>
where
    R: Rasterizer + ?Sized,
{
    options.validate()?;
    if rasterizer.metadata(document)?.page_count == 0 {
        return Err(LabelError::EmptyDocument);
    }

    let raster = rasterizer
        .rasterize(document, 1, 1, options.preview_dpi)?
        .into_iter()
        .next()
        .ok_or(LabelError::RasterCount {
            first: 1,
            last: 1,
            got: 0,
        })?;
    preview_from_raster(&raster, options)
}

/// Preview sheet for an already rasterized first page.
///
/// `raster` is expected at `options.preview_dpi`.
pub fn preview_from_raster(raster: &RgbImage, options: &LabelSheetOptions) -> Result<RgbImage> {
    let preview = options.at_dpi(options.preview_dpi);
    let geometry = resolve_geometry(&preview)?;
    let position = options.skipped_cells() % geometry.labels_per_sheet();

    let label = compose_for_cell(raster, &geometry, options.resize_mode);
    let mut assembler = SheetAssembler::new(
        geometry,
        options.guides,
        guide_width_px(options.preview_dpi),
        Vec::new(),
    );
    assembler.place(position, &label)?;
    first_sheet(assembler.finish()?)
}

/// Render the first sheet that holds labels, with guides, as the final run
/// lays it out.
///
/// Like [`render_preview`] the start position wraps onto a single sheet.
/// Only the pages that land on that sheet are rasterized, in one call.
pub fn render_first_sheet<R>(
    rasterizer: &mut R,
    document: &[u8],
    options: &LabelSheetOptions,
) -> Result<RgbImage>
where
    R: Rasterizer + ?Sized,
{
    options.validate()?;
    let page_count = rasterizer.metadata(document)?.page_count;
    if page_count == 0 {
        return Err(LabelError::EmptyDocument);
    }

    let preview = options.at_dpi(options.preview_dpi);
    let geometry = resolve_geometry(&preview)?;
    let per_sheet = geometry.labels_per_sheet();
    let skipped = options.skipped_cells() % per_sheet;
    let pages = (per_sheet - skipped).min(page_count);

    let rasters = rasterizer.rasterize(document, 1, pages, options.preview_dpi)?;
    if rasters.len() != pages {
        return Err(LabelError::RasterCount {
            first: 1,
            last: pages,
            got: rasters.len(),
        });
    }

    let mut assembler = SheetAssembler::new(
        geometry,
        options.guides,
        guide_width_px(options.preview_dpi),
        Vec::new(),
    );
    for (offset, raster) in rasters.into_iter().enumerate() {
        let label = compose_for_cell(&raster, &geometry, options.resize_mode);
        assembler.place(skipped + offset, &label)?;
    }
    first_sheet(assembler.finish()?)
}

fn first_sheet(sheets: Vec<RgbImage>) -> Result<RgbImage> {
    sheets
        .into_iter()
        .next()
        .ok_or_else(|| LabelError::InvalidConfiguration("Preview produced no sheet".to_string()))
}

use crate::layout::resolve_geometry;
use crate::options::LabelSheetOptions;
use crate::raster::read_metadata;
use crate::types::*;

/// Calculate statistics for a label run over `page_count` source pages
pub fn calculate_statistics(
    page_count: usize,
    options: &LabelSheetOptions,
) -> Result<LabelStatistics> {
    if page_count == 0 {
        return Err(LabelError::EmptyDocument);
    }

    options.validate()?;
    let geometry = resolve_geometry(options)?;

    let labels_per_sheet = geometry.labels_per_sheet();
    let skipped_cells = options.skipped_cells();
    let output_sheets = options.sheet_count(page_count);

    // Cells on the last sheet left empty after the final label
    let unused_cells = output_sheets * labels_per_sheet - skipped_cells - page_count;

    Ok(LabelStatistics {
        source_pages: page_count,
        labels_per_sheet,
        output_sheets,
        skipped_cells,
        unused_cells,
        cell_size_px: (geometry.cell_width_px, geometry.cell_height_px),
        content_size_px: (geometry.effective_width_px, geometry.effective_height_px),
    })
}

/// Calculate statistics for a PDF without rasterizing it
pub fn calculate_document_statistics(
    document: &[u8],
    options: &LabelSheetOptions,
) -> Result<LabelStatistics> {
    let metadata = read_metadata(document)?;
    calculate_statistics(metadata.page_count, options)
}

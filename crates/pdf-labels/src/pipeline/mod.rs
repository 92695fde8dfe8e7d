//! Batched rendering pipeline
//!
//! This module orchestrates a full label run:
//! 1. Validate options and resolve the pixel geometry
//! 2. Pull source pages from the rasterizer one bounded window at a time
//! 3. Composite each page and place it at the next grid position
//! 4. Stream sealed sheets into a sink (normally the PDF writer)
//!
//! Only one window of source rasters plus the sheet in progress are alive at
//! any point. The grid position counter is the only state that crosses window
//! boundaries, so the window size never changes the output.

mod io;

pub use io::{generate_pdf, load_source, save_pdf};

use crate::layout::resolve_geometry;
use crate::options::LabelSheetOptions;
use crate::raster::Rasterizer;
use crate::render::{SheetAssembler, SheetSink, compose_for_cell};
use crate::types::*;
use crate::writer::PdfSheetWriter;

/// Progress never reaches this fraction before the last sheet is sealed
const MAX_UNFINISHED_FRACTION: f64 = 0.99;

/// Snapshot of a running render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderProgress {
    pub completed_sheets: usize,
    pub total_sheets: usize,
    pub rendered_pages: usize,
    pub total_pages: usize,
    pub finished: bool,
}

impl RenderProgress {
    /// Completed sheets over expected sheets, held below 1.0 until finished
    pub fn fraction(&self) -> f64 {
        if self.finished {
            return 1.0;
        }
        if self.total_sheets == 0 {
            return 0.0;
        }
        (self.completed_sheets as f64 / self.total_sheets as f64).min(MAX_UNFINISHED_FRACTION)
    }
}

/// What a completed render produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub source_pages: usize,
    pub sheets: usize,
    pub windows: usize,
}

/// Inclusive 1-based page windows of at most `batch_size` pages
pub fn batch_windows(total_pages: usize, batch_size: usize) -> Vec<(usize, usize)> {
    let batch_size = batch_size.max(1);
    (1..=total_pages)
        .step_by(batch_size)
        .map(|first| (first, (first + batch_size - 1).min(total_pages)))
        .collect()
}

/// Render every source page onto sheets and hand them to `sink` in order.
///
/// Guides are never drawn here; they only exist in previews. Any failure
/// aborts the run and drops the window being processed.
pub fn render_sheets<R, S>(
    rasterizer: &mut R,
    document: &[u8],
    options: &LabelSheetOptions,
    sink: S,
    progress: &mut dyn FnMut(RenderProgress),
) -> Result<(S, RenderSummary)>
where
    R: Rasterizer + ?Sized,
    S: SheetSink,
{
    options.validate()?;
    let geometry = resolve_geometry(options)?;

    let total_pages = rasterizer.metadata(document)?.page_count;
    if total_pages == 0 {
        return Err(LabelError::EmptyDocument);
    }

    let total_sheets = options.sheet_count(total_pages);
    let windows = batch_windows(total_pages, options.batch_size);
    log::info!(
        "Rendering {} labels onto {} sheets ({} per sheet, {} windows of up to {} pages)",
        total_pages,
        total_sheets,
        geometry.labels_per_sheet(),
        windows.len(),
        options.batch_size
    );

    let mut assembler = SheetAssembler::new(geometry, GuideLines::None, 0, sink);
    let mut state = RenderProgress {
        completed_sheets: 0,
        total_sheets,
        rendered_pages: 0,
        total_pages,
        finished: false,
    };
    progress(state);

    let mut position = options.skipped_cells();
    for &(first, last) in &windows {
        let window = rasterizer.rasterize(document, first, last, options.dpi)?;
        if window.len() != last - first + 1 {
            return Err(LabelError::RasterCount {
                first,
                last,
                got: window.len(),
            });
        }
        log::debug!("Compositing pages {}..={}", first, last);

        // Consuming the window frees each source raster once it is composited
        for raster in window {
            let label = compose_for_cell(&raster, &geometry, options.resize_mode);
            drop(raster);

            let sealed = assembler.place(position, &label)?;
            position += 1;
            state.rendered_pages += 1;
            if sealed > 0 {
                state.completed_sheets = assembler.sheets_sealed();
                progress(state);
            }
        }
    }

    let sink = assembler.finish()?;
    state.completed_sheets = total_sheets;
    state.finished = true;
    progress(state);

    Ok((
        sink,
        RenderSummary {
            source_pages: total_pages,
            sheets: total_sheets,
            windows: windows.len(),
        },
    ))
}

/// Render all sheets and encode them as one PDF.
///
/// Returns bytes only when every page rendered; a failure part-way through
/// produces no output at all.
pub fn render_pdf<R>(
    rasterizer: &mut R,
    document: &[u8],
    options: &LabelSheetOptions,
    progress: &mut dyn FnMut(RenderProgress),
) -> Result<Vec<u8>>
where
    R: Rasterizer + ?Sized,
{
    let writer = PdfSheetWriter::new(options.dpi);
    let (writer, summary) = render_sheets(rasterizer, document, options, writer, progress)?;
    let bytes = writer.finish()?;
    log::info!(
        "Wrote {} sheets for {} labels ({} bytes)",
        summary.sheets,
        summary.source_pages,
        bytes.len()
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_windows_cover_all_pages() {
        assert_eq!(batch_windows(120, 50), vec![(1, 50), (51, 100), (101, 120)]);
        assert_eq!(batch_windows(50, 50), vec![(1, 50)]);
        assert_eq!(batch_windows(3, 1), vec![(1, 1), (2, 2), (3, 3)]);
        assert!(batch_windows(0, 50).is_empty());
    }

    #[test]
    fn test_progress_fraction_clamped_until_finished() {
        let mut progress = RenderProgress {
            completed_sheets: 2,
            total_sheets: 2,
            rendered_pages: 20,
            total_pages: 20,
            finished: false,
        };
        assert!(progress.fraction() < 1.0);

        progress.finished = true;
        assert_eq!(progress.fraction(), 1.0);
    }
}

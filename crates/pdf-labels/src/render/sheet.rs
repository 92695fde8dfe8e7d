//! Sheet assembly
//!
//! Accumulates composited labels onto sheet canvases in grid order and hands
//! each sheet to a [`SheetSink`] as soon as it is complete.

use image::RgbImage;
use image::imageops;

use crate::constants::{BACKGROUND, GUIDE_COLOR};
use crate::layout::SheetGeometry;
use crate::types::{GuideLines, LabelError, Result};

use super::guides::draw_outline;

/// Receives sealed sheets in output order
pub trait SheetSink {
    fn accept(&mut self, sheet: RgbImage) -> Result<()>;
}

impl SheetSink for Vec<RgbImage> {
    fn accept(&mut self, sheet: RgbImage) -> Result<()> {
        self.push(sheet);
        Ok(())
    }
}

impl<S: SheetSink + ?Sized> SheetSink for &mut S {
    fn accept(&mut self, sheet: RgbImage) -> Result<()> {
        (**self).accept(sheet)
    }
}

/// The sheet currently being filled
struct OpenSheet {
    canvas: RgbImage,
    occupied: Vec<bool>,
}

/// Fills sheet canvases from a stream of `(position, label)` pairs.
///
/// Positions are global 0-based grid ordinals across all sheets and must be
/// strictly increasing. A sheet is sealed when its last cell is filled or
/// when [`SheetAssembler::finish`] is called; sheets skipped entirely by a
/// position jump are emitted blank so sheet numbering stays aligned.
pub struct SheetAssembler<S: SheetSink> {
    geometry: SheetGeometry,
    guides: GuideLines,
    guide_width: u32,
    sink: S,
    current: Option<OpenSheet>,
    last_pos: Option<usize>,
    sealed: usize,
}

impl<S: SheetSink> SheetAssembler<S> {
    pub fn new(geometry: SheetGeometry, guides: GuideLines, guide_width: u32, sink: S) -> Self {
        Self {
            geometry,
            guides,
            guide_width,
            sink,
            current: None,
            last_pos: None,
            sealed: 0,
        }
    }

    pub fn geometry(&self) -> &SheetGeometry {
        &self.geometry
    }

    /// Number of sheets handed to the sink so far
    pub fn sheets_sealed(&self) -> usize {
        self.sealed
    }

    /// Paste `label` centered in the cell at global position `pos`.
    ///
    /// Returns how many sheets were sealed by this call. Labels larger than
    /// the cell bleed into neighbouring cells and are clipped at the canvas.
    pub fn place(&mut self, pos: usize, label: &RgbImage) -> Result<usize> {
        if let Some(last) = self.last_pos {
            if pos <= last {
                return Err(LabelError::PositionOutOfOrder { last, got: pos });
            }
        }

        let per_sheet = self.geometry.labels_per_sheet();
        let sheet_index = pos / per_sheet;
        let local = pos % per_sheet;
        let before = self.sealed;

        while self.sealed < sheet_index {
            self.open_sheet();
            self.seal()?;
        }

        let (cell_x, cell_y) = self.geometry.origin(local);
        let (dx, dy) = self.geometry.centering_offset(label.width(), label.height());
        let sheet = self.open_sheet();
        imageops::replace(&mut sheet.canvas, label, cell_x + dx, cell_y + dy);
        sheet.occupied[local] = true;
        self.last_pos = Some(pos);

        if local + 1 == per_sheet {
            self.seal()?;
        }

        Ok(self.sealed - before)
    }

    /// Seal the sheet in progress, if any, and return the sink.
    pub fn finish(mut self) -> Result<S> {
        if self.current.is_some() {
            self.seal()?;
        }
        Ok(self.sink)
    }

    fn open_sheet(&mut self) -> &mut OpenSheet {
        let geometry = &self.geometry;
        self.current.get_or_insert_with(|| OpenSheet {
            canvas: RgbImage::from_pixel(
                geometry.sheet_width_px,
                geometry.sheet_height_px,
                BACKGROUND,
            ),
            occupied: vec![false; geometry.labels_per_sheet()],
        })
    }

    fn seal(&mut self) -> Result<()> {
        let Some(mut sheet) = self.current.take() else {
            return Ok(());
        };

        if self.guides != GuideLines::None {
            for (local, occupied) in sheet.occupied.iter().enumerate() {
                if self.guides == GuideLines::AllCells || *occupied {
                    draw_outline(
                        &mut sheet.canvas,
                        self.geometry.cell_rect(local),
                        self.guide_width,
                        GUIDE_COLOR,
                    );
                }
            }
        }

        log::debug!("Sealed sheet {}", self.sealed + 1);
        self.sink.accept(sheet.canvas)?;
        self.sealed += 1;
        Ok(())
    }
}

//! Sheet geometry resolution
//!
//! Turns physical sheet settings into pixel-space cell sizes and grid
//! origins. Everything here is pure arithmetic; nothing touches rasters.

use crate::options::LabelSheetOptions;
use crate::types::{LabelError, LabelSizing, MeasurementUnit, Result};

use super::{GridPosition, PixelRect};

/// Pixel geometry of one sheet at a fixed resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetGeometry {
    /// Sheet canvas size in pixels
    pub sheet_width_px: u32,
    pub sheet_height_px: u32,
    /// Grid dimensions
    pub cols: usize,
    pub rows: usize,
    /// Left and top margins in pixels
    pub left_px: i64,
    pub top_px: i64,
    /// Area inside the margins
    pub available_width_px: i64,
    pub available_height_px: i64,
    /// Cell size in pixels
    pub cell_width_px: u32,
    pub cell_height_px: u32,
    /// Gap between neighbouring cells
    pub h_gap_px: i64,
    pub v_gap_px: i64,
    /// White inset on each side of the content (0 unless inset sizing)
    pub inset_px: i64,
    /// Content area: the cell minus the inset on both sides
    pub content_width_px: u32,
    pub content_height_px: u32,
    /// Content area after the image scale percentage
    pub effective_width_px: u32,
    pub effective_height_px: u32,
}

/// Resolve the pixel geometry for `options` at `options.dpi`.
///
/// Fails with `InvalidConfiguration` when the grid is empty, the margins eat
/// the whole sheet, any resolved cell/content size is not positive, or any
/// length resolves to more pixels than a raster can hold.
/// Explicit label sizes are not checked against the sheet: oversized labels
/// overflow the sheet and overlap each other.
pub fn resolve_geometry(options: &LabelSheetOptions) -> Result<SheetGeometry> {
    let sheet = &options.sheet;
    let unit = sheet.unit;
    let dpi = options.dpi;

    if sheet.columns == 0 || sheet.rows == 0 {
        return Err(LabelError::InvalidConfiguration(format!(
            "Grid {}x{} has no cells",
            sheet.columns, sheet.rows
        )));
    }
    if !(dpi > 0.0) {
        return Err(LabelError::InvalidConfiguration(format!(
            "Resolution must be positive, got {}",
            dpi
        )));
    }

    let sheet_width_px = length_px("Sheet width", sheet.width, unit, dpi)?;
    let sheet_height_px = length_px("Sheet height", sheet.height, unit, dpi)?;
    if sheet_width_px <= 0 || sheet_height_px <= 0 {
        return Err(LabelError::InvalidConfiguration(format!(
            "Sheet resolves to {}x{} pixels",
            sheet_width_px, sheet_height_px
        )));
    }
    let sheet_width_u32 = u32::try_from(sheet_width_px).map_err(|_| {
        LabelError::InvalidConfiguration(format!("Sheet width {}px is too large", sheet_width_px))
    })?;
    let sheet_height_u32 = u32::try_from(sheet_height_px).map_err(|_| {
        LabelError::InvalidConfiguration(format!(
            "Sheet height {}px is too large",
            sheet_height_px
        ))
    })?;

    let left_px = length_px("Left margin", sheet.margins.left, unit, dpi)?;
    let right_px = length_px("Right margin", sheet.margins.right, unit, dpi)?;
    let top_px = length_px("Top margin", sheet.margins.top, unit, dpi)?;
    let bottom_px = length_px("Bottom margin", sheet.margins.bottom, unit, dpi)?;

    let available_width_px = sheet_width_px - left_px - right_px;
    let available_height_px = sheet_height_px - top_px - bottom_px;
    if available_width_px < 0 || available_height_px < 0 {
        return Err(LabelError::InvalidConfiguration(format!(
            "Margins leave {}x{} pixels of printable area",
            available_width_px, available_height_px
        )));
    }

    let cols = sheet.columns as i64;
    let rows = sheet.rows as i64;

    let (cell_width_px, cell_height_px, h_gap_px, v_gap_px, inset_px) = match options.sizing {
        LabelSizing::Auto {
            h_spacing,
            v_spacing,
        } => {
            let h_gap = length_px("Horizontal spacing", h_spacing, unit, dpi)?;
            let v_gap = length_px("Vertical spacing", v_spacing, unit, dpi)?;
            let gaps_width = (cols - 1).checked_mul(h_gap).ok_or_else(|| {
                LabelError::InvalidConfiguration(format!("{} columns of spacing overflow", cols))
            })?;
            let gaps_height = (rows - 1).checked_mul(v_gap).ok_or_else(|| {
                LabelError::InvalidConfiguration(format!("{} rows of spacing overflow", rows))
            })?;
            let width = (available_width_px - gaps_width).div_euclid(cols);
            let height = (available_height_px - gaps_height).div_euclid(rows);
            (width, height, h_gap, v_gap, 0)
        }
        LabelSizing::Explicit {
            width,
            height,
            h_spacing,
            v_spacing,
        } => (
            length_px("Label width", width, unit, dpi)?,
            length_px("Label height", height, unit, dpi)?,
            length_px("Horizontal spacing", h_spacing, unit, dpi)?,
            length_px("Vertical spacing", v_spacing, unit, dpi)?,
            0,
        ),
        LabelSizing::Inset { buffer } => (
            available_width_px.div_euclid(cols),
            available_height_px.div_euclid(rows),
            0,
            0,
            length_px("Inset buffer", buffer, unit, dpi)?,
        ),
    };

    if cell_width_px <= 0 || cell_height_px <= 0 {
        return Err(LabelError::InvalidConfiguration(format!(
            "Label cell resolves to {}x{} pixels",
            cell_width_px, cell_height_px
        )));
    }

    let content_width_px = cell_width_px - 2 * inset_px;
    let content_height_px = cell_height_px - 2 * inset_px;
    if content_width_px <= 0 || content_height_px <= 0 {
        return Err(LabelError::InvalidConfiguration(format!(
            "Inset of {}px leaves {}x{} pixels of label content",
            inset_px, content_width_px, content_height_px
        )));
    }

    let scale = u64::from(options.image_scale_percent);
    let effective_width_px = content_width_px as u64 * scale / 100;
    let effective_height_px = content_height_px as u64 * scale / 100;
    if effective_width_px == 0 || effective_height_px == 0 {
        return Err(LabelError::InvalidConfiguration(format!(
            "Image scale {}% shrinks labels to {}x{} pixels",
            scale, effective_width_px, effective_height_px
        )));
    }

    let raster_dim = |name: &str, value: u64| {
        u32::try_from(value).map_err(|_| {
            LabelError::InvalidConfiguration(format!("{} of {}px is too large", name, value))
        })
    };

    Ok(SheetGeometry {
        sheet_width_px: sheet_width_u32,
        sheet_height_px: sheet_height_u32,
        cols: sheet.columns,
        rows: sheet.rows,
        left_px,
        top_px,
        available_width_px,
        available_height_px,
        cell_width_px: raster_dim("Label width", cell_width_px as u64)?,
        cell_height_px: raster_dim("Label height", cell_height_px as u64)?,
        h_gap_px,
        v_gap_px,
        inset_px,
        content_width_px: raster_dim("Label content width", content_width_px as u64)?,
        content_height_px: raster_dim("Label content height", content_height_px as u64)?,
        effective_width_px: raster_dim("Scaled label width", effective_width_px)?,
        effective_height_px: raster_dim("Scaled label height", effective_height_px)?,
    })
}

/// Pixel length of `value`, bounded to what a raster dimension can address
fn length_px(name: &str, value: f64, unit: MeasurementUnit, dpi: f64) -> Result<i64> {
    let px = unit.to_px(value, dpi);
    if px.unsigned_abs() > u64::from(u32::MAX) {
        return Err(LabelError::InvalidConfiguration(format!(
            "{} of {} {} resolves to {}px",
            name,
            value,
            unit.name(),
            px
        )));
    }
    Ok(px)
}

impl SheetGeometry {
    /// Total number of cells on one sheet
    pub fn labels_per_sheet(&self) -> usize {
        self.cols * self.rows
    }

    /// Row/column of a 0-based position.
    ///
    /// Positions past one sheet keep counting rows; callers addressing a
    /// multi-sheet run take `pos % labels_per_sheet()` first.
    pub fn grid_position(&self, pos: usize) -> GridPosition {
        GridPosition::from_ordinal(pos, self.cols)
    }

    /// Top-left pixel of the cell at `pos`
    pub fn origin(&self, pos: usize) -> (i64, i64) {
        let grid = self.grid_position(pos);
        let x = self.left_px + grid.col as i64 * (i64::from(self.cell_width_px) + self.h_gap_px);
        let y = self.top_px + grid.row as i64 * (i64::from(self.cell_height_px) + self.v_gap_px);
        (x, y)
    }

    /// Bounds of the cell at `pos`
    pub fn cell_rect(&self, pos: usize) -> PixelRect {
        let (x, y) = self.origin(pos);
        PixelRect::new(
            x,
            y,
            i64::from(self.cell_width_px),
            i64::from(self.cell_height_px),
        )
    }

    /// Offset that centers a `width`x`height` raster in a cell (may be negative)
    pub fn centering_offset(&self, width: u32, height: u32) -> (i64, i64) {
        (
            (i64::from(self.cell_width_px) - i64::from(width)).div_euclid(2),
            (i64::from(self.cell_height_px) - i64::from(height)).div_euclid(2),
        )
    }

    /// Pixels of available width left unused by the cells and gaps
    pub fn horizontal_residual(&self) -> i64 {
        let cols = self.cols as i64;
        self.available_width_px - cols * i64::from(self.cell_width_px) - (cols - 1) * self.h_gap_px
    }

    /// Pixels of available height left unused by the cells and gaps
    pub fn vertical_residual(&self) -> i64 {
        let rows = self.rows as i64;
        self.available_height_px - rows * i64::from(self.cell_height_px) - (rows - 1) * self.v_gap_px
    }

    /// Whether any cell extends past the sheet edge
    pub fn overflows_sheet(&self) -> bool {
        let last = self.cell_rect(self.labels_per_sheet() - 1);
        last.right() > self.sheet_width_px as i64 || last.bottom() > self.sheet_height_px as i64
    }
}

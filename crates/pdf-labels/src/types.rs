use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{MM_PER_INCH, POINTS_PER_INCH};

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Failed to decode source document: {0}")]
    SourceDecode(String),
    #[error("Source document has no pages")]
    EmptyDocument,
    #[error("Rasterizer returned {got} pages for range {first}..={last}")]
    RasterCount {
        first: usize,
        last: usize,
        got: usize,
    },
    #[error("Grid position {got} does not follow position {last}")]
    PositionOutOfOrder { last: usize, got: usize },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, LabelError>;

/// Unit that sheet, margin, spacing and label lengths are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeasurementUnit {
    #[default]
    Inches,
    Millimeters,
    Points,
}

impl MeasurementUnit {
    pub fn name(self) -> &'static str {
        match self {
            MeasurementUnit::Inches => "in",
            MeasurementUnit::Millimeters => "mm",
            MeasurementUnit::Points => "pt",
        }
    }

    pub fn to_inches(self, value: f64) -> f64 {
        match self {
            MeasurementUnit::Inches => value,
            MeasurementUnit::Millimeters => value / MM_PER_INCH,
            MeasurementUnit::Points => value / POINTS_PER_INCH,
        }
    }

    pub fn from_inches(self, value: f64) -> f64 {
        match self {
            MeasurementUnit::Inches => value,
            MeasurementUnit::Millimeters => value * MM_PER_INCH,
            MeasurementUnit::Points => value * POINTS_PER_INCH,
        }
    }

    /// Convert a length in this unit to whole pixels at `dpi`.
    ///
    /// Truncates toward zero, so every length is rounded independently.
    pub fn to_px(self, value: f64, dpi: f64) -> i64 {
        (self.to_inches(value) * dpi) as i64
    }
}

/// Standard sheet sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaperSize {
    Letter,
    Legal,
    Tabloid,
    A4,
    A5,
    Custom { width_in: f64, height_in: f64 },
}

impl PaperSize {
    /// Portrait dimensions in inches
    pub fn dimensions_in(self) -> (f64, f64) {
        match self {
            PaperSize::Letter => (8.5, 11.0),
            PaperSize::Legal => (8.5, 14.0),
            PaperSize::Tabloid => (11.0, 17.0),
            PaperSize::A4 => (210.0 / MM_PER_INCH, 297.0 / MM_PER_INCH),
            PaperSize::A5 => (148.0 / MM_PER_INCH, 210.0 / MM_PER_INCH),
            PaperSize::Custom {
                width_in,
                height_in,
            } => (width_in, height_in),
        }
    }

    /// Dimensions converted to `unit`
    pub fn dimensions(self, unit: MeasurementUnit) -> (f64, f64) {
        let (w, h) = self.dimensions_in();
        (unit.from_inches(w), unit.from_inches(h))
    }
}

/// How a label raster is mapped onto its content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResizeMode {
    /// Letterbox: scale uniformly to fit, pad with white
    #[default]
    Fit,
    /// Crop: scale uniformly to cover, trim the overflow
    Fill,
    /// Distort: scale each axis independently
    Stretch,
}

/// Which cells receive preview guide outlines.
///
/// Outlines are drawn when a sheet is sealed, on top of the placed labels,
/// so a label that fills its cell still shows its cell boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GuideLines {
    /// No outlines
    None,
    /// Every cell of every sheet, including skipped and unused ones
    #[default]
    AllCells,
    /// Only cells that received a label raster
    PlacedOnly,
}

/// Sheet margins, in the sheet's unit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 0.5,
            bottom: 0.5,
            left: 0.25,
            right: 0.25,
        }
    }
}

impl Margins {
    /// Create uniform margins on all sides
    pub fn uniform(margin: f64) -> Self {
        Self {
            top: margin,
            bottom: margin,
            left: margin,
            right: margin,
        }
    }
}

/// Physical sheet description: size, margins and grid dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetSpec {
    pub width: f64,
    pub height: f64,
    pub unit: MeasurementUnit,
    pub margins: Margins,
    pub columns: usize,
    pub rows: usize,
}

impl Default for SheetSpec {
    fn default() -> Self {
        Self::from_paper(PaperSize::Letter, MeasurementUnit::Inches)
    }
}

impl SheetSpec {
    /// A 3x4 grid on the given paper with default margins
    pub fn from_paper(paper: PaperSize, unit: MeasurementUnit) -> Self {
        let (width, height) = paper.dimensions(unit);
        let in_margins = Margins::default();
        Self {
            width,
            height,
            unit,
            margins: Margins {
                top: unit.from_inches(in_margins.top),
                bottom: unit.from_inches(in_margins.bottom),
                left: unit.from_inches(in_margins.left),
                right: unit.from_inches(in_margins.right),
            },
            columns: 3,
            rows: 4,
        }
    }

    pub fn labels_per_sheet(&self) -> usize {
        self.columns * self.rows
    }
}

/// How label cells are sized and spaced. Exactly one variant is live per render.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum LabelSizing {
    /// Cells divide the available area evenly after subtracting the gaps
    Auto { h_spacing: f64, v_spacing: f64 },
    /// Fixed label size and gaps, independent of the available area
    Explicit {
        width: f64,
        height: f64,
        h_spacing: f64,
        v_spacing: f64,
    },
    /// Gapless cells with a white inset on every side of the content
    Inset { buffer: f64 },
}

impl Default for LabelSizing {
    fn default() -> Self {
        LabelSizing::Auto {
            h_spacing: 0.1,
            v_spacing: 0.1,
        }
    }
}

/// Statistics about a label run
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStatistics {
    /// Number of source pages (labels)
    pub source_pages: usize,
    /// Grid cells per sheet
    pub labels_per_sheet: usize,
    /// Number of output sheets
    pub output_sheets: usize,
    /// Leading cells left empty by the start position
    pub skipped_cells: usize,
    /// Cells left empty after the last label
    pub unused_cells: usize,
    /// Cell size in pixels at the configured resolution
    pub cell_size_px: (u32, u32),
    /// Label content size in pixels after inset and image scale
    pub content_size_px: (u32, u32),
}

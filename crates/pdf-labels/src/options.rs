use crate::constants::*;
use crate::layout::resolve_geometry;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete label sheet configuration.
///
/// Immutable for the duration of a render: every operation takes it by
/// reference and never writes back.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LabelSheetOptions {
    // Sheet and grid
    pub sheet: SheetSpec,
    pub sizing: LabelSizing,

    // Output resolution
    pub dpi: f64,
    pub preview_dpi: f64,

    // Label fitting
    pub resize_mode: ResizeMode,
    pub image_scale_percent: u32,

    // Placement
    pub start_position: usize,
    pub guides: GuideLines,

    // Memory bound
    pub batch_size: usize,
}

impl Default for LabelSheetOptions {
    fn default() -> Self {
        Self {
            sheet: SheetSpec::default(),
            sizing: LabelSizing::default(),
            dpi: DEFAULT_DPI,
            preview_dpi: DEFAULT_PREVIEW_DPI,
            resize_mode: ResizeMode::Fit,
            image_scale_percent: DEFAULT_IMAGE_SCALE_PERCENT,
            start_position: 1,
            guides: GuideLines::AllCells,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl LabelSheetOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes).map_err(|e| {
            LabelError::InvalidConfiguration(format!("Failed to parse config: {}", e))
        })?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            LabelError::InvalidConfiguration(format!("Failed to serialize config: {}", e))
        })?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Number of grid cells on one sheet
    pub fn labels_per_sheet(&self) -> usize {
        self.sheet.labels_per_sheet()
    }

    /// Empty cells that precede the first label
    pub fn skipped_cells(&self) -> usize {
        self.start_position.saturating_sub(1)
    }

    /// Sheets needed for `page_count` labels, counting the skipped leading cells
    pub fn sheet_count(&self, page_count: usize) -> usize {
        let per_sheet = self.labels_per_sheet();
        if per_sheet == 0 || page_count == 0 {
            return 0;
        }
        (page_count + self.skipped_cells()).div_ceil(per_sheet)
    }

    /// Re-express every length in `unit`, keeping the physical layout
    pub fn convert_units(&mut self, unit: MeasurementUnit) {
        let from = self.sheet.unit;
        if from == unit {
            return;
        }
        let convert = |value: f64| unit.from_inches(from.to_inches(value));

        let sheet = &mut self.sheet;
        sheet.width = convert(sheet.width);
        sheet.height = convert(sheet.height);
        sheet.margins = Margins {
            top: convert(sheet.margins.top),
            bottom: convert(sheet.margins.bottom),
            left: convert(sheet.margins.left),
            right: convert(sheet.margins.right),
        };
        sheet.unit = unit;

        self.sizing = match self.sizing {
            LabelSizing::Auto {
                h_spacing,
                v_spacing,
            } => LabelSizing::Auto {
                h_spacing: convert(h_spacing),
                v_spacing: convert(v_spacing),
            },
            LabelSizing::Explicit {
                width,
                height,
                h_spacing,
                v_spacing,
            } => LabelSizing::Explicit {
                width: convert(width),
                height: convert(height),
                h_spacing: convert(h_spacing),
                v_spacing: convert(v_spacing),
            },
            LabelSizing::Inset { buffer } => LabelSizing::Inset {
                buffer: convert(buffer),
            },
        };
    }

    /// The same options rendered at a different resolution
    pub fn at_dpi(&self, dpi: f64) -> Self {
        Self {
            dpi,
            ..self.clone()
        }
    }

    /// Validate the options, including the resolved pixel geometry
    pub fn validate(&self) -> Result<()> {
        if self.sheet.columns == 0 || self.sheet.rows == 0 {
            return Err(LabelError::InvalidConfiguration(
                "Grid needs at least one column and one row".to_string(),
            ));
        }

        if !(self.dpi > 0.0) || !(self.preview_dpi > 0.0) {
            return Err(LabelError::InvalidConfiguration(
                "Resolution must be positive".to_string(),
            ));
        }

        if self.batch_size == 0 {
            return Err(LabelError::InvalidConfiguration(
                "Batch size must be at least one page".to_string(),
            ));
        }

        if self.start_position == 0 {
            return Err(LabelError::InvalidConfiguration(
                "Start position is 1-based".to_string(),
            ));
        }

        if self.image_scale_percent == 0 {
            return Err(LabelError::InvalidConfiguration(
                "Image scale must be positive".to_string(),
            ));
        }

        let margins = &self.sheet.margins;
        let mut lengths = vec![
            ("sheet width", self.sheet.width),
            ("sheet height", self.sheet.height),
            ("top margin", margins.top),
            ("bottom margin", margins.bottom),
            ("left margin", margins.left),
            ("right margin", margins.right),
        ];
        match self.sizing {
            LabelSizing::Auto {
                h_spacing,
                v_spacing,
            } => {
                lengths.push(("horizontal spacing", h_spacing));
                lengths.push(("vertical spacing", v_spacing));
            }
            LabelSizing::Explicit {
                width,
                height,
                h_spacing,
                v_spacing,
            } => {
                lengths.push(("label width", width));
                lengths.push(("label height", height));
                lengths.push(("horizontal spacing", h_spacing));
                lengths.push(("vertical spacing", v_spacing));
            }
            LabelSizing::Inset { buffer } => lengths.push(("inset buffer", buffer)),
        }
        if let Some((name, value)) = lengths.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(LabelError::InvalidConfiguration(format!(
                "{} must be a non-negative number, got {}",
                name, value
            )));
        }

        resolve_geometry(self).map(|_| ())
    }
}

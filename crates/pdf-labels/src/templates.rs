//! Presets for common label stock
//!
//! Every template is US Letter in inches with explicit label sizing, so the
//! printed grid lines up with the die-cut labels regardless of resolution.

use crate::options::LabelSheetOptions;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Avery label sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LabelTemplate {
    /// 30 address labels, 2.625 x 1 in
    Avery5160,
    /// 10 shipping labels, 4 x 2 in
    Avery5163,
    /// 6 shipping labels, 4 x 3.33 in
    Avery5164,
    /// 80 return address labels, 1.75 x 0.5 in
    Avery5167,
}

/// Physical layout of one template, in inches
struct TemplateLayout {
    columns: usize,
    rows: usize,
    label_width: f64,
    label_height: f64,
    top_margin: f64,
    side_margin: f64,
    h_spacing: f64,
    v_spacing: f64,
}

impl LabelTemplate {
    pub const ALL: [LabelTemplate; 4] = [
        LabelTemplate::Avery5160,
        LabelTemplate::Avery5163,
        LabelTemplate::Avery5164,
        LabelTemplate::Avery5167,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LabelTemplate::Avery5160 => "Avery 5160",
            LabelTemplate::Avery5163 => "Avery 5163",
            LabelTemplate::Avery5164 => "Avery 5164",
            LabelTemplate::Avery5167 => "Avery 5167",
        }
    }

    fn layout(self) -> TemplateLayout {
        match self {
            LabelTemplate::Avery5160 => TemplateLayout {
                columns: 3,
                rows: 10,
                label_width: 2.625,
                label_height: 1.0,
                top_margin: 0.5,
                side_margin: 0.1875,
                h_spacing: 0.125,
                v_spacing: 0.0,
            },
            LabelTemplate::Avery5163 => TemplateLayout {
                columns: 2,
                rows: 5,
                label_width: 4.0,
                label_height: 2.0,
                top_margin: 0.5,
                side_margin: 0.15625,
                h_spacing: 0.1875,
                v_spacing: 0.0,
            },
            LabelTemplate::Avery5164 => TemplateLayout {
                columns: 2,
                rows: 3,
                label_width: 4.0,
                label_height: 10.0 / 3.0,
                top_margin: 0.5,
                side_margin: 0.15625,
                h_spacing: 0.1875,
                v_spacing: 0.0,
            },
            LabelTemplate::Avery5167 => TemplateLayout {
                columns: 4,
                rows: 20,
                label_width: 1.75,
                label_height: 0.5,
                top_margin: 0.5,
                side_margin: 0.28125,
                h_spacing: 0.3125,
                v_spacing: 0.0,
            },
        }
    }

    /// Overwrite the sheet and sizing of `options` with this template.
    ///
    /// Resolution, resize mode, scale, start position and batching are kept.
    pub fn apply(self, options: &mut LabelSheetOptions) {
        let layout = self.layout();
        let mut sheet = SheetSpec::from_paper(PaperSize::Letter, MeasurementUnit::Inches);
        sheet.columns = layout.columns;
        sheet.rows = layout.rows;
        sheet.margins = Margins {
            top: layout.top_margin,
            bottom: layout.top_margin,
            left: layout.side_margin,
            right: layout.side_margin,
        };

        options.sheet = sheet;
        options.sizing = LabelSizing::Explicit {
            width: layout.label_width,
            height: layout.label_height,
            h_spacing: layout.h_spacing,
            v_spacing: layout.v_spacing,
        };
    }

    /// Default options laid out for this template
    pub fn options(self) -> LabelSheetOptions {
        let mut options = LabelSheetOptions::default();
        self.apply(&mut options);
        options
    }
}

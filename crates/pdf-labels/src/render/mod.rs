//! Raster rendering for label sheets
//!
//! - Label compositing (fit, fill, stretch, inset padding)
//! - Sheet assembly and preview guide outlines

mod compose;
mod guides;
mod sheet;

pub use compose::{compose_for_cell, compose_label, scaled_dimensions};
pub use guides::draw_outline;
pub use sheet::{SheetAssembler, SheetSink};

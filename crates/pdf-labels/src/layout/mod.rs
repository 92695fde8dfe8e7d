//! Layout calculation for label sheets
//!
//! This module handles all the geometric calculations:
//! - Unit conversion from sheet settings to pixels
//! - Cell sizing for auto, explicit and inset modes
//! - Grid origins for any 0-based position

mod geometry;
mod types;

pub use geometry::*;
pub use types::*;

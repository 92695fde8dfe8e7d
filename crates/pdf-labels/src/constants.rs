//! Shared constants for label sheet generation
//!
//! This module centralizes magic numbers and defaults used throughout
//! the layout and rendering passes.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// PDF points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert a pixel length at `dpi` to PDF points
#[inline]
pub fn px_to_pt(px: u32, dpi: f64) -> f64 {
    px as f64 * POINTS_PER_INCH / dpi
}

// =============================================================================
// Rendering Defaults
// =============================================================================

/// Print resolution used for the final sheets
pub const DEFAULT_DPI: f64 = 300.0;

/// Resolution used for the fast single-label preview
pub const DEFAULT_PREVIEW_DPI: f64 = 72.0;

/// Source pages rasterized per batch window
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Image scale applied to the nominal content size (percent)
pub const DEFAULT_IMAGE_SCALE_PERCENT: u32 = 100;

/// Sheet and letterbox background
pub const BACKGROUND: image::Rgb<u8> = image::Rgb([255, 255, 255]);

// =============================================================================
// Guide Lines
// =============================================================================

/// Guide outline color
pub const GUIDE_COLOR: image::Rgb<u8> = image::Rgb([255, 0, 0]);

/// Guide outline thickness at 300 dpi, scaled linearly with resolution
pub const GUIDE_WIDTH_AT_300_DPI: u32 = 5;

/// Guide thickness in pixels for the given resolution (never thinner than 1px)
#[inline]
pub fn guide_width_px(dpi: f64) -> u32 {
    ((GUIDE_WIDTH_AT_300_DPI as f64 * dpi / 300.0).round() as u32).max(1)
}

// =============================================================================
// Source Cache
// =============================================================================

/// Maximum number of rasterized pages held by the caching rasterizer
pub const MAX_CACHED_PAGES: usize = 64;

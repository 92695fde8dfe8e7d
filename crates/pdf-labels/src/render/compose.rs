//! Label compositing
//!
//! Maps one source raster onto a label's content area using the configured
//! resize mode, then pads it out to the full cell when an inset is set.

use image::RgbImage;
use image::imageops::{self, FilterType};

use crate::constants::BACKGROUND;
use crate::layout::SheetGeometry;
use crate::types::ResizeMode;

/// Resampling filter for every resize
const FILTER: FilterType = FilterType::Lanczos3;

/// Size the source is scaled to before cropping (fill) or padding (fit).
///
/// Fit never exceeds the target and fill never falls short of it, so the
/// crop/pad that follows always stays inside the scaled raster.
pub fn scaled_dimensions(
    source: (u32, u32),
    target: (u32, u32),
    mode: ResizeMode,
) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (target_w, target_h) = target;
    if src_w == 0 || src_h == 0 {
        return target;
    }

    let ratio_w = target_w as f64 / src_w as f64;
    let ratio_h = target_h as f64 / src_h as f64;

    match mode {
        ResizeMode::Stretch => target,
        ResizeMode::Fit => {
            let ratio = ratio_w.min(ratio_h);
            (
                floor_px(src_w as f64 * ratio).clamp(1, target_w.max(1)),
                floor_px(src_h as f64 * ratio).clamp(1, target_h.max(1)),
            )
        }
        ResizeMode::Fill => {
            let ratio = ratio_w.max(ratio_h);
            (
                floor_px(src_w as f64 * ratio).max(target_w),
                floor_px(src_h as f64 * ratio).max(target_h),
            )
        }
    }
}

/// Resize `source` to exactly `target_width`x`target_height` using `mode`.
pub fn compose_label(
    source: &RgbImage,
    target_width: u32,
    target_height: u32,
    mode: ResizeMode,
) -> RgbImage {
    let (scaled_w, scaled_h) =
        scaled_dimensions(source.dimensions(), (target_width, target_height), mode);

    if source.width() == 0 || source.height() == 0 {
        return RgbImage::from_pixel(target_width, target_height, BACKGROUND);
    }

    let scaled = resize_exact(source, scaled_w, scaled_h);

    match mode {
        ResizeMode::Stretch => scaled,
        ResizeMode::Fill => {
            let left = (scaled_w - target_width) / 2;
            let top = (scaled_h - target_height) / 2;
            imageops::crop_imm(&scaled, left, top, target_width, target_height).to_image()
        }
        ResizeMode::Fit => {
            if (scaled_w, scaled_h) == (target_width, target_height) {
                return scaled;
            }
            let mut canvas = RgbImage::from_pixel(target_width, target_height, BACKGROUND);
            let x = (target_width - scaled_w) / 2;
            let y = (target_height - scaled_h) / 2;
            imageops::replace(&mut canvas, &scaled, x as i64, y as i64);
            canvas
        }
    }
}

/// Composite a label for placement in one grid cell.
///
/// Without an inset the result is the effective content raster, which the
/// sheet assembler centers in the cell. With an inset it is a full
/// cell-sized raster with the content centered inside a white border.
pub fn compose_for_cell(source: &RgbImage, geometry: &SheetGeometry, mode: ResizeMode) -> RgbImage {
    let content = compose_label(
        source,
        geometry.effective_width_px,
        geometry.effective_height_px,
        mode,
    );

    if geometry.inset_px == 0 {
        return content;
    }

    let mut cell =
        RgbImage::from_pixel(geometry.cell_width_px, geometry.cell_height_px, BACKGROUND);
    let (x, y) = geometry.centering_offset(content.width(), content.height());
    imageops::replace(&mut cell, &content, x, y);
    cell
}

/// Truncate to whole pixels, absorbing ratio round-off like `727/792*792`
fn floor_px(value: f64) -> u32 {
    (value + 1e-9).floor() as u32
}

fn resize_exact(source: &RgbImage, width: u32, height: u32) -> RgbImage {
    if source.dimensions() == (width, height) {
        return source.clone();
    }
    imageops::resize(source, width, height, FILTER)
}

//! Preview guide outlines

use image::{Rgb, RgbImage};

use crate::layout::PixelRect;

/// Draw a `thickness`-pixel outline just inside `rect`, clipped to the canvas.
pub fn draw_outline(canvas: &mut RgbImage, rect: PixelRect, thickness: u32, color: Rgb<u8>) {
    let t = (thickness as i64).min(rect.width).min(rect.height);
    if t <= 0 {
        return;
    }

    // Top and bottom bands span the full width; sides fill the rest
    fill_rect(canvas, rect.x, rect.y, rect.right(), rect.y + t, color);
    fill_rect(canvas, rect.x, rect.bottom() - t, rect.right(), rect.bottom(), color);
    fill_rect(canvas, rect.x, rect.y + t, rect.x + t, rect.bottom() - t, color);
    fill_rect(canvas, rect.right() - t, rect.y + t, rect.right(), rect.bottom() - t, color);
}

/// Fill the half-open box `[x0, x1) x [y0, y1)`, clipped to the canvas
fn fill_rect(canvas: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    let x0 = x0.clamp(0, canvas.width() as i64) as u32;
    let x1 = x1.clamp(0, canvas.width() as i64) as u32;
    let y0 = y0.clamp(0, canvas.height() as i64) as u32;
    let y1 = y1.clamp(0, canvas.height() as i64) as u32;

    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

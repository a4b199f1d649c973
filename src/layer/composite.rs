//! Pixel compositing.

use image::{Rgba, RgbaImage};

use super::mask::Mask;

/// Pastes `src` onto `dest` with its top-left corner at (x, y).
///
/// The paste is gated by the source's own alpha, further multiplied by
/// `mask` when one is given (mask coordinates are relative to `src`).
/// Blending is source-over, so a fully opaque source pixel replaces the
/// destination and a fully transparent one leaves it untouched. Source
/// pixels falling outside `dest` are skipped.
pub fn paste_masked(dest: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64, mask: Option<&Mask>) {
    let dest_width = dest.width() as i64;
    let dest_height = dest.height() as i64;

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x + sx as i64;
        let dy = y + sy as i64;

        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }

        let coverage = mask.map_or(255, |m| m.value(sx, sy));
        let alpha = (src_pixel[3] as u32 * coverage as u32 + 127) / 255;

        let dst_pixel = dest.get_pixel_mut(dx as u32, dy as u32);
        match alpha {
            0 => {}
            255 => *dst_pixel = Rgba([src_pixel[0], src_pixel[1], src_pixel[2], 255]),
            a => {
                // Source-over on purpose. PIL's paste(img, box, img) weights
                // by alpha twice and keeps the destination alpha, so partial
                // pixels differ from it here.
                let effective = Rgba([src_pixel[0], src_pixel[1], src_pixel[2], a as u8]);
                *dst_pixel = alpha_blend(effective, *dst_pixel);
            }
        }
    }
}

/// Composites `src` over `dest` at (x, y) using only the source alpha.
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    paste_masked(dest, src, x, y, None);
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

//! SVG rasterisation using resvg/usvg.
//!
//! Lets a vector master feed the same pipeline as a PNG source: the SVG is
//! rendered to a square RGBA canvas of the requested edge length.

use std::path::Path;

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use super::composite::composite_over;
use crate::error::{IconError, IconResult};

/// Default edge length for rasterised SVG sources.
pub const DEFAULT_SVG_SIZE: u32 = 1024;

/// Renders an SVG file to a `size` x `size` RGBA image.
pub fn render_svg_file(path: &Path, size: u32) -> IconResult<RgbaImage> {
    let svg_data = std::fs::read_to_string(path).map_err(|e| IconError::io(path, e))?;
    render_svg(&svg_data, size)
}

/// Renders SVG markup to a `size` x `size` RGBA image.
///
/// The drawing is scaled to fit while preserving aspect ratio and centered,
/// so a non-square viewBox still yields a square canvas.
pub fn render_svg(svg_data: &str, size: u32) -> IconResult<RgbaImage> {
    let opts = Options::default();
    let tree = Tree::from_str(svg_data, &opts).map_err(|e| IconError::svg(e.to_string()))?;

    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = ((svg_size.width() * scale).ceil() as u32).clamp(1, size.max(1));
    let height = ((svg_size.height() * scale).ceil() as u32).clamp(1, size.max(1));

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| IconError::svg(format!("cannot allocate a {width}x{height} pixmap")))?;
    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let drawing = pixmap_to_rgba_image(&pixmap);
    if width == size && height == size {
        return Ok(drawing);
    }

    let mut canvas = RgbaImage::new(size, size);
    let x = (size - width) / 2;
    let y = (size - height) / 2;
    composite_over(&mut canvas, &drawing, x as i64, y as i64);
    Ok(canvas)
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();

    RgbaImage::from_fn(width, height, |x, y| match pixmap.pixel(x, y) {
        // tiny_skia stores premultiplied alpha
        Some(p) => {
            let (r, g, b, a) = unpremultiply(p.red(), p.green(), p.blue(), p.alpha());
            Rgba([r, g, b, a])
        }
        None => Rgba([0, 0, 0, 0]),
    })
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

//! Single-channel masks for gating a layer's visibility.

use image::{GrayImage, Luma};
use resvg::tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Transform};

/// Default corner radius as a fraction of the icon edge.
pub const DEFAULT_RADIUS_RATIO: f64 = 0.15;

/// Cubic Bézier handle length for a quarter circle of unit radius.
const KAPPA: f32 = 0.552_284_8;

/// How to build a rounded-rectangle mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskConfig {
    /// Corner radius as a fraction of the shorter canvas edge.
    pub radius_ratio: f64,

    /// Whether corner edges get fractional coverage.
    ///
    /// Off by default: every pixel is either fully in or fully out,
    /// decided at its center.
    pub anti_alias: bool,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            radius_ratio: DEFAULT_RADIUS_RATIO,
            anti_alias: false,
        }
    }
}

impl MaskConfig {
    pub fn new(radius_ratio: f64, anti_alias: bool) -> Self {
        Self {
            radius_ratio,
            anti_alias,
        }
    }

    /// Corner radius in whole pixels for a canvas whose shorter edge is `edge`.
    pub fn radius_px(&self, edge: u32) -> u32 {
        ((f64::from(edge) * self.radius_ratio) as u32).min(edge / 2)
    }
}

/// A luminance mask. 255 means fully visible, 0 means hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    data: GrayImage,
}

impl Mask {
    /// A mask that lets every pixel through.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            data: GrayImage::from_pixel(width, height, Luma([255])),
        }
    }

    /// A filled rounded rectangle covering the whole `width` x `height`
    /// canvas with corner radius `radius` pixels.
    ///
    /// Returns `None` for an empty canvas.
    pub fn rounded_rect(width: u32, height: u32, radius: u32, anti_alias: bool) -> Option<Self> {
        let mut pixmap = Pixmap::new(width, height)?;
        let radius = radius.min(width.min(height) / 2);
        let path = rounded_rect_path(width as f32, height as f32, radius as f32)?;

        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 255, 255, 255);
        paint.anti_alias = anti_alias;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

        let coverage = pixmap.pixels().iter().map(|p| p.alpha()).collect();
        let data = GrayImage::from_raw(width, height, coverage)?;
        Some(Self { data })
    }

    /// Builds the rounded mask described by `config` for a canvas.
    ///
    /// Returns `None` for an empty canvas.
    pub fn rounded_for(width: u32, height: u32, config: &MaskConfig) -> Option<Self> {
        let radius = config.radius_px(width.min(height));
        Self::rounded_rect(width, height, radius, config.anti_alias)
    }

    /// Returns the mask value at (x, y), or 0 outside the mask.
    pub fn value(&self, x: u32, y: u32) -> u8 {
        self.data.get_pixel_checked(x, y).map_or(0, |p| p[0])
    }

    pub fn width(&self) -> u32 {
        self.data.width()
    }

    pub fn height(&self) -> u32 {
        self.data.height()
    }

    /// Borrows the underlying luminance raster.
    pub fn as_gray(&self) -> &GrayImage {
        &self.data
    }
}

/// Outline of the rectangle [0, w] x [0, h] with quarter-circle corners.
fn rounded_rect_path(w: f32, h: f32, r: f32) -> Option<Path> {
    if r <= 0.0 {
        return Some(PathBuilder::from_rect(Rect::from_xywh(0.0, 0.0, w, h)?));
    }
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(r, 0.0);
    pb.line_to(w - r, 0.0);
    pb.cubic_to(w - r + k, 0.0, w, r - k, w, r);
    pb.line_to(w, h - r);
    pb.cubic_to(w, h - r + k, w - r + k, h, w - r, h);
    pb.line_to(r, h);
    pb.cubic_to(r - k, h, 0.0, h - r + k, 0.0, h - r);
    pb.line_to(0.0, r);
    pb.cubic_to(0.0, r - k, r - k, 0.0, r, 0.0);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_px_floors_and_clamps() {
        let config = MaskConfig::default();
        assert_eq!(config.radius_px(512), 76);
        assert_eq!(config.radius_px(64), 9);
        assert_eq!(MaskConfig::new(0.9, false).radius_px(100), 50);
    }

    #[test]
    fn radius_px_uses_double_precision() {
        // In f32 these products land on the wrong side of an integer.
        assert_eq!(MaskConfig::new(0.29, false).radius_px(100), 28);
        assert_eq!(MaskConfig::new(0.35, false).radius_px(180), 62);
    }

    #[test]
    fn zero_radius_is_full_rectangle() {
        let mask = Mask::rounded_rect(16, 16, 0, false).unwrap();
        assert_eq!(mask, Mask::full(16, 16));
    }

    #[test]
    fn corners_are_cut() {
        let mask = Mask::rounded_rect(64, 64, 16, false).unwrap();
        assert_eq!(mask.value(0, 0), 0);
        assert_eq!(mask.value(63, 0), 0);
        assert_eq!(mask.value(0, 63), 0);
        assert_eq!(mask.value(63, 63), 0);
        assert_eq!(mask.value(32, 32), 255);
        assert_eq!(mask.value(32, 0), 255);
        assert_eq!(mask.value(63, 32), 255);
    }

    #[test]
    fn hard_edges_by_default() {
        let mask = Mask::rounded_for(512, 512, &MaskConfig::default()).unwrap();
        assert!(mask.as_gray().pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert_eq!(mask.value(0, 0), 0);
        assert_eq!(mask.value(256, 256), 255);
    }

    #[test]
    fn anti_aliasing_produces_partial_edge_coverage() {
        let smooth = Mask::rounded_rect(64, 64, 16, true).unwrap();
        assert!(smooth.as_gray().pixels().any(|p| p[0] > 0 && p[0] < 255));
        assert_eq!(smooth.value(0, 0), 0);
        assert_eq!(smooth.value(32, 32), 255);
    }

    #[test]
    fn value_outside_is_hidden() {
        let mask = Mask::full(4, 4);
        assert_eq!(mask.value(4, 0), 0);
        assert!(Mask::rounded_for(0, 0, &MaskConfig::default()).is_none());
    }
}

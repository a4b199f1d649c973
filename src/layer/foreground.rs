//! Foreground layer: pastes the source, optionally shrunk and centered.

use image::imageops::{self, FilterType};

use super::composite::composite_over;
use super::{LayerEffect, RenderContext};
use crate::icon::RectPx;

/// Default content fraction for adaptive-icon foregrounds.
///
/// Android keeps the meaningful part of an adaptive icon inside the central
/// 66dp of a 108dp canvas.
pub const DEFAULT_SCALE_RATIO: f64 = 0.65;

/// How the source is placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Foreground {
    /// Fraction of the canvas edge the content occupies. `None` pastes the
    /// source at full size.
    pub scale_ratio: Option<f64>,
}

impl Foreground {
    /// Pastes the source unscaled at the origin.
    pub fn full() -> Self {
        Self { scale_ratio: None }
    }

    /// Shrinks the source to `scale_ratio` of the canvas and centers it.
    pub fn padded(scale_ratio: f64) -> Self {
        Self {
            scale_ratio: Some(scale_ratio),
        }
    }

    /// Where the content lands on a `width` x `height` canvas.
    ///
    /// The content edge is the canvas edge times the ratio, floored. The
    /// offset is the leftover space halved, also floored.
    pub fn placement(&self, width: u32, height: u32) -> RectPx {
        match self.scale_ratio {
            None => RectPx::from_size(width, height),
            Some(ratio) => {
                let new_width = (f64::from(width) * ratio) as u32;
                let new_height = (f64::from(height) * ratio) as u32;
                RectPx::new(
                    (width - new_width) / 2,
                    (height - new_height) / 2,
                    new_width,
                    new_height,
                )
            }
        }
    }
}

impl LayerEffect for Foreground {
    fn transform(&self, ctx: &mut RenderContext<'_>) {
        let (width, height) = ctx.image.data.dimensions();
        let bounds = self.placement(width, height);

        if bounds.width == 0 || bounds.height == 0 {
            ctx.image.content_bounds = bounds;
            return;
        }

        if bounds == RectPx::from_size(width, height) {
            composite_over(&mut ctx.image.data, &ctx.source.data, 0, 0);
        } else {
            let shrunk = imageops::resize(
                &ctx.source.data,
                bounds.width,
                bounds.height,
                FilterType::Lanczos3,
            );
            composite_over(&mut ctx.image.data, &shrunk, bounds.x as i64, bounds.y as i64);
        }

        ctx.image.content_bounds = bounds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::IconImage;
    use image::{Rgba, RgbaImage};

    #[test]
    fn placement_floors_size_and_offset() {
        let fg = Foreground::padded(DEFAULT_SCALE_RATIO);
        // 512 * 0.65 = 332.8 -> 332, (512 - 332) / 2 = 90
        assert_eq!(fg.placement(512, 512), RectPx::new(90, 90, 332, 332));
        // 101 * 0.5 = 50.5 -> 50, (101 - 50) / 2 = 25
        assert_eq!(
            Foreground::padded(0.5).placement(101, 101),
            RectPx::new(25, 25, 50, 50)
        );
        assert_eq!(Foreground::full().placement(8, 8), RectPx::from_size(8, 8));
    }

    #[test]
    fn placement_floors_in_double_precision() {
        // 180 * 0.65 is 117 exactly in decimal; in f32 it comes out as 116.99.
        let fg = Foreground::padded(DEFAULT_SCALE_RATIO);
        assert_eq!(fg.placement(180, 180), RectPx::new(31, 31, 117, 117));
        assert_eq!(fg.placement(340, 340), RectPx::new(60, 60, 221, 221));
    }

    #[test]
    fn padded_content_is_centered() {
        let source = IconImage::new_full_content(RgbaImage::from_pixel(
            100,
            100,
            Rgba([0, 0, 255, 255]),
        ));
        let mut ctx = RenderContext::new(&source);
        Foreground::padded(0.5).transform(&mut ctx);

        assert_eq!(ctx.image.data.dimensions(), (100, 100));
        assert_eq!(ctx.image.content_bounds, RectPx::new(25, 25, 50, 50));
        assert_eq!(ctx.image.opaque_bounds(), Some(RectPx::new(25, 25, 50, 50)));
        assert_eq!(ctx.image.data.get_pixel(0, 0)[3], 0);
        assert_eq!(ctx.image.data.get_pixel(50, 50).0, [0, 0, 255, 255]);
    }
}

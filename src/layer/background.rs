//! Background layers: transparent, solid, or rounded.

use image::{Rgba, RgbaImage};
use palette::Srgb;

use super::composite::paste_masked;
use super::mask::{Mask, MaskConfig};
use super::{LayerEffect, RenderContext};
use crate::error::{IconError, IconResult};

/// Opaque white, the default background of every filled variant.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// What the canvas holds before the source is pasted.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// A fully transparent canvas.
    Transparent,

    /// The whole canvas filled with one color.
    Solid(Rgba<u8>),

    /// A color layer pasted through a rounded-rectangle mask onto a
    /// transparent canvas. Pixels outside the rounded corners stay
    /// transparent.
    Rounded { color: Rgba<u8>, mask: MaskConfig },
}

impl LayerEffect for Background {
    fn transform(&self, ctx: &mut RenderContext<'_>) {
        let (width, height) = ctx.image.data.dimensions();
        match self {
            Self::Transparent => {}
            Self::Solid(color) => {
                ctx.image.data = RgbaImage::from_pixel(width, height, *color);
            }
            Self::Rounded { color, mask } => {
                // A zero-sized canvas has nothing to mask.
                let Some(mask) = Mask::rounded_for(width, height, mask) else {
                    return;
                };
                let layer = RgbaImage::from_pixel(width, height, *color);
                paste_masked(&mut ctx.image.data, &layer, 0, 0, Some(&mask));
            }
        }
    }
}

/// Parses a `#rrggbb` (or `#rgb`) hex code into an opaque color.
pub fn parse_color(hex: &str) -> IconResult<Rgba<u8>> {
    let rgb: Srgb<u8> = hex
        .trim()
        .parse()
        .map_err(|_| IconError::InvalidColor(hex.to_string()))?;
    Ok(Rgba([rgb.red, rgb.green, rgb.blue, 255]))
}

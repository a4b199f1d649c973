//! Layer infrastructure for icon compositing.
//!
//! Every variant is built the same way: a canvas the size of the source is
//! prepared by a background layer, then the source is pasted on top by a
//! foreground layer using its own alpha channel as the paste mask.
//!
//! # Architecture
//!
//! Each layer implements [`LayerEffect`], which transforms the image held in
//! a [`RenderContext`]. A [`LayerPipeline`] owns one background and one
//! foreground layer and applies them in order.
//!
//! ```text
//! Source Image
//!     │
//!     ▼
//! ┌────────────┐
//! │ Background │ ◄── transparent, solid color, or masked rounded color
//! └─────┬──────┘
//!       │
//!       ▼
//! ┌────────────┐
//! │ Foreground │ ◄── source pasted through its alpha, optionally shrunk
//! └─────┬──────┘
//!       │
//!       ▼
//!   Composite
//! ```

pub mod background;
pub mod composite;
pub mod foreground;
pub mod mask;
pub mod svg;

pub use background::{parse_color, Background, WHITE};
pub use foreground::Foreground;
pub use mask::{Mask, MaskConfig};

use image::RgbaImage;

use crate::icon::{IconImage, RectPx};

// ============================================================================
// Render Context
// ============================================================================

/// Context that flows through the rendering pipeline.
///
/// Holds the read-only source and the canvas being built on top of it.
pub struct RenderContext<'a> {
    /// The source icon. Layers read from it but never modify it.
    pub source: &'a IconImage,

    /// The canvas being composited.
    pub image: IconImage,
}

impl<'a> RenderContext<'a> {
    /// Creates a context with a fully transparent canvas the size of `source`.
    pub fn new(source: &'a IconImage) -> Self {
        let (width, height) = source.data.dimensions();
        Self {
            source,
            image: IconImage::new(RgbaImage::new(width, height), RectPx::from_size(width, height)),
        }
    }
}

// ============================================================================
// Layer Trait
// ============================================================================

/// Trait for layers that know how to apply themselves to a canvas.
pub trait LayerEffect {
    /// Transform the canvas in the render context.
    ///
    /// Implementations read `ctx.source` as needed and modify `ctx.image`.
    fn transform(&self, ctx: &mut RenderContext<'_>);
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// A background layer followed by a foreground layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPipeline {
    /// Fills the canvas before the source is pasted.
    pub background: Background,

    /// Pastes the source onto the background.
    pub foreground: Foreground,
}

impl LayerPipeline {
    /// Creates a pipeline from its two layers.
    pub fn new(background: Background, foreground: Foreground) -> Self {
        Self {
            background,
            foreground,
        }
    }

    /// Renders `source` through the background and foreground layers.
    ///
    /// The returned canvas always has the source's dimensions.
    pub fn render(&self, source: &IconImage) -> IconImage {
        let mut ctx = RenderContext::new(source);
        self.background.transform(&mut ctx);
        self.foreground.transform(&mut ctx);
        ctx.image
    }
}

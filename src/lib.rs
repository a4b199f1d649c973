//! icon-variants: application icon variant generator
//!
//! This crate derives build-asset icons from one square source image:
//! a rounded white background variant, a solid white (alpha-free) variant
//! for notification trays, and a padded foreground for Android adaptive
//! icons. Results are written as PNG files or multi-resolution ICO
//! containers.
//!
//! # Example
//!
//! ```
//! use icon_variants::{IconImage, IconRenderer};
//! use image::{Rgba, RgbaImage};
//!
//! let source = IconImage::new_full_content(RgbaImage::from_pixel(128, 128, Rgba([255, 0, 0, 255])));
//! let renderer = IconRenderer::from_image(source).unwrap();
//!
//! let rounded = renderer.rounded_white(0.15).unwrap();
//! let tray = renderer.solid_white();
//! let android = renderer.padded_foreground(0.65).unwrap();
//!
//! assert_eq!(rounded.data.dimensions(), (128, 128));
//! assert_eq!(tray.dimensions(), (128, 128));
//! assert_eq!(android.content_bounds.width, 83);
//! ```
//!
//! # Batch Jobs
//!
//! A [`RenderProfile`] describes a whole asset set and can be stored as
//! JSON:
//!
//! ```no_run
//! use icon_variants::RenderProfile;
//!
//! let profile = RenderProfile::standard("assets/icons/new/ico.png", "assets/icons");
//! for artifact in profile.run().unwrap() {
//!     println!("{artifact}");
//! }
//! ```

mod error;
mod export;
mod icon;
mod layer;
mod profile;
mod renderer;

pub use error::{IconError, IconResult};
pub use export::{save, save_ico, save_png, OutputFormat, ICO_SIZES};
pub use icon::{IconImage, IconSet, RectPx, SizePx};
pub use layer::foreground::DEFAULT_SCALE_RATIO;
pub use layer::mask::DEFAULT_RADIUS_RATIO;
pub use layer::svg::{render_svg, DEFAULT_SVG_SIZE};
pub use layer::{
    parse_color, Background, Foreground, LayerEffect, LayerPipeline, Mask, MaskConfig,
    RenderContext, WHITE,
};
pub use profile::{Artifact, BackgroundColor, OutputTarget, RenderProfile, VariantSettings};
pub use renderer::IconRenderer;

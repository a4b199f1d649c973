//! Icon variant rendering.

use std::path::Path;

use image::{DynamicImage, ImageError, Rgba, RgbImage};

use crate::error::{check_ratio, IconError, IconResult};
use crate::icon::IconImage;
use crate::layer::svg::{render_svg_file, DEFAULT_SVG_SIZE};
use crate::layer::{Background, Foreground, LayerPipeline, MaskConfig, WHITE};
use crate::profile::VariantSettings;

// ============================================================================
// IconRenderer
// ============================================================================

/// Produces icon variants from one square source image.
///
/// The source is never modified; every operation builds a fresh canvas of
/// the same size.
///
/// # Variants
///
/// 1. **Rounded** ([`rounded_white`](Self::rounded_white)) - white rounded
///    square behind the artwork, transparent outside the corners
/// 2. **Solid** ([`solid_white`](Self::solid_white)) - opaque white behind
///    the artwork, alpha dropped entirely
/// 3. **Padded** ([`padded_foreground`](Self::padded_foreground)) - artwork
///    shrunk and centered on a transparent canvas
///
/// # Example
///
/// ```
/// use icon_variants::{IconImage, IconRenderer};
/// use image::{Rgba, RgbaImage};
///
/// let source = IconImage::new_full_content(RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 255])));
/// let renderer = IconRenderer::from_image(source).unwrap();
///
/// let rounded = renderer.rounded_white(0.15).unwrap();
/// assert_eq!(rounded.data.dimensions(), (64, 64));
/// ```
#[derive(Debug, Clone)]
pub struct IconRenderer {
    source: IconImage,
}

impl IconRenderer {
    /// Wraps an in-memory source. The source must be square.
    pub fn from_image(source: IconImage) -> IconResult<Self> {
        source.square_size()?;
        Ok(Self { source })
    }

    /// Loads a source from disk.
    ///
    /// SVG files are rasterised at [`DEFAULT_SVG_SIZE`]; see
    /// [`open_with_svg_size`](Self::open_with_svg_size).
    pub fn open(path: impl AsRef<Path>) -> IconResult<Self> {
        Self::open_with_svg_size(path, DEFAULT_SVG_SIZE)
    }

    /// Loads a source from disk, rasterising SVG files at `svg_size` pixels.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn open_with_svg_size(path: impl AsRef<Path>, svg_size: u32) -> IconResult<Self> {
        let path = path.as_ref();
        let data = if is_svg(path) {
            render_svg_file(path, svg_size)?
        } else {
            image::open(path)
                .map_err(|e| match e {
                    ImageError::IoError(io) => IconError::io(path, io),
                    other => IconError::decode(path, other),
                })?
                .to_rgba8()
        };

        tracing::debug!(width = data.width(), height = data.height(), "loaded source");
        Self::from_image(IconImage::new_full_content(data))
    }

    /// Returns the source image.
    pub fn source(&self) -> &IconImage {
        &self.source
    }

    /// Edge length of the square source.
    pub fn size(&self) -> u32 {
        self.source.data.width()
    }

    /// White rounded square behind the source.
    ///
    /// Source pixels with alpha 0 show white inside the rounded corners and
    /// stay transparent outside them; fully opaque source pixels are kept
    /// unchanged.
    pub fn rounded_white(&self, radius_ratio: f64) -> IconResult<IconImage> {
        self.rounded(WHITE, MaskConfig::new(radius_ratio, false))
    }

    /// Like [`rounded_white`](Self::rounded_white) with any background color
    /// and mask settings.
    pub fn rounded(&self, color: Rgba<u8>, mask: MaskConfig) -> IconResult<IconImage> {
        check_ratio("radius_ratio", mask.radius_ratio)?;
        let pipeline = LayerPipeline::new(Background::Rounded { color, mask }, Foreground::full());
        Ok(pipeline.render(&self.source))
    }

    /// Opaque white behind the source, flattened to RGB.
    ///
    /// The result has no alpha channel, so it cannot contain transparent
    /// pixels. Notification trays that draw transparency as black need this.
    pub fn solid_white(&self) -> RgbImage {
        self.solid(WHITE)
    }

    /// Like [`solid_white`](Self::solid_white) with any background color.
    ///
    /// The color's alpha is forced to 255.
    pub fn solid(&self, color: Rgba<u8>) -> RgbImage {
        let opaque = Rgba([color[0], color[1], color[2], 255]);
        let pipeline = LayerPipeline::new(Background::Solid(opaque), Foreground::full());
        DynamicImage::ImageRgba8(pipeline.render(&self.source).data).to_rgb8()
    }

    /// Shrinks the source to `scale_ratio` of its size and centers it on a
    /// transparent canvas of the original size.
    pub fn padded_foreground(&self, scale_ratio: f64) -> IconResult<IconImage> {
        check_ratio("scale_ratio", scale_ratio)?;
        let foreground = Foreground::padded(scale_ratio);
        let bounds = foreground.placement(self.size(), self.size());
        if bounds.width == 0 {
            return Err(IconError::EmptyContent {
                size: self.size(),
                scale_ratio,
            });
        }
        let pipeline = LayerPipeline::new(Background::Transparent, foreground);
        Ok(pipeline.render(&self.source))
    }

    /// Renders the variant described by `settings`.
    pub fn render(&self, settings: &VariantSettings) -> IconResult<DynamicImage> {
        let image = match settings {
            VariantSettings::RoundedWhite {
                radius_ratio,
                background,
                anti_alias,
            } => {
                let color = background.to_rgba()?;
                let mask = MaskConfig::new(*radius_ratio, *anti_alias);
                DynamicImage::ImageRgba8(self.rounded(color, mask)?.data)
            }
            VariantSettings::SolidWhite { background } => {
                DynamicImage::ImageRgb8(self.solid(background.to_rgba()?))
            }
            VariantSettings::PaddedForeground { scale_ratio } => {
                DynamicImage::ImageRgba8(self.padded_foreground(*scale_ratio)?.data)
            }
        };
        Ok(image)
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

// ============================================================================
// Tests
// ============================================================================

//! Icon raster types.
//!
//! This module provides the in-memory representation of a source icon and of
//! the multi-resolution frame sets that end up inside ICO containers.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::{IconError, IconResult};

/// A rectangle defined in pixel coordinates.
///
/// Used to describe the region of an image that holds visible icon content,
/// for example the centered area of an adaptive-icon foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: u32,
    /// Y offset from the top edge of the image
    pub y: u32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle starting at origin (0, 0) with the given dimensions.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// A single RGBA icon raster with the bounds of its visible content.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// The image data in RGBA format.
    pub data: RgbaImage,

    /// The region within the image that contains the actual icon content.
    ///
    /// Equals `RectPx::from_size(width, height)` unless the icon was
    /// rendered with padding.
    pub content_bounds: RectPx,
}

impl IconImage {
    /// Creates a new icon image with explicit content bounds.
    pub fn new(data: RgbaImage, content_bounds: RectPx) -> Self {
        Self {
            data,
            content_bounds,
        }
    }

    /// Creates a new icon image assuming content fills the entire image.
    pub fn new_full_content(data: RgbaImage) -> Self {
        let content_bounds = RectPx::from_size(data.width(), data.height());
        Self::new(data, content_bounds)
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Returns the edge length of a square icon.
    ///
    /// Every variant operation assumes a square source; anything else is
    /// rejected here.
    pub fn square_size(&self) -> IconResult<u32> {
        let dims = self.dimensions();
        if dims.is_square() {
            Ok(dims.width)
        } else {
            Err(IconError::NotSquare {
                width: dims.width,
                height: dims.height,
            })
        }
    }

    /// Computes the bounding box of all pixels with non-zero alpha.
    ///
    /// Returns `None` for a fully transparent image.
    pub fn opaque_bounds(&self) -> Option<RectPx> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        let mut found = false;

        for (x, y, pixel) in self.data.enumerate_pixels() {
            if pixel[3] == 0 {
                continue;
            }
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        found.then(|| RectPx::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }
}

/// A collection of square frames representing one icon at several sizes.
///
/// This is the in-memory form of an ICO container: each frame is an
/// independent resample of the same full-resolution composite.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconSet {
    /// The individual frames, in the order they were added.
    pub images: Vec<IconImage>,
}

impl IconSet {
    /// Resamples `source` once per requested edge length.
    ///
    /// Every frame is generated from the full-resolution source with a
    /// Lanczos3 filter, never from a smaller frame. Sizes larger than the
    /// source are skipped so frames are never upscaled; a zero size is
    /// ignored.
    pub fn resampled(source: &RgbaImage, sizes: &[u32]) -> Self {
        let max = source.width().min(source.height());
        let images = sizes
            .iter()
            .copied()
            .filter(|&size| size > 0 && size <= max)
            .map(|size| {
                let frame = if size == source.width() && size == source.height() {
                    source.clone()
                } else {
                    imageops::resize(source, size, size, FilterType::Lanczos3)
                };
                IconImage::new_full_content(frame)
            })
            .collect();
        Self { images }
    }

    /// Returns the number of images in the set.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true if the icon set contains no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Returns the edge lengths of all frames.
    pub fn sizes(&self) -> Vec<u32> {
        self.images.iter().map(|img| img.data.width()).collect()
    }

    /// Returns an iterator over the icon images.
    pub fn iter(&self) -> impl Iterator<Item = &IconImage> {
        self.images.iter()
    }
}

impl<'a> IntoIterator for &'a IconSet {
    type Item = &'a IconImage;
    type IntoIter = std::slice::Iter<'a, IconImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn rect_px_new() {
        let rect = RectPx::new(10, 20, 100, 200);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 220);
    }

    #[test]
    fn square_size_rejects_rectangles() {
        let square = IconImage::new_full_content(RgbaImage::new(64, 64));
        assert_eq!(square.square_size().unwrap(), 64);

        let wide = IconImage::new_full_content(RgbaImage::new(64, 32));
        assert!(matches!(
            wide.square_size(),
            Err(IconError::NotSquare {
                width: 64,
                height: 32
            })
        ));
    }

    #[test]
    fn opaque_bounds_finds_content() {
        let mut img = RgbaImage::new(10, 10);
        img.put_pixel(2, 3, Rgba([1, 2, 3, 255]));
        img.put_pixel(6, 8, Rgba([1, 2, 3, 10]));
        let icon = IconImage::new_full_content(img);
        assert_eq!(icon.opaque_bounds(), Some(RectPx::new(2, 3, 5, 6)));

        let empty = IconImage::new_full_content(RgbaImage::new(4, 4));
        assert_eq!(empty.opaque_bounds(), None);
    }

    #[test]
    fn resampled_skips_upscaling() {
        let source = RgbaImage::from_pixel(48, 48, Rgba([255, 0, 0, 255]));
        let set = IconSet::resampled(&source, &[16, 24, 32, 48, 64, 128, 256]);

        assert_eq!(set.sizes(), vec![16, 24, 32, 48]);
        assert_eq!(set.len(), 4);
        for frame in &set {
            assert_eq!(frame.dimensions().width, frame.dimensions().height);
        }
    }
}

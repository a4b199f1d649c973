//! Persisting rendered icons as PNG files or ICO containers.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::{DynamicImage, ExtendedColorType, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::error::{IconError, IconResult};
use crate::icon::IconSet;

/// Frame sizes embedded in every ICO container.
pub const ICO_SIZES: [u32; 7] = [16, 24, 32, 48, 64, 128, 256];

/// Largest frame edge the ICO format can describe.
const ICO_MAX_SIZE: u32 = 256;

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Ico,
}

impl OutputFormat {
    /// Infers the format from a path's extension.
    pub fn from_path(path: &Path) -> IconResult<Self> {
        match ImageFormat::from_path(path) {
            Ok(ImageFormat::Png) => Ok(Self::Png),
            Ok(ImageFormat::Ico) => Ok(Self::Ico),
            _ => Err(IconError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Writes `image` to `path` in the given format and returns the edge of
/// every frame stored in the file.
///
/// Missing parent directories are created.
pub fn save(image: &DynamicImage, path: &Path, format: OutputFormat) -> IconResult<Vec<u32>> {
    match format {
        OutputFormat::Png => save_png(image, path).map(|()| vec![image.width()]),
        OutputFormat::Ico => save_ico(image, path, &ICO_SIZES).map(|frames| frames.sizes()),
    }
}

/// Writes `image` as a single PNG, keeping its color type (RGBA or RGB).
pub fn save_png(image: &DynamicImage, path: &Path) -> IconResult<()> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| IconError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    image
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|e| IconError::encode(path, e))?;
    writer.flush().map_err(|e| IconError::io(path, e))?;
    tracing::debug!(path = %path.display(), "wrote png");
    Ok(())
}

/// Writes `image` as an ICO container with one frame per entry of `sizes`.
///
/// Each frame is resampled independently from the full-resolution image and
/// stored PNG-encoded. Sizes larger than the image are skipped; when that
/// leaves nothing, the image is embedded at its own size if the format
/// allows it. Returns the frame set that was written.
pub fn save_ico(image: &DynamicImage, path: &Path, sizes: &[u32]) -> IconResult<IconSet> {
    let rgba = image.to_rgba8();
    let mut frames = IconSet::resampled(&rgba, sizes);
    if frames.is_empty() && rgba.width() == rgba.height() {
        frames = IconSet::resampled(&rgba, &[rgba.width().min(ICO_MAX_SIZE)]);
    }

    let ico_frames = frames
        .iter()
        .map(|frame| {
            IcoFrame::as_png(
                frame.data.as_raw(),
                frame.data.width(),
                frame.data.height(),
                ExtendedColorType::Rgba8,
            )
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| IconError::encode(path, e))?;

    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| IconError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    IcoEncoder::new(&mut writer)
        .encode_images(&ico_frames)
        .map_err(|e| IconError::encode(path, e))?;
    writer.flush().map_err(|e| IconError::io(path, e))?;

    tracing::debug!(path = %path.display(), sizes = ?frames.sizes(), "wrote ico");
    Ok(frames)
}

fn ensure_parent(path: &Path) -> IconResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| IconError::io(parent, e))
        }
        _ => Ok(()),
    }
}

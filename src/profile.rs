//! Serializable batch job description.
//!
//! A [`RenderProfile`] names one source image and the list of artifacts to
//! derive from it. It serializes to JSON so a job can be checked into the
//! asset tree next to the images it produces.
//!
//! # Example
//!
//! ```
//! use icon_variants::{OutputTarget, RenderProfile, VariantSettings};
//!
//! let profile = RenderProfile::new("assets/icons/ico.png")
//!     .with_target(OutputTarget::new("assets/icons/ico.ico", VariantSettings::rounded_white()))
//!     .with_target(OutputTarget::new("assets/icons/tray.png", VariantSettings::solid_white()));
//!
//! let json = profile.to_json().unwrap();
//! let restored = RenderProfile::from_json(&json).unwrap();
//! assert_eq!(restored.targets.len(), 2);
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::{IconError, IconResult};
use crate::export::{self, OutputFormat};
use crate::layer::foreground::DEFAULT_SCALE_RATIO;
use crate::layer::mask::DEFAULT_RADIUS_RATIO;
use crate::layer::parse_color;
use crate::layer::svg::DEFAULT_SVG_SIZE;
use crate::renderer::IconRenderer;

// ============================================================================
// Background color
// ============================================================================

/// A `#rrggbb` background color as written in a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct BackgroundColor(pub String);

impl Default for BackgroundColor {
    fn default() -> Self {
        Self("#ffffff".to_string())
    }
}

impl BackgroundColor {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Parses the color into an opaque RGBA pixel.
    pub fn to_rgba(&self) -> IconResult<Rgba<u8>> {
        parse_color(&self.0)
    }

    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

// ============================================================================
// Variant settings
// ============================================================================

/// Which variant to render, with its parameters.
///
/// ```json
/// { "kind": "roundedWhite", "radiusRatio": 0.15 }
/// { "kind": "solidWhite" }
/// { "kind": "paddedForeground", "scaleRatio": 0.65 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VariantSettings {
    /// Background-colored rounded square, transparent outside the corners.
    #[serde(rename_all = "camelCase")]
    RoundedWhite {
        #[serde(default = "default_radius_ratio")]
        radius_ratio: f64,

        #[serde(default, skip_serializing_if = "BackgroundColor::is_default")]
        background: BackgroundColor,

        #[serde(default)]
        anti_alias: bool,
    },

    /// Opaque background with the alpha channel dropped.
    #[serde(rename_all = "camelCase")]
    SolidWhite {
        #[serde(default, skip_serializing_if = "BackgroundColor::is_default")]
        background: BackgroundColor,
    },

    /// Content shrunk and centered for adaptive-icon safe areas.
    #[serde(rename_all = "camelCase")]
    PaddedForeground {
        #[serde(default = "default_scale_ratio")]
        scale_ratio: f64,
    },
}

impl VariantSettings {
    /// Rounded white background with the default radius.
    pub fn rounded_white() -> Self {
        Self::RoundedWhite {
            radius_ratio: DEFAULT_RADIUS_RATIO,
            background: BackgroundColor::default(),
            anti_alias: false,
        }
    }

    /// Solid white background.
    pub fn solid_white() -> Self {
        Self::SolidWhite {
            background: BackgroundColor::default(),
        }
    }

    /// Padded foreground with the default scale.
    pub fn padded_foreground() -> Self {
        Self::PaddedForeground {
            scale_ratio: DEFAULT_SCALE_RATIO,
        }
    }

    /// Prefix of the confirmation line printed for each artifact.
    pub fn confirmation_label(&self) -> &'static str {
        match self {
            Self::RoundedWhite { .. } => "Created",
            Self::SolidWhite { .. } => "Created (Solid White BG)",
            Self::PaddedForeground { .. } => "Created (Padded for Android)",
        }
    }
}

fn default_radius_ratio() -> f64 {
    DEFAULT_RADIUS_RATIO
}

fn default_scale_ratio() -> f64 {
    DEFAULT_SCALE_RATIO
}

fn default_svg_size() -> u32 {
    DEFAULT_SVG_SIZE
}

// ============================================================================
// OutputTarget
// ============================================================================

/// One file to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct OutputTarget {
    /// Where to write the artifact.
    pub path: PathBuf,

    /// Container format. Inferred from the extension when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// What to render.
    pub variant: VariantSettings,
}

impl OutputTarget {
    pub fn new(path: impl Into<PathBuf>, variant: VariantSettings) -> Self {
        Self {
            path: path.into(),
            format: None,
            variant,
        }
    }

    /// Forces a container format regardless of the extension.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// The explicit format, or the one implied by the path.
    pub fn resolved_format(&self) -> IconResult<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => OutputFormat::from_path(&self.path),
        }
    }
}

// ============================================================================
// Artifact
// ============================================================================

/// A file written by a job.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub path: PathBuf,
    pub format: OutputFormat,
    /// Width of the rendered composite, before any ICO resampling.
    pub width: u32,
    /// Height of the rendered composite, before any ICO resampling.
    pub height: u32,
    /// Edge of every frame in the file. A PNG has one frame at the
    /// composite size; an ICO lists its resampled frames, smallest first.
    pub frame_sizes: Vec<u32>,
    label: &'static str,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.path.display())
    }
}

// ============================================================================
// RenderProfile
// ============================================================================

/// A serializable job: one source, many targets.
///
/// # JSON Format
///
/// ```json
/// {
///   "source": "assets/icons/new/ico.png",
///   "targets": [
///     { "path": "assets/icons/ico.ico", "variant": { "kind": "roundedWhite" } },
///     { "path": "assets/icons/tray_icon.png", "variant": { "kind": "solidWhite" } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct RenderProfile {
    /// The source image (PNG or any format `image` decodes, or SVG).
    pub source: PathBuf,

    /// Edge length used when the source is an SVG.
    #[serde(default = "default_svg_size")]
    pub svg_size: u32,

    /// Artifacts to produce, in order.
    #[serde(default)]
    pub targets: Vec<OutputTarget>,
}

impl RenderProfile {
    /// Creates a profile with no targets.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            svg_size: DEFAULT_SVG_SIZE,
            targets: Vec::new(),
        }
    }

    /// The music app's standard asset set, written into `out_dir`.
    ///
    /// Rounded white background for the regular app icons, solid white for
    /// the tray/notification icons, and a padded Android foreground.
    pub fn standard(source: impl Into<PathBuf>, out_dir: impl AsRef<Path>) -> Self {
        let out = out_dir.as_ref();
        Self::new(source)
            .with_target(OutputTarget::new(out.join("new_ico_white.png"), VariantSettings::rounded_white()))
            .with_target(OutputTarget::new(out.join("ico.png"), VariantSettings::rounded_white()))
            .with_target(OutputTarget::new(out.join("ico.ico"), VariantSettings::rounded_white()))
            .with_target(OutputTarget::new(out.join("tray_icon.png"), VariantSettings::solid_white()))
            .with_target(OutputTarget::new(out.join("tray_icon.ico"), VariantSettings::solid_white()))
            .with_target(OutputTarget::new(
                out.join("new_ico_padded.png"),
                VariantSettings::padded_foreground(),
            ))
    }

    /// Appends a target.
    pub fn with_target(mut self, target: OutputTarget) -> Self {
        self.targets.push(target);
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a profile file.
    ///
    /// Relative source and target paths are resolved against the directory
    /// holding the profile.
    pub fn load(path: impl AsRef<Path>) -> IconResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| IconError::io(path, e))?;
        let mut profile = Self::from_json(&json)?;

        if let Some(base) = path.parent() {
            profile.source = base.join(&profile.source);
            for target in &mut profile.targets {
                target.path = base.join(&target.path);
            }
        }
        Ok(profile)
    }

    /// Renders and writes every target in order.
    ///
    /// The source is loaded once. The first failure aborts the job; files
    /// already written are left in place.
    #[tracing::instrument(skip_all, fields(source = %self.source.display(), targets = self.targets.len()))]
    pub fn run(&self) -> IconResult<Vec<Artifact>> {
        let renderer = IconRenderer::open_with_svg_size(&self.source, self.svg_size)?;
        self.run_with(&renderer, |_| {})
    }

    /// Like [`run`](Self::run) with an already loaded source.
    ///
    /// `on_artifact` is called as soon as each file has been written.
    pub fn run_with(
        &self,
        renderer: &IconRenderer,
        mut on_artifact: impl FnMut(&Artifact),
    ) -> IconResult<Vec<Artifact>> {
        let mut artifacts = Vec::with_capacity(self.targets.len());

        for target in &self.targets {
            let format = target.resolved_format()?;
            let image = renderer.render(&target.variant)?;
            let frame_sizes = export::save(&image, &target.path, format)?;

            let artifact = Artifact {
                path: target.path.clone(),
                format,
                width: image.width(),
                height: image.height(),
                frame_sizes,
                label: target.variant.confirmation_label(),
            };
            tracing::info!(path = %artifact.path.display(), ?format, "{}", artifact.label);
            on_artifact(&artifact);
            artifacts.push(artifact);
        }

        Ok(artifacts)
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Error types for icon rendering and export.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type IconResult<T> = Result<T, IconError>;

/// Everything that can go wrong while loading, rendering, or saving an icon.
///
/// Nothing here is retried. The first error aborts the job it occurred in.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("svg error: {0}")]
    Svg(String),

    #[error("source image must be square, got {width}x{height}")]
    NotSquare { width: u32, height: u32 },

    #[error("{name} must be in (0, 1), got {value}")]
    InvalidRatio { name: &'static str, value: f64 },

    #[error("scaling a {size}px icon by {scale_ratio} leaves no visible content")]
    EmptyContent { size: u32, scale_ratio: f64 },

    #[error("unsupported output format for {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid profile: {0}")]
    Profile(#[from] serde_json::Error),
}

impl IconError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn encode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Encode {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn svg(msg: impl Into<String>) -> Self {
        Self::Svg(msg.into())
    }
}

/// Checks that a ratio lies strictly between 0 and 1.
pub(crate) fn check_ratio(name: &'static str, value: f64) -> IconResult<f64> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(IconError::InvalidRatio { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_bounds_are_exclusive() {
        assert!(check_ratio("radius_ratio", 0.15).is_ok());
        assert!(check_ratio("radius_ratio", 0.0).is_err());
        assert!(check_ratio("radius_ratio", 1.0).is_err());
        assert!(check_ratio("scale_ratio", f64::NAN).is_err());
    }

    #[test]
    fn display_names_the_offending_value() {
        let err = IconError::NotSquare {
            width: 512,
            height: 256,
        };
        assert_eq!(err.to_string(), "source image must be square, got 512x256");

        let err = check_ratio("scale_ratio", 1.5).unwrap_err();
        assert!(err.to_string().contains("scale_ratio"));
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn io_error_keeps_path() {
        let err = IconError::io("missing.png", std::io::Error::other("boom"));
        let msg = err.to_string();
        assert!(msg.contains("missing.png"));
        assert!(msg.contains("boom"));
    }
}

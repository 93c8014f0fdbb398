//! Portrait metadata sidecar files
//!
//! PyTK describes a scaled portrait with `<image>.pytk.json`; HD Portraits
//! expects `<image>.json` next to the image with an absolute pixel size and
//! the asset path the portrait is loaded under.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::json::read_json5;

/// Side length in pixels of one vanilla Stardew Valley portrait frame
pub const PORTRAIT_BASE_SIZE: u32 = 64;

/// Suffix PyTK appends to the image stem for its metadata file
pub const PYTK_SIDECAR_SUFFIX: &str = "pytk.json";

/// Legacy PyTK scale metadata
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PytkMetadata {
    /// Multiplier applied to the 64px base portrait
    #[serde(rename = "Scale")]
    pub scale: f64,
    /// Animation block; parsed so malformed files fail loudly, not converted
    #[serde(rename = "Animation", default)]
    pub animation: Option<PytkAnimation>,
}

/// Legacy PyTK animation settings
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PytkAnimation {
    #[serde(rename = "FrameWidth", default)]
    pub frame_width: Option<u32>,
    #[serde(rename = "FrameHeight", default)]
    pub frame_height: Option<u32>,
    #[serde(rename = "FPS", default)]
    pub fps: Option<u32>,
}

/// HD Portraits metadata written next to each converted image
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortraitMetadata {
    /// Pixel size of one portrait frame
    #[serde(rename = "Size")]
    pub size: u32,
    /// Asset path the image is edited into
    #[serde(rename = "Portrait")]
    pub portrait: String,
}

impl PortraitMetadata {
    /// Build HD Portraits metadata from a PyTK scale
    ///
    /// `Size` is `Scale * 64` truncated after multiplying, so a fractional
    /// scale keeps its precision (`1.5` gives 96, not the 64 that flooring
    /// the scale first would give).
    #[must_use]
    pub fn from_pytk(legacy: &PytkMetadata, portrait: impl Into<String>) -> Self {
        let size = (legacy.scale * f64::from(PORTRAIT_BASE_SIZE)).max(0.0) as u32;
        Self {
            size,
            portrait: portrait.into(),
        }
    }
}

/// Path of the PyTK sidecar that belongs to an image
///
/// `Portraits/Abigail.png` -> `Portraits/Abigail.pytk.json`
#[must_use]
pub fn pytk_sidecar_path(image: &Path) -> PathBuf {
    image.with_extension(PYTK_SIDECAR_SUFFIX)
}

/// Load the PyTK sidecar for an image, if there is one
///
/// # Errors
/// Returns an error if the sidecar exists but cannot be parsed.
pub fn read_pytk_sidecar(image: &Path) -> Result<Option<PytkMetadata>> {
    let sidecar = pytk_sidecar_path(image);
    if !sidecar.is_file() {
        return Ok(None);
    }
    read_json5(&sidecar).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_pytk_sidecar_path() {
        assert_eq!(
            pytk_sidecar_path(Path::new("assets/Abigail.png")),
            PathBuf::from("assets/Abigail.pytk.json")
        );
    }

    #[test]
    fn test_size_is_scale_times_base() {
        let legacy = PytkMetadata {
            scale: 2.0,
            animation: None,
        };
        let meta = PortraitMetadata::from_pytk(&legacy, "Mods/HDPortraitsPatch/Abigail");
        assert_eq!(meta.size, 128);
        assert_eq!(meta.portrait, "Mods/HDPortraitsPatch/Abigail");
    }

    #[test]
    fn test_fractional_scale() {
        let legacy = PytkMetadata {
            scale: 1.5,
            animation: None,
        };
        assert_eq!(PortraitMetadata::from_pytk(&legacy, "x").size, 96);
    }

    #[test]
    fn test_read_pytk_sidecar_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let result = read_pytk_sidecar(&temp.path().join("Abigail.png")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_read_pytk_sidecar_with_animation() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("Abigail.pytk.json"),
            r#"{ "Scale": 4, "Animation": { "FrameWidth": 256, "FPS": 10 } }"#,
        )
        .unwrap();

        let legacy = read_pytk_sidecar(&temp.path().join("Abigail.png"))
            .unwrap()
            .unwrap();
        assert_eq!(legacy.scale, 4.0);
        let animation = legacy.animation.unwrap();
        assert_eq!(animation.frame_width, Some(256));
        assert_eq!(animation.frame_height, None);
        assert_eq!(animation.fps, Some(10));
    }

    #[test]
    fn test_portrait_metadata_field_names() {
        let meta = PortraitMetadata {
            size: 128,
            portrait: "Mods/HDPortraitsPatch/Abigail".to_string(),
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "Size": 128, "Portrait": "Mods/HDPortraitsPatch/Abigail" })
        );
    }
}

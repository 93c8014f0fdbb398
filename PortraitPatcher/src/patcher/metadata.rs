//! Portrait target parsing and sidecar path resolution

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::formats::{PortraitMetadata, read_pytk_sidecar};

/// Separator between a character name and its variant (`Abigail_Witch`)
pub const VARIANT_SEPARATOR: char = '_';

/// Folder name a `Target` must sit in to be treated as a portrait
pub const PORTRAITS_FOLDER: &str = "Portraits";

/// Stem of a `Target` that points into a `Portraits` folder
///
/// `Portraits/Abigail_Witch` -> `Some("Abigail_Witch")`,
/// `Characters/Abigail` -> `None`.
#[must_use]
pub fn portrait_stem(target: &str) -> Option<&str> {
    let mut segments = target
        .trim()
        .rsplit(['/', '\\'])
        .filter(|segment| !segment.is_empty());
    let name = segments.next()?;
    let parent = segments.next()?;
    if file_stem(parent) != PORTRAITS_FOLDER {
        return None;
    }
    Some(file_stem(name))
}

/// Everything after the first separator of a target stem
///
/// `Abigail_Witch` -> `Some("Witch")`, `Abigail` -> `None`.
#[must_use]
pub fn target_variant(stem: &str) -> Option<&str> {
    stem.split_once(VARIANT_SEPARATOR)
        .map(|(_, variant)| variant)
        .filter(|variant| !variant.is_empty())
}

/// HD Portraits metadata file for an image, adjusted for the target variant
///
/// The variant is appended unless the image stem already ends with it, so
/// `Abigail.png` + `Witch` and `Abigail_Witch.png` + `Witch` both resolve to
/// `Abigail_Witch.json`.
#[must_use]
pub fn variant_metadata_path(image: &Path, variant: Option<&str>) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match variant {
        Some(variant) if !stem.ends_with(variant) => format!("{stem}{VARIANT_SEPARATOR}{variant}"),
        _ => stem,
    };
    image.with_file_name(name).with_extension("json")
}

/// Convert the PyTK sidecar of `image`, if present, into HD Portraits metadata
///
/// # Errors
/// Returns an error if a PyTK sidecar exists but is malformed.
pub fn portrait_metadata_for(image: &Path, portrait_target: &str) -> Result<Option<PortraitMetadata>> {
    Ok(read_pytk_sidecar(image)?.map(|legacy| PortraitMetadata::from_pytk(&legacy, portrait_target)))
}

/// Stem of a single path segment, matching `Path::file_stem`
fn file_stem(segment: &str) -> &str {
    match segment.rfind('.') {
        Some(0) | None => segment,
        Some(dot) => &segment[..dot],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait_stem() {
        assert_eq!(portrait_stem("Portraits/Abigail"), Some("Abigail"));
        assert_eq!(portrait_stem("Portraits/Abigail_Witch"), Some("Abigail_Witch"));
        assert_eq!(portrait_stem("Portraits\\Abigail.png"), Some("Abigail"));
        assert_eq!(portrait_stem("Characters/Abigail"), None);
        assert_eq!(portrait_stem("Abigail"), None);
        assert_eq!(portrait_stem("Portraits"), None);
    }

    #[test]
    fn test_target_variant() {
        assert_eq!(target_variant("Abigail_Witch"), Some("Witch"));
        assert_eq!(target_variant("Abigail_Beach_Night"), Some("Beach_Night"));
        assert_eq!(target_variant("Abigail"), None);
        assert_eq!(target_variant("Abigail_"), None);
    }

    #[test]
    fn test_variant_metadata_path_already_suffixed() {
        assert_eq!(
            variant_metadata_path(Path::new("assets/Abigail_Witch.png"), Some("Witch")),
            PathBuf::from("assets/Abigail_Witch.json")
        );
    }

    #[test]
    fn test_variant_metadata_path_plain_stem() {
        assert_eq!(
            variant_metadata_path(Path::new("assets/Abigail.png"), Some("Witch")),
            PathBuf::from("assets/Abigail_Witch.json")
        );
    }

    #[test]
    fn test_variant_metadata_path_no_variant() {
        assert_eq!(
            variant_metadata_path(Path::new("assets/Abigail.png"), None),
            PathBuf::from("assets/Abigail.json")
        );
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Abigail.png"), "Abigail");
        assert_eq!(file_stem(".hidden"), ".hidden");
        assert_eq!(file_stem("Portraits"), "Portraits");
    }
}

//! Batch patching of mod folders
//!
//! The input is either a single mod folder or a folder holding several mods
//! (one level deep). Each recognised mod is patched independently; a failure
//! in one mod is recorded and the batch moves on to the next.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::mod_type::ModType;
use crate::patcher::PatchConfig;

/// Folder created inside the input folder for copy-mode output
pub const DEFAULT_COPY_DIR_NAME: &str = "Patched HD Portraits";

/// Where patched files are written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Rewrite each mod in place, keeping `.bak` copies of the originals
    #[default]
    InPlace,
    /// Leave mods untouched and write results into a mirrored tree
    Copy {
        /// Output root; defaults to `<input>/Patched HD Portraits`
        root: Option<PathBuf>,
    },
}

impl OutputMode {
    /// Output folder for one mod, or `None` when patching in place
    #[must_use]
    pub fn copy_dir_for(&self, input_dir: &Path, mod_dir: &Path) -> Option<PathBuf> {
        let Self::Copy { root } = self else {
            return None;
        };
        let root = root
            .clone()
            .unwrap_or_else(|| input_dir.join(DEFAULT_COPY_DIR_NAME));
        let name = mod_dir.file_name().unwrap_or(mod_dir.as_os_str());
        Some(root.join(name))
    }
}

/// Progress callback type for batch operations
pub type PatchProgressCallback<'a> = &'a (dyn Fn(&PatchProgress) + Sync + Send);

/// Progress information during a batch
#[derive(Debug, Clone)]
pub struct PatchProgress {
    /// Current operation phase
    pub phase: PatchPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Mod folder being processed (if applicable)
    pub current_file: Option<String>,
}

impl PatchProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: PatchPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with a folder name
    #[must_use]
    pub fn with_file(phase: PatchPhase, current: usize, total: usize, file: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }
}

/// Phase of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchPhase {
    /// Looking for mod folders
    Scanning,
    /// Patching one mod
    Patching,
    /// Batch complete
    Complete,
}

impl PatchPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scanning => "Scanning for mods",
            Self::Patching => "Patching",
            Self::Complete => "Complete",
        }
    }
}

/// A candidate folder and what it was identified as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModFolder {
    /// Folder path
    pub path: PathBuf,
    /// Detected framework, `None` if unrecognised
    pub mod_type: Option<ModType>,
}

/// Result of a batch patch
#[derive(Debug, Clone, Default)]
pub struct BatchPatchResult {
    /// Mods converted successfully
    pub success_count: usize,
    /// Mods recognised but left untouched by an inert strategy
    pub inert_count: usize,
    /// Folders that are not a recognised mod
    pub unrecognized_count: usize,
    /// Mods that failed to convert
    pub fail_count: usize,
    /// Messages for each folder processed
    pub results: Vec<String>,
}

/// Whether a folder is the game's own `Stardew Valley/Mods` folder
#[must_use]
pub fn is_game_mods_folder(dir: &Path) -> bool {
    let mut names = dir.components().rev().map(|c| c.as_os_str());
    names.next().is_some_and(|n| n == "Mods") && names.next().is_some_and(|n| n == "Stardew Valley")
}

/// Find the mod folders to patch under `dir`
///
/// If `dir` is itself a recognised mod, only it is returned. Otherwise every
/// immediate subdirectory is returned with its classification, sorted by
/// path. The default copy-mode output folder is never a candidate.
#[must_use]
pub fn find_mod_folders(dir: &Path) -> Vec<ModFolder> {
    if let Some(mod_type) = ModType::identify_folder(dir) {
        return vec![ModFolder {
            path: dir.to_path_buf(),
            mod_type: Some(mod_type),
        }];
    }

    let mut folders: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_dir() && e.file_name() != DEFAULT_COPY_DIR_NAME)
        .map(|e| ModFolder {
            mod_type: ModType::identify_folder(e.path()),
            path: e.path().to_path_buf(),
        })
        .collect();

    folders.sort_by(|a, b| a.path.cmp(&b.path));
    folders
}

/// Patch every mod found under `dir`
///
/// # Arguments
/// * `dir` - A mod folder or a folder of mods
/// * `mode` - In place or copy
/// * `config` - Asset path prefixes for generated entries
/// * `progress` - Progress callback
///
/// # Errors
/// Returns an error if `dir` is not a directory or is the game's Mods
/// folder. Failures of individual mods are reported in the result.
pub fn patch_mods(
    dir: &Path,
    mode: &OutputMode,
    config: &PatchConfig,
    progress: PatchProgressCallback,
) -> Result<BatchPatchResult> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if is_game_mods_folder(dir) {
        return Err(Error::RefusingGameModsFolder(dir.to_path_buf()));
    }

    progress(&PatchProgress::with_file(
        PatchPhase::Scanning,
        0,
        1,
        dir.display().to_string(),
    ));
    let folders = find_mod_folders(dir);
    let total = folders.len();
    let mut result = BatchPatchResult::default();

    for (index, folder) in folders.iter().enumerate() {
        let display_name = folder
            .path
            .file_name()
            .map_or_else(|| folder.path.display().to_string(), |n| n.to_string_lossy().into_owned());
        progress(&PatchProgress::with_file(
            PatchPhase::Patching,
            index + 1,
            total,
            display_name.clone(),
        ));

        let Some(mod_type) = folder.mod_type else {
            tracing::debug!("Skipping {}: not a recognised mod", folder.path.display());
            result.unrecognized_count += 1;
            result.results.push(format!("Skipped {display_name}: not a recognised mod"));
            continue;
        };

        let copy_dir = mode.copy_dir_for(dir, &folder.path);
        match mod_type.apply(&folder.path, copy_dir.as_deref(), config) {
            Ok(_) if mod_type.is_inert() => {
                result.inert_count += 1;
                result.results.push(format!("Identified {display_name} ({mod_type}); nothing to convert"));
            }
            Ok(report) => {
                result.success_count += 1;
                result.results.push(format!(
                    "Patched {display_name} ({mod_type}): {} portraits, {} metadata files",
                    report.entries_rewritten,
                    report.sidecars_written.len()
                ));
            }
            Err(e) => {
                tracing::warn!("Failed to patch {}: {e}", folder.path.display());
                result.fail_count += 1;
                result.results.push(format!("Failed {display_name}: {e}"));
            }
        }
    }

    progress(&PatchProgress::new(PatchPhase::Complete, total, total));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_content_mod(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("content.json"), r#"{ "Changes": [] }"#).unwrap();
        fs::write(dir.join("manifest.json"), r#"{ "Dependencies": [] }"#).unwrap();
    }

    #[test]
    fn test_is_game_mods_folder() {
        assert!(is_game_mods_folder(Path::new("/games/Stardew Valley/Mods")));
        assert!(!is_game_mods_folder(Path::new("/games/Stardew Valley/Mods/Abigail")));
        assert!(!is_game_mods_folder(Path::new("/downloads/Mods")));
    }

    #[test]
    fn test_copy_dir_for() {
        let input = Path::new("/mods");
        let mod_dir = Path::new("/mods/Abigail HD");
        assert_eq!(OutputMode::InPlace.copy_dir_for(input, mod_dir), None);
        assert_eq!(
            OutputMode::Copy { root: None }.copy_dir_for(input, mod_dir),
            Some(PathBuf::from("/mods/Patched HD Portraits/Abigail HD"))
        );
        assert_eq!(
            OutputMode::Copy { root: Some(PathBuf::from("/out")) }.copy_dir_for(input, mod_dir),
            Some(PathBuf::from("/out/Abigail HD"))
        );
    }

    #[test]
    fn test_find_mod_folders_single_mod() {
        let temp = TempDir::new().unwrap();
        make_content_mod(temp.path());
        fs::create_dir(temp.path().join("assets")).unwrap();

        let folders = find_mod_folders(temp.path());
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].path, temp.path());
    }

    #[test]
    fn test_find_mod_folders_collection() {
        let temp = TempDir::new().unwrap();
        make_content_mod(&temp.path().join("B"));
        fs::create_dir_all(temp.path().join("A")).unwrap();
        fs::write(temp.path().join("A/shops.json"), "{}").unwrap();
        fs::create_dir_all(temp.path().join("C")).unwrap();
        fs::create_dir_all(temp.path().join(DEFAULT_COPY_DIR_NAME)).unwrap();

        let folders = find_mod_folders(temp.path());
        let types: Vec<_> = folders.iter().map(|f| f.mod_type).collect();
        assert_eq!(
            types,
            vec![Some(ModType::ShopTileFramework), Some(ModType::ContentPatcher), None]
        );
    }

    #[test]
    fn test_patch_mods_counts_outcomes() {
        let temp = TempDir::new().unwrap();
        make_content_mod(&temp.path().join("Good"));
        fs::create_dir_all(temp.path().join("Broken")).unwrap();
        fs::write(temp.path().join("Broken/content.json"), "{ not json").unwrap();
        fs::create_dir_all(temp.path().join("Shop")).unwrap();
        fs::write(temp.path().join("Shop/shops.json"), "{}").unwrap();
        fs::create_dir_all(temp.path().join("Readme")).unwrap();

        let result = patch_mods(temp.path(), &OutputMode::InPlace, &PatchConfig::default(), &|_| {})
            .unwrap();

        assert_eq!(result.success_count, 1);
        assert_eq!(result.fail_count, 1);
        assert_eq!(result.inert_count, 1);
        assert_eq!(result.unrecognized_count, 1);
        assert_eq!(result.results.len(), 4);
    }

    #[test]
    fn test_patch_mods_rejects_files() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("content.json");
        fs::write(&file, "{}").unwrap();
        let result = patch_mods(&file, &OutputMode::InPlace, &PatchConfig::default(), &|_| {});
        assert!(matches!(result, Err(Error::NotADirectory(_))));
    }
}

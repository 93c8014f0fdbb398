//! Directory structure mirroring for copy mode

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

use super::path::normalize_lexically;

/// Recreate the directory structure of `source` under `destination`
///
/// Only directories are created; files are left behind. When `destination`
/// lives inside `source` (the default copy location does), that subtree is
/// skipped so repeated runs never mirror their own output, and the
/// directories leading to it are not mirrored into it either.
///
/// # Returns
/// The number of directories created or already present.
///
/// # Errors
/// Returns an error if the source cannot be walked or a directory cannot be created.
pub fn clone_dir_tree(source: &Path, destination: &Path) -> Result<usize> {
    let source_abs = normalize_lexically(source)?;
    let destination_abs = normalize_lexically(destination)?;

    // Walk fully before creating anything, so a freshly created
    // destination is never picked up by the walk itself.
    let mut relative_dirs = Vec::new();
    for entry in WalkDir::new(&source_abs)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !e.path().starts_with(&destination_abs))
    {
        let entry = entry?;
        // Ancestors of the destination are created by create_dir_all below
        // only as far as the destination needs them.
        if !entry.file_type().is_dir() || destination_abs.starts_with(entry.path()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(&source_abs) {
            relative_dirs.push(relative.to_path_buf());
        }
    }

    fs::create_dir_all(&destination_abs)
        .map_err(|e| Error::file_io("create directory", &destination_abs, e))?;
    for relative in &relative_dirs {
        let target = destination_abs.join(relative);
        fs::create_dir_all(&target).map_err(|e| Error::file_io("create directory", &target, e))?;
    }

    tracing::debug!(
        "Mirrored {} directories from {} into {}",
        relative_dirs.len(),
        source_abs.display(),
        destination_abs.display()
    );
    Ok(relative_dirs.len())
}

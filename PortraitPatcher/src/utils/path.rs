//! Path utilities

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Normalize path separators to forward slashes (for Content Patcher paths)
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Get relative path and normalize separators
pub fn relative_path<P: AsRef<Path>>(path: P, base: P) -> Option<String> {
    path.as_ref()
        .strip_prefix(base.as_ref())
        .ok()
        .map(normalize_path)
}

/// Join a mod-relative path written with either separator onto a directory
pub fn join_mod_path(base: &Path, relative: &str) -> PathBuf {
    relative
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .fold(base.to_path_buf(), |acc, segment| acc.join(segment))
}

/// Make a path absolute and fold `.` and `..` without touching the filesystem
///
/// Unlike `canonicalize`, this works for files that do not exist yet, which
/// is the normal case for sidecars about to be written.
///
/// # Errors
/// Returns an error if the current directory cannot be determined.
pub fn normalize_lexically(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .map_err(|e| Error::file_io("resolve", path, e))?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Whether `path` is `base` or lies underneath it, compared lexically
pub fn is_nested_in(path: &Path, base: &Path) -> Result<bool> {
    Ok(normalize_lexically(path)?.starts_with(normalize_lexically(base)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/mods/Abigail/assets/a.png"), Path::new("/mods/Abigail")),
            Some("assets/a.png".to_string())
        );
        assert_eq!(
            relative_path(Path::new("/elsewhere/a.png"), Path::new("/mods/Abigail")),
            None
        );
    }

    #[test]
    fn test_join_mod_path_accepts_backslashes() {
        assert_eq!(
            join_mod_path(Path::new("/mods/A"), "assets\\portraits/Abigail.png"),
            PathBuf::from("/mods/A/assets/portraits/Abigail.png")
        );
    }

    #[test]
    fn test_normalize_lexically_folds_parent_dirs() {
        let normalized = normalize_lexically(Path::new("/mods/A/assets/../Abigail.json")).unwrap();
        assert_eq!(normalized, PathBuf::from("/mods/A/Abigail.json"));
    }

    #[test]
    fn test_is_nested_in() {
        assert!(is_nested_in(Path::new("/mods/A/out/A"), Path::new("/mods/A")).unwrap());
        assert!(!is_nested_in(Path::new("/mods/AB"), Path::new("/mods/A")).unwrap());
        assert!(!is_nested_in(Path::new("/out/A"), Path::new("/mods/A")).unwrap());
    }
}

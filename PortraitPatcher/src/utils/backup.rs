//! Backup-aware writing of rewritten mod files
//!
//! The first in-place rewrite of `content.json` or `manifest.json` renames the
//! pristine file to `<name>.bak`. Later runs read the `.bak` as the original,
//! so re-running the patcher always starts from the author's files. In copy
//! mode nothing in the source tree is renamed or modified.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::formats::write_json;

/// Extension given to the pristine copy of a rewritten file
pub const BACKUP_EXTENSION: &str = "bak";

/// Path of the backup that belongs to `file`
#[must_use]
pub fn backup_path(file: &Path) -> PathBuf {
    file.with_extension(BACKUP_EXTENSION)
}

/// The backup of `file` if one exists, otherwise `file` itself
#[must_use]
pub fn file_or_backup(file: &Path) -> PathBuf {
    let backup = backup_path(file);
    if backup.is_file() { backup } else { file.to_path_buf() }
}

/// How an existing file at the destination is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Rename the pristine original to `.bak` once, then write
    Backup,
    /// Write straight over whatever is there (derived files)
    Overwrite,
}

/// Writes rewritten files either in place or into a mirrored output tree
#[derive(Debug, Clone, Copy)]
pub struct ModWriter<'a> {
    mod_dir: &'a Path,
    copy_dir: Option<&'a Path>,
}

impl<'a> ModWriter<'a> {
    /// Create a writer for a mod directory; `copy_dir` selects copy mode
    #[must_use]
    pub fn new(mod_dir: &'a Path, copy_dir: Option<&'a Path>) -> Self {
        Self { mod_dir, copy_dir }
    }

    /// Whether output goes to a separate tree
    #[must_use]
    pub fn is_copy_mode(&self) -> bool {
        self.copy_dir.is_some()
    }

    /// Where a file under the mod directory ends up once written
    ///
    /// The extension is always forced to `.json`, so writing the document
    /// that was read from `content.bak` lands in `content.json`.
    ///
    /// # Errors
    /// Returns an error if `file` is not inside the mod directory in copy mode.
    pub fn destination(&self, file: &Path) -> Result<PathBuf> {
        let target = match self.copy_dir {
            Some(copy_dir) => {
                let relative = file.strip_prefix(self.mod_dir).map_err(|_| {
                    Error::InvalidPath(format!(
                        "{} is outside mod directory {}",
                        file.display(),
                        self.mod_dir.display()
                    ))
                })?;
                copy_dir.join(relative)
            }
            None => file.to_path_buf(),
        };
        Ok(target.with_extension("json"))
    }

    /// Serialize `value` to the destination of `file`
    ///
    /// # Errors
    /// Returns an error if the backup rename or the write fails.
    pub fn write<T: Serialize + ?Sized>(&self, file: &Path, value: &T, mode: WriteMode) -> Result<PathBuf> {
        let backup = backup_path(file);
        if mode == WriteMode::Backup && !self.is_copy_mode() && !backup.is_file() && file.is_file() {
            tracing::debug!("Backing up {} -> {}", file.display(), backup.display());
            fs::rename(file, &backup).map_err(|e| Error::file_io("back up", file, e))?;
        }

        let destination = self.destination(file)?;
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::file_io("create directory", parent, e))?;
        }
        write_json(value, &destination)?;
        tracing::debug!("Wrote {}", destination.display());
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_file_or_backup_prefers_backup() {
        let temp = TempDir::new().unwrap();
        let content = temp.path().join("content.json");
        fs::write(&content, "{}").unwrap();
        assert_eq!(file_or_backup(&content), content);

        fs::write(temp.path().join("content.bak"), "{}").unwrap();
        assert_eq!(file_or_backup(&content), temp.path().join("content.bak"));
    }

    #[test]
    fn test_backup_created_once() {
        let temp = TempDir::new().unwrap();
        let content = temp.path().join("content.json");
        fs::write(&content, "original").unwrap();

        let writer = ModWriter::new(temp.path(), None);
        writer.write(&content, &json!({ "run": 1 }), WriteMode::Backup).unwrap();
        writer.write(&content, &json!({ "run": 2 }), WriteMode::Backup).unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("content.bak")).unwrap(), "original");
        assert!(fs::read_to_string(&content).unwrap().contains("\"run\": 2"));
    }

    #[test]
    fn test_writing_backup_source_lands_in_json() {
        let temp = TempDir::new().unwrap();
        let backup = temp.path().join("content.bak");
        fs::write(&backup, "original").unwrap();

        let writer = ModWriter::new(temp.path(), None);
        let written = writer.write(&backup, &json!({}), WriteMode::Backup).unwrap();

        assert_eq!(written, temp.path().join("content.json"));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "original");
    }

    #[test]
    fn test_overwrite_skips_backup() {
        let temp = TempDir::new().unwrap();
        let sidecar = temp.path().join("Abigail.json");
        fs::write(&sidecar, "stale").unwrap();

        let writer = ModWriter::new(temp.path(), None);
        writer.write(&sidecar, &json!({ "Size": 128 }), WriteMode::Overwrite).unwrap();

        assert!(!temp.path().join("Abigail.bak").exists());
        assert!(fs::read_to_string(&sidecar).unwrap().contains("128"));
    }

    #[test]
    fn test_copy_mode_leaves_source_untouched() {
        let source = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let content = source.path().join("content.json");
        fs::write(&content, "original").unwrap();

        let writer = ModWriter::new(source.path(), Some(output.path()));
        let written = writer.write(&content, &json!({}), WriteMode::Backup).unwrap();

        assert_eq!(written, output.path().join("content.json"));
        assert_eq!(fs::read_to_string(&content).unwrap(), "original");
        assert!(!source.path().join("content.bak").exists());
    }
}

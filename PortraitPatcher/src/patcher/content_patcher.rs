//! Content Patcher portrait conversion
//!
//! Every `Changes` entry targeting `Portraits/<Name>` is split in two:
//!
//! - an `EditImage` entry that places the original image under
//!   `<edit prefix>/<Name>`, and
//! - a `Load` entry that loads an HD Portraits metadata file to
//!   `<load prefix>/<Name>`.
//!
//! The metadata files are generated from the PyTK sidecars next to each
//! image. Templated `FromFile` paths are expanded against the mod folder so
//! every concrete image gets its own metadata file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::formats::read_json5_object;
use crate::utils::{
    ModWriter, WriteMode, clone_dir_tree, file_or_backup, join_mod_path, normalize_lexically,
    normalize_path, relative_path,
};

use super::manifest::update_dependencies;
use super::metadata::{portrait_metadata_for, portrait_stem, target_variant, variant_metadata_path};
use super::template::{expand_template, has_template_token};
use super::types::{CONTENT_PATCHER_FORMAT, FileParsed, PatchConfig, PatchReport};

/// Content pack patch list; its presence identifies a Content Patcher mod
pub const CONTENT_FILE: &str = "content.json";

/// SMAPI manifest of every mod
pub const MANIFEST_FILE: &str = "manifest.json";

/// Convert a Content Patcher portrait mod from PyTK to HD Portraits
///
/// # Arguments
/// * `mod_dir` - Mod folder containing `content.json` and `manifest.json`
/// * `copy_dir` - Write results here instead of rewriting the mod in place
/// * `config` - Asset path prefixes for the generated entries
///
/// # Errors
/// Returns an error if `content.json` or `manifest.json` is missing or
/// malformed, or if any output file cannot be written.
pub fn patch_content_pack(
    mod_dir: &Path,
    copy_dir: Option<&Path>,
    config: &PatchConfig,
) -> Result<PatchReport> {
    if let Some(copy_dir) = copy_dir {
        clone_dir_tree(mod_dir, copy_dir)?;
    }

    let writer = ModWriter::new(mod_dir, copy_dir);
    let content_file = file_or_backup(&mod_dir.join(CONTENT_FILE));
    tracing::info!("Patching {}", content_file.display());

    let mut content = read_json5_object(&content_file)?;
    let changes = content
        .get_mut("Changes")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| Error::InvalidField {
            path: content_file.clone(),
            field: "Changes".to_string(),
            expected: "an array",
        })?;

    let mut rewriter = PortraitRewriter {
        mod_dir,
        content_file: &content_file,
        config,
        writer,
        parsed_metadata_files: HashMap::new(),
        report: PatchReport::default(),
    };

    let original = std::mem::take(changes);
    let mut rewritten = Vec::with_capacity(original.len() * 2);
    for change in original {
        rewriter.rewrite_change(change, &mut rewritten)?;
    }
    *changes = rewritten;

    content.insert(
        "Format".to_string(),
        Value::String(CONTENT_PATCHER_FORMAT.to_string()),
    );

    let mut report = rewriter.report;
    report
        .documents_written
        .push(writer.write(&content_file, &content, WriteMode::Backup)?);

    let manifest_file = file_or_backup(&mod_dir.join(MANIFEST_FILE));
    let manifest = update_dependencies(read_json5_object(&manifest_file)?, &manifest_file)?;
    report
        .documents_written
        .push(writer.write(&manifest_file, &manifest, WriteMode::Backup)?);

    tracing::info!(
        "Rewrote {} portrait entries, wrote {} metadata files",
        report.entries_rewritten,
        report.sidecars_written.len()
    );
    Ok(report)
}

/// State for one pass over a content pack's `Changes`
struct PortraitRewriter<'a> {
    mod_dir: &'a Path,
    content_file: &'a Path,
    config: &'a PatchConfig,
    writer: ModWriter<'a>,
    parsed_metadata_files: HashMap<PathBuf, FileParsed>,
    report: PatchReport,
}

impl PortraitRewriter<'_> {
    /// Push the replacement(s) for one change entry onto `output`
    fn rewrite_change(&mut self, change: Value, output: &mut Vec<Value>) -> Result<()> {
        let Value::Object(mut entry) = change else {
            self.report.entries_unchanged += 1;
            output.push(change);
            return Ok(());
        };

        let Some(stem) = entry
            .get("Target")
            .and_then(Value::as_str)
            .and_then(portrait_stem)
            .map(str::to_owned)
        else {
            self.report.entries_unchanged += 1;
            output.push(Value::Object(entry));
            return Ok(());
        };

        let from_file = entry
            .get("FromFile")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| Error::InvalidField {
                path: self.content_file.to_path_buf(),
                field: format!("FromFile (entry targeting Portraits/{stem})"),
                expected: "a string",
            })?;

        let variant = target_variant(&stem);
        let portrait_file = join_mod_path(self.mod_dir, &from_file);
        let metadata_file = variant_metadata_path(&portrait_file, variant);
        let load_target = self.config.load_target(&stem);
        let edit_target = self.config.edit_target(&stem);

        entry.shift_remove("PatchMode");
        let mut edit_entry = entry.clone();

        set_str(&mut entry, "Action", "Load");
        set_str(&mut entry, "Target", &load_target);
        set_str(&mut entry, "FromFile", &self.mod_relative(&metadata_file));

        set_str(&mut edit_entry, "Action", "EditImage");
        set_str(&mut edit_entry, "Target", &edit_target);
        set_str(&mut edit_entry, "FromFile", &self.mod_relative(&portrait_file));

        tracing::debug!("Portraits/{stem}: {from_file} -> {edit_target} + {load_target}");
        output.push(Value::Object(edit_entry));
        output.push(Value::Object(entry));
        self.report.entries_rewritten += 1;

        if has_template_token(&from_file) {
            self.write_globbed_metadata(&from_file, variant, &edit_target)
        } else if portrait_file.is_file() {
            self.write_individual_metadata(&portrait_file, &metadata_file, &edit_target)
        } else {
            tracing::warn!("{} does not exist; no metadata written", portrait_file.display());
            Ok(())
        }
    }

    /// Metadata for every image a templated `FromFile` can resolve to
    fn write_globbed_metadata(
        &mut self,
        from_file: &str,
        variant: Option<&str>,
        edit_target: &str,
    ) -> Result<()> {
        for image in expand_template(self.mod_dir, from_file)? {
            let metadata_file = variant_metadata_path(&image, variant);
            let key = normalize_lexically(&metadata_file)?;
            if self.parsed_metadata_files.get(&key) == Some(&FileParsed::Globbed) {
                continue;
            }
            self.parsed_metadata_files.insert(key, FileParsed::Globbed);
            self.write_metadata(&image, &metadata_file, edit_target)?;
        }
        Ok(())
    }

    fn write_individual_metadata(
        &mut self,
        image: &Path,
        metadata_file: &Path,
        edit_target: &str,
    ) -> Result<()> {
        let key = normalize_lexically(metadata_file)?;
        if self.parsed_metadata_files.get(&key) == Some(&FileParsed::Individual) {
            return Ok(());
        }
        self.parsed_metadata_files.insert(key, FileParsed::Individual);
        self.write_metadata(image, metadata_file, edit_target)
    }

    fn write_metadata(&mut self, image: &Path, metadata_file: &Path, edit_target: &str) -> Result<()> {
        let Some(metadata) = portrait_metadata_for(image, edit_target)? else {
            tracing::debug!("No PyTK metadata for {}", image.display());
            self.report.sidecars_missing += 1;
            return Ok(());
        };

        // Generated files are always overwritten, never backed up
        let written = self.writer.write(metadata_file, &metadata, WriteMode::Overwrite)?;
        self.report.sidecars_written.push(written);
        Ok(())
    }

    /// Mod-relative, forward-slash form of a path built from the mod folder
    fn mod_relative(&self, path: &Path) -> String {
        relative_path(path, self.mod_dir).unwrap_or_else(|| normalize_path(path))
    }
}

fn set_str(entry: &mut Map<String, Value>, key: &str, value: &str) {
    entry.insert(key.to_string(), Value::String(value.to_string()));
}

//! Shared types for portrait patching

use std::path::PathBuf;

/// Asset path prefix HD Portraits reads metadata from
pub const DEFAULT_LOAD_PREFIX: &str = "Mods/HDPortraits";

/// Default mod-folder name used for the edited portrait images
pub const DEFAULT_EDIT_PREFIX_NAME: &str = "HDPortraitsPatch";

/// Content Patcher format version stamped on rewritten content packs
pub const CONTENT_PATCHER_FORMAT: &str = "1.28.0";

/// Asset path prefixes used when composing generated `Target` values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchConfig {
    /// Prefix of the `Load` targets (metadata files)
    pub load_prefix: String,
    /// Prefix of the `EditImage` targets (portrait images)
    pub edit_prefix: String,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self::with_edit_prefix_name(DEFAULT_EDIT_PREFIX_NAME)
    }
}

impl PatchConfig {
    /// Config with the default load prefix and `Mods/<name>` as edit prefix
    #[must_use]
    pub fn with_edit_prefix_name(name: &str) -> Self {
        Self {
            load_prefix: DEFAULT_LOAD_PREFIX.to_string(),
            edit_prefix: format!("Mods/{}", name.trim_matches('/')),
        }
    }

    /// `Target` of the generated `Load` entry for a portrait
    #[must_use]
    pub fn load_target(&self, stem: &str) -> String {
        join_asset_path(&self.load_prefix, stem)
    }

    /// `Target` of the generated `EditImage` entry for a portrait
    #[must_use]
    pub fn edit_target(&self, stem: &str) -> String {
        join_asset_path(&self.edit_prefix, stem)
    }
}

fn join_asset_path(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// How a sidecar has already been produced during the current mod pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileParsed {
    /// Written for a concrete `FromFile`
    Individual,
    /// Written while expanding a templated `FromFile`
    Globbed,
}

/// Outcome of patching one mod directory
#[derive(Debug, Clone, Default)]
pub struct PatchReport {
    /// Portrait entries replaced by a Load/EditImage pair
    pub entries_rewritten: usize,
    /// Entries passed through untouched
    pub entries_unchanged: usize,
    /// HD Portraits sidecars written
    pub sidecars_written: Vec<PathBuf>,
    /// Images that had no PyTK sidecar to convert
    pub sidecars_missing: usize,
    /// `content.json` / `manifest.json` destinations
    pub documents_written: Vec<PathBuf>,
}

impl PatchReport {
    /// Whether anything was written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidecars_written.is_empty() && self.documents_written.is_empty()
    }
}

//! Portrait patching strategies
//!
//! This module converts PyTK-scaled portrait mods to HD Portraits:
//! - Rewrite Content Patcher `Changes` targeting `Portraits/`
//! - Generate HD Portraits metadata from PyTK sidecars
//! - Swap the manifest dependency on PyTK for HD Portraits

pub mod content_patcher;
pub mod manifest;
pub mod metadata;
pub mod shop_tile;
pub mod template;
pub mod types;

pub use content_patcher::{CONTENT_FILE, MANIFEST_FILE, patch_content_pack};
pub use manifest::{HD_PORTRAITS_UNIQUE_ID, PYTK_UNIQUE_ID, update_dependencies};
pub use metadata::{portrait_stem, target_variant, variant_metadata_path};
pub use shop_tile::{SHOPS_FILE, patch_shop_tile_pack};
pub use types::{
    CONTENT_PATCHER_FORMAT, DEFAULT_EDIT_PREFIX_NAME, DEFAULT_LOAD_PREFIX, FileParsed, PatchConfig,
    PatchReport,
};

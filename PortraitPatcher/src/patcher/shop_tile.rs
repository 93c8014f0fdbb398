//! Shop Tile Framework portrait conversion
//!
//! Shop Tile Framework mods are recognised so they are reported separately
//! from unrelated folders, but their portraits are not converted yet.

use std::path::Path;

use crate::error::Result;

use super::types::{PatchConfig, PatchReport};

/// Shop definitions; their presence identifies a Shop Tile Framework mod
pub const SHOPS_FILE: &str = "shops.json";

/// Recognised-but-inert strategy: leaves the mod untouched
///
/// # Errors
/// Never fails; the signature matches the other strategies.
pub fn patch_shop_tile_pack(
    mod_dir: &Path,
    _copy_dir: Option<&Path>,
    _config: &PatchConfig,
) -> Result<PatchReport> {
    tracing::info!("{} is a Shop Tile Framework mod; nothing to convert", mod_dir.display());
    Ok(PatchReport::default())
}

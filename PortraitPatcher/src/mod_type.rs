//! Mod framework detection
//!
//! A folder is classified by the sentinel file its framework requires. The
//! checks run in a fixed order and the first match wins.

use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::patcher::{
    CONTENT_FILE, PatchConfig, PatchReport, SHOPS_FILE, patch_content_pack, patch_shop_tile_pack,
};

/// Portrait mod frameworks the patcher knows how to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModType {
    /// Content Patcher pack (`content.json`)
    ContentPatcher,
    /// Shop Tile Framework pack (`shops.json`); recognised, not converted
    ShopTileFramework,
}

impl ModType {
    /// All mod types in detection priority order
    pub const ALL: [ModType; 2] = [ModType::ContentPatcher, ModType::ShopTileFramework];

    /// Detect the framework of a mod folder
    ///
    /// Returns `None` when the folder is not a recognised mod.
    #[must_use]
    pub fn identify_folder(directory: &Path) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mod_type| directory.join(mod_type.sentinel_file()).is_file())
    }

    /// File whose presence identifies this mod type
    #[must_use]
    pub fn sentinel_file(self) -> &'static str {
        match self {
            Self::ContentPatcher => CONTENT_FILE,
            Self::ShopTileFramework => SHOPS_FILE,
        }
    }

    /// Whether applying this strategy changes anything
    #[must_use]
    pub fn is_inert(self) -> bool {
        matches!(self, Self::ShopTileFramework)
    }

    /// Short machine-friendly name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContentPatcher => "content-patcher",
            Self::ShopTileFramework => "shop-tile-framework",
        }
    }

    /// Run this type's conversion on a mod folder
    ///
    /// # Arguments
    /// * `directory` - The mod folder
    /// * `copy_dir` - Write output here instead of rewriting in place
    /// * `config` - Asset path prefixes for generated entries
    ///
    /// # Errors
    /// Returns an error if the mod's documents cannot be read or written.
    pub fn apply(
        self,
        directory: &Path,
        copy_dir: Option<&Path>,
        config: &PatchConfig,
    ) -> Result<PatchReport> {
        match self {
            Self::ContentPatcher => patch_content_pack(directory, copy_dir, config),
            Self::ShopTileFramework => patch_shop_tile_pack(directory, copy_dir, config),
        }
    }
}

impl fmt::Display for ModType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

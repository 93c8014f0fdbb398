//! # PortraitPatcher
//!
//! Converts PyTK-based HD portrait mods for Stardew Valley into mods that
//! use HD Portraits.
//!
//! ## What gets rewritten
//!
//! - **content.json** - every `Portraits/<Name>` entry becomes an
//!   `EditImage` + `Load` pair targeting HD Portraits' asset paths
//! - **Sidecars** - each `<image>.pytk.json` produces an `<image>.json` with
//!   the absolute portrait size
//! - **manifest.json** - the PyTK dependency is swapped for HD Portraits
//!
//! Originals are kept as `.bak` files, and later runs always start from them.
//!
//! ## Quick Start
//!
//! ```no_run
//! use portrait_patcher::prelude::*;
//! use std::path::Path;
//!
//! let mod_dir = Path::new("Mods/Abigail HD");
//! if let Some(mod_type) = ModType::identify_folder(mod_dir) {
//!     let report = mod_type.apply(mod_dir, None, &PatchConfig::default())?;
//!     println!("Rewrote {} portraits", report.entries_rewritten);
//! }
//! # Ok::<(), portrait_patcher::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `portrait-patcher` command-line binary

pub mod batch;
pub mod error;
pub mod formats;
pub mod mod_type;
pub mod patcher;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::batch::{
        BatchPatchResult, ModFolder, OutputMode, PatchPhase, PatchProgress, find_mod_folders,
        patch_mods,
    };
    pub use crate::error::{Error, Result};
    pub use crate::formats::{PortraitMetadata, PytkMetadata};
    pub use crate::mod_type::ModType;
    pub use crate::patcher::{PatchConfig, PatchReport, patch_content_pack, update_dependencies};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::patcher::DEFAULT_EDIT_PREFIX_NAME;

pub mod execute;
pub mod identify;
pub mod patch;

/// Where patched files go
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Rewrite files inside the mod folders (originals kept as .bak)
    Internal,
    /// Write a separate folder structure; most useful with a VFS
    Copy,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert PyTK portrait mods to HD Portraits
    Patch {
        /// Directory containing mod folders, or a single mod folder
        #[arg(short, long)]
        path: PathBuf,

        /// Mode of operation
        #[arg(short, long, value_enum, default_value_t = ModeArg::Internal)]
        mode: ModeArg,

        /// Output directory for copy mode (defaults to "<path>/Patched HD Portraits")
        #[arg(long)]
        copy_dir: Option<PathBuf>,

        /// Prefix on generated EditImage targets; leave alone unless you know why
        #[arg(long, default_value = DEFAULT_EDIT_PREFIX_NAME)]
        prefix: String,

        /// Only print the summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show which framework each mod folder uses
    Identify {
        /// Directory containing mod folders, or a single mod folder
        #[arg(short, long)]
        path: PathBuf,
    },
}

//! Command execution implementations

use super::Commands;
use super::{identify, patch};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Patch {
                path,
                mode,
                copy_dir,
                prefix,
                quiet,
            } => patch::execute(path, *mode, copy_dir.as_deref(), prefix, *quiet),
            Commands::Identify { path } => identify::execute(path),
        }
    }
}

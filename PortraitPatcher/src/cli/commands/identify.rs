//! CLI command for reporting detected mod frameworks

use std::path::Path;

use crate::batch::find_mod_folders;

pub fn execute(path: &Path) -> anyhow::Result<()> {
    if !path.is_dir() {
        anyhow::bail!("{} is not a directory", path.display());
    }

    let folders = find_mod_folders(path);
    if folders.is_empty() {
        println!("No folders found in: {}", path.display());
        return Ok(());
    }

    for folder in &folders {
        let kind = match folder.mod_type {
            Some(mod_type) if mod_type.is_inert() => format!("{mod_type} (not converted)"),
            Some(mod_type) => mod_type.to_string(),
            None => "unrecognized".to_string(),
        };
        println!("  {:<32} {}", kind, folder.path.display());
    }

    Ok(())
}

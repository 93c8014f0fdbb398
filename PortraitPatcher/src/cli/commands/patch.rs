//! CLI command for patching portrait mods

use std::path::Path;
use std::time::Instant;

use console::style;

use crate::batch::{OutputMode, PatchPhase, PatchProgress, patch_mods};
use crate::cli::progress::{GEAR, LOOKING_GLASS, print_done, print_step};
use crate::patcher::PatchConfig;

use super::ModeArg;

pub fn execute(
    path: &Path,
    mode: ModeArg,
    copy_dir: Option<&Path>,
    prefix: &str,
    quiet: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();

    let output_mode = match (mode, copy_dir) {
        (ModeArg::Internal, Some(_)) => {
            anyhow::bail!("--copy-dir is only valid with --mode copy");
        }
        (ModeArg::Internal, None) => OutputMode::InPlace,
        (ModeArg::Copy, Some(dir)) if !dir.is_dir() => {
            anyhow::bail!("{} is not a directory", dir.display());
        }
        (ModeArg::Copy, root) => OutputMode::Copy {
            root: root.map(Path::to_path_buf),
        },
    };
    let config = PatchConfig::with_edit_prefix_name(prefix);

    let result = patch_mods(path, &output_mode, &config, &|progress: &PatchProgress| {
        if quiet {
            return;
        }
        let name = progress.current_file.as_deref().unwrap_or_default();
        match progress.phase {
            PatchPhase::Scanning => {
                println!("{}{} {}", LOOKING_GLASS, progress.phase.as_str(), name);
            }
            PatchPhase::Patching => {
                print_step(progress.current, progress.total, GEAR, name);
            }
            PatchPhase::Complete => {}
        }
    })?;

    if !quiet {
        for line in &result.results {
            println!("  {line}");
        }
        println!();
    }

    println!(
        "{} patched, {} not converted, {} unrecognized, {} failed",
        style(result.success_count).green().bold(),
        result.inert_count,
        result.unrecognized_count,
        style(result.fail_count).red().bold(),
    );
    print_done(start.elapsed());

    if result.fail_count > 0 {
        anyhow::bail!("{} mod(s) failed to patch", result.fail_count);
    }
    Ok(())
}

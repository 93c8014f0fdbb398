//! PortraitPatcher CLI binary

fn main() -> anyhow::Result<()> {
    portrait_patcher::cli::run_cli()
}

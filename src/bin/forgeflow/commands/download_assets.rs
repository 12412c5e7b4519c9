//! `forgeflow download-assets` command

use anyhow::Result;

use crate::cli::DownloadAssetsArgs;
use crate::commands::discover_context;
use forgeflow::ops::assets::download_assets;

pub fn execute(_args: DownloadAssetsArgs) -> Result<()> {
    let ctx = discover_context()?;
    download_assets(&ctx)?;
    eprintln!(
        "    Wrote asset properties -> {}",
        ctx.asset_properties_file().display()
    );
    Ok(())
}

//! `forgeflow gen-patches` command

use anyhow::Result;

use crate::cli::GenPatchesArgs;
use crate::commands::{discover_context, require_file};
use forgeflow::ops::generate_patches::{generate_source_patches, sync_patches};

pub fn execute(args: GenPatchesArgs) -> Result<()> {
    let ctx = discover_context()?;

    for &side in args.side.sides() {
        let original = ctx.split_sources_jar(side);
        require_file(&original, "split")?;

        let patches_jar = ctx.generated_patches_jar(side);
        let count = generate_source_patches(&original, &ctx.sources_dir(side), &patches_jar)?;
        eprintln!(
            "    Generated {} {} patch(es) -> {}",
            count,
            side,
            patches_jar.display()
        );

        if !args.no_sync {
            sync_patches(&patches_jar, &ctx.patches_dir(side))?;
            eprintln!("    Synced -> {}", ctx.patches_dir(side).display());
        }
    }
    Ok(())
}

//! `forgeflow gen-binpatches` command
//!
//! Produces the three binary patch archives (joined, client, server) that
//! ship in the installer and userdev artifacts. All three diff the same
//! dirty jar against a different clean baseline, scoped by the combined
//! source patch set.

use std::path::PathBuf;

use anyhow::Result;
use walkdir::WalkDir;

use crate::cli::GenBinpatchesArgs;
use crate::commands::{discover_context, require_file};
use forgeflow::core::Side;
use forgeflow::ops::binary_patches::generate_binary_patches;
use forgeflow::util::fs;
use forgeflow::PipelineContext;

/// Merge both per-side patch directories into one tree the binary patcher
/// can scope against.
fn combine_patches(ctx: &PipelineContext) -> Result<PathBuf> {
    let combined = ctx.build_dir().join("patches_combined");
    fs::remove_dir_all_if_exists(&combined)?;

    for side in Side::ALL {
        let dir = ctx.patches_dir(side);
        if !dir.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&dir)
                .expect("walked path is under its root");
            let bytes = std::fs::read(entry.path())?;
            fs::write_bytes(&combined.join(relative), &bytes)?;
        }
    }
    Ok(combined)
}

pub fn execute(args: GenBinpatchesArgs) -> Result<()> {
    let ctx = discover_context()?;

    if !args.dirty.is_file() {
        anyhow::bail!("dirty jar does not exist: {}", args.dirty.display());
    }
    let mappings = ctx.merged_mappings();
    require_file(&mappings, "clean-artifacts")?;

    let patches = combine_patches(&ctx)?;

    let baselines = [
        ("joined", ctx.clean_joined_jar(), "clean-artifacts"),
        ("client", ctx.remapped_client_jar(), "remap"),
        ("server", ctx.remapped_server_jar(), "remap"),
    ];
    for (name, clean, produced_by) in baselines {
        require_file(&clean, produced_by)?;
        let output = ctx.binpatches_file(name);
        generate_binary_patches(&ctx, &clean, &args.dirty, &mappings, &patches, &output)?;
        eprintln!("    Wrote {name} binary patches -> {}", output.display());
    }
    Ok(())
}

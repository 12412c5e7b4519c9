//! `forgeflow apply-patches` command

use anyhow::Result;

use crate::cli::ApplyPatchesArgs;
use crate::commands::{discover_context, require_file};
use forgeflow::ops::apply_patches::apply_patches;

pub fn execute(args: ApplyPatchesArgs) -> Result<()> {
    let ctx = discover_context()?;
    let fuzz = args.fuzz.unwrap_or_else(|| ctx.fuzz_window());

    for &side in args.side.sides() {
        let input = ctx.split_sources_jar(side);
        require_file(&input, "split")?;

        let report = apply_patches(
            &input,
            &ctx.patches_dir(side),
            &ctx.patched_sources_jar(side),
            &ctx.rejects_dir(side),
            fuzz,
        )?;
        eprintln!(
            "    Applied {} {} patch(es) -> {}",
            report.files.len(),
            side,
            ctx.patched_sources_jar(side).display()
        );
    }
    Ok(())
}

//! `forgeflow remap` command

use anyhow::Result;

use crate::cli::{DistArg, RemapArgs};
use crate::commands::{discover_context, require_file};
use forgeflow::ops::remap::remap_jar;

pub fn execute(args: RemapArgs) -> Result<()> {
    let ctx = discover_context()?;

    let mappings = ctx.merged_mappings();
    require_file(&mappings, "clean-artifacts")?;

    let mut jobs = Vec::new();
    if matches!(args.dist, DistArg::Client | DistArg::Both) {
        jobs.push((ctx.clean_client_jar(), ctx.remapped_client_jar()));
    }
    if matches!(args.dist, DistArg::Server | DistArg::Both) {
        jobs.push((ctx.clean_server_jar(), ctx.remapped_server_jar()));
    }

    for (input, output) in jobs {
        require_file(&input, "clean-artifacts")?;
        remap_jar(&ctx, &input, &output, &mappings)?;
        eprintln!("    Remapped {} -> {}", input.display(), output.display());
    }
    Ok(())
}

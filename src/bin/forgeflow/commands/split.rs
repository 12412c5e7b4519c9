//! `forgeflow split` command

use anyhow::Result;

use crate::cli::SplitArgs;
use crate::commands::{discover_context, merged_sources_jar, require_file};
use forgeflow::core::Side;
use forgeflow::ops::split_sources::split_merged_sources;

pub fn execute(args: SplitArgs) -> Result<()> {
    let ctx = discover_context()?;

    let input = args.input.unwrap_or_else(|| merged_sources_jar(&ctx));
    require_file(&input, "clean-artifacts")?;

    let counts = split_merged_sources(
        &input,
        &ctx.split_sources_jar(Side::Common),
        &ctx.split_sources_jar(Side::Client),
    )?;
    eprintln!(
        "    Split {} -> {} common / {} client",
        input.display(),
        counts.common,
        counts.client
    );
    Ok(())
}

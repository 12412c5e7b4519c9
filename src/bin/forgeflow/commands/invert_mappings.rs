//! `forgeflow invert-mappings` command

use anyhow::Result;

use crate::cli::InvertMappingsArgs;
use crate::commands::{discover_context, require_file};
use forgeflow::ops::invert_mappings::invert_mapping_file;

pub fn execute(args: InvertMappingsArgs) -> Result<()> {
    let ctx = discover_context()?;

    let input = args.input.unwrap_or_else(|| ctx.merged_mappings());
    require_file(&input, "clean-artifacts")?;
    let output = args.output.unwrap_or_else(|| ctx.inverted_mappings());

    invert_mapping_file(&input, &output)?;
    eprintln!("    Wrote inverted mappings -> {}", output.display());
    Ok(())
}

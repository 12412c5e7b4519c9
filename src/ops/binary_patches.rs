//! Binary patch generation via the external binary-diff tool.
//!
//! The patches-source directory only scopes which packages are eligible,
//! keeping vendor and unmodified packages out of the patch set; the mapping
//! file keys patch records on stable remapped names.

use std::path::Path;

use anyhow::{Context, Result};

use crate::util::process::ProcessBuilder;
use crate::PipelineContext;

const STEP: &str = "binary-patches";

/// Build the binary patcher command line.
pub fn binary_patches_command(
    ctx: &PipelineContext,
    clean_jar: &Path,
    dirty_jar: &Path,
    mappings: &Path,
    patches_dir: &Path,
    output: &Path,
) -> ProcessBuilder {
    ctx.binpatcher_tool()
        .command()
        .arg_path("--clean", clean_jar)
        .arg_path("--dirty", dirty_jar)
        .arg_path("--srg", mappings)
        .arg_path("--patches", patches_dir)
        .arg_path("--output", output)
}

/// Run the binary patch generation step.
pub fn generate_binary_patches(
    ctx: &PipelineContext,
    clean_jar: &Path,
    dirty_jar: &Path,
    mappings: &Path,
    patches_dir: &Path,
    output: &Path,
) -> Result<()> {
    if let Some(parent) = output.parent() {
        ctx.ensure_dir(parent)?;
    }
    binary_patches_command(ctx, clean_jar, dirty_jar, mappings, patches_dir, output)
        .exec_and_check()
        .with_context(|| format!("step `{STEP}` failed for {}", output.display()))?;
    Ok(())
}

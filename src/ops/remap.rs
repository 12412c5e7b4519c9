//! Remap step: rename an obfuscated jar to readable names via the external
//! renaming tool.
//!
//! This step owns only the flag set and argument order; the renaming engine
//! itself is opaque. The fix flags keep annotation defaults, anonymous
//! class ids, source-file attributes and record components consistent with
//! the renamed symbols.

use std::path::Path;

use anyhow::{Context, Result};

use crate::util::process::ProcessBuilder;
use crate::PipelineContext;

const STEP: &str = "remap";

/// Build the renamer command line.
pub fn remap_jar_command(
    ctx: &PipelineContext,
    input_jar: &Path,
    output_jar: &Path,
    mappings: &Path,
) -> ProcessBuilder {
    ctx.renamer_tool()
        .command()
        .arg_path("--input", input_jar)
        .arg_path("--output", output_jar)
        .arg_path("--names", mappings)
        .args(["--ann-fix", "--ids-fix", "--src-fix", "--record-fix"])
}

/// Run the remap step.
pub fn remap_jar(
    ctx: &PipelineContext,
    input_jar: &Path,
    output_jar: &Path,
    mappings: &Path,
) -> Result<()> {
    if let Some(parent) = output_jar.parent() {
        ctx.ensure_dir(parent)?;
    }
    remap_jar_command(ctx, input_jar, output_jar, mappings)
        .exec_and_check()
        .with_context(|| format!("step `{STEP}` failed for {}", input_jar.display()))?;
    Ok(())
}

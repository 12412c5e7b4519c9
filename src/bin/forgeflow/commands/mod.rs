//! Command implementations

use std::path::Path;

use anyhow::Result;
use forgeflow::PipelineContext;

pub mod apply_at;
pub mod apply_patches;
pub mod clean_artifacts;
pub mod download_assets;
pub mod gen_binpatches;
pub mod gen_patches;
pub mod invert_mappings;
pub mod remap;
pub mod setup;
pub mod split;
pub mod write_config;
pub mod write_manifest;

/// Locate the pipeline context from the current working directory.
pub fn discover_context() -> Result<PipelineContext> {
    PipelineContext::discover(&std::env::current_dir()?)
}

/// The merged jar the splitter consumes: the access-transformed jar when the
/// transform step has run, otherwise the joined jar straight from the fetch.
pub fn merged_sources_jar(ctx: &PipelineContext) -> std::path::PathBuf {
    let transformed = ctx.access_transformed_jar();
    if transformed.is_file() {
        transformed
    } else {
        ctx.clean_joined_jar()
    }
}

/// Fail early with a pointed message when a required input jar is missing.
pub fn require_file(path: &Path, produced_by: &str) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!(
            "{} does not exist; run `forgeflow {}` first",
            path.display(),
            produced_by
        );
    }
    Ok(())
}

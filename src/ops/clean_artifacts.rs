//! Fetch step: obtain the clean artifact set from the external runtime.
//!
//! Invokes the NFRT tool once, requesting all four outputs by node id. The
//! outputs are all-or-nothing per invocation; there is no partial-result
//! recovery. A fingerprint of the version descriptor makes re-runs with an
//! unchanged descriptor a no-op.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::ops::StepError;
use crate::util::fs;
use crate::util::process::ProcessBuilder;
use crate::PipelineContext;

const STEP: &str = "clean-artifacts";

/// Result node ids inside the external runtime's step graph.
pub const NODE_STRIPPED_CLIENT: &str = "node.stripClient.output.output";
pub const NODE_STRIPPED_SERVER: &str = "node.stripServer.output.output";
pub const NODE_RENAMED_JOINED: &str = "node.rename.output.output";
pub const NODE_MERGED_MAPPINGS: &str = "node.mergeMappings.output.output";

fn outputs(ctx: &PipelineContext) -> [(&'static str, PathBuf); 4] {
    [
        (NODE_STRIPPED_CLIENT, ctx.clean_client_jar()),
        (NODE_STRIPPED_SERVER, ctx.clean_server_jar()),
        (NODE_RENAMED_JOINED, ctx.clean_joined_jar()),
        (NODE_MERGED_MAPPINGS, ctx.merged_mappings()),
    ]
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Build the fetch command line.
pub fn clean_artifacts_command(ctx: &PipelineContext) -> ProcessBuilder {
    let mut cmd = ctx
        .nfrt_tool()
        .command()
        .arg("run")
        .args(["--neoform", &ctx.versions().neoform_artifact_zip()])
        .args(["--dist", "joined"]);

    // The manifest is advisory: when present it stops the tool from
    // re-downloading artifacts we already resolved.
    let manifest = ctx.artifact_manifest_file();
    if manifest.is_file() {
        cmd = cmd.arg_path("--artifact-manifest", absolute(&manifest));
    }

    for (node, path) in outputs(ctx) {
        cmd = cmd
            .arg("--write-result")
            .arg(format!("{}:{}", node, absolute(&path).display()));
    }

    cmd
}

/// Whether the clean set on disk is already current for the descriptor.
fn is_up_to_date(ctx: &PipelineContext) -> bool {
    let fingerprint = ctx.clean_fingerprint_file();
    if !fingerprint.is_file() {
        return false;
    }
    let stored = std::fs::read_to_string(&fingerprint).unwrap_or_default();
    stored.trim() == ctx.versions().fingerprint()
        && outputs(ctx).iter().all(|(_, path)| path.is_file())
}

/// Run the fetch step.
pub fn create_clean_artifacts(ctx: &PipelineContext) -> Result<()> {
    if is_up_to_date(ctx) {
        tracing::info!("clean artifacts up to date, skipping fetch");
        return Ok(());
    }

    for (_, path) in outputs(ctx) {
        if let Some(parent) = path.parent() {
            ctx.ensure_dir(parent)?;
        }
    }

    clean_artifacts_command(ctx)
        .exec_and_check()
        .with_context(|| format!("step `{STEP}` failed"))?;

    for (_, path) in outputs(ctx) {
        if !path.is_file() {
            return Err(StepError::MissingOutput { step: STEP, path }.into());
        }
    }

    fs::write_string(&ctx.clean_fingerprint_file(), &ctx.versions().fingerprint())?;
    tracing::info!("fetched clean artifact set for {}", ctx.versions().neoform_version());
    Ok(())
}

//! `forgeflow clean-artifacts` command

use anyhow::Result;

use crate::cli::CleanArtifactsArgs;
use crate::commands::discover_context;
use forgeflow::ops::clean_artifacts::create_clean_artifacts;

pub fn execute(args: CleanArtifactsArgs) -> Result<()> {
    let ctx = discover_context()?;

    if args.force {
        let fingerprint = ctx.clean_fingerprint_file();
        if fingerprint.is_file() {
            std::fs::remove_file(&fingerprint)?;
        }
    }

    create_clean_artifacts(&ctx)
}

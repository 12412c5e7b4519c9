//! `forgeflow write-manifest` command

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::cli::WriteManifestArgs;
use crate::commands::discover_context;
use forgeflow::core::manifest::ArtifactManifest;

pub fn execute(args: WriteManifestArgs) -> Result<()> {
    let ctx = discover_context()?;

    let mut manifest = ArtifactManifest::new();
    for entry in &args.entries {
        let Some((coordinate, path)) = entry.split_once('=') else {
            bail!("malformed --entry `{entry}`, expected `coordinate=path`");
        };
        manifest.insert_raw(coordinate.trim(), PathBuf::from(path.trim()));
    }

    let path = ctx.artifact_manifest_file();
    manifest.write(&path)?;
    eprintln!(
        "    Wrote {} manifest entr{} -> {}",
        manifest.len(),
        if manifest.len() == 1 { "y" } else { "ies" },
        path.display()
    );
    Ok(())
}

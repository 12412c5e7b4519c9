//! Asset metadata download via the external runtime.

use anyhow::{Context, Result};

use crate::util::process::ProcessBuilder;
use crate::PipelineContext;

const STEP: &str = "download-assets";

/// Build the asset download command line.
pub fn download_assets_command(ctx: &PipelineContext) -> ProcessBuilder {
    let mut cmd = ctx
        .nfrt_tool()
        .command()
        .arg("download-assets")
        .args(["--neoform", &ctx.versions().neoform_artifact_zip()]);

    let manifest = ctx.artifact_manifest_file();
    if manifest.is_file() {
        cmd = cmd.arg_path("--artifact-manifest", &manifest);
    }

    cmd.arg_path("--write-properties", ctx.asset_properties_file())
}

/// Run the asset download step.
pub fn download_assets(ctx: &PipelineContext) -> Result<()> {
    ctx.ensure_dir(&ctx.build_dir())?;
    download_assets_command(ctx)
        .exec_and_check()
        .with_context(|| format!("step `{STEP}` failed"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::config::PipelineConfig;
    use tempfile::TempDir;

    #[test]
    fn test_command_contract() {
        let config: PipelineConfig = toml::from_str(
            r#"
            [versions]
            minecraft = "1.20.1"
            neoform = "20230612.114412"
            fml = "47.1.0"
            neoforge = "20.1.100"
            "#,
        )
        .unwrap();
        let tmp = TempDir::new().unwrap();
        let ctx = PipelineContext::new(tmp.path().to_path_buf(), config);

        let args = download_assets_command(&ctx).get_args().to_vec();
        assert_eq!(args[0], "download-assets");
        assert_eq!(args[1], "--neoform");
        assert_eq!(args[2], "net.neoforged:neoform:1.20.1-20230612.114412@zip");
        assert_eq!(args[3], "--write-properties");
        assert!(args[4].ends_with("minecraft_assets.properties"));
    }
}

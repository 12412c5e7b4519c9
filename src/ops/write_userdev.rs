//! Userdev descriptor write step.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::userdev::UserDevConfig;
use crate::util::fs;
use crate::PipelineContext;

/// Assemble and write the userdev (or neodev) descriptor. Returns the
/// output path.
pub fn write_userdev_config(ctx: &PipelineContext, for_neodev: bool) -> Result<PathBuf> {
    let config = UserDevConfig::build(ctx.versions(), &ctx.config().userdev, for_neodev);
    let json = config
        .to_json()
        .context("failed to serialize userdev config")?;

    let path = ctx.userdev_config_file(for_neodev);
    fs::write_string(&path, &json)
        .with_context(|| format!("failed to write userdev config: {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::config::PipelineConfig;
    use tempfile::TempDir;

    #[test]
    fn test_write_both_flavors() {
        let config: PipelineConfig = toml::from_str(
            r#"
            [versions]
            minecraft = "1.20.1"
            neoform = "20230612.114412"
            fml = "47.1.0"
            neoforge = "20.1.100"

            [userdev]
            ignore = ["securejarhandler-2.1.10.jar", "client-extra"]
            "#,
        )
        .unwrap();
        let tmp = TempDir::new().unwrap();
        let ctx = PipelineContext::new(tmp.path().to_path_buf(), config);

        let userdev = write_userdev_config(&ctx, false).unwrap();
        let neodev = write_userdev_config(&ctx, true).unwrap();
        assert!(userdev.ends_with("userdev-config.json"));
        assert!(neodev.ends_with("neodev-config.json"));

        let text = std::fs::read_to_string(&userdev).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["spec"], 2);
        assert_eq!(
            parsed["runs"]["client"]["props"]["ignoreList"],
            "securejarhandler-2.1.10.jar,client-extra"
        );
        assert_eq!(parsed["runs"]["client"]["jvmArgs"][0], "-p");
        assert_eq!(parsed["runs"]["client"]["jvmArgs"][1], "{modules}");
    }
}

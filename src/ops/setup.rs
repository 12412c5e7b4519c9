//! Setup orchestration: fetch, transform, split, patch and extract into the
//! working source tree.
//!
//! The pipeline is sequential; each step completes fully before a dependent
//! step starts, and every step communicates with the next exclusively
//! through files at the context's agreed paths.

use std::path::Path;

use anyhow::Result;

use crate::core::Side;
use crate::ops::{access_transform, apply_patches, clean_artifacts, split_sources};
use crate::util::archive::read_jar;
use crate::util::fs;
use crate::PipelineContext;

/// Extract a jar into a directory, replacing its previous contents (sync
/// semantics: stale files from earlier runs do not survive).
pub fn extract_jar(jar: &Path, dest: &Path) -> Result<usize> {
    fs::remove_dir_all_if_exists(dest)?;
    let entries = read_jar(jar)?;
    let count = entries.len();
    for entry in entries {
        fs::write_bytes(&dest.join(&entry.name), &entry.bytes)?;
    }
    Ok(count)
}

/// Run the full source setup: clean artifacts, access transform, split,
/// patch apply per side, extraction into the maintained source dirs.
///
/// `libraries` is the classpath context for the access transformer. When no
/// access transformer file exists the transform step is skipped and the
/// joined jar feeds the splitter directly.
pub fn setup(ctx: &PipelineContext, libraries: &[impl AsRef<Path>]) -> Result<()> {
    clean_artifacts::create_clean_artifacts(ctx)?;

    let at_file = ctx.access_transformer_file();
    let merged_jar = if at_file.is_file() {
        let output = ctx.access_transformed_jar();
        access_transform::apply_access_transformer(
            ctx,
            &ctx.clean_joined_jar(),
            &at_file,
            libraries,
            &output,
        )?;
        output
    } else {
        tracing::info!("no access transformer at {}, skipping", at_file.display());
        ctx.clean_joined_jar()
    };

    split_sources::split_merged_sources(
        &merged_jar,
        &ctx.split_sources_jar(Side::Common),
        &ctx.split_sources_jar(Side::Client),
    )?;

    for side in Side::ALL {
        apply_patches::apply_patches(
            &ctx.split_sources_jar(side),
            &ctx.patches_dir(side),
            &ctx.patched_sources_jar(side),
            &ctx.rejects_dir(side),
            ctx.fuzz_window(),
        )?;
        let count = extract_jar(&ctx.patched_sources_jar(side), &ctx.sources_dir(side))?;
        tracing::info!("extracted {} {} source file(s)", count, side);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::archive::write_jar;
    use tempfile::TempDir;

    #[test]
    fn test_extract_jar_replaces_existing() {
        let tmp = TempDir::new().unwrap();
        let jar = tmp.path().join("src.jar");
        write_jar(&jar, [("net/Foo.java", b"class Foo {}\n".as_slice())]).unwrap();

        let dest = tmp.path().join("out");
        fs::write_string(&dest.join("stale/Old.java"), "class Old {}\n").unwrap();

        let count = extract_jar(&jar, &dest).unwrap();
        assert_eq!(count, 1);
        assert!(dest.join("net/Foo.java").is_file());
        assert!(!dest.join("stale/Old.java").exists());
    }
}

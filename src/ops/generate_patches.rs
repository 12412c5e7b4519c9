//! Patch generation step: derive the patch set from the diff between an
//! original jar and the maintained (hand-edited) source tree.
//!
//! This is the reverse of the apply step and closes the round-trip loop:
//! patches generated here are what a future apply run consumes. Output is
//! canonical and byte-reproducible so regenerating against unchanged
//! sources is a no-op in version control.

use std::path::Path;

use anyhow::{Context, Result};

use crate::ops::apply_patches::PATCH_EXTENSION;
use crate::patch::{generate, unified};
use crate::util::archive::{read_jar, JarWriter};
use crate::util::fs;

/// Generate `.patch` entries into `patches_jar` for every file that differs
/// between `original_jar` and `modified_dir`. Returns the number of patch
/// files written.
///
/// Identical files produce no patch file; the comparison is on raw bytes,
/// so binary resources that pass through the pipeline unchanged never get
/// decoded. A differing or deleted entry that is not valid UTF-8 cannot be
/// expressed as a textual patch and is skipped with a warning. Files added
/// to the tree have no original to diff against and are not part of the
/// patch set.
pub fn generate_source_patches(
    original_jar: &Path,
    modified_dir: &Path,
    patches_jar: &Path,
) -> Result<usize> {
    let mut writer = JarWriter::create(patches_jar)?;
    let mut count = 0;

    for entry in read_jar(original_jar)? {
        let modified_path = modified_dir.join(&entry.name);
        let modified_bytes = if modified_path.is_file() {
            let bytes = std::fs::read(&modified_path)
                .with_context(|| format!("failed to read {}", modified_path.display()))?;
            if bytes == entry.bytes {
                continue;
            }
            Some(bytes)
        } else {
            None
        };

        let Ok(original) = String::from_utf8(entry.bytes) else {
            tracing::warn!("skipping binary entry: {}", entry.name);
            continue;
        };

        let patch = match modified_bytes {
            Some(bytes) => {
                let modified = String::from_utf8(bytes).with_context(|| {
                    format!("modified file is not valid UTF-8: {}", modified_path.display())
                })?;
                match generate::generate_patch(&entry.name, &original, &modified) {
                    Some(patch) => patch,
                    None => continue,
                }
            }
            None => generate::generate_deletion(&entry.name, &original),
        };

        let rendered = unified::format(&patch);
        writer.add(
            &format!("{}.{PATCH_EXTENSION}", entry.name),
            rendered.as_bytes(),
        )?;
        count += 1;
    }

    writer.finish()?;
    tracing::info!("generated {} patch(es)", count);
    Ok(count)
}

/// Replace the contents of `patches_dir` with the patch files from
/// `patches_jar` (the copy half of patch regeneration).
pub fn sync_patches(patches_jar: &Path, patches_dir: &Path) -> Result<()> {
    fs::remove_dir_all_if_exists(patches_dir)?;
    for entry in read_jar(patches_jar)? {
        fs::write_bytes(&patches_dir.join(&entry.name), &entry.bytes)?;
    }
    Ok(())
}

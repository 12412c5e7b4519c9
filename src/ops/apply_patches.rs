//! Patch apply step: apply a directory of `.patch` files onto a jar of
//! original sources.
//!
//! Every patch in the set is attempted even after failures, so one run
//! reports the complete reject list. The patched jar is written regardless;
//! the step then fails with a summary if anything was rejected.

use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use walkdir::WalkDir;

use crate::ops::StepError;
use crate::patch::{apply, unified, PatchOutcome, PatchSetReport};
use crate::util::archive::{read_jar, JarWriter};
use crate::util::fs;

/// Patch file extension convention.
pub const PATCH_EXTENSION: &str = "patch";
/// Reject artifact extension convention.
pub const REJECT_EXTENSION: &str = "rej";

/// Collect `<root>/**/*.patch`, sorted by relative path for a stable
/// processing order.
fn collect_patch_files(root: &Path) -> Result<Vec<(String, std::path::PathBuf)>> {
    let mut files = Vec::new();
    if !root.is_dir() {
        return Ok(files);
    }
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(PATCH_EXTENSION) {
            continue;
        }
        let relative = fs::relative_path(root, path);
        let target = fs::entry_name(&relative);
        let target = target
            .strip_suffix(&format!(".{PATCH_EXTENSION}"))
            .unwrap_or(&target)
            .to_string();
        files.push((target, path.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

/// Apply the patch set under `patches_dir` to `original_jar`, writing the
/// patched jar and any `.rej` artifacts.
///
/// Per-file state machine: `Unprocessed -> Parsed -> {Applied |
/// AppliedWithOffset | Rejected}`. Terminal states only; a failed file is
/// reported, not retried.
pub fn apply_patches(
    original_jar: &Path,
    patches_dir: &Path,
    patched_jar: &Path,
    rejects_dir: &Path,
    fuzz_window: usize,
) -> Result<PatchSetReport> {
    let mut entries: IndexMap<String, Option<Vec<u8>>> = read_jar(original_jar)?
        .into_iter()
        .map(|e| (e.name, Some(e.bytes)))
        .collect();

    let mut report = PatchSetReport::default();

    for (target, patch_path) in collect_patch_files(patches_dir)? {
        let text = fs::read_to_string(&patch_path)?;
        let patch = match unified::parse(&text) {
            Ok(patch) => patch,
            // A malformed file must not stop the pass: the step's contract
            // is one run, complete reject list.
            Err(err) => {
                tracing::warn!("failed to parse {}: {}", patch_path.display(), err);
                fs::write_string(
                    &rejects_dir.join(format!("{target}.{REJECT_EXTENSION}")),
                    &format!("# failed to parse patch for {target}: {err}\n"),
                )?;
                report.record(target, PatchOutcome::Rejected);
                continue;
            }
        };

        let original = match entries.get(&target) {
            Some(Some(bytes)) => String::from_utf8(bytes.clone()).with_context(|| {
                format!("patch target is not valid UTF-8: {target}")
            })?,
            // New-file patches start from an empty original.
            _ if patch.hunks.iter().all(|h| h.old_count == 0) => String::new(),
            _ => {
                tracing::warn!("patch target missing from jar: {}", target);
                write_reject(rejects_dir, &target, &patch, fuzz_window)?;
                report.record(target, PatchOutcome::Rejected);
                continue;
            }
        };

        let result = apply::apply_patch(&original, &patch, fuzz_window);
        match result.outcome {
            PatchOutcome::Applied => {}
            PatchOutcome::AppliedWithOffset(offset) => {
                tracing::warn!("{} applied with offset {}", target, offset);
            }
            PatchOutcome::Rejected => {
                let rendered = apply::render_rejects(
                    &target,
                    patch.hunks.len(),
                    &result.rejects,
                    fuzz_window,
                );
                fs::write_string(
                    &rejects_dir.join(format!("{target}.{REJECT_EXTENSION}")),
                    &rendered,
                )?;
            }
        }

        if patch.is_deletion() {
            entries.insert(target.clone(), None);
        } else {
            entries.insert(target.clone(), Some(result.text.into_bytes()));
        }
        report.record(target, result.outcome);
    }

    let mut writer = JarWriter::create(patched_jar)?;
    for (name, bytes) in &entries {
        if let Some(bytes) = bytes {
            writer.add(name, bytes)?;
        }
    }
    writer.finish()?;

    if !report.is_clean() {
        bail!(StepError::PatchesRejected {
            count: report.rejected_count(),
            rejects_dir: rejects_dir.to_path_buf(),
            files: report.rejected().iter().map(|s| s.to_string()).collect(),
        });
    }

    tracing::info!("applied {} patch(es)", report.files.len());
    Ok(report)
}

fn write_reject(rejects_dir: &Path, target: &str, patch: &unified::Patch, window: usize) -> Result<()> {
    let rejects: Vec<_> = patch
        .hunks
        .iter()
        .enumerate()
        .map(|(i, hunk)| apply::RejectedHunk {
            index: i + 1,
            expected_line: hunk.old_start,
            hunk: hunk.clone(),
        })
        .collect();
    let rendered = apply::render_rejects(target, patch.hunks.len(), &rejects, window);
    fs::write_string(
        &rejects_dir.join(format!("{target}.{REJECT_EXTENSION}")),
        &rendered,
    )
}

//! Patch generation: line diff between an original file and its maintained
//! counterpart, rendered through the canonical unified-diff formatter.

use similar::{ChangeTag, DiffOp, TextDiff};

use super::unified::{Hunk, LineKind, Patch, PatchLine, DEV_NULL};

/// Context lines kept on each side of a change.
const CONTEXT_LINES: usize = 3;

fn patch_line(kind: LineKind, value: &str) -> PatchLine {
    let no_newline = !value.ends_with('\n');
    PatchLine {
        kind,
        text: value.trim_end_matches('\n').to_string(),
        no_newline,
    }
}

fn build_hunk(diff: &TextDiff<'_, '_, '_, str>, group: &[DiffOp]) -> Hunk {
    let mut lines = Vec::new();
    for op in group {
        for change in diff.iter_changes(op) {
            let kind = match change.tag() {
                ChangeTag::Equal => LineKind::Context,
                ChangeTag::Insert => LineKind::Add,
                ChangeTag::Delete => LineKind::Remove,
            };
            lines.push(patch_line(kind, change.value()));
        }
    }

    let old_count = lines.iter().filter(|l| l.kind != LineKind::Add).count();
    let new_count = lines.iter().filter(|l| l.kind != LineKind::Remove).count();
    let old_range = group.first().map(|op| op.old_range()).unwrap_or(0..0);
    let new_range = group.first().map(|op| op.new_range()).unwrap_or(0..0);

    Hunk {
        // 1-based starts; a zero count states the line after which the
        // change applies, which is the 0-based boundary itself.
        old_start: if old_count == 0 { old_range.start } else { old_range.start + 1 },
        old_count,
        new_start: if new_count == 0 { new_range.start } else { new_range.start + 1 },
        new_count,
        lines,
    }
}

/// Compute the patch turning `old` into `new`, keyed by `path`.
///
/// Returns `None` when the contents are identical: unchanged files produce
/// no patch file at all, not an empty one. Repeated generation over
/// unchanged inputs is byte-identical.
pub fn generate_patch(path: &str, old: &str, new: &str) -> Option<Patch> {
    if old == new {
        return None;
    }

    let diff = TextDiff::from_lines(old, new);
    let hunks: Vec<Hunk> = diff
        .grouped_ops(CONTEXT_LINES)
        .iter()
        .map(|group| build_hunk(&diff, group))
        .collect();

    if hunks.is_empty() {
        return None;
    }

    Some(Patch {
        old_path: path.to_string(),
        new_path: path.to_string(),
        hunks,
    })
}

/// Build the delete-marker patch for a file removed from the maintained
/// tree.
pub fn generate_deletion(path: &str, old: &str) -> Patch {
    let diff = TextDiff::from_lines(old, "");
    let hunks = diff
        .grouped_ops(CONTEXT_LINES)
        .iter()
        .map(|group| build_hunk(&diff, group))
        .collect();

    Patch {
        old_path: path.to_string(),
        new_path: DEV_NULL.to_string(),
        hunks,
    }
}

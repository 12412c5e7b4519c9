//! Fuzzy patch application.
//!
//! Hunks are applied in order against the original file's line vector. Each
//! hunk's stated position is adjusted by the cumulative line delta of the
//! hunks applied before it, then probed at offsets `0, +1, -1, ...` up to
//! the configured window. Context and removal lines must match exactly; a
//! hunk that matches nowhere in the window is rejected, never applied at a
//! wrong position.

use super::unified::{Hunk, Patch, PatchLine};
use super::{unified, PatchOutcome};

/// A hunk that found no match inside the search window.
#[derive(Debug, Clone)]
pub struct RejectedHunk {
    /// 1-based hunk index within the patch.
    pub index: usize,
    /// The stated old-file start line.
    pub expected_line: usize,
    pub hunk: Hunk,
}

/// Result of applying one patch to one file.
#[derive(Debug)]
pub struct ApplyReport {
    /// The patched text. Matched hunks are applied even when others were
    /// rejected, so a maintainer can inspect the partial result.
    pub text: String,
    pub outcome: PatchOutcome,
    pub rejects: Vec<RejectedHunk>,
}

/// Split into lines without terminators, remembering whether the text ended
/// with a newline.
fn split_lines(text: &str) -> (Vec<String>, bool) {
    if text.is_empty() {
        return (Vec::new(), true);
    }
    let trailing = text.ends_with('\n');
    let body = if trailing { &text[..text.len() - 1] } else { text };
    (body.split('\n').map(String::from).collect(), trailing)
}

fn join_lines(lines: &[String], trailing: bool) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    if trailing {
        out.push('\n');
    }
    out
}

/// Probe for the hunk's old lines around `expected`, nearest offset first.
fn find_match(lines: &[String], old: &[&PatchLine], expected: isize, window: usize) -> Option<usize> {
    let fits = |pos: isize| -> bool {
        pos >= 0 && (pos as usize) + old.len() <= lines.len()
    };
    let matches = |pos: usize| -> bool {
        old.iter()
            .enumerate()
            .all(|(i, line)| lines[pos + i] == line.text)
    };

    for magnitude in 0..=window as isize {
        for offset in [magnitude, -magnitude] {
            let candidate = expected + offset;
            if fits(candidate) && matches(candidate as usize) {
                return Some(candidate as usize);
            }
            if magnitude == 0 {
                break;
            }
        }
    }
    None
}

/// Apply a parsed patch against the original text.
pub fn apply_patch(original: &str, patch: &Patch, fuzz_window: usize) -> ApplyReport {
    let (mut lines, mut trailing) = split_lines(original);
    let mut delta: isize = 0;
    let mut max_offset: isize = 0;
    let mut rejects = Vec::new();

    for (i, hunk) in patch.hunks.iter().enumerate() {
        let old: Vec<&PatchLine> = hunk.old_lines().collect();
        let new: Vec<&PatchLine> = hunk.new_lines().collect();

        // Hunk positions are 1-based; a zero old_count hunk states the line
        // *after* which to insert, which is already the 0-based index.
        let stated: isize = if hunk.old_count == 0 {
            hunk.old_start as isize
        } else {
            hunk.old_start as isize - 1
        };
        let expected = stated + delta;

        let found = if old.is_empty() {
            // Pure insertion has no context to probe for.
            Some(expected.clamp(0, lines.len() as isize) as usize)
        } else {
            find_match(&lines, &old, expected, fuzz_window)
        };

        let Some(pos) = found else {
            tracing::debug!(
                "hunk {} of {} rejected (expected near line {})",
                i + 1,
                patch.old_path,
                hunk.old_start
            );
            rejects.push(RejectedHunk {
                index: i + 1,
                expected_line: hunk.old_start,
                hunk: hunk.clone(),
            });
            continue;
        };

        let offset = pos as isize - expected;
        if offset.abs() > max_offset.abs() {
            max_offset = offset;
        }

        let end = pos + old.len();
        let covered_end = end == lines.len();
        lines.splice(pos..end, new.iter().map(|l| l.text.clone()));
        delta += new.len() as isize - old.len() as isize;

        if covered_end {
            // The hunk rewrote through end of file, so its last line now
            // decides whether the file ends with a newline.
            trailing = new.last().map(|l| !l.no_newline).unwrap_or(true);
        }
    }

    let outcome = if !rejects.is_empty() {
        PatchOutcome::Rejected
    } else if max_offset != 0 {
        PatchOutcome::AppliedWithOffset(max_offset)
    } else {
        PatchOutcome::Applied
    };

    ApplyReport {
        text: join_lines(&lines, trailing),
        outcome,
        rejects,
    }
}

/// Render the `.rej` artifact for a file: a diagnostic header plus every
/// unapplied hunk in canonical form.
pub fn render_rejects(path: &str, total_hunks: usize, rejects: &[RejectedHunk], window: usize) -> String {
    let mut out = format!(
        "# {} of {} hunk(s) failed to apply to {}\n",
        rejects.len(),
        total_hunks,
        path
    );
    for reject in rejects {
        out.push_str(&format!(
            "# hunk #{} expected near line {}, searched within {} line(s)\n",
            reject.index, reject.expected_line, window
        ));
        unified::format_hunk(&reject.hunk, &mut out);
    }
    out
}

//! Textual patch engine: unified-diff parsing, fuzzy application and
//! generation.
//!
//! Patches are the persistent delta between clean upstream sources and the
//! maintained tree. Apply tolerates bounded line-offset drift between
//! upstream releases; generate produces canonical, byte-reproducible patch
//! files so regeneration against unchanged sources is a no-op in version
//! control.

pub mod apply;
pub mod generate;
pub mod unified;

use thiserror::Error;

pub use apply::{apply_patch, ApplyReport};
pub use generate::generate_patch;
pub use unified::{Hunk, LineKind, Patch, PatchLine};

/// Error while parsing or applying a patch file.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("patch has no `---`/`+++` file header")]
    MissingHeader,

    #[error("malformed hunk header on line {line}: `{text}`")]
    MalformedHunkHeader { line: usize, text: String },

    #[error("unexpected line {line} in hunk body: `{text}`")]
    UnexpectedLine { line: usize, text: String },

    #[error("hunk starting on line {line} is truncated")]
    TruncatedHunk { line: usize },
}

/// Terminal per-file outcome of an apply run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Every hunk matched at its stated position.
    Applied,
    /// Every hunk matched, at least one at a shifted position; the payload
    /// is the largest absolute offset used.
    AppliedWithOffset(isize),
    /// At least one hunk found no match inside the search window.
    Rejected,
}

/// Summary of one apply run over a whole patch set.
#[derive(Debug, Default)]
pub struct PatchSetReport {
    /// Per-file outcomes, in processing order.
    pub files: Vec<(String, PatchOutcome)>,
}

impl PatchSetReport {
    pub fn record(&mut self, path: impl Into<String>, outcome: PatchOutcome) {
        self.files.push((path.into(), outcome));
    }

    /// Paths of all rejected files.
    pub fn rejected(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|(_, o)| *o == PatchOutcome::Rejected)
            .map(|(p, _)| p.as_str())
            .collect()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected().len()
    }

    pub fn is_clean(&self) -> bool {
        self.rejected_count() == 0
    }
}

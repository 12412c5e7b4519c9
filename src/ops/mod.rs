//! Pipeline step implementations.
//!
//! One module per step. Every step takes the immutable [`PipelineContext`]
//! plus explicit input/output paths, reads its inputs and writes a disjoint
//! output set. Steps wrapping external tools expose a pure `*_command`
//! function for the argument contract and a `run`-style function that
//! executes it, so orchestration logic stays testable without the tools.
//!
//! [`PipelineContext`]: crate::PipelineContext

pub mod access_transform;
pub mod apply_patches;
pub mod assets;
pub mod binary_patches;
pub mod clean_artifacts;
pub mod generate_patches;
pub mod invert_mappings;
pub mod remap;
pub mod setup;
pub mod split_sources;
pub mod write_userdev;

use std::path::PathBuf;

use thiserror::Error;

/// Failures with dedicated semantics beyond a wrapped tool's non-zero exit
/// (those surface as contextualized process errors).
#[derive(Debug, Error)]
pub enum StepError {
    /// The external tool exited zero but a declared output file is missing.
    /// The clean artifact set is all-or-nothing, so this aborts the run.
    #[error("step `{step}` did not produce declared output: {path}")]
    MissingOutput { step: &'static str, path: PathBuf },

    /// One or more patch files could not be applied. Every patch was still
    /// attempted; the rejects were persisted for inspection.
    #[error("{count} patch file(s) rejected, rejects written to {rejects_dir}: {files:?}")]
    PatchesRejected {
        count: usize,
        rejects_dir: PathBuf,
        files: Vec<String>,
    },
}
